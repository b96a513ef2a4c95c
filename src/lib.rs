//! End-to-end scenarios for tuish live under `tests/`; this crate has no code of its own.
