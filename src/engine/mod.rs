// src/engine/mod.rs

//! Dispatch engine.
//!
//! The pure core (display policy, error accumulator, final status) lives in
//! [`core`]; the async IO shell that reads tokens, opens files and drives
//! the launcher is implemented in [`runtime`].

pub mod core;
pub mod runtime;

pub use self::core::{FATAL_EXIT_CODE, FilterCore, RunState, RunStatus, SkipReason, Verdict};
pub use self::runtime::Dispatcher;
