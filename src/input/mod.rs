// src/input/mod.rs

//! Input side of the filter.
//!
//! - [`tokenizer`] turns the raw stdin byte stream into file-path [`Token`]s
//!   according to the run's [`DelimitationMode`](crate::types::DelimitationMode).

pub mod tokenizer;

pub use tokenizer::{Token, Tokenizer, is_ascii_space};
