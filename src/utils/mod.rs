//! Shared utilities.

pub mod code_generator;
