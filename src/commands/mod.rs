//! # CLI Command Implementations
//!
//! One module per `modulemd` subcommand. Each holds an `Args` struct derived
//! with `clap` and an `execute` function that calls into the `modulemd`
//! library.

pub mod fmt;
pub mod validate;
