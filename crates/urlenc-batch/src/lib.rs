#![warn(
    rust_2018_idioms,
    nonstandard_style,
    future_incompatible,
    clippy::mod_module_files,
    clippy::print_stdout,
    clippy::print_stderr
)]

//! Batches and the interfaces for moving them between pipeline stages.
//!
//! A stage pulls batches from a [BatchSource] and pushes them into a
//! [BatchSink]. The sink is told when the stream is complete (`finish`) and
//! when its resources may be released (`close`).

mod batch;
mod error;
mod sink;

pub use batch::*;
pub use error::Error;
pub use sink::*;
