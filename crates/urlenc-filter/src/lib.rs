#![warn(
    rust_2018_idioms,
    nonstandard_style,
    future_incompatible,
    clippy::mod_module_files,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::undocumented_unsafe_blocks
)]

//! Filter stage percent-encoding configured string columns.
//!
//! Setup resolves the configured column names against the input schema once
//! per run, producing a [UrlEncodeTask]. The output schema is always the
//! input schema. Each partition then opens a [UrlEncodeOutput] from the task,
//! which encodes the target columns of every batch it receives and forwards
//! the batch, with all other columns untouched, to the downstream sink.

mod config;
mod error;
mod filter;
mod output;
mod schema;
mod task;
mod transform;

pub use config::*;
pub use error::Error;
pub use filter::*;
pub use output::*;
pub use schema::{resolve_schema, ColumnSpec, ResolvedSchema, TargetColumns};
pub use task::*;
pub use transform::UrlEncode;
pub use urlenc_kernels::EncodingMode;
