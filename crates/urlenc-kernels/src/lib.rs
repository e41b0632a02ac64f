//! Defines percent-encoding kernels operating over strings and Arrow arrays.

#![warn(
    rust_2018_idioms,
    nonstandard_style,
    future_incompatible,
    clippy::mod_module_files,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::undocumented_unsafe_blocks
)]
mod encode;
mod url_encode;

pub use encode::*;
pub use url_encode::*;
