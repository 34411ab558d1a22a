//! Tabbed GDScript / C++ code snippets for markdown documentation.
//!
//! [`format_impl`] is the pure formatter. [`register`] exposes it to a
//! [`tera::Tera`] environment as the `impl` function so documentation sources
//! can call it while they are rendered.
pub mod error;
pub mod format;
pub mod function;

pub use error::SnippetError;
pub use format::format_impl;
pub use function::{IMPL_MACRO, ImplMacro, ImplSnippets, register};
