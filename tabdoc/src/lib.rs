//! Expose tabdoc's internals for integration testing. The binary is the
//! supported interface.
pub mod cli;
pub mod error;
pub mod init;
pub mod render;
pub mod snippet;
