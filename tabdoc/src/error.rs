use std::{io, path::PathBuf};

use tabdoc_config::ConfigError;
use thiserror::Error;

/// Top-level error type for the tabdoc crate.
#[derive(Debug, Error)]
pub enum TabdocError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Failed to render {name}: {message}")]
  Template { name: String, message: String },

  #[error("Snippet file {}: {source}", .path.display())]
  Snippet { path: PathBuf, source: io::Error },

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Failed to walk input directory: {0}")]
  Walk(#[from] walkdir::Error),
}

impl TabdocError {
  /// Build a template error from a tera error, keeping its whole cause
  /// chain. Tera puts the failing call and its cause in the sources, not in
  /// the top-level message.
  #[must_use]
  pub fn template(name: impl Into<String>, err: &tera::Error) -> Self {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
      message.push_str(": ");
      message.push_str(&cause.to_string());
      source = cause.source();
    }

    Self::Template {
      name: name.into(),
      message,
    }
  }
}
