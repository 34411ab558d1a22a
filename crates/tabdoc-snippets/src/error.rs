use thiserror::Error;

/// Error type for snippet macro calls.
///
/// These only describe a template calling a macro with the wrong arguments.
/// Formatting itself cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnippetError {
  #[error("missing argument `{name}`")]
  MissingArgument { name: &'static str },

  #[error("argument `{name}` must be a string, got {found}")]
  InvalidArgument {
    name:  &'static str,
    found: &'static str,
  },

  #[error("unexpected argument `{name}`")]
  UnexpectedArgument { name: String },
}
