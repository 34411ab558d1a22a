use std::collections::HashMap;

use tera::{Function, Tera, Value};

use crate::{error::SnippetError, format::format_impl};

/// Name the formatter is registered under. Templates call it as
/// `{{ impl(gdscript=..., header=..., source=...) }}`.
pub const IMPL_MACRO: &str = "impl";

const ARGUMENTS: [&str; 3] = ["gdscript", "header", "source"];

/// The three snippets of one `impl` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplSnippets {
  pub gdscript: String,
  pub header:   String,
  pub source:   String,
}

impl ImplSnippets {
  /// Extract the snippets from the keyword arguments of a template call.
  ///
  /// # Errors
  ///
  /// Returns an error if an argument is missing, is not a string, or if an
  /// argument other than `gdscript`, `header` and `source` is supplied.
  pub fn from_args(args: &HashMap<String, Value>) -> Result<Self, SnippetError> {
    if let Some(name) = args
      .keys()
      .find(|name| !ARGUMENTS.contains(&name.as_str()))
    {
      return Err(SnippetError::UnexpectedArgument { name: name.clone() });
    }

    Ok(Self {
      gdscript: string_arg(args, "gdscript")?,
      header:   string_arg(args, "header")?,
      source:   string_arg(args, "source")?,
    })
  }

  #[must_use]
  pub fn render(&self) -> String {
    format_impl(&self.gdscript, &self.header, &self.source)
  }
}

fn string_arg(
  args: &HashMap<String, Value>,
  name: &'static str,
) -> Result<String, SnippetError> {
  match args.get(name) {
    Some(Value::String(value)) => Ok(value.clone()),
    Some(other) => {
      Err(SnippetError::InvalidArgument {
        name,
        found: type_name(other),
      })
    },
    None => Err(SnippetError::MissingArgument { name }),
  }
}

const fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

/// Tera function wrapping [`format_impl`].
///
/// The output is markdown, so it is marked safe and never escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplMacro;

impl Function for ImplMacro {
  fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let snippets = ImplSnippets::from_args(args).map_err(|e| {
      tera::Error::chain(format!("Invalid call to `{IMPL_MACRO}`"), e)
    })?;
    Ok(Value::String(snippets.render()))
  }

  fn is_safe(&self) -> bool {
    true
  }
}

/// Attach the snippet macros to a template environment.
pub fn register(tera: &mut Tera) {
  tera.register_function(IMPL_MACRO, ImplMacro);
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use serde_json::json;

  use super::*;

  fn args(value: &Value) -> HashMap<String, Value> {
    value
      .as_object()
      .unwrap()
      .iter()
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  }

  #[test]
  fn test_from_args() {
    let snippets = ImplSnippets::from_args(&args(&json!({
      "gdscript": "var x = 1",
      "header": "void f();",
      "source": "void f() {}",
    })))
    .unwrap();

    assert_eq!(snippets.gdscript, "var x = 1");
    assert_eq!(snippets.header, "void f();");
    assert_eq!(snippets.source, "void f() {}");
  }

  #[test]
  fn test_missing_argument() {
    let err = ImplSnippets::from_args(&args(&json!({
      "gdscript": "",
      "source": "",
    })))
    .unwrap_err();

    assert_eq!(err, SnippetError::MissingArgument { name: "header" });
  }

  #[test]
  fn test_non_string_argument() {
    let err = ImplSnippets::from_args(&args(&json!({
      "gdscript": 1,
      "header": "",
      "source": "",
    })))
    .unwrap_err();

    assert_eq!(err, SnippetError::InvalidArgument {
      name:  "gdscript",
      found: "a number",
    });
    assert_eq!(
      err.to_string(),
      "argument `gdscript` must be a string, got a number"
    );
  }

  #[test]
  fn test_unexpected_argument() {
    let err = ImplSnippets::from_args(&args(&json!({
      "gdscript": "",
      "header": "",
      "source": "",
      "csharp": "",
    })))
    .unwrap_err();

    assert_eq!(err, SnippetError::UnexpectedArgument {
      name: "csharp".to_string(),
    });
  }

  #[test]
  fn test_function_call_matches_formatter() {
    let value = ImplMacro
      .call(&args(&json!({
        "gdscript": "var x = 1",
        "header": "void f();",
        "source": "void f() {}",
      })))
      .unwrap();

    assert_eq!(
      value,
      Value::String(format_impl("var x = 1", "void f();", "void f() {}"))
    );
    assert!(ImplMacro.is_safe());
  }
}
