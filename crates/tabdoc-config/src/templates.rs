use crate::error::ConfigError;

/// Default configuration in TOML, written by `tabdoc init`.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# tabdoc configuration file

# Directory containing the markdown sources
input_dir = "docs"

# Directory the rendered sources are written to
output_dir = "site"

# File extensions rendered through the template environment. Everything else
# is copied as-is.
extensions = ["md"]

# Copy files that are not rendered (images, media, ...) to the output
copy_assets = true

# Values made available to every page as template variables, e.g.
# {{ project }} or {{ godot_version }}
[extra]
# project = "My Godot plugin"
# godot_version = "4.3"
"#;

/// Default configuration in JSON, written by `tabdoc init --format json`.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "input_dir": "docs",
  "output_dir": "site",
  "extensions": ["md"],
  "copy_assets": true,
  "extra": {}
}
"#;

/// Get the default configuration text for a format.
///
/// # Errors
///
/// Returns an error if the format is neither `toml` nor `json`.
pub fn get_template(format: &str) -> Result<&'static str, ConfigError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(ConfigError::UnsupportedFormat(format.to_string())),
  }
}
