use std::{
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::ConfigError, templates};

const DEFAULT_OUTPUT_DIR: &str = "site";

/// Configuration for a tabdoc documentation build.
///
/// Fields are loaded from a TOML or JSON config file and can be overridden
/// with `--config KEY=VALUE` flags or the CLI arguments of `tabdoc build`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory containing the markdown sources.
  pub input_dir: Option<PathBuf>,

  /// Directory the rendered documentation is written to.
  pub output_dir: PathBuf,

  /// Extensions of files rendered through the template environment.
  pub extensions: Vec<String>,

  /// Whether files that are not rendered are copied to the output.
  pub copy_assets: bool,

  /// Variables exposed to every page.
  pub extra: Map<String, Value>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_dir:   None,
      output_dir:  PathBuf::from(DEFAULT_OUTPUT_DIR),
      extensions:  vec!["md".to_string()],
      copy_assets: true,
      extra:       Map::new(),
    }
  }
}

/// The values one config file sets.
///
/// Fields the file leaves out stay [`None`], so merging a layer only touches
/// what the file actually spells out, even when it restates a default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
  pub input_dir:   Option<PathBuf>,
  pub output_dir:  Option<PathBuf>,
  pub extensions:  Option<Vec<String>>,
  pub copy_assets: Option<bool>,
  pub extra:       Map<String, Value>,
}

impl ConfigLayer {
  /// Parse a TOML or JSON config file, picked by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if its
  /// extension is neither `toml` nor `json`.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    match path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .as_deref()
    {
      Some("json") => {
        serde_json::from_str(&content).map_err(|source| {
          ConfigError::Json {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|source| {
          ConfigError::Toml {
            path: path.to_path_buf(),
            source,
          }
        })
      },
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }
}

impl Config {
  /// Load configuration from a single TOML or JSON file on top of the
  /// defaults.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if its
  /// extension is neither `toml` nor `json`.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let mut config = Self::default();
    config.merge(ConfigLayer::from_file(path)?);
    Ok(config)
  }

  /// Build the effective configuration.
  ///
  /// Explicit config files are merged in order over the defaults. Without
  /// any, a config file is searched for in the usual locations, and defaults
  /// are used when none is found. `KEY=VALUE` overrides are applied last.
  ///
  /// # Errors
  ///
  /// Returns an error if a config file cannot be loaded or an override is
  /// invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if config_files.is_empty() {
      if let Some(discovered) = Self::find_config_file() {
        log::info!("Using discovered config file: {}", discovered.display());
        config.merge(ConfigLayer::from_file(&discovered)?);
      } else {
        log::debug!("No config file found, using defaults");
      }
    } else {
      for config_path in config_files {
        config.merge(ConfigLayer::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
    }

    config.apply_overrides(config_overrides)?;
    Ok(config)
  }

  /// Merge one config file's values into this config.
  ///
  /// - `input_dir`, `output_dir` and `copy_assets` are replaced whenever the
  ///   layer sets them
  /// - `extensions` are appended, skipping duplicates
  /// - `extra` entries are merged key by key
  pub fn merge(&mut self, layer: ConfigLayer) {
    if layer.input_dir.is_some() {
      self.input_dir = layer.input_dir;
    }

    if let Some(output_dir) = layer.output_dir {
      self.output_dir = output_dir;
    }

    if let Some(copy_assets) = layer.copy_assets {
      self.copy_assets = copy_assets;
    }

    for ext in layer.extensions.into_iter().flatten() {
      if !self.extensions.contains(&ext) {
        self.extensions.push(ext);
      }
    }

    self.extra.extend(layer.extra);
  }

  /// Apply configuration overrides from `KEY=VALUE` strings.
  ///
  /// Recognized keys are `input_dir`, `output_dir`, `copy_assets`,
  /// `extensions` (comma separated) and `extra.<name>`.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in `KEY=VALUE` format, the key is
  /// unknown, or the value cannot be parsed.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
      "input_dir" => {
        self.input_dir = (!value.is_empty()).then(|| PathBuf::from(value));
      },
      "output_dir" => {
        if value.is_empty() {
          return Err(ConfigError::Config(
            "output_dir cannot be empty".to_string(),
          ));
        }
        self.output_dir = PathBuf::from(value);
      },
      "copy_assets" => self.copy_assets = parse_bool(key, value)?,
      "extensions" => {
        let extensions: Vec<String> = value
          .split(',')
          .map(|ext| ext.trim().trim_start_matches('.').to_string())
          .filter(|ext| !ext.is_empty())
          .collect();
        if extensions.is_empty() {
          return Err(ConfigError::Config(
            "extensions must list at least one extension".to_string(),
          ));
        }
        self.extensions = extensions;
      },
      _ => {
        match key.strip_prefix("extra.") {
          Some(name) if !name.is_empty() => {
            self
              .extra
              .insert(name.to_string(), Value::String(value.to_string()));
          },
          _ => {
            return Err(ConfigError::Config(format!(
              "Unknown configuration key: '{key}'"
            )));
          },
        }
      },
    }

    Ok(())
  }

  /// Whether a file is rendered through the template environment rather
  /// than copied.
  #[must_use]
  pub fn is_template_source(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| {
        self.extensions.iter().any(|candidate| {
          candidate
            .trim_start_matches('.')
            .eq_ignore_ascii_case(ext)
        })
      })
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let config_filenames = [
          "tabdoc.toml",
          "tabdoc.json",
          ".tabdoc.toml",
          ".tabdoc.json",
          ".config/tabdoc.toml",
          ".config/tabdoc.json",
        ];

        let current_dir = std::env::current_dir().ok()?;
        for filename in &config_filenames {
          let config_path = current_dir.join(filename);
          if config_path.exists() {
            return Some(config_path);
          }
        }

        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
          let xdg_config_dir = PathBuf::from(xdg_config_home).join("tabdoc");
          for filename in &["config.toml", "config.json"] {
            let config_path = xdg_config_dir.join(filename);
            if config_path.exists() {
              return Some(config_path);
            }
          }
        }

        None
      })
      .clone()
  }

  /// Validate all paths specified in the configuration
  ///
  /// # Errors
  ///
  /// Returns an error listing every configured path that does not exist or
  /// has the wrong type.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    match self.input_dir {
      Some(ref input_dir) if !input_dir.exists() => {
        errors.push(format!(
          "Input directory does not exist: {}",
          input_dir.display()
        ));
      },
      Some(ref input_dir) if !input_dir.is_dir() => {
        errors.push(format!(
          "Input path is not a directory: {}",
          input_dir.display()
        ));
      },
      Some(_) => {},
      None => errors.push("No input directory configured".to_string()),
    }

    if self.output_dir.exists() && !self.output_dir.is_dir() {
      errors.push(format!(
        "Output path is not a directory: {}",
        self.output_dir.display()
      ));
    }

    if self.output_is_input() {
      errors.push(format!(
        "Output directory is the same as the input directory: {}",
        self.output_dir.display()
      ));
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Config(errors.join("\n")))
    }
  }

  /// Whether the output directory resolves to the input directory. Both
  /// have to exist to compare equal.
  #[must_use]
  pub fn output_is_input(&self) -> bool {
    if let Some(ref input_dir) = self.input_dir
      && let Ok(input_dir) = input_dir.canonicalize()
      && let Ok(output_dir) = self.output_dir.canonicalize()
    {
      input_dir == output_dir
    } else {
      false
    }
  }

  /// Write the default configuration in the given format.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = templates::get_template(format)?;
    fs::write(path, config_content)?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'"
      )))
    },
  }
}
