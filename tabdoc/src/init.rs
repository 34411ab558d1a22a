use std::{fs, path::Path};

use log::info;
use tabdoc_config::{Config, ConfigError};

use crate::error::TabdocError;

/// Write the default configuration to `output`, creating missing parent
/// directories.
///
/// # Errors
///
/// Returns an error if `output` exists and `force` is not set, if the format
/// is unsupported, or if the file cannot be written.
pub fn init_config(
  output: &Path,
  format: &str,
  force: bool,
) -> Result<(), TabdocError> {
  if output.exists() && !force {
    return Err(
      ConfigError::Config(format!(
        "Configuration file already exists: {}. Use --force to overwrite.",
        output.display()
      ))
      .into(),
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent)?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output)?;

  info!(
    "Configuration file created successfully. Edit it to point at your \
     documentation sources."
  );
  Ok(())
}
