use std::{
  fs,
  io::Write,
  path::Path,
};

use log::info;
use tabdoc_snippets::format_impl;

use crate::error::TabdocError;

/// Read a snippet file, dropping the trailing line breaks editors add so
/// they don't end up as blank lines inside the fences.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_snippet(path: &Path) -> Result<String, TabdocError> {
  let content =
    fs::read_to_string(path).map_err(|source| TabdocError::Snippet {
      path: path.to_path_buf(),
      source,
    })?;
  Ok(content.trim_end_matches(['\n', '\r']).to_string())
}

/// Format three snippet files as GDScript / C++ Header / C++ Source tabs.
///
/// # Errors
///
/// Returns an error if any of the files cannot be read.
pub fn format_snippet_files(
  gdscript: &Path,
  header: &Path,
  source: &Path,
) -> Result<String, TabdocError> {
  Ok(format_impl(
    &read_snippet(gdscript)?,
    &read_snippet(header)?,
    &read_snippet(source)?,
  ))
}

/// Write formatted tabs to `output`, or to `fallback` when no output file is
/// given.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_tabs<W: Write>(
  tabs: &str,
  output: Option<&Path>,
  mut fallback: W,
) -> Result<(), TabdocError> {
  if let Some(output) = output {
    fs::write(output, tabs).map_err(|source| TabdocError::Snippet {
      path: output.to_path_buf(),
      source,
    })?;
    info!("Wrote snippet tabs to {}", output.display());
  } else {
    fallback.write_all(tabs.as_bytes())?;
    fallback.flush()?;
  }

  Ok(())
}
