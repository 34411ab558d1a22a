use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use log::{debug, info, trace};
use serde_json::{Map, Value};
use tabdoc_config::{Config, ConfigError};
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::error::TabdocError;

/// Template environment used to expand macro calls in markdown sources.
///
/// Holds one [`Tera`] instance with the snippet macros registered, and the
/// `extra` variables from the configuration as the render context.
pub struct Renderer {
  tera:    Tera,
  context: Context,
}

impl Renderer {
  #[must_use]
  pub fn new(extra: &Map<String, Value>) -> Self {
    let mut tera = Tera::default();
    // Sources are markdown; nothing rendered here is HTML-escaped.
    tera.autoescape_on(vec![]);
    tabdoc_snippets::register(&mut tera);

    let mut context = Context::new();
    for (key, value) in extra {
      context.insert(key.as_str(), value);
    }

    Self { tera, context }
  }

  /// Render one markdown source. `name` only identifies the source in
  /// errors.
  ///
  /// # Errors
  ///
  /// Returns an error if the source is not a valid template or a macro call
  /// in it fails.
  pub fn render_str(
    &mut self,
    name: &str,
    content: &str,
  ) -> Result<String, TabdocError> {
    self
      .tera
      .render_str(content, &self.context)
      .map_err(|e| TabdocError::template(name, &e))
  }

  /// Render `input` and write the result to `output`, creating parent
  /// directories as needed.
  ///
  /// # Errors
  ///
  /// Returns an error if the input cannot be read, fails to render, or the
  /// output cannot be written.
  pub fn render_file(
    &mut self,
    input: &Path,
    output: &Path,
  ) -> Result<(), TabdocError> {
    let content = fs::read_to_string(input)?;
    let rendered = self.render_str(&input.display().to_string(), &content)?;

    if let Some(parent) = output.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(output, rendered)?;
    Ok(())
  }
}

/// Counts of what a [`build`] did with each input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
  pub rendered: usize,
  pub copied:   usize,
  pub skipped:  usize,
}

/// Collect all files below `dir`, sorted by path.
///
/// Directories resolving to `exclude` are not descended into, so an output
/// directory nested inside the input is never read back.
///
/// # Errors
///
/// Returns an error if a directory entry cannot be read.
pub fn collect_files(
  dir: &Path,
  exclude: Option<&Path>,
) -> Result<Vec<PathBuf>, TabdocError> {
  let mut files = Vec::new();

  for entry in WalkDir::new(dir)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| {
      exclude.is_none_or(|excluded| {
        !(entry.file_type().is_dir()
          && entry
            .path()
            .canonicalize()
            .is_ok_and(|path| path == excluded))
      })
    })
  {
    let entry = entry?;
    if entry.file_type().is_file() {
      files.push(entry.into_path());
    }
  }

  trace!("Found {} files in {}", files.len(), dir.display());
  Ok(files)
}

/// Render the documentation tree described by `config`.
///
/// Template sources are rendered to the same relative path below the output
/// directory. Other files are copied when `copy_assets` is set and skipped
/// otherwise.
///
/// # Errors
///
/// Returns an error if no input directory is configured, if the output
/// directory is the input directory, or if any file fails to render, copy or
/// write.
pub fn build(config: &Config) -> Result<BuildSummary, TabdocError> {
  let input_dir = config.input_dir.as_deref().ok_or_else(|| {
    ConfigError::Config("No input directory configured".to_string())
  })?;

  fs::create_dir_all(&config.output_dir)?;
  if config.output_is_input() {
    return Err(
      ConfigError::Config(format!(
        "Output directory is the same as the input directory: {}",
        config.output_dir.display()
      ))
      .into(),
    );
  }
  let output_dir = config.output_dir.canonicalize()?;

  let mut renderer = Renderer::new(&config.extra);
  let mut summary = BuildSummary::default();

  for path in collect_files(input_dir, Some(&output_dir))? {
    let rel_path = path.strip_prefix(input_dir).map_err(io::Error::other)?;
    let target = config.output_dir.join(rel_path);

    if config.is_template_source(&path) {
      debug!("Rendering {}", rel_path.display());
      renderer.render_file(&path, &target)?;
      summary.rendered += 1;
    } else if config.copy_assets {
      debug!("Copying {}", rel_path.display());
      if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
      }
      fs::copy(&path, &target)?;
      summary.copied += 1;
    } else {
      trace!("Skipping {}", rel_path.display());
      summary.skipped += 1;
    }
  }

  info!(
    "Rendered {} files, copied {}, skipped {}",
    summary.rendered, summary.copied, summary.skipped
  );
  Ok(summary)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use tabdoc_snippets::format_impl;

  use super::*;

  #[test]
  fn test_render_str_expands_impl() {
    let mut renderer = Renderer::new(&Map::new());
    let rendered = renderer
      .render_str(
        "api.md",
        "## f\n{{ impl(gdscript=\"f()\", header=\"void f();\", \
         source=\"void f() {}\") }}",
      )
      .unwrap();

    assert_eq!(
      rendered,
      format!("## f\n{}", format_impl("f()", "void f();", "void f() {}"))
    );
  }

  #[test]
  fn test_render_str_uses_extra_variables() {
    let mut extra = Map::new();
    extra.insert("project".to_string(), Value::String("xnode".to_string()));
    extra.insert("snippet".to_string(), Value::String("a < b".to_string()));

    let mut renderer = Renderer::new(&extra);
    let rendered = renderer
      .render_str("index.md", "# {{ project }}\n{{ snippet }}")
      .unwrap();

    assert_eq!(rendered, "# xnode\na < b");
  }

  #[test]
  fn test_render_str_error_names_source() {
    let mut renderer = Renderer::new(&Map::new());
    let err = renderer
      .render_str("broken.md", "{{ impl(gdscript=true, header=\"\", source=\"\") }}")
      .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Failed to render broken.md"));
    assert!(message.contains("argument `gdscript` must be a string"));
  }
}
