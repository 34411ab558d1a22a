use std::io;

use color_eyre::eyre::{Context, Result};
use log::{LevelFilter, info};
use tabdoc::{
  cli::{Cli, Commands},
  init,
  render,
  snippet,
};
use tabdoc_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      init::init_config(output, format, *force).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;
      Ok(())
    },

    Commands::Impl {
      gdscript,
      header,
      source,
      output,
    } => {
      let tabs = snippet::format_snippet_files(gdscript, header, source)?;
      snippet::write_tabs(&tabs, output.as_deref(), io::stdout().lock())?;
      Ok(())
    },

    Commands::Build {
      input_dir,
      output_dir,
    } => {
      let mut config = Config::load(&cli.config_files, &cli.config_overrides)?;
      if let Some(input_dir) = input_dir {
        config.input_dir = Some(input_dir.clone());
      }
      if let Some(output_dir) = output_dir {
        config.output_dir.clone_from(output_dir);
      }

      build_documentation(&config)
    },
  }
}

fn build_documentation(config: &Config) -> Result<()> {
  config.validate_paths()?;

  info!("Starting documentation build...");
  let summary = render::build(config).wrap_err("Documentation build failed")?;

  if summary.rendered == 0 {
    log::warn!(
      "No sources with extensions {:?} found",
      config.extensions
    );
  }

  info!(
    "Documentation generated successfully in {}",
    config.output_dir.display()
  );
  Ok(())
}
