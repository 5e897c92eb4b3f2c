use anyhow::{Context, Result};
use clap::Parser;

use csvgrid::cli::{apply_options, render, render_matches, CliArgs};
use csvgrid::{Delimiter, EngineConfig, GridSession};

fn main() -> Result<()> {
    csvgrid::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow::anyhow!(e))?;

    let bytes = std::fs::read(&config.file)
        .with_context(|| format!("Failed to read {}", config.file.display()))?;

    let delimiter = config.delimiter.or_else(|| {
        config
            .file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Delimiter::from_extension)
            .filter(|d| *d != Delimiter::Comma)
    });

    let mut session = GridSession::open_bytes(&bytes, delimiter, EngineConfig::load());
    apply_options(&mut session, &config).map_err(|e| anyhow::anyhow!(e))?;

    let output = render(&session, config.format).map_err(|e| anyhow::anyhow!(e))?;
    print!("{}", output);

    if config.search.is_some() {
        let lines = render_matches(&session);
        if lines.is_empty() {
            eprintln!("No matches");
        }
        for line in lines {
            eprintln!("{}", line);
        }
    }

    Ok(())
}
