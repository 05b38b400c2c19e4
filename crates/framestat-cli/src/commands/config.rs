use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use framestat_core::config::AnalysisConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Folder to put in the generated config
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Write the config here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Emit a default analysis config as TOML, ready to edit and pass to `batch --config`.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let mut config = AnalysisConfig::default();
    if let Some(ref folder) = args.folder {
        config.folder = folder.clone();
    }
    let text = config.to_toml_string()?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{text}"),
    }

    Ok(())
}
