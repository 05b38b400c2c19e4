use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use framestat_core::io::folder::list_images;

#[derive(Args)]
pub struct ListArgs {
    /// Folder to scan
    pub folder: PathBuf,

    /// Sort by file name instead of filesystem order
    #[arg(long)]
    pub sorted: bool,
}

pub fn run(args: &ListArgs) -> Result<()> {
    let paths = list_images(&args.folder, args.sorted);
    for path in &paths {
        println!("{}", path.display());
    }
    if paths.is_empty() {
        eprintln!("No bmp/jpg/jpeg/png files in {}", args.folder.display());
    }
    Ok(())
}
