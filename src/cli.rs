// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "tilescale")]
#[command(about = "Tiled super-resolution image enhancer", long_about = None)]
pub struct Cli {
    /// Source image to enhance
    pub input: PathBuf,

    /// Where to write the composited result
    #[arg(short, long, default_value = "enhanced.png")]
    pub output: PathBuf,

    /// Upscaling service base URL, e.g. http://localhost:8080
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Maximum patch edge in source pixels
    #[arg(long)]
    pub patch_size: Option<u32>,

    /// Integer scaling factor of the collaborator
    #[arg(long)]
    pub scale: Option<u32>,

    /// JSON run configuration; flags take precedence over its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a second output with the enhanced layer hidden
    #[arg(long, default_value = "false")]
    pub originals_only: bool,
}
