use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use iterm2terminal::{Settings, ThemeConverter};

/// Convert iTerm2 color schemes (.itermcolors) into Terminal.app profiles (.terminal)
#[derive(Parser)]
#[command(name = "iterm2terminal", about, version)]
struct Cli {
    /// iTerm2 color scheme files to convert. Every argument is a path, even one starting with '-'
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    files: Vec<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load();

    let converter = match ThemeConverter::with_settings(cli.files, settings) {
        Ok(converter) => converter,
        Err(err) => {
            println!("Error: {}", err);
            return;
        }
    };

    let summary = converter.run();
    for failed in &summary.failures {
        tracing::debug!(file = %failed.file.display(), error = ?failed.error, "conversion failed");
    }
}
