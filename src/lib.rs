//! Convert iTerm2 `.itermcolors` themes into Terminal.app `.terminal` profiles.

pub mod config;
pub mod convert;

pub use config::Settings;
pub use convert::error::ConvertError;
pub use convert::{RunSummary, ThemeConverter};
