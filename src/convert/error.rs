use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("No arguments provided")]
    NoArguments,

    #[error("Unable to load {}", .0.display())]
    UnableToLoadSourceFile(PathBuf),

    #[error("Unable to encode {key}: {source}")]
    UnableToEncodeColor {
        key: String,
        #[source]
        source: plist::Error,
    },

    #[error("Unable to write {}: {source}", path.display())]
    UnableToWriteDestinationFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
