use std::path::{Path, PathBuf};

pub const EXT: &str = "terminal";

/// Resolve an input path against the working directory.
pub fn resolve_source(workdir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        workdir.join(file)
    }
}

/// Theme name: the file name with its last extension stripped.
/// "/themes/Dracula.itermcolors" -> "Dracula", "Solarized.Dark.itermcolors" -> "Solarized.Dark"
pub fn theme_name(src: &Path) -> Option<String> {
    src.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

/// Destination path: <workdir>/<output_dir>/<theme>.terminal
pub fn destination_path(workdir: &Path, output_dir: &str, theme: &str) -> PathBuf {
    workdir.join(output_dir).join(format!("{}.{}", theme, EXT))
}
