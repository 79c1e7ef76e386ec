pub mod archive;
pub mod error;
pub mod keymap;
pub mod naming;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use plist::{Dictionary, Value};

use crate::config::{OutputFormat, Settings};
use archive::CalibratedRgb;
use error::ConvertError;

const PROFILE_TYPE: &str = "Window Settings";
const PROFILE_VERSION: f64 = 2.04;

const RED_COMPONENT: &str = "Red Component";
const GREEN_COMPONENT: &str = "Green Component";
const BLUE_COMPONENT: &str = "Blue Component";

/// Mode for a freshly created profile, before the umask
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// A file that could not be converted
#[derive(Debug)]
pub struct FailedFile {
    pub file: PathBuf,
    pub error: ConvertError,
}

/// Per-file outcome of a run (converted destinations, failures in input order)
#[derive(Debug, Default)]
pub struct RunSummary {
    pub converted: Vec<PathBuf>,
    pub failures: Vec<FailedFile>,
}

/// Converts iTerm2 `.itermcolors` files into Terminal.app `.terminal` profiles.
pub struct ThemeConverter {
    files: Vec<PathBuf>,
    settings: Settings,
}

impl ThemeConverter {
    pub fn new(files: Vec<PathBuf>) -> Result<Self, ConvertError> {
        Self::with_settings(files, Settings::default())
    }

    pub fn with_settings(files: Vec<PathBuf>, settings: Settings) -> Result<Self, ConvertError> {
        if files.is_empty() {
            return Err(ConvertError::NoArguments);
        }
        Ok(Self { files, settings })
    }

    /// Convert every file relative to the current working directory,
    /// reporting progress on stdout.
    pub fn run(&self) -> RunSummary {
        let workdir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.run_in(&workdir, &mut io::stdout().lock())
    }

    /// Convert every file in order. A failing file gets one `Error: ` line on
    /// `out` and is skipped; it never stops the remaining files.
    pub fn run_in<W: Write>(&self, workdir: &Path, out: &mut W) -> RunSummary {
        let mut summary = RunSummary::default();

        for file in &self.files {
            let src = naming::resolve_source(workdir, file);
            let result = match naming::theme_name(&src) {
                Some(theme) => {
                    let dest = naming::destination_path(workdir, &self.settings.output_dir, &theme);
                    self.convert(&theme, &src, &dest, out).map(|()| dest)
                }
                None => Err(ConvertError::UnableToLoadSourceFile(src)),
            };

            match result {
                Ok(dest) => summary.converted.push(dest),
                Err(error) => {
                    report(out, format_args!("Error: {}", error));
                    summary.failures.push(FailedFile { file: file.clone(), error });
                }
            }
        }

        tracing::info!(
            converted = summary.converted.len(),
            failed = summary.failures.len(),
            "run complete"
        );
        summary
    }

    /// Convert a single theme: load `src`, map its colors, write `dest`.
    pub fn convert<W: Write>(
        &self,
        theme: &str,
        src: &Path,
        dest: &Path,
        out: &mut W,
    ) -> Result<(), ConvertError> {
        let scheme = load_scheme(src)?;

        report(out, format_args!("Converting `{}` -> `{}`...", src.display(), dest.display()));

        let document = build_document(theme, &scheme)?;
        self.write_document(document, dest)
    }

    fn write_document(&self, document: Dictionary, dest: &Path) -> Result<(), ConvertError> {
        let write_err = |source: io::Error| ConvertError::UnableToWriteDestinationFile {
            path: dest.to_path_buf(),
            source,
        };

        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if self.settings.create_output_dir {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        // Atomic write: temp file in the destination directory, then rename
        #[allow(unused_mut)]
        let mut builder = tempfile::Builder::new();
        #[cfg(unix)]
        {
            // Reuse an existing profile's mode, else 0o666; the umask applies either way
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(dest)
                .map(|meta| meta.permissions().mode() & 0o7777)
                .unwrap_or(NEW_FILE_MODE);
            builder.permissions(fs::Permissions::from_mode(mode));
        }
        let mut temp = builder.tempfile_in(dir).map_err(write_err)?;

        let value = Value::Dictionary(document);
        let written = match self.settings.output_format {
            OutputFormat::Xml => value.to_writer_xml(&mut temp),
            OutputFormat::Binary => value.to_writer_binary(&mut temp),
        };
        written.map_err(|e| write_err(io::Error::new(io::ErrorKind::Other, e)))?;
        temp.flush().map_err(write_err)?;

        temp.persist(dest).map_err(|e| write_err(e.error))?;
        tracing::debug!(path = %dest.display(), "wrote profile");
        Ok(())
    }
}

/// Write one report line. A closed or broken output never aborts a conversion.
fn report<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", line) {
        tracing::debug!(error = %e, "failed to write report line");
    }
}

fn load_scheme(src: &Path) -> Result<Dictionary, ConvertError> {
    let value = Value::from_file(src).map_err(|e| {
        tracing::debug!(path = %src.display(), error = %e, "failed to parse property list");
        ConvertError::UnableToLoadSourceFile(src.to_path_buf())
    })?;
    value.into_dictionary().ok_or_else(|| {
        tracing::debug!(path = %src.display(), "top level is not a dictionary");
        ConvertError::UnableToLoadSourceFile(src.to_path_buf())
    })
}

/// Build the Terminal.app profile for `theme` from an iTerm2 color scheme.
/// Unknown keys and malformed colors are skipped.
pub fn build_document(theme: &str, scheme: &Dictionary) -> Result<Dictionary, ConvertError> {
    let mut document = Dictionary::new();
    document.insert("name".to_string(), Value::String(theme.to_string()));
    document.insert("type".to_string(), Value::String(PROFILE_TYPE.to_string()));
    document.insert("ProfileCurrentVersion".to_string(), Value::Real(PROFILE_VERSION));
    document.insert("BackgroundBlur".to_string(), Value::Real(0.0));
    document.insert("DisableANSIColor".to_string(), Value::Boolean(false));

    for (key, value) in scheme.iter() {
        let Some(terminal_key) = keymap::terminal_key(key) else {
            tracing::debug!(key = %key, "skipping unmapped key");
            continue;
        };
        let Some(color) = color_components(value) else {
            tracing::debug!(key = %key, "skipping malformed color");
            continue;
        };

        let data = archive::encode_color(&color).map_err(|source| ConvertError::UnableToEncodeColor {
            key: terminal_key.to_string(),
            source,
        })?;
        document.insert(terminal_key.to_string(), Value::Data(data));
    }

    Ok(document)
}

/// Extract the three channels of an iTerm2 color dictionary.
/// Channels are narrowed to single precision and left unclamped.
fn color_components(value: &Value) -> Option<CalibratedRgb> {
    let dict = value.as_dictionary()?;
    let red = float_value(dict.get(RED_COMPONENT)?)?;
    let green = float_value(dict.get(GREEN_COMPONENT)?)?;
    let blue = float_value(dict.get(BLUE_COMPONENT)?)?;
    Some(CalibratedRgb::opaque(f64::from(red), f64::from(green), f64::from(blue)))
}

/// Any numeric property-list value as f32. Booleans count as 0/1.
fn float_value(value: &Value) -> Option<f32> {
    match value {
        Value::Real(r) => Some(*r as f32),
        Value::Integer(i) => i
            .as_signed()
            .map(|v| v as f32)
            .or_else(|| i.as_unsigned().map(|v| v as f32)),
        Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
