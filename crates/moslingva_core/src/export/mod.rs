//! File exports for UI collaborators.
//!
//! # Responsibility
//! - Write JSON, SVG and PDF artifacts into the configured export directory.
//! - Reduce caller file names to safe basenames with the right extension.
//!
//! # Invariants
//! - Exports never write outside the export directory.
//! - Input is validated before the directory is touched.

use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

mod pdf;

pub use pdf::render_text_pdf;

static UNSAFE_FILE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid file name regex"));

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    /// File name or payload rejected before writing.
    InvalidInput(String),
    Serialize(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid export input: {message}"),
            Self::Serialize(err) => write!(f, "export payload serialization failed: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(_) => None,
            Self::Serialize(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

/// Writes export artifacts below one directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `payload` as pretty-printed JSON.
    pub fn export_json<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        payload: &T,
    ) -> ExportResult<PathBuf> {
        let body = serde_json::to_vec_pretty(payload)?;
        self.write(ExportFormat::Json, file_name, &body)
    }

    /// Writes an already serialized SVG document unchanged.
    pub fn export_svg(&self, vector_document: &str, file_name: &str) -> ExportResult<PathBuf> {
        if !vector_document.trim_start().starts_with("<svg") {
            return Err(ExportError::InvalidInput(
                "vector document must be an <svg> element".to_string(),
            ));
        }
        self.write(ExportFormat::Svg, file_name, vector_document.as_bytes())
    }

    /// Writes `payload` as a single-page text report of its pretty JSON form.
    pub fn export_pdf<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        payload: &T,
    ) -> ExportResult<PathBuf> {
        let text = serde_json::to_string_pretty(payload)?;
        let lines = text.lines().map(str::to_string).collect::<Vec<_>>();
        self.write(ExportFormat::Pdf, file_name, &render_text_pdf(&lines))
    }

    fn write(&self, format: ExportFormat, file_name: &str, body: &[u8]) -> ExportResult<PathBuf> {
        let file_name = sanitize_file_name(file_name, format)?;
        let path = self.dir.join(file_name);

        let result = std::fs::create_dir_all(&self.dir).and_then(|()| std::fs::write(&path, body));
        match result {
            Ok(()) => {
                info!(
                    "event=export module=export status=ok format={} bytes={}",
                    format.extension(),
                    body.len()
                );
                Ok(path)
            }
            Err(source) => {
                error!(
                    "event=export module=export status=error format={} error={}",
                    format.extension(),
                    source
                );
                Err(ExportError::Io { path, source })
            }
        }
    }
}

/// Reduces a caller-supplied name to `[A-Za-z0-9._-]` and forces the format
/// extension. Directory components are dropped.
pub fn sanitize_file_name(file_name: &str, format: ExportFormat) -> ExportResult<String> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned = UNSAFE_FILE_CHARS_RE.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.trim_matches('_').is_empty() {
        return Err(ExportError::InvalidInput(format!(
            "file name `{file_name}` has no usable characters"
        )));
    }

    let extension = format.extension();
    let suffix = format!(".{extension}");
    if cleaned.to_ascii_lowercase().ends_with(&suffix) {
        Ok(cleaned.to_string())
    } else {
        Ok(format!("{cleaned}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_file_name, ExportError, ExportFormat};

    #[test]
    fn sanitize_keeps_safe_names_and_adds_extension() {
        assert_eq!(
            sanitize_file_name("moslingva-B", ExportFormat::Svg).unwrap(),
            "moslingva-B.svg"
        );
        assert_eq!(
            sanitize_file_name("lexicon.JSON", ExportFormat::Json).unwrap(),
            "lexicon.JSON"
        );
    }

    #[test]
    fn sanitize_drops_directories_and_unsafe_characters() {
        assert_eq!(
            sanitize_file_name("../../etc/lexique été", ExportFormat::Pdf).unwrap(),
            "lexique_t_.pdf"
        );
        assert_eq!(
            sanitize_file_name("..\\hidden", ExportFormat::Json).unwrap(),
            "hidden.json"
        );
    }

    #[test]
    fn sanitize_rejects_empty_names() {
        for name in ["", "   ", "///", "..", "éé"] {
            assert!(matches!(
                sanitize_file_name(name, ExportFormat::Json),
                Err(ExportError::InvalidInput(_))
            ));
        }
    }
}
