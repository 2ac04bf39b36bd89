//! Schedule document loading and saving.
//!
//! The document is written once by the authoring tool and read at process
//! start.  It is JSON by default (`school_schedule.json` in the working
//! directory); files ending in `.yaml` / `.yml` are read as YAML with the
//! same layout.  See [`document`] for the field list.
//!
//! Loading is all-or-nothing: a document that fails to parse or breaks any
//! rule in [`validate`] is rejected as a whole.

pub mod document;
pub mod error;
pub mod validate;

pub use document::{LunchEntry, PeriodEntry, ScheduleDocument};
pub use error::{ConfigError, ValidationError};

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::schedule::Schedule;
use crate::timeline::clock::format_hhmm;

/// Where the authoring tool writes the document, relative to the working
/// directory.
pub const DEFAULT_SCHEDULE_PATH: &str = "school_schedule.json";

// ── Format detection ──────────────────────────────────────────────────────────

/// On-disk encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` (any case) → YAML, anything else → JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }

    /// Parse `content` into a raw [`ScheduleDocument`].
    pub fn parse(self, content: &str) -> Result<ScheduleDocument, String> {
        match self {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Serialize a document.  JSON uses the authoring tool's 4-space indent.
    pub fn render(self, doc: &ScheduleDocument) -> Result<String, String> {
        match self {
            DocumentFormat::Json => {
                let mut buf = Vec::new();
                let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
                serde::Serialize::serialize(doc, &mut ser).map_err(|e| e.to_string())?;
                String::from_utf8(buf).map_err(|e| e.to_string())
            }
            DocumentFormat::Yaml => serde_yaml::to_string(doc).map_err(|e| e.to_string()),
        }
    }
}

// ── ScheduleLoader ────────────────────────────────────────────────────────────

/// Reads, validates and writes schedule documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Read and validate the document at `path`.
    ///
    /// # Errors
    /// * [`ConfigError::Missing`] – nothing at `path`.
    /// * [`ConfigError::Io`] – the file exists but cannot be read.
    /// * [`ConfigError::Parse`] – syntax or field-type error.
    /// * [`ConfigError::Invalid`] – one or more schedule rules broken.
    pub fn load_from_file(path: &Path) -> Result<Schedule, ConfigError> {
        info!("Loading schedule document from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let schedule = Self::load_from_str(&content, DocumentFormat::from_path(path)).map_err(
            |e| match e {
                ConfigError::Parse { message, .. } => ConfigError::Parse {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            },
        )?;

        info!(
            school = schedule.school_name(),
            start = %format_hhmm(schedule.start()),
            end = %format_hhmm(schedule.end()),
            homeroom = schedule.homeroom().is_some(),
            periods = schedule.periods().len(),
            "Successfully loaded schedule"
        );
        if let Some(hr) = schedule.homeroom() {
            debug!("  Homeroom: {} ({} min)", hr.name, hr.duration_minutes);
        }
        for p in schedule.periods() {
            debug!("  Period {}: {} ({} min)", p.number, p.name, p.duration_minutes);
        }

        Ok(schedule)
    }

    /// Parse and validate an in-memory document.
    pub fn load_from_str(content: &str, format: DocumentFormat) -> Result<Schedule, ConfigError> {
        let doc = format.parse(content).map_err(|message| ConfigError::Parse {
            path: Default::default(),
            message,
        })?;
        Schedule::try_from(doc)
    }

    /// Write `schedule` to `path`, in the format implied by its extension.
    pub fn save_to_file(schedule: &Schedule, path: &Path) -> Result<(), ConfigError> {
        let format = DocumentFormat::from_path(path);
        let body = format
            .render(&ScheduleDocument::from(schedule))
            .map_err(|message| ConfigError::Serialize {
                path: path.to_path_buf(),
                message,
            })?;

        std::fs::write(path, body).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Schedule written to {}", path.display());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
