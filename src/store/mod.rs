//! Flat-file artifact store for meeting records.
//!
//! One folder per meeting under a single root, named by timestamp key.
//! Inside each folder: the uploaded audio under its original filename,
//! plus up to three text fields (`transcript.txt`, `title.txt`,
//! `summary.txt`). Missing field files mean "not yet computed" and read
//! back as `None`; nothing here ever deletes a record.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub mod key;

pub use key::MeetingKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("'{0}' is not a valid meeting key (expected YYYY_MM_DD_HH_MM_SS)")]
    MalformedKey(String),
    #[error("no audio file found for meeting {0}")]
    MissingAudio(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Named text fields of a meeting record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Transcript,
    Title,
    Summary,
}

impl Field {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Transcript => "transcript.txt",
            Self::Title => "title.txt",
            Self::Summary => "summary.txt",
        }
    }

    const RESERVED: [&'static str; 3] = ["transcript.txt", "title.txt", "summary.txt"];
}

/// One row of the meeting listing.
#[derive(Debug, Clone)]
pub struct MeetingEntry {
    pub key: MeetingKey,
    pub label: String,
}

pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a meeting folder keyed by the current wall-clock second.
    ///
    /// A second call within the same second lands on the same folder;
    /// that collision is deliberately unhandled.
    pub fn create_meeting(&self) -> Result<MeetingKey, StoreError> {
        let key = MeetingKey::now();
        std::fs::create_dir_all(self.meeting_dir(&key))?;
        debug!("Created meeting folder {}", key);
        Ok(key)
    }

    pub fn meeting_dir(&self, key: &MeetingKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    /// Read a text field. Absent file is `None`; a present-but-empty file
    /// reads as `Some("")`, so callers can tell "not yet computed" apart
    /// from "computed empty".
    pub fn read_field(&self, key: &MeetingKey, field: Field) -> Result<Option<String>, StoreError> {
        let path = self.meeting_dir(key).join(field.file_name());
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Read a text field for display, collapsing "absent" to `""`.
    pub fn read_text(&self, key: &MeetingKey, field: Field) -> Result<String, StoreError> {
        Ok(self.read_field(key, field)?.unwrap_or_default())
    }

    /// Overwrite a text field. Not atomic; a crash mid-write can leave a
    /// partial file (accepted risk).
    pub fn write_field(
        &self,
        key: &MeetingKey,
        field: Field,
        content: &str,
    ) -> Result<(), StoreError> {
        let path = self.meeting_dir(key).join(field.file_name());
        std::fs::write(&path, content)?;
        debug!("Wrote {} for meeting {}", field.file_name(), key);
        Ok(())
    }

    pub fn has_field(&self, key: &MeetingKey, field: Field) -> bool {
        self.meeting_dir(key).join(field.file_name()).exists()
    }

    /// Persist the raw upload under its original filename.
    pub fn write_audio(
        &self,
        key: &MeetingKey,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StoreError> {
        // Only the final path component; upload names are not trusted paths.
        let name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_name.to_string());

        let path = self.meeting_dir(key).join(name);
        std::fs::write(&path, bytes)?;
        debug!("Wrote {} audio bytes to {:?}", bytes.len(), path);
        Ok(path)
    }

    /// Locate the audio file: the one folder entry that is not a reserved
    /// field file. Errors when the folder holds no such entry.
    pub fn audio_path(&self, key: &MeetingKey) -> Result<PathBuf, StoreError> {
        let dir = self.meeting_dir(key);
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !Field::RESERVED.contains(&name.as_str()) {
                return Ok(entry.path());
            }
        }
        Err(StoreError::MissingAudio(key.to_string()))
    }

    pub fn has_audio(&self, key: &MeetingKey) -> bool {
        self.audio_path(key).is_ok()
    }

    /// Read the audio file back as (original filename, raw bytes).
    pub fn read_audio(&self, key: &MeetingKey) -> Result<(String, Vec<u8>), StoreError> {
        let path = self.audio_path(key)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let bytes = std::fs::read(&path)?;
        Ok((name, bytes))
    }

    /// List meeting records, most recent first.
    ///
    /// Every child directory of the root must parse as a meeting key; a
    /// folder that does not is a taxonomy violation and aborts the whole
    /// listing. Labels carry the title as a ` - {title}` suffix when one
    /// has been saved.
    pub fn list(&self) -> Result<Vec<MeetingEntry>, StoreError> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            keys.push(name.parse::<MeetingKey>()?);
        }

        keys.sort();
        keys.reverse();

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let mut label = key.label();
            let title = self.read_text(&key, Field::Title)?;
            if !title.is_empty() {
                label.push_str(&format!(" - {title}"));
            }
            entries.push(MeetingEntry { key, label });
        }

        Ok(entries)
    }
}
