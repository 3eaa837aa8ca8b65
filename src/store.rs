//! Note persistence
//!
//! Stores the note in a single JSON file.
//! Location: the platform user data directory (see [`default_data_dir`]),
//! file `note_config.json`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::NoteError;
use crate::note::Note;
use crate::settings::Settings;

/// Application folder name inside the user data directory
pub const APP_NAME: &str = "SelfNoteData";
/// Vendor folder; only Windows nests the app folder under it
pub const APP_AUTHOR: &str = "SelfNote";
/// Note document file name
pub const NOTE_FILE_NAME: &str = "note_config.json";

/// Per-user data directory for the app
///
/// - Windows: `%LOCALAPPDATA%\SelfNote\SelfNoteData`
/// - macOS:   `~/Library/Application Support/SelfNoteData`
/// - Linux:   `~/.local/share/SelfNoteData`
pub fn default_data_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        dirs::data_local_dir().map(|p| p.join(APP_AUTHOR).join(APP_NAME))
    } else {
        dirs::data_dir().map(|p| p.join(APP_NAME))
    }
}

/// Data directory honouring a settings override
pub fn data_dir_for(settings: &Settings) -> Result<PathBuf, NoteError> {
    settings
        .data_dir
        .clone()
        .or_else(default_data_dir)
        .ok_or(NoteError::NoDataDir)
}

/// Where `selfnote.log` goes, or `None` when logging is switched off
///
/// Falls back to the executable's directory when no data directory exists.
pub fn log_dir_for(settings: &Settings) -> Option<PathBuf> {
    if !settings.logging {
        return None;
    }
    Some(data_dir_for(settings).unwrap_or_else(|_| crate::log::exe_dir()))
}

/// Reads and writes the note document
#[derive(Clone, Debug)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    /// Store backed by a specific file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the data directory, creating the directory if needed
    pub fn open_default(settings: &Settings) -> Result<Self, NoteError> {
        let dir = data_dir_for(settings)?;
        fs::create_dir_all(&dir)?;
        Ok(Self::new(dir.join(NOTE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the note; any failure yields the defaults
    pub fn load(&self) -> Note {
        match self.try_load() {
            Ok(note) => {
                log!(
                    "Loaded note from {:?} ({} chars, geometry={:?}, pinned={})",
                    self.path,
                    note.content.chars().count(),
                    note.geometry,
                    note.pinned
                );
                note
            }
            Err(NoteError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log!("No note at {:?} yet, using defaults", self.path);
                Note::default()
            }
            Err(e) => {
                log!("Failed to read note {:?}: {}, using defaults", self.path, e);
                Note::default()
            }
        }
    }

    /// Load the note, reporting IO failures
    ///
    /// Malformed content is not an error; it yields defaults field by field.
    pub fn try_load(&self) -> Result<Note, NoteError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(Note::from_json_str(&content))
    }

    /// Write the note, creating the parent directory if needed
    pub fn save(&self, note: &Note) -> Result<(), NoteError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = note.to_json_string()?;
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        log!("Saved note to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Geometry;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::new(dir.path().join(NOTE_FILE_NAME));
        let note = Note {
            content: "hello\nworld".to_string(),
            geometry: Some(Geometry::new(40, 50, 320, 240)),
            pinned: true,
        };

        store.save(&note).unwrap();
        assert_eq!(store.load(), note);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("nope.json"));

        assert!(matches!(store.try_load(), Err(NoteError::Io(_))));
        assert_eq!(store.load(), Note::default());
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join(NOTE_FILE_NAME);
        let store = NoteStore::new(&path);

        store.save(&Note::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_settings_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            data_dir: Some(dir.path().join("notes")),
            ..Settings::default()
        };

        let store = NoteStore::open_default(&settings).unwrap();
        assert_eq!(store.path(), dir.path().join("notes").join(NOTE_FILE_NAME));
        assert!(dir.path().join("notes").is_dir());
    }

    #[test]
    fn test_default_data_dir_ends_with_app_name() {
        if let Some(dir) = default_data_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_log_dir_follows_logging_flag() {
        let settings = Settings {
            data_dir: Some(PathBuf::from("notes")),
            logging: false,
            ..Settings::default()
        };
        assert_eq!(log_dir_for(&settings), None);

        let settings = Settings {
            logging: true,
            ..settings
        };
        assert_eq!(log_dir_for(&settings), Some(PathBuf::from("notes")));
    }
}
