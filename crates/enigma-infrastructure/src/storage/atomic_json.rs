//! Atomic JSON file operations.
//!
//! Writes go to a sibling temp file that is fsynced and then renamed over the
//! target, so a crash leaves either the old or the new content on disk.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write as IoWrite};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// Existing content is not valid JSON for the target type.
    ParseError(serde_json::Error),
    /// Value could not be serialized.
    SerializeError(serde_json::Error),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            AtomicJsonError::SerializeError(e) => write!(f, "JSON serialization error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtomicJsonError::IoError(e) => Some(e),
            AtomicJsonError::ParseError(e) | AtomicJsonError::SerializeError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

/// A handle to a JSON file that is replaced atomically on save.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Durability**: Explicit fsync before rename
/// - **Privacy**: On Unix the file is created owner read/write only (0600)
///
/// Does NOT lock across processes. Callers that share a handle between
/// threads must serialize access themselves.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic JSON file handle.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist
    /// - `Err`: Failed to read or parse the file (an empty file is a parse error)
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let data: T = serde_json::from_str(&content).map_err(AtomicJsonError::ParseError)?;
        Ok(Some(data))
    }

    /// Saves data to the file atomically.
    ///
    /// Serialization happens before anything touches the disk, so an encoding
    /// failure leaves the existing file untouched.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        let json = serde_json::to_string_pretty(data).map_err(AtomicJsonError::SerializeError)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            create_private_dir_all(parent)?;
        }

        // Write to temporary file in the same directory
        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = open_private(&tmp_path)?;
        let written = tmp_file
            .write_all(json.as_bytes())
            .and_then(|_| tmp_file.sync_all());
        drop(tmp_file);

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        // Atomic rename
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    /// Gets a temporary file path for atomic writes.
    fn get_temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Creates (or truncates) a file readable and writable only by its owner.
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;

    // `mode` only applies on creation; a stale temp file keeps its old bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}

/// Creates a directory tree accessible only by its owner (0700 on Unix).
pub(crate) fn create_private_dir_all(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.json");
        let atomic_file = AtomicJsonFile::<TestConfig>::new(file_path);

        let config = TestConfig {
            name: "test".to_string(),
            count: 42,
        };

        atomic_file.save(&config).unwrap();

        let loaded = atomic_file.load().unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nonexistent.json");
        let atomic_file = AtomicJsonFile::<TestConfig>::new(file_path);

        let result = atomic_file.load().unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.json");
        fs::write(&file_path, "{ not json").unwrap();
        let atomic_file = AtomicJsonFile::<TestConfig>::new(file_path);

        let result = atomic_file.load();
        assert!(matches!(result, Err(AtomicJsonError::ParseError(_))));
    }

    #[test]
    fn test_load_empty_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.json");
        fs::write(&file_path, "").unwrap();
        let atomic_file = AtomicJsonFile::<TestConfig>::new(file_path);

        assert!(matches!(
            atomic_file.load(),
            Err(AtomicJsonError::ParseError(_))
        ));
    }

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.json");
        let atomic_file = AtomicJsonFile::<TestConfig>::new(file_path.clone());

        let config = TestConfig {
            name: "test".to_string(),
            count: 42,
        };

        atomic_file.save(&config).unwrap();

        // Verify no temp file left behind
        let tmp_path = temp_dir.path().join(".test.json.tmp");
        assert!(!tmp_path.exists());

        assert!(file_path.exists());
    }

    #[test]
    fn test_save_creates_missing_parent() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("dir").join("test.json");
        let atomic_file = AtomicJsonFile::<TestConfig>::new(file_path.clone());

        atomic_file
            .save(&TestConfig {
                name: "nested".to_string(),
                count: 1,
            })
            .unwrap();

        assert!(file_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let atomic_file = AtomicJsonFile::<TestConfig>::new(file_path.clone());

        atomic_file
            .save(&TestConfig {
                name: "secret".to_string(),
                count: 7,
            })
            .unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
