//! Backup-then-replace file writing.
//!
//! Files are rewritten in place using this sequence:
//!
//! 1. Rename `<file>` to `<file><suffix>` (default `.bak`)
//! 2. Read the backup and write the new contents to `<file>`
//! 3. Sync the new file to disk
//! 4. Delete the backup
//!
//! If any step after the rename fails, the backup is left on disk and the
//! returned error names it, so the original contents can always be recovered
//! by hand.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default suffix for backup files.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Errors that can occur while replacing a file.
#[derive(Debug, Error)]
pub enum BackupError {
    /// A backup from an earlier, interrupted run is still present.
    #[error("Backup file already exists: {0}")]
    BackupExists(PathBuf),

    /// Moving the original aside failed; the original is untouched.
    #[error("Failed to move {path} to {backup}: {source}")]
    Rename {
        /// File being replaced.
        path: PathBuf,
        /// Backup destination.
        backup: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// Writing the new contents failed; the original is kept in the backup.
    #[error("Failed to write {path} (original kept at {backup}): {source}")]
    Write {
        /// File being replaced.
        path: PathBuf,
        /// Backup holding the original contents.
        backup: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },

    /// The new file was written but the backup could not be removed.
    #[error("Failed to remove backup {backup}: {source}")]
    Cleanup {
        /// Backup that is still on disk.
        backup: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

/// Returns the backup path for `path`: the full file name with `suffix`
/// appended (`stub.pyi` becomes `stub.pyi.bak`).
#[must_use]
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Replaces `path` by streaming its backup through `rewrite`.
///
/// `rewrite` reads the original contents from the backup and writes the new
/// contents to the file at `path`. File permissions are carried over from the
/// original.
///
/// # Errors
///
/// Returns an error if a backup already exists, if the rename fails, if
/// `rewrite` or the write fails (backup kept), or if the backup cannot be
/// removed afterwards.
pub fn replace_with<F>(path: &Path, suffix: &str, rewrite: F) -> Result<(), BackupError>
where
    F: FnOnce(&mut dyn BufRead, &mut dyn Write) -> io::Result<()>,
{
    let backup = backup_path(path, suffix);
    if backup.exists() {
        return Err(BackupError::BackupExists(backup));
    }

    fs::rename(path, &backup).map_err(|source| BackupError::Rename {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;

    write_from_backup(&backup, path, rewrite).map_err(|source| BackupError::Write {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;

    fs::remove_file(&backup).map_err(|source| BackupError::Cleanup {
        backup: backup.clone(),
        source,
    })?;

    debug!("Replaced {}", path.display());
    Ok(())
}

/// Replaces the contents of `path` with `content`, keeping a backup until the
/// write has succeeded.
///
/// # Errors
///
/// See [`replace_with`].
pub fn replace_with_backup(path: &Path, content: &str, suffix: &str) -> Result<(), BackupError> {
    replace_with(path, suffix, |_, out| out.write_all(content.as_bytes()))
}

fn write_from_backup<F>(backup: &Path, path: &Path, rewrite: F) -> io::Result<()>
where
    F: FnOnce(&mut dyn BufRead, &mut dyn Write) -> io::Result<()>,
{
    let original = File::open(backup)?;
    let permissions = original.metadata()?.permissions();
    let mut reader = BufReader::new(original);

    let mut writer = BufWriter::new(File::create(path)?);
    rewrite(&mut reader, &mut writer)?;

    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()?;
    fs::set_permissions(path, permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/a/stub.pyi"), ".bak"),
            PathBuf::from("/a/stub.pyi.bak")
        );
        assert_eq!(
            backup_path(Path::new("noext"), ".orig"),
            PathBuf::from("noext.orig")
        );
    }

    #[test]
    fn test_replace_with_backup_writes_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("stub.pyi");
        fs::write(&file, "old\n").unwrap();

        replace_with_backup(&file, "new\n", DEFAULT_BACKUP_SUFFIX).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "new\n");
        assert!(!tmp.path().join("stub.pyi.bak").exists());
    }

    #[test]
    fn test_replace_with_streams_original() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("stub.pyi");
        fs::write(&file, "a\nb\n").unwrap();

        replace_with(&file, ".bak", |input, output| {
            for line in input.lines() {
                writeln!(output, "{}!", line?)?;
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "a!\nb!\n");
    }

    #[test]
    fn test_failed_rewrite_keeps_backup() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("stub.pyi");
        fs::write(&file, "precious\n").unwrap();

        let err = replace_with(&file, ".bak", |_, _| {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        })
        .unwrap_err();

        assert!(matches!(err, BackupError::Write { .. }));
        let backup = tmp.path().join("stub.pyi.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "precious\n");
    }

    #[test]
    fn test_existing_backup_is_not_clobbered() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("stub.pyi");
        let backup = tmp.path().join("stub.pyi.bak");
        fs::write(&file, "current\n").unwrap();
        fs::write(&backup, "earlier\n").unwrap();

        let err = replace_with_backup(&file, "new\n", ".bak").unwrap_err();

        assert!(matches!(err, BackupError::BackupExists(_)));
        assert_eq!(fs::read_to_string(&file).unwrap(), "current\n");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "earlier\n");
    }

    #[test]
    fn test_missing_file_is_rename_error() {
        let tmp = TempDir::new().unwrap();
        let err = replace_with_backup(&tmp.path().join("missing.pyi"), "", ".bak").unwrap_err();
        assert!(matches!(err, BackupError::Rename { .. }));
    }
}
