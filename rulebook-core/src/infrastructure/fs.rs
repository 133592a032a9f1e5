use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Write a rendered artifact through a temporary file in the target directory,
/// then rename it into place. Readers never observe a half-written report.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    // Same directory so the final rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file.persist(path).map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Creates `dir` (and parents). Returns `true` when it did not exist before.
pub fn ensure_dir(dir: &Path) -> Result<bool, InfrastructureError> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_replaces_previous_report() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("index.html");

        atomic_write(&file_path, "<p>first</p>")?;
        atomic_write(&file_path, "<p>second</p>")?;

        assert_eq!(fs::read_to_string(&file_path)?, "<p>second</p>");
        let leftovers = fs::read_dir(dir.path())?.count();
        assert_eq!(leftovers, 1);
        Ok(())
    }

    #[test]
    fn test_ensure_dir_reports_creation_once() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("report/narrative");

        assert!(ensure_dir(&target)?);
        assert!(!ensure_dir(&target)?);
        assert!(target.is_dir());
        Ok(())
    }
}
