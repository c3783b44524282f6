//! Filesystem infrastructure: implements `AliasFileSystem`.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::AliasFileSystem;

/// Production filesystem implementation of `AliasFileSystem`.
pub struct LocalFs;

impl AliasFileSystem for LocalFs {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        write_atomic(path, content)
    }
}

/// Write `content` to a temp file next to `path`, then rename it over `path`.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, written, or renamed.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("writing {}", tmp.path().display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Temp files start out 0600; alias files are ordinary readable files.
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("setting permissions on {}", tmp.path().display()))?;
    }
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("flushing {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("writing file {}", path.display()))?;
    Ok(())
}
