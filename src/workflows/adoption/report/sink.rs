use super::{ReportArtifact, ReportError};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for rendered artifacts. Returns the final location so the
/// caller can report it to the user.
pub trait ReportSink: Debug {
    fn publish(&self, artifact: &ReportArtifact) -> Result<PathBuf, ReportError>;
}

/// Writes artifacts into a directory. The bytes go to a temp file first and
/// are renamed into place, so a failed write never leaves a partial report
/// under the final name.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    dir: PathBuf,
}

impl FileSystemSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FileSystemSink {
    fn publish(&self, artifact: &ReportArtifact) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let final_path = self.dir.join(&artifact.file_name);
        let tmp_path = self.dir.join(format!(".{}.tmp", artifact.file_name));

        if let Err(source) = fs::write(&tmp_path, &artifact.bytes) {
            return Err(ReportError::Write {
                path: tmp_path,
                source,
            });
        }

        if let Err(source) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ReportError::Write {
                path: final_path,
                source,
            });
        }

        Ok(final_path)
    }
}
