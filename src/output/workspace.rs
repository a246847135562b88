use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::output::{index_path, OutputError};

/// Prefix of the scratch directory created next to the output
pub const WORKSPACE_PREFIX: &str = ".ref-reconcile.";

const STAGED_OUTPUT: &str = "output.vcf.gz";
const STAGED_INDEX: &str = "output.vcf.gz.tbi";

/// Scratch directory holding the output and its index until both are complete.
///
/// The directory is removed when the workspace is dropped, whether or not
/// [`Workspace::persist`] was reached.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    output: PathBuf,
    index: PathBuf,
}

impl Workspace {
    /// Check the output targets and create a fresh scratch directory.
    ///
    /// The directory is created in `tmp_dir` if given, otherwise next to
    /// `output`.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::AlreadyExists` if the output or its index exists
    /// and `force` is false, or `OutputError::Workspace` if the scratch
    /// directory cannot be created.
    pub fn prepare(output: &Path, tmp_dir: Option<&Path>, force: bool) -> Result<Self, OutputError> {
        let index = index_path(output);

        if !force {
            for path in [output, index.as_path()] {
                if path.exists() {
                    return Err(OutputError::AlreadyExists {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        let parent = match tmp_dir {
            Some(dir) => dir.to_path_buf(),
            None => output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        };

        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(&parent)
            .map_err(|source| OutputError::Workspace {
                path: parent.clone(),
                source,
            })?;
        debug!("Created workspace {}", dir.path().display());

        Ok(Self {
            dir,
            output: output.to_path_buf(),
            index,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where the compressed VCF is written before it is moved into place
    #[must_use]
    pub fn staged_output(&self) -> PathBuf {
        self.dir.path().join(STAGED_OUTPUT)
    }

    /// Where the index is written before it is moved into place
    #[must_use]
    pub fn staged_index(&self) -> PathBuf {
        self.dir.path().join(STAGED_INDEX)
    }

    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[must_use]
    pub fn index(&self) -> &Path {
        &self.index
    }

    /// Move the staged output and index to their final paths, then remove the
    /// scratch directory
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Io` if either file cannot be moved or the
    /// directory cannot be removed.
    pub fn persist(self) -> Result<(), OutputError> {
        move_file(&self.staged_output(), &self.output)?;
        move_file(&self.staged_index(), &self.index)?;
        self.dir.close()?;
        Ok(())
    }
}

/// Rename, falling back to copy when source and target are on different
/// filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(workspace: &Workspace) {
        fs::write(workspace.staged_output(), b"vcf").unwrap();
        fs::write(workspace.staged_index(), b"tbi").unwrap();
    }

    #[test]
    fn test_persist_moves_files_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("calls.vcf.gz");

        let workspace = Workspace::prepare(&output, None, false).unwrap();
        let scratch = workspace.path().to_path_buf();
        assert!(scratch.starts_with(dir.path()));
        stage(&workspace);
        workspace.persist().unwrap();

        assert_eq!(fs::read(&output).unwrap(), b"vcf");
        assert_eq!(fs::read(dir.path().join("calls.vcf.gz.tbi")).unwrap(), b"tbi");
        assert!(!scratch.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_drop_removes_workspace() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("calls.vcf.gz");

        let workspace = Workspace::prepare(&output, None, false).unwrap();
        let scratch = workspace.path().to_path_buf();
        stage(&workspace);
        drop(workspace);

        assert!(!scratch.exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_existing_output_conflicts() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("calls.vcf.gz");
        fs::write(&output, b"old").unwrap();

        let result = Workspace::prepare(&output, None, false);
        assert!(matches!(result, Err(OutputError::AlreadyExists { path }) if path == output));

        let workspace = Workspace::prepare(&output, None, true).unwrap();
        stage(&workspace);
        workspace.persist().unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"vcf");
    }

    #[test]
    fn test_existing_index_conflicts() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("calls.vcf.gz");
        fs::write(dir.path().join("calls.vcf.gz.tbi"), b"old").unwrap();

        assert!(matches!(
            Workspace::prepare(&output, None, false),
            Err(OutputError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_tmp_dir_used() {
        let dir = TempDir::new().unwrap();
        let scratch_parent = TempDir::new().unwrap();
        let output = dir.path().join("calls.vcf.gz");

        let workspace = Workspace::prepare(&output, Some(scratch_parent.path()), false).unwrap();
        assert!(workspace.path().starts_with(scratch_parent.path()));
        assert_eq!(workspace.output(), output);
        assert_eq!(workspace.index(), dir.path().join("calls.vcf.gz.tbi"));
    }

    #[test]
    fn test_missing_tmp_dir_fails() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("calls.vcf.gz");
        let missing = dir.path().join("nope");

        assert!(matches!(
            Workspace::prepare(&output, Some(&missing), false),
            Err(OutputError::Workspace { .. })
        ));
    }
}
