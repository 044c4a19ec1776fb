//! Write-once `(test, answer)` file pairs into the output directory.

use crate::config::format_index;
use crate::error::TrigenError;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of one written pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenPair {
    pub test: PathBuf,
    pub answer: PathBuf,
}

#[derive(Clone, Debug)]
pub struct CorpusWriter {
    root: PathBuf,
}

impl CorpusWriter {
    /// Create (idempotently) the output directory.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self, TrigenError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| TrigenError::write(&root, e))?;
        Ok(Self { root })
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn paths(&self, test_template: &str, ans_template: &str, index: usize) -> WrittenPair {
        WrittenPair {
            test: self.root.join(format_index(test_template, index)),
            answer: self.root.join(format_index(ans_template, index)),
        }
    }

    /// Overwrite both files. If the answer cannot be written the fresh test
    /// file is removed again, so a test never exists without its answer.
    pub fn write_pair(
        &self,
        test_template: &str,
        ans_template: &str,
        index: usize,
        test: &str,
        answer: &str,
    ) -> Result<WrittenPair, TrigenError> {
        let pair = self.paths(test_template, ans_template, index);
        fs::write(&pair.test, test).map_err(|e| TrigenError::write(&pair.test, e))?;
        if let Err(e) = fs::write(&pair.answer, answer) {
            if let Err(cleanup) = fs::remove_file(&pair.test) {
                tracing::warn!(path = %pair.test.display(), %cleanup, "could not remove orphaned test file");
            }
            return Err(TrigenError::write(&pair.answer, e));
        }
        Ok(pair)
    }
}
