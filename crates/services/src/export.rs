use std::path::{Path, PathBuf};

use tracing::{info, warn};

use fortune_core::export::{card_file_stem, render_card_svg};
use fortune_core::model::PersonalityResult;

use crate::error::ExportError;

/// Writes result cards as SVG images into a directory.
#[derive(Clone, Debug)]
pub struct CardExportService {
    dir: PathBuf,
}

impl CardExportService {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a result, named after its sanitized type label.
    #[must_use]
    pub fn path_for(&self, result: &PersonalityResult) -> PathBuf {
        self.dir
            .join(format!("{}.svg", card_file_stem(&result.personality_type)))
    }

    /// Render and write the card, overwriting an earlier export of the same type.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` when the directory cannot be created or the file written.
    pub async fn export(&self, result: &PersonalityResult) -> Result<PathBuf, ExportError> {
        let path = self.path_for(result);
        let outcome = self.write(&path, render_card_svg(result)).await;
        match &outcome {
            Ok(()) => info!(path = %path.display(), "exported result card"),
            Err(err) => warn!(error = %err, "result card export failed"),
        }
        outcome.map(|()| path)
    }

    async fn write(&self, path: &Path, svg: String) -> Result<(), ExportError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ExportError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(path, svg)
            .await
            .map_err(|source| ExportError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
