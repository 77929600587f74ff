use std::path::Path;

use tracing::warn;

use fortune_core::model::QuestionCatalog;

use crate::classifier::HttpTransport;
use crate::error::CatalogLoadError;

/// Load a catalog from a JSON file in the `[{ id, text, options, emoji }]` shape.
///
/// # Errors
///
/// Returns `CatalogLoadError` when the file cannot be read or does not validate.
pub async fn load_catalog_file(path: &Path) -> Result<QuestionCatalog, CatalogLoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(QuestionCatalog::from_json(&raw)?)
}

/// Ask the analysis service for its questions, keeping the built-in set on any failure.
pub async fn fetch_catalog_or_builtin(transport: &HttpTransport) -> QuestionCatalog {
    match transport.fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(error = %err, "could not fetch questions, using built-in catalog");
            QuestionCatalog::builtin()
        }
    }
}
