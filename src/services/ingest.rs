use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AppError, Result};
use crate::models::Article;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Loads and validates a batch of articles from a `.json` file.
/// Non-JSON files are rejected before any read happens; a single object or
/// an array of objects are both accepted.
pub async fn load_articles(path: &Path) -> Result<Vec<Article>> {
    if !has_extension(path, &["json"]) {
        return Err(AppError::Validation(
            "Please provide a valid JSON file".to_string(),
        ));
    }

    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Validation(format!("Could not read {}: {e}", path.display()))
    })?;

    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| AppError::Validation(format!("Failed to parse JSON file: {e}")))?;

    Article::batch_from_value(&value)
}

/// Reads a cover image file and returns its bytes base64-encoded.
/// Failures here are independent of JSON validity; the article's other
/// fields stay accepted.
pub async fn read_image_base64(path: &Path) -> Result<String> {
    if !has_extension(path, &IMAGE_EXTENSIONS) {
        return Err(AppError::ImageRead(format!(
            "{} is not a supported image type",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::ImageRead(e.to_string()))?;

    Ok(STANDARD.encode(bytes))
}

fn has_extension(path: &Path, accepted: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| accepted.contains(&ext.as_str()))
}
