use std::collections::HashMap;

use serde_json::Value;

use crate::error::{AppError, Result};

/// Cover image attached to an article: either a remote URL carried in the
/// article JSON, or file bytes embedded as base64 by the attach step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverImage {
    Remote(String),
    Embedded(String),
}

/// A normalized article record to be promoted. Keyed by `url` within a
/// batch; immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub summary: Option<String>,
    pub image: Option<CoverImage>,
}

impl Article {
    /// Validates a single already-parsed JSON object into an `Article`.
    /// `title` and `url` must be present, strings, and non-empty.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            AppError::Validation("Expected a JSON object with \"title\" and \"url\"".to_string())
        })?;

        let title = required_string(obj, "title")?;
        let url = required_string(obj, "url")?;
        let summary = optional_string(obj, "summary")?;
        let image = optional_string(obj, "imageUrl")?.map(CoverImage::Remote);

        Ok(Article {
            title,
            url,
            summary,
            image,
        })
    }

    /// Validates a single object or an array of objects into a batch.
    /// Any invalid element rejects the entire input; there are no partial
    /// batches. Entries sharing a `url` collapse to one article: the batch
    /// keeps the key's first-seen position but the last-seen value.
    pub fn batch_from_value(value: &Value) -> Result<Vec<Self>> {
        let articles = match value {
            Value::Array(items) => items
                .iter()
                .map(Article::from_value)
                .collect::<Result<Vec<_>>>()?,
            Value::Object(_) => vec![Article::from_value(value)?],
            _ => {
                return Err(AppError::Validation(
                    "Expected a JSON object or an array of objects with \"title\" and \"url\""
                        .to_string(),
                ))
            }
        };

        Ok(dedup_by_url(articles))
    }

    /// Returns a copy with the embedded base64 cover image attached,
    /// replacing any remote image reference from the JSON.
    pub fn with_embedded_image(&self, base64: String) -> Self {
        Article {
            image: Some(CoverImage::Embedded(base64)),
            ..self.clone()
        }
    }
}

fn required_string(obj: &serde_json::Map<String, Value>, field: &str) -> Result<String> {
    let text = obj
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Validation(format!("Missing required field \"{field}\"")))?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Field \"{field}\" must not be empty"
        )));
    }

    Ok(text.to_string())
}

fn optional_string(obj: &serde_json::Map<String, Value>, field: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::Validation(format!(
            "Field \"{field}\" must be a string"
        ))),
    }
}

/// Deduplicates by `url`: later entries replace earlier ones in place, so
/// the result preserves first-seen key order while carrying last-seen values.
fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<Article> = Vec::with_capacity(articles.len());

    for article in articles {
        match positions.get(&article.url) {
            Some(&index) => result[index] = article,
            None => {
                positions.insert(article.url.clone(), result.len());
                result.push(article);
            }
        }
    }

    result
}
