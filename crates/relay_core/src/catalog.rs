use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(String),
    #[error("catalog root must be an object of keyword -> url list")]
    NotAnObject,
    #[error("entry {keyword:?} must be an array of strings")]
    InvalidEntry { keyword: String },
}

/// Static keyword -> URL lookup table, read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl KeywordCatalog {
    /// Parse a JSON object of `keyword: [url, ...]`, keeping the file's key order.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let root: Value =
            serde_json::from_str(raw).map_err(|err| CatalogError::Json(err.to_string()))?;
        let Value::Object(map) = root else {
            return Err(CatalogError::NotAnObject);
        };

        let mut entries = Vec::with_capacity(map.len());
        for (keyword, value) in map {
            let urls = match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(url) => Some(url),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>(),
                _ => None,
            };
            match urls {
                Some(urls) => entries.push((keyword, urls)),
                None => return Err(CatalogError::InvalidEntry { keyword }),
            }
        }
        Ok(Self { entries })
    }

    pub fn keywords(&self) -> Vec<&str> {
        self.entries.iter().map(|(keyword, _)| keyword.as_str()).collect()
    }

    pub fn urls(&self, keyword: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == keyword)
            .map(|(_, urls)| urls.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
