use super::TransportError;
use crate::config::{BrowserConfig, DEFAULT_BASE_URL};
use crate::model::Category;
use reqwest::Url;

/// URL builder for the three API endpoints the browser touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Creates endpoints under `base_url`. A trailing `/` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Endpoints {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Endpoints::new(config.base_url.as_str())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/categories.php`
    pub fn categories(&self) -> Result<Url, TransportError> {
        self.build("categories.php", &[])
    }

    /// `{base}/filter.php?c={category}`, with the category name query-encoded.
    pub fn filter_by_category(&self, category: &Category) -> Result<Url, TransportError> {
        self.build("filter.php", &[("c", category.name())])
    }

    /// `{base}/lookup.php?i={meal_id}`, the detail screen's source.
    pub fn lookup(&self, meal_id: &str) -> Result<Url, TransportError> {
        self.build("lookup.php", &[("i", meal_id)])
    }

    fn build(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, TransportError> {
        let raw = format!("{}/{path}", self.base_url);
        let url = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        url.map_err(|e| TransportError::InvalidUrl(format!("{raw}: {e}")))
    }
}
