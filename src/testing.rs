//! In-memory transport and JSON fixtures shared by the unit tests.

use crate::model::Category;
use crate::transport::{Endpoints, Transport, TransportError};
use reqwest::Url;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

enum FakeResponse {
    Body(Vec<u8>),
    Status(u16),
}

/// Serves canned bodies keyed by full URL and records every request.
/// Unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: HashMap<String, FakeResponse>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: Url, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.to_string(), FakeResponse::Body(body.into().into_bytes()));
        self
    }

    pub fn with_status(mut self, url: Url, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), FakeResponse::Status(status));
        self
    }

    pub fn with_delay(mut self, url: Url, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Registers `categories.php` returning `names` in the given order.
    pub fn with_categories(self, names: &[&str]) -> Self {
        let url = Endpoints::default().categories().unwrap();
        self.with_body(url, categories_json(names))
    }

    /// Registers `filter.php?c={category}` returning `(id, name)` meals.
    pub fn with_meals(self, category: &str, meals: &[(&str, &str)]) -> Self {
        let url = filter_url(category);
        self.with_body(url, meals_json(meals))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let key = url.to_string();
        self.requests.lock().unwrap().push(key.clone());

        if let Some(delay) = self.delays.get(&key) {
            thread::sleep(*delay);
        }

        match self.responses.get(&key) {
            Some(FakeResponse::Body(body)) => Ok(body.clone()),
            Some(FakeResponse::Status(status)) => Err(TransportError::Status {
                status: *status,
                url: key,
            }),
            None => Err(TransportError::Status {
                status: 404,
                url: key,
            }),
        }
    }
}

pub(crate) fn categories_url() -> Url {
    Endpoints::default().categories().unwrap()
}

pub(crate) fn filter_url(category: &str) -> Url {
    Endpoints::default()
        .filter_by_category(&Category::from(category))
        .unwrap()
}

pub(crate) fn categories_json(names: &[&str]) -> String {
    let categories: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "idCategory": (i + 1).to_string(), "strCategory": name }))
        .collect();
    json!({ "categories": categories }).to_string()
}

pub(crate) fn meals_json(meals: &[(&str, &str)]) -> String {
    let meals: Vec<_> = meals
        .iter()
        .map(|(id, name)| json!({ "idMeal": id, "strMeal": name }))
        .collect();
    json!({ "meals": meals }).to_string()
}
