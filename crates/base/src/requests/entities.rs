use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum HttpRequestMethod {
    #[default]
    Get,
    Post,
}

pub type Queries = Vec<(String, String)>;

#[derive(Debug, Clone, Default)]
pub struct HttpRequestData {
    pub method: HttpRequestMethod,
    pub url: String,
    pub queries: Option<Queries>,
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

impl HttpRequestData {
    pub fn new(method: HttpRequestMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, param: &str, value: impl ToString) -> Self {
        self.queries
            .get_or_insert_with(Vec::new)
            .push((param.to_string(), value.to_string()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
