use crate::{Error, Result};

/// Assignment prefix of the `data.js` on-disk form.
pub const DATA_JS_PREFIX: &str = "window.BENCHMARK_DATA = ";

/// On-disk shape of the persisted store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreFormat {
    /// `window.BENCHMARK_DATA = {...}` — a script file the chart page loads
    /// directly. This is what the benchmark-tracking CI job maintains.
    #[default]
    DataJs,
    /// Bare JSON object.
    Json,
}

impl StoreFormat {
    /// Guess the format from persisted content.
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::DataJs
        }
    }

    /// Extract the JSON payload from persisted content. Accepts either
    /// format regardless of `self`, so a store written as bare JSON can be
    /// re-saved as `data.js` and vice versa.
    pub fn strip(content: &str) -> Result<&str> {
        let trimmed = content.trim();

        if trimmed.starts_with('{') {
            return Ok(trimmed);
        }

        match trimmed.split_once('=') {
            Some((lhs, json)) if lhs.trim_start().starts_with("window.") => {
                Ok(json.trim().trim_end_matches(';').trim_end())
            }
            _ => Err(Error::CorruptHistory(
                "expected a JSON object or a window assignment".to_string(),
            )),
        }
    }

    /// Wrap a JSON payload into this format's on-disk shape.
    pub fn wrap(&self, json: &str) -> String {
        match self {
            Self::DataJs => format!("{}{}\n", DATA_JS_PREFIX, json),
            Self::Json => format!("{}\n", json),
        }
    }
}
