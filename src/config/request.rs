//! Permissive crawl request parsing
//!
//! Callers send loosely typed JSON: numbers as strings, booleans as `"yes"`,
//! path lists as comma-separated strings. [`CrawlRequest`] accepts all of that
//! and [`CrawlRequest::into_options`] applies defaults and clamps exactly once.

use crate::config::types::{
    CrawlOptions, DEFAULT_CRAWL_USER_AGENT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DISCOVERED,
    DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT_MS, HTTP_MODE, MAX_DEPTH_RANGE,
    MAX_DISCOVERED_RANGE, MAX_PAGES_RANGE, REQUEST_TIMEOUT_RANGE,
};
use crate::CrawlError;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Raw crawl request as it arrives over the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlRequest {
    pub start_url: Option<Value>,
    /// Accepted in place of `start_url`
    pub url: Option<Value>,
    pub query: Option<Value>,
    pub max_depth: Option<Value>,
    pub max_pages: Option<Value>,
    pub include_paths: Option<Value>,
    pub exclude_paths: Option<Value>,
    pub allow_subdomains: Option<Value>,
    pub respect_robots: Option<Value>,
    pub mode: Option<Value>,
    pub request_timeout_ms: Option<Value>,
    pub user_agent: Option<Value>,
    pub max_discovered: Option<Value>,
}

impl CrawlRequest {
    /// Parses a JSON body; anything other than an object is an `INVALID_PARAM`
    pub fn from_json(body: Value) -> Result<Self, CrawlError> {
        if !body.is_object() {
            return Err(CrawlError::InvalidParam(
                "request body must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(body).map_err(|e| CrawlError::InvalidParam(e.to_string()))
    }

    /// Applies defaults and clamps, producing options ready for a crawl
    pub fn into_options(self) -> Result<CrawlOptions, CrawlError> {
        let start_url = self
            .start_url
            .as_ref()
            .and_then(coerce_string)
            .filter(|s| !s.is_empty())
            .or_else(|| self.url.as_ref().and_then(coerce_string))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CrawlError::InvalidParam("start_url is required".to_string()))?;

        let user_agent = self
            .user_agent
            .as_ref()
            .and_then(coerce_string)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CRAWL_USER_AGENT.to_string());

        let mode = self
            .mode
            .as_ref()
            .and_then(coerce_string)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| HTTP_MODE.to_string());

        let timeout_ms = coerce_int(
            self.request_timeout_ms.as_ref(),
            DEFAULT_REQUEST_TIMEOUT_MS as i64,
            REQUEST_TIMEOUT_RANGE,
        );

        Ok(CrawlOptions {
            start_url,
            query: self
                .query
                .as_ref()
                .and_then(coerce_string)
                .unwrap_or_default(),
            max_depth: coerce_int(
                self.max_depth.as_ref(),
                DEFAULT_MAX_DEPTH as i64,
                MAX_DEPTH_RANGE,
            ) as u32,
            max_pages: coerce_int(
                self.max_pages.as_ref(),
                DEFAULT_MAX_PAGES as i64,
                MAX_PAGES_RANGE,
            ) as usize,
            max_discovered: coerce_int(
                self.max_discovered.as_ref(),
                DEFAULT_MAX_DISCOVERED as i64,
                MAX_DISCOVERED_RANGE,
            ) as usize,
            include_paths: coerce_path_list(self.include_paths.as_ref()),
            exclude_paths: coerce_path_list(self.exclude_paths.as_ref()),
            allow_subdomains: coerce_bool(self.allow_subdomains.as_ref(), false),
            respect_robots: coerce_bool(self.respect_robots.as_ref(), true),
            mode,
            request_timeout: Duration::from_millis(timeout_ms as u64),
            user_agent,
        })
    }
}

/// Renders scalars as trimmed text; null, arrays and objects yield nothing
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Bool-like coercion; unrecognized input falls back to `default`
pub fn coerce_bool(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => true,
            "0" | "false" | "no" | "n" | "off" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Lenient integer coercion clamped into `range`
///
/// Strings contribute their leading decimal digits (`"12px"` is 12); anything
/// without a leading number falls back to `default`.
pub fn coerce_int(value: Option<&Value>, default: i64, range: (i64, i64)) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_leading_int(s),
        _ => None,
    };

    match parsed {
        Some(n) => n.clamp(range.0, range.1),
        None => default,
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate absurdly long digit runs; the caller clamps anyway
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Path prefix list from a comma-separated string or a JSON array
///
/// Entries are trimmed, empty entries dropped, and each is prefixed with `/`.
pub fn coerce_path_list(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| coerce_string(item).unwrap_or_default())
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    raw.into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .map(|item| {
            if item.starts_with('/') {
                item
            } else {
                format!("/{}", item)
            }
        })
        .collect()
}
