//! Origin allowlist.

use std::collections::HashSet;

use axum::http::{header, HeaderMap, HeaderValue};

/// Immutable set of browser origins allowed to receive a visit.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: HashSet<String>,
}

impl OriginPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact match after dropping a single trailing `/`.
    pub fn is_allowed(&self, origin: &str) -> bool {
        let origin = origin.strip_suffix('/').unwrap_or(origin);
        self.allowed.contains(origin)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// First `Origin` header, raw and as a string. `None` when it is missing or
/// not visible ASCII.
pub fn request_origin(headers: &HeaderMap) -> Option<(&HeaderValue, &str)> {
    let value = headers.get(header::ORIGIN)?;
    let origin = value.to_str().ok()?;
    Some((value, origin))
}
