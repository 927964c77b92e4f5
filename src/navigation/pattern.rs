// File Path: src/navigation/pattern.rs

//! # Path Patterns
//!
//! Route paths are written without a leading slash, e.g. `accommodation/:id`.
//! A segment starting with `:` captures the requested segment verbatim.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> ApiResult<Self> {
        if pattern.contains(['?', '#']) {
            return Err(ApiError::ValidationError(format!(
                "Route path '{}' must not contain a query or fragment",
                pattern
            )));
        }

        let mut segments = Vec::new();
        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            match part.strip_prefix(':') {
                Some("") => {
                    return Err(ApiError::ValidationError(format!(
                        "Route path '{}' has an unnamed parameter",
                        pattern
                    )));
                }
                Some(name) => {
                    if segments.iter().any(|s| matches!(s, Segment::Param(p) if p == name)) {
                        return Err(ApiError::ValidationError(format!(
                            "Route path '{}' declares parameter '{}' twice",
                            pattern, name
                        )));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        let raw = segments
            .iter()
            .map(|s| match s {
                Segment::Static(v) => v.clone(),
                Segment::Param(p) => format!(":{}", p),
            })
            .collect::<Vec<_>>()
            .join("/");

        Ok(Self { raw, segments })
    }

    /// The normalized pattern text, e.g. `reports/:id`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Structural match. Returns the captured parameters on success.
    pub fn matches(&self, path: &[&str]) -> Option<BTreeMap<String, String>> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Static(expected) if expected == value => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if value.is_empty() => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*value).to_string());
                }
            }
        }
        Some(params)
    }

    /// True when every path `other` matches is also matched by `self`.
    pub fn shadows(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(mine, theirs)| match (mine, theirs) {
                (Segment::Param(_), _) => true,
                (Segment::Static(a), Segment::Static(b)) => a == b,
                (Segment::Static(_), Segment::Param(_)) => false,
            })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A requested URL split into path segments and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
    query: BTreeMap<String, String>,
}

impl RequestPath {
    pub fn parse(url: &str) -> Self {
        let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };

        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect();

        Self { segments, query }
    }

    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Normalized path with a leading slash and no query, e.g. `/reports/3`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}
