//! Target extraction from the inbound query string.
//!
//! The reserved `url` parameter names the upstream; every other parameter is
//! re-encoded and appended to it. Keys are emitted sorted, values of a
//! repeated key keep their arrival order.

use std::collections::BTreeMap;

/// Query parameter carrying the upstream URL.
pub const TARGET_PARAM: &str = "url";

/// Where a request is forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardTarget {
    base: String,
    params: BTreeMap<String, Vec<String>>,
}

impl ForwardTarget {
    /// The upstream URL as given by the caller, without the re-encoded query.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Remaining query parameters, `url` stripped.
    pub fn params(&self) -> &BTreeMap<String, Vec<String>> {
        &self.params
    }

    /// `"{base}?{params}"`. The `?` is always present, even with no params.
    pub fn outbound_url(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.params {
            for value in values {
                query.append_pair(key, value);
            }
        }
        format!("{}?{}", self.base, query.finish())
    }
}

/// Parse the raw query of an inbound request.
///
/// Returns `None` when `url` is absent or its first value is empty: the
/// request is then answered with an empty 200 rather than an error.
pub fn extract_target(query: Option<&str>) -> Option<ForwardTarget> {
    let mut base: Option<String> = None;
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        if key == TARGET_PARAM {
            base.get_or_insert_with(|| value.into_owned());
        } else {
            params.entry(key.into_owned()).or_default().push(value.into_owned());
        }
    }

    match base {
        Some(base) if !base.is_empty() => Some(ForwardTarget { base, params }),
        _ => None,
    }
}
