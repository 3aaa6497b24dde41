//! URL comparison tolerant of re-serialization by the remote API.
//!
//! The API may hand a monitor URL back with its query string reordered or
//! its path re-encoded. Comparing the raw strings would then report a change
//! on every run, so URLs are compared component by component:
//!
//! - the scheme is compared case-insensitively;
//! - the authority (user info, host and port) is compared exactly as
//!   written. `Example.com` and `example.com:443` both differ from
//!   `example.com`;
//! - the path is compared decoded (`+` as space, then percent-decoding) and
//!   tolerates a single trailing slash. Dot segments are kept;
//! - the query is compared as the **set of parameter names** carrying a
//!   non-empty value. Values and ordering are ignored;
//! - the fragment is compared as written.
//!
//! Strings that do not parse as absolute URLs are compared literally.

use std::collections::BTreeSet;

use ::url::{form_urlencoded, Url};

/// A URL reduced to the components that matter for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedUrl(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Parsed {
        scheme: String,
        authority: Option<String>,
        path: String,
        query_keys: BTreeSet<String>,
        fragment: Option<String>,
    },
    Raw(String),
}

impl NormalizedUrl {
    /// Normalize a URL string.
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) => Self::from_parts(url.scheme(), input.trim()),
            Err(_) => NormalizedUrl(Repr::Raw(input.to_string())),
        }
    }

    /// Split the input text itself so that nothing the parser canonicalizes
    /// (host case, default ports, dot segments) leaks into the comparison.
    fn from_parts(scheme: &str, input: &str) -> Self {
        let rest = input.split_once(':').map_or(input, |(_, rest)| rest);

        let (rest, fragment) = match rest.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (rest, None),
        };
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

        let (authority, path) = match rest.strip_prefix("//") {
            Some(hier) => {
                let end = hier.find('/').unwrap_or(hier.len());
                (Some(hier[..end].to_string()), &hier[end..])
            }
            None => (None, rest),
        };

        let query_keys = form_urlencoded::parse(query.as_bytes())
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, _)| key.into_owned())
            .collect();

        NormalizedUrl(Repr::Parsed {
            scheme: scheme.to_string(),
            authority,
            path: decode_path(path),
            query_keys,
            fragment,
        })
    }
}

impl From<&str> for NormalizedUrl {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

/// Compare two URL strings for reconciliation purposes.
pub fn urls_equal(a: &str, b: &str) -> bool {
    NormalizedUrl::parse(a) == NormalizedUrl::parse(b)
}

fn decode_path(path: &str) -> String {
    let plus_as_space = path.replace('+', " ");
    let decoded = urlencoding::decode_binary(plus_as_space.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);
    decoded
        .strip_suffix('/')
        .unwrap_or(&decoded[..])
        .to_string()
}
