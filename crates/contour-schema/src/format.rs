//! # String Formats
//!
//! Checks for the two well-known formats.
//!
//! - **email**: `local@domain.tld`, the TLD at least two ASCII letters, the
//!   whole address at most 254 characters.
//! - **uri**: parses as an absolute URL with a non-empty scheme and a
//!   non-empty host.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::model::Format;

/// Maximum length of an email address.
pub const EMAIL_MAX_LEN: usize = 254;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(error = %e, "email pattern failed to compile");
                None
            }
        })
        .as_ref()
}

/// Whether `input` is an email address.
pub fn is_email(input: &str) -> bool {
    input.chars().count() <= EMAIL_MAX_LEN && email_regex().map_or(false, |re| re.is_match(input))
}

/// Whether `input` is an absolute URI with a scheme and a host.
pub fn is_uri(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().map_or(false, |h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Whether `input` satisfies `format`.
pub fn matches(format: Format, input: &str) -> bool {
    match format {
        Format::Email => is_email(input),
        Format::Uri => is_uri(input),
    }
}
