//! Input shape checks
//!
//! These are deliberately shallow: an email needs an `@`, a password needs
//! eight characters, a destination needs to parse as an absolute URL.
//! None of them verify that a credential or a link is real.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check that `email` looks like an email address
pub fn is_valid_email_shape(email: &str) -> bool {
    email.contains('@')
}

/// Check that `password` meets the minimum length
pub fn is_valid_password_length(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Parse `destination` as an absolute URL
pub fn parse_destination(destination: &str) -> Result<Url, url::ParseError> {
    Url::parse(destination)
}

/// Check that `destination` parses as an absolute URL
pub fn is_valid_destination(destination: &str) -> bool {
    parse_destination(destination).is_ok()
}

/// Bytes escaped by `encodeURIComponent`: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode `destination` for use as a query parameter value
pub fn encode_destination(destination: &str) -> String {
    utf8_percent_encode(destination, URI_COMPONENT).to_string()
}
