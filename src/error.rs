use std::fmt;

/// Routing error
///
/// Every fallible operation in the crate reports one of these variants.
/// All of them are detected synchronously at the call that triggers them;
/// nothing is retried internally. A failed match is *not* an error —
/// `Router::match_route` returns `Ok(None)` for "no route".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// HTTP method is not in the supported allow-list
    ///
    /// The check is a case-sensitive exact match, so `get` is rejected
    /// just like `FOO`.
    InvalidMethod {
        /// The rejected method string
        method: String,
    },
    /// URL has no usable scheme separator
    ///
    /// The URL must contain `://` preceded by at least one character.
    /// Protocol-relative forms like `//host` are rejected.
    InvalidUrl {
        /// The rejected URL
        url: String,
    },
    /// Placeholder fragment failed registration-time validation
    ///
    /// A fragment must be a valid regex containing exactly one capturing
    /// group.
    InvalidPlaceholder {
        /// Placeholder name (without braces)
        name: String,
        /// The rejected fragment
        fragment: String,
    },
    /// Wrong number of values supplied to a fill operation
    PlaceholderCountMismatch {
        /// Number of `{name}` tokens found in the template
        expected: usize,
        /// Number of values supplied by the caller
        found: usize,
    },
    /// A supplied value does not match its placeholder's fragment,
    /// or the token has no registered fragment to validate against
    PlaceholderValidation {
        /// The offending token, braces included
        token: String,
        /// The rejected value; `None` when the token itself is unresolvable
        value: Option<String>,
    },
    /// Malformed handler reference, rejected at registration time
    InvalidHandler {
        /// The reference string as given
        reference: String,
        /// What was wrong with it
        reason: String,
    },
    /// A structured handler reference names a controller type that was
    /// never registered with the dispatcher
    UnknownController {
        /// The unresolvable type name
        type_name: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidMethod { method } => {
                write!(f, "invalid HTTP method '{}'", method)
            }
            RouterError::InvalidUrl { url } => {
                write!(
                    f,
                    "invalid URL '{}': expected an absolute URL with a scheme (scheme://host)",
                    url
                )
            }
            RouterError::InvalidPlaceholder { name, fragment } => {
                write!(
                    f,
                    "invalid placeholder '{}': fragment '{}' must be a valid regex \
                    containing exactly one capturing group",
                    name, fragment
                )
            }
            RouterError::PlaceholderCountMismatch { expected, found } => {
                write!(
                    f,
                    "placeholder count mismatch: template has {} token(s) but {} value(s) \
                    were supplied",
                    expected, found
                )
            }
            RouterError::PlaceholderValidation { token, value } => match value {
                Some(value) => write!(
                    f,
                    "placeholder validation failed: value '{}' does not match the \
                    fragment registered for '{}'",
                    value, token
                ),
                None => write!(
                    f,
                    "placeholder validation failed: no fragment registered for '{}'",
                    token
                ),
            },
            RouterError::InvalidHandler { reference, reason } => {
                write!(f, "invalid handler reference '{}': {}", reference, reason)
            }
            RouterError::UnknownController { type_name } => {
                write!(f, "no controller registered for type '{}'", type_name)
            }
        }
    }
}

impl std::error::Error for RouterError {}
