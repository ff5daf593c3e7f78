use thiserror::Error;
use tracing::debug;

/// Error produced by matcher constructors that received invalid arguments.
///
/// Constructors that may fail return `Result<M, MatcherError>`. The result
/// itself is usable as matcher: if it is an error, it never matches and
/// reports the error as failure description.
#[derive(Clone, Debug, Error)]
pub enum MatcherError {
    #[error("Invalid {name}(): {reason}. Parameters: {params}")]
    InvalidArguments {
        name: &'static str,
        reason: &'static str,
        params: String,
    },

    #[error("Invalid Regexp(`{pattern}`): {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl MatcherError {
    /// Name of the constructor that produced the error.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidArguments { name, .. } => name,
            Self::InvalidRegex { .. } => "Regexp",
        }
    }

    pub(crate) fn invalid_arguments(name: &'static str, reason: &'static str, params: String) -> Self {
        let err = Self::InvalidArguments {
            name,
            reason,
            params,
        };

        debug!(%err, "Invalid matcher arguments");

        err
    }

    pub(crate) fn invalid_regex(pattern: String, source: regex::Error) -> Self {
        let err = Self::InvalidRegex { pattern, source };

        debug!(%err, "Invalid regular expression");

        err
    }
}
