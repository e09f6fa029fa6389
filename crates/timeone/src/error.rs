/// Errors from the vendor feed layer.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    ///
    /// The request URL is stripped: it carries the API key.
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// The vendor returned a non-2xx status code.
    #[error("TimeOne API error ({status}): {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Required configuration is missing or malformed.
    #[error("TimeOne configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Request(err.without_url())
    }
}

impl FeedError {
    /// Whether another attempt may succeed: transport failures and 5xx
    /// responses are retried, 4xx and configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Request(_) => true,
            FeedError::HttpStatus { status, .. } => *status >= 500,
            FeedError::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        let err = FeedError::HttpStatus {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let err = FeedError::HttpStatus {
            status: 403,
            body: "bad key".into(),
        };
        assert!(!err.is_retryable());
        assert!(!FeedError::Config("missing".into()).is_retryable());
    }

    #[test]
    fn display_includes_status() {
        let err = FeedError::HttpStatus {
            status: 502,
            body: "gateway".into(),
        };
        assert_eq!(err.to_string(), "TimeOne API error (502): gateway");
    }
}
