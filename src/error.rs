use thiserror::Error;

pub type LaadsResult<T> = Result<T, LaadsError>;

#[derive(Debug, Error)]
pub enum LaadsError {
    #[error("invalid date '{input}', expected YYYY-MM-DD: {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("too many redirects fetching {0}")]
    TooManyRedirects(String),

    #[error("ftp error: {0}")]
    Ftp(#[from] suppaftp::FtpError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("external tool error: {0}")]
    ExternalTool(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LaadsError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        LaadsError::NotFound(message.into())
    }
}
