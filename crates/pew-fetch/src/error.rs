use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientSettingError {
    #[error("invalid proxy URL {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build client: {0}")]
    Build(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Client(#[from] ClientSettingError),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("download interrupted")]
    Interrupted,
}
