use crate::error::{ClientSettingError, DownloadError};
use crate::runtime;
use crate::tracker::{ProgressTracker, ProgressTrackerBuilder, Tracker, TrackerBuilder};

use reqwest::{Client, Proxy, Response};
use std::path::{Path, PathBuf};
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ClientSetting {
    pub proxies: Vec<String>,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub env_proxy: bool,
}

impl Default for ClientSetting {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            env_proxy: true,
        }
    }
}

impl ClientSetting {
    pub fn build(self) -> Result<Client, ClientSettingError> {
        let mut cb = Client::builder();

        if !self.env_proxy {
            cb = cb.no_proxy();
        }

        let (secure, insecure): (Vec<String>, Vec<String>) = self
            .proxies
            .into_iter()
            .partition(|u| u.starts_with("https://"));

        for u in secure {
            let proxy = Proxy::https(&u).map_err(|source| ClientSettingError::Proxy {
                url: u.clone(),
                source,
            })?;
            cb = cb.proxy(proxy);
        }

        for u in insecure {
            let proxy = Proxy::http(&u).map_err(|source| ClientSettingError::Proxy {
                url: u.clone(),
                source,
            })?;
            cb = cb.proxy(proxy);
        }

        cb.build().map_err(ClientSettingError::Build)
    }
}

/// A single file fetched from `url` into `dest`.
pub struct Download {
    url: String,
    dest: PathBuf,
    setting: ClientSetting,
}

impl Download {
    pub fn new(url: impl Into<String>, dest: &Path) -> Self {
        Self {
            url: url.into(),
            dest: dest.to_path_buf(),
            setting: ClientSetting::default(),
        }
    }

    pub fn with_setting(mut self, setting: ClientSetting) -> Self {
        self.setting = setting;
        self
    }

    /// Blocking transfer. Returns the number of bytes written.
    ///
    /// A user interrupt (Ctrl-C) cancels the transfer with
    /// [`DownloadError::Interrupted`]; whatever was written stays on disk.
    /// The progress display is finished on success and abandoned otherwise.
    pub fn fetch(self, tb: Option<ProgressTrackerBuilder>) -> Result<u64, DownloadError> {
        runtime::block_on(async move {
            let res = tokio::select! {
                res = self.request() => res?,
                _ = interrupted() => return Err(DownloadError::Interrupted),
            };
            let tracker = tb.map(|tb| match res.content_length() {
                Some(len) => tb.with_len(len).build(),
                None => tb.build(),
            });

            let result = tokio::select! {
                out = self.transfer(res, tracker.as_ref()) => out,
                _ = interrupted() => Err(DownloadError::Interrupted),
            };
            if let Some(t) = tracker {
                match &result {
                    Ok(_) => t.finish(),
                    Err(_) => t.abandon(),
                }
            }
            result
        })?
    }

    async fn request(&self) -> Result<Response, DownloadError> {
        let client = self.setting.clone().build()?;
        let res = client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| DownloadError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(res)
    }

    async fn transfer(
        &self,
        mut res: Response,
        tracker: Option<&ProgressTracker>,
    ) -> Result<u64, DownloadError> {
        let len = res.content_length();
        debug!(url = %self.url, ?len, dest = %self.dest.display(), "downloading");

        let mut file = File::create(&self.dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = res.chunk().await.map_err(|source| DownloadError::Request {
            url: self.url.clone(),
            source,
        })? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            if let Some(t) = tracker {
                t.step(chunk.len() as u64);
            }
        }
        file.flush().await?;
        Ok(written)
    }
}

/// Resolves on Ctrl-C. Never resolves when the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
