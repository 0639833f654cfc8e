use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{InstallerError, InstallerResult};

/// Streams release artifacts to disk. One attempt per call; the pipeline
/// never retries automatically.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download a single file to `dest`, creating parent directories as
    /// needed. Non-success statuses are reported with the failing URL.
    pub async fn download_file(&self, url: &str, dest: &Path) -> InstallerResult<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| InstallerError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InstallerError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Write inside a block so the handle is dropped before anything
        // else touches the file.
        {
            let mut file =
                tokio::fs::File::create(dest)
                    .await
                    .map_err(|source| InstallerError::Io {
                        path: dest.to_path_buf(),
                        source,
                    })?;

            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk)
                    .await
                    .map_err(|source| InstallerError::Io {
                        path: dest.to_path_buf(),
                        source,
                    })?;
            }
            file.flush().await.map_err(|source| InstallerError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
        }

        debug!("Downloaded: {} -> {:?}", url, dest);
        Ok(())
    }
}
