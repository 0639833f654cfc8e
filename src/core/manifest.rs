// ─── Modpack Manifest ───
// Fetches and parses the version document published alongside the pack.

use serde::Deserialize;
use tracing::info;

use crate::core::error::{InstallerError, InstallerResult};

/// Version-describing document fetched before any download begins.
/// Immutable for the lifetime of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Drives every subsequent URL and the install path.
    #[serde(rename = "modpack-version")]
    pub modpack_version: String,
    /// Display-only hint shown at the start of the run.
    #[serde(rename = "estimated-completion-time")]
    pub estimated_completion_time: String,
}

impl Manifest {
    /// Fetch the manifest using a shared HTTP client. Transport failures
    /// and malformed bodies are both fatal: without a version there is
    /// nothing to install.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> InstallerResult<Self> {
        info!("Fetching modpack manifest from {}", url);

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InstallerError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let manifest: Manifest = serde_json::from_str(&body)?;

        info!(
            "Manifest loaded: modpack v{} (estimated completion {})",
            manifest.modpack_version, manifest.estimated_completion_time
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_manifest() {
        let json = r#"{
            "modpack-version": "3.2.0",
            "estimated-completion-time": "5m"
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.modpack_version, "3.2.0");
        assert_eq!(manifest.estimated_completion_time, "5m");
    }

    #[test]
    fn malformed_manifest_is_rejected() {
        let result = serde_json::from_str::<Manifest>(r#"{"modpack-version": 3}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn fetch_reports_http_status_on_failure() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manifest.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = crate::core::http::build_http_client().unwrap();
        let url = format!("{}/manifest.json", server.uri());
        let err = Manifest::fetch(&client, &url).await.unwrap_err();
        assert!(matches!(
            err,
            InstallerError::DownloadFailed { status: 500, .. }
        ));
    }
}
