// ─── Installation Pipeline ───
// Drives the whole run: manifest → confirmation → session → optional
// Forge install → pack download → extraction. Stages execute strictly in
// sequence; only the Forge installer's exit status is recoverable, every
// other failure aborts the run.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{info, warn};

use crate::core::archive::extract_archive;
use crate::core::config::{InstallConfig, FORGE_VERSION, MINECRAFT_VERSION, RESERVED_CONFIG_DIR};
use crate::core::downloader::Downloader;
use crate::core::error::{InstallerError, InstallerResult};
use crate::core::http::build_http_client;
use crate::core::manifest::Manifest;
use crate::core::process::run_command;
use crate::core::progress::StatusSpinner;
use crate::core::prompt::{confirm, confirm_or_abort, AnswerSource, DefaultAnswer};

/// Install directory for a pack version, independent of whether the
/// mod-loader stage runs.
pub fn install_dir_for(base_mods_dir: &Path, version: &str) -> PathBuf {
    base_mods_dir.join("papaya").join(format!("v{version}"))
}

/// State scoped to one run. The temp dir is owned exclusively by the
/// session and removed on drop; on abnormal termination it is abandoned
/// under the system temp area.
struct Session {
    temp: TempDir,
    install_dir: PathBuf,
    loader_selected: bool,
}

impl Session {
    fn temp_path(&self) -> &Path {
        self.temp.path()
    }
}

pub struct Installer {
    config: InstallConfig,
    client: reqwest::Client,
    downloader: Downloader,
}

impl Installer {
    pub fn new(config: InstallConfig) -> InstallerResult<Self> {
        let client = build_http_client()?;
        let downloader = Downloader::new(client.clone());
        Ok(Self {
            config,
            client,
            downloader,
        })
    }

    /// Run the pipeline to completion. Returns the final install directory
    /// on success; `UserDeclined` when the user answered no to the
    /// top-level confirmation; any other error is a fatal stage failure.
    pub async fn run(&self, answers: &mut dyn AnswerSource) -> InstallerResult<PathBuf> {
        let spinner = StatusSpinner::start("Fetching modpack manifest");
        let result = self.run_stages(answers, &spinner).await;
        spinner.finish();
        result
    }

    async fn run_stages(
        &self,
        answers: &mut dyn AnswerSource,
        spinner: &StatusSpinner,
    ) -> InstallerResult<PathBuf> {
        // FetchManifest — fatal on any failure, there is no version to
        // install without it.
        let manifest = Manifest::fetch(&self.client, &self.config.manifest_url).await?;
        let version = manifest.modpack_version.clone();
        spinner.mark_done(format!(
            "Installing Papayacraft v{} (estimated completion {})",
            version, manifest.estimated_completion_time
        ));

        // ConfirmProceed — declining is a clean abort, not a failure.
        if self.config.preconfirm_enabled {
            spinner.suspend(|| {
                confirm_or_abort(
                    answers,
                    &format!("Install Papayacraft v{version}?"),
                    DefaultAnswer::Yes,
                )
            })?;
        }

        let session = self.create_session(answers, spinner, &version)?;

        if session.loader_selected {
            self.install_mod_loader(&session, spinner).await?;
        }

        let pack_path = self.download_pack(&session, spinner, &version).await?;
        self.extract_pack(&session, &pack_path, spinner)?;

        info!("Papayacraft v{} installed at {:?}", version, session.install_dir);
        Ok(session.install_dir.clone())
    }

    /// CreateSession + ConfirmModLoader. The loader answer only gates the
    /// next stage; it never aborts the run.
    fn create_session(
        &self,
        answers: &mut dyn AnswerSource,
        spinner: &StatusSpinner,
        version: &str,
    ) -> InstallerResult<Session> {
        let temp = tempfile::Builder::new()
            .prefix("papayacraft-")
            .tempdir()
            .map_err(|source| InstallerError::Io {
                path: std::env::temp_dir(),
                source,
            })?;

        let loader_selected = if self.config.mod_loader_prompt_enabled {
            spinner.suspend(|| {
                confirm(answers, "Install the Forge mod loader?", DefaultAnswer::No)
            })?
        } else {
            false
        };

        Ok(Session {
            temp,
            install_dir: install_dir_for(&self.config.base_mods_dir, version),
            loader_selected,
        })
    }

    /// InstallModLoader. Fetching the installer artifact is fatal like any
    /// other download; a failed launch or non-zero exit is recoverable,
    /// because the loader and the pack are independent deliverables.
    async fn install_mod_loader(
        &self,
        session: &Session,
        spinner: &StatusSpinner,
    ) -> InstallerResult<()> {
        spinner.set_status(format!(
            "Downloading Forge {FORGE_VERSION} for Minecraft {MINECRAFT_VERSION}"
        ));
        let installer_path = session.temp_path().join(self.config.loader_installer_name());
        self.downloader
            .download_file(&self.config.loader_installer_url(), &installer_path)
            .await?;
        mark_owner_executable(&installer_path)?;

        spinner.set_status(format!(
            "Installing Forge {FORGE_VERSION} for Minecraft {MINECRAFT_VERSION}"
        ));
        let result = run_command(
            &self.config.java_runtime,
            [OsStr::new("-jar"), installer_path.as_os_str()],
        );

        match result.exit_error {
            Some(exit_error) => {
                warn!("Forge installer failed: {}", exit_error);
                if !result.stderr.is_empty() {
                    warn!("Forge installer stderr: {}", result.stderr.trim());
                }
                spinner.mark_warning(
                    "Error with the Forge installer! If install fails, manually install the mod loader first!",
                );
            }
            None => spinner.mark_done(format!("Forge {FORGE_VERSION} installer finished")),
        }

        // The installer may have spawned its own window; give it a moment
        // to settle before moving on. Bounded wait, never a dependency.
        tokio::time::sleep(self.config.loader_settle).await;
        Ok(())
    }

    /// DownloadPack — network or write failure is fatal. The archive lands
    /// in the session dir, never in the install dir.
    async fn download_pack(
        &self,
        session: &Session,
        spinner: &StatusSpinner,
        version: &str,
    ) -> InstallerResult<PathBuf> {
        spinner.set_status(format!("Downloading Papayacraft v{version}"));

        tokio::fs::create_dir_all(&session.install_dir)
            .await
            .map_err(|source| InstallerError::Io {
                path: session.install_dir.clone(),
                source,
            })?;

        let pack_path = session.temp_path().join(format!("papayacraft-v{version}.zip"));
        self.downloader
            .download_file(&self.config.pack_url(version), &pack_path)
            .await?;

        spinner.mark_done(format!("Papayacraft v{version} downloaded"));
        Ok(pack_path)
    }

    /// ExtractPack — everything under the reserved config entry is left
    /// alone so user customisation survives reinstalls.
    fn extract_pack(
        &self,
        session: &Session,
        pack_path: &Path,
        spinner: &StatusSpinner,
    ) -> InstallerResult<()> {
        spinner.set_status("Extracting modpack");

        extract_archive(pack_path, &session.install_dir, |rel| {
            rel.starts_with(RESERVED_CONFIG_DIR)
        })?;

        spinner.mark_done("Modpack extracted");
        Ok(())
    }
}

/// Owner read/write/execute on the downloaded installer jar; no-op off
/// unix.
fn mark_owner_executable(path: &Path) -> InstallerResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700)).map_err(
            |source| InstallerError::Io {
                path: path.to_path_buf(),
                source,
            },
        )?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
