use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the Papayacraft release bucket. The manifest, the pack
/// archive and the Forge installer all live under it.
pub const DOWNLOADS_BASE: &str = "https://storage.googleapis.com/papayacraft-downloads";

/// Minecraft / Forge pairing the pack is built against.
pub const MINECRAFT_VERSION: &str = "1.16.5";
pub const FORGE_VERSION: &str = "36.1.1";

/// Directory entry inside the pack that holds user-editable configuration.
/// Never overwritten when reinstalling or upgrading.
pub const RESERVED_CONFIG_DIR: &str = "config";

/// Everything the pipeline needs to know up front. The four near-identical
/// installer revisions collapse into the two prompt flags.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Manifest endpoint returning the modpack version document.
    pub manifest_url: String,
    /// Base URL for the pack archive and the Forge installer jar.
    pub downloads_base: String,
    /// Mods directory the pack is installed under.
    pub base_mods_dir: PathBuf,
    /// Executable used to run the Forge installer, resolved on PATH.
    pub java_runtime: String,
    /// Ask "Install Papayacraft vX?" before doing anything.
    pub preconfirm_enabled: bool,
    /// Ask whether to run the Forge installer; when disabled the loader
    /// stage never runs.
    pub mod_loader_prompt_enabled: bool,
    /// Grace period after the Forge installer exits, letting its own
    /// window settle. UX only, not a correctness wait.
    pub loader_settle: Duration,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            manifest_url: format!("{DOWNLOADS_BASE}/manifest.json"),
            downloads_base: DOWNLOADS_BASE.to_string(),
            base_mods_dir: default_mods_dir(),
            java_runtime: "java".to_string(),
            preconfirm_enabled: true,
            mod_loader_prompt_enabled: true,
            loader_settle: Duration::from_millis(500),
        }
    }
}

impl InstallConfig {
    pub fn pack_url(&self, version: &str) -> String {
        format!("{}/papayacraft-v{}.zip", self.downloads_base, version)
    }

    pub fn loader_installer_name(&self) -> String {
        format!("forge-{MINECRAFT_VERSION}-{FORGE_VERSION}-installer.jar")
    }

    pub fn loader_installer_url(&self) -> String {
        format!("{}/{}", self.downloads_base, self.loader_installer_name())
    }
}

/// Platform default `.minecraft/mods` directory.
pub fn default_mods_dir() -> PathBuf {
    let minecraft_dir = if cfg!(target_os = "macos") {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("minecraft")
    } else if cfg!(windows) {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    };
    minecraft_dir.join("mods")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_installer_url_matches_release_bucket() {
        let config = InstallConfig::default();
        assert_eq!(
            config.loader_installer_url(),
            "https://storage.googleapis.com/papayacraft-downloads/forge-1.16.5-36.1.1-installer.jar"
        );
    }

    #[test]
    fn pack_url_is_named_by_version() {
        let config = InstallConfig::default();
        assert_eq!(
            config.pack_url("3.2.0"),
            "https://storage.googleapis.com/papayacraft-downloads/papayacraft-v3.2.0.zip"
        );
    }

    #[test]
    fn default_mods_dir_ends_with_mods() {
        assert_eq!(
            default_mods_dir().file_name().and_then(|n| n.to_str()),
            Some("mods")
        );
    }
}
