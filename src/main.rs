use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use papayacraft_installer::core::prompt::StdinAnswers;
use papayacraft_installer::{InstallConfig, Installer, InstallerError};

/// Installs the Papayacraft modpack into your Minecraft mods directory.
#[derive(Debug, Parser)]
#[command(name = "papayacraft-installer", version, about)]
struct Cli {
    /// Mods directory to install under (defaults to the platform
    /// .minecraft/mods directory).
    #[arg(long)]
    mods_dir: Option<PathBuf>,

    /// Skip the initial confirmation and proceed immediately.
    #[arg(short = 'y', long)]
    yes: bool,

    /// Never prompt for (or run) the Forge mod loader installer.
    #[arg(long)]
    no_loader: bool,

    /// Override the manifest endpoint.
    #[arg(long, hide = true)]
    manifest_url: Option<String>,
}

impl Cli {
    fn into_config(self) -> InstallConfig {
        let mut config = InstallConfig::default();
        if let Some(mods_dir) = self.mods_dir {
            config.base_mods_dir = mods_dir;
        }
        if let Some(manifest_url) = self.manifest_url {
            config.manifest_url = manifest_url;
        }
        config.preconfirm_enabled = !self.yes;
        config.mod_loader_prompt_enabled = !self.no_loader;
        config
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,papayacraft_installer=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.into_config()).await {
        Ok(install_dir) => {
            println!("Successfully Installed at {}", install_dir.display());
            println!("Exiting successfully");
        }
        Err(InstallerError::UserDeclined) => {
            // Not a fault: exit cleanly with no error indication.
            println!("Install cancelled.");
        }
        Err(err) => {
            eprintln!("Install failed!");
            eprintln!("{err}");
            eprintln!("please try to fix the issue above if possible and try again!");
            std::process::exit(1);
        }
    }
}

async fn run(config: InstallConfig) -> Result<PathBuf, InstallerError> {
    let installer = Installer::new(config)?;
    installer.run(&mut StdinAnswers).await
}
