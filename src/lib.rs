pub mod core;

pub use crate::core::config::InstallConfig;
pub use crate::core::error::{InstallerError, InstallerResult};
pub use crate::core::pipeline::Installer;
