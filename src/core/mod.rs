// ─── Papayacraft Installer Core ───
// Backend for the interactive modpack installer.
//
// Architecture:
//   core/
//     config/     — install configuration + platform default paths
//     manifest/   — version manifest fetch + parse
//     downloader/ — streaming artifact downloads
//     process/    — subprocess runner with error-as-data results
//     archive/    — zip extraction with reserved-entry exclusion
//     prompt/     — yes/no confirmation gate
//     progress/   — cosmetic status spinner
//     pipeline/   — the installation state machine

pub mod archive;
pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod manifest;
pub mod pipeline;
pub mod process;
pub mod progress;
pub mod prompt;
