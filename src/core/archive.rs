// ─── Archive Extractor ───
// Unpacks the pack zip into the install directory. Existing files are
// overwritten; entries matched by the exclusion predicate are skipped so
// user-modified configuration survives a reinstall.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{InstallerError, InstallerResult};

/// Extract every entry of `archive_path` into `dest`, creating `dest`
/// recursively (no error if it already exists). Entries for which
/// `exclude` returns true are skipped; the predicate receives the entry's
/// sanitised relative path.
pub fn extract_archive<F>(archive_path: &Path, dest: &Path, exclude: F) -> InstallerResult<()>
where
    F: Fn(&Path) -> bool,
{
    let file = std::fs::File::open(archive_path).map_err(|source| InstallerError::Io {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file)?;

    std::fs::create_dir_all(dest).map_err(|source| InstallerError::Io {
        path: dest.to_path_buf(),
        source,
    })?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        let rel_path: PathBuf = entry
            .enclosed_name()
            .ok_or_else(|| InstallerError::UnsafeArchiveEntry(entry.name().to_string()))?;

        if rel_path.as_os_str().is_empty() {
            continue;
        }

        if exclude(&rel_path) {
            debug!("Skipping reserved entry {:?}", rel_path);
            continue;
        }

        let out_path = dest.join(&rel_path);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|source| InstallerError::Io {
                path: out_path,
                source,
            })?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| InstallerError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut out = std::fs::File::create(&out_path).map_err(|source| InstallerError::Io {
            path: out_path.clone(),
            source,
        })?;
        std::io::copy(&mut entry, &mut out).map_err(|source| InstallerError::Io {
            path: out_path.clone(),
            source,
        })?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode)).map_err(
                |source| InstallerError::Io {
                    path: out_path,
                    source,
                },
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_test_archive(path: &Path, entries: &[(&str, &str)]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn extracts_entries_and_creates_destination() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("pack.zip");
        write_test_archive(
            &archive,
            &[("mods/papaya.jar", "jar bytes"), ("readme.txt", "hello")],
        );

        let dest = dir.path().join("out").join("nested");
        extract_archive(&archive, &dest, |_| false).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("mods/papaya.jar")).unwrap(),
            "jar bytes"
        );
        assert_eq!(std::fs::read_to_string(dest.join("readme.txt")).unwrap(), "hello");
    }

    #[test]
    fn overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("pack.zip");
        write_test_archive(&archive, &[("mods/papaya.jar", "new")]);

        let dest = dir.path().join("out");
        std::fs::create_dir_all(dest.join("mods")).unwrap();
        std::fs::write(dest.join("mods/papaya.jar"), "old").unwrap();

        extract_archive(&archive, &dest, |_| false).unwrap();
        assert_eq!(
            std::fs::read_to_string(dest.join("mods/papaya.jar")).unwrap(),
            "new"
        );
    }

    #[test]
    fn excluded_entries_are_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("pack.zip");
        write_test_archive(
            &archive,
            &[
                ("config/papaya.toml", "defaults"),
                ("mods/papaya.jar", "jar bytes"),
            ],
        );

        let dest = dir.path().join("out");
        std::fs::create_dir_all(dest.join("config")).unwrap();
        std::fs::write(dest.join("config/papaya.toml"), "user tweaks").unwrap();

        let exclude = |rel: &Path| rel.starts_with("config");
        extract_archive(&archive, &dest, exclude).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("config/papaya.toml")).unwrap(),
            "user tweaks"
        );
        assert!(dest.join("mods/papaya.jar").exists());
    }

    #[test]
    fn malformed_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        std::fs::write(&archive, b"this is not a zip").unwrap();

        let result = extract_archive(&archive, &dir.path().join("out"), |_| false);
        assert!(matches!(result, Err(InstallerError::Zip(_))));
    }
}
