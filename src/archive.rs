//! Package archiving
//!
//! CoreML (and OpenVINO) exports are directories, which is awkward for
//! upload and distribution. [`zip_directory`] flattens a package directory
//! into `<stem>.zip` next to it, entry names prefixed with the directory
//! name so extraction recreates the package. [`archive_package`] then
//! renames the archive to the full `<package>.zip` form the release
//! pipeline expects (`yolo11n.mlpackage.zip`).

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Junk entries never included in archives.
const EXCLUDED: [&str; 2] = [".DS_Store", "__MACOSX"];

/// Zip a package directory into a sibling `<stem>.zip`.
///
/// The archive replaces the directory's extension, so `yolo11n.mlpackage`
/// becomes `yolo11n.zip`. Entries are stored as `<dir name>/<relative
/// path>` in sorted order. macOS metadata files are skipped.
pub fn zip_directory(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(Error::PackageMissing {
            path: dir.to_path_buf(),
        });
    }
    let dir_name = dir
        .file_name()
        .ok_or_else(|| Error::PackageMissing {
            path: dir.to_path_buf(),
        })?
        .to_string_lossy()
        .into_owned();

    let mut files = Vec::new();
    collect_files(dir, Path::new(""), &mut files)?;
    files.sort();

    let zip_path = dir.with_extension("zip");
    let out = File::create(&zip_path)?;
    let mut zip = zip::ZipWriter::new(out);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for rel in &files {
        zip.start_file(entry_name(&dir_name, rel), options)?;
        let mut src = File::open(dir.join(rel))?;
        io::copy(&mut src, &mut zip)?;
    }
    zip.finish()?;

    Ok(zip_path)
}

/// Zip a package directory and rename the archive to `<package>.zip`.
///
/// `yolo11n.mlpackage` ends up as `yolo11n.mlpackage.zip`. Returns the
/// final archive path.
pub fn archive_package(package: &Path) -> Result<PathBuf> {
    let zipped = zip_directory(package)?;
    let file_name = package
        .file_name()
        .ok_or_else(|| Error::PackageMissing {
            path: package.to_path_buf(),
        })?
        .to_string_lossy();
    let target = package.with_file_name(format!("{file_name}.zip"));
    if zipped != target {
        fs::rename(&zipped, &target)?;
    }
    Ok(target)
}

/// Recursively collect file paths relative to `root`, skipping excluded
/// names at any depth.
fn collect_files(root: &Path, rel: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(root.join(rel))? {
        let entry = entry?;
        let name = entry.file_name();
        if EXCLUDED.iter().any(|ex| name == *ex) {
            continue;
        }
        let rel_path = rel.join(&name);
        let ty = entry.file_type()?;
        if ty.is_dir() {
            collect_files(root, &rel_path, out)?;
        } else if ty.is_file() {
            out.push(rel_path);
        }
    }
    Ok(())
}

/// Archive entry name: directory name plus the relative path, always
/// '/'-separated.
fn entry_name(dir_name: &str, rel: &Path) -> String {
    let mut name = String::from(dir_name);
    for component in rel.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}
