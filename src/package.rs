use crate::error::InsiderError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Zip a source directory into `<dir>.zip` next to it and return the archive
/// path. Entries are stored with paths relative to the directory root.
pub fn package_directory(dir: &Path) -> Result<PathBuf, InsiderError> {
    let archive_path = dir.with_extension("zip");
    let archive = File::create(&archive_path)?;
    let mut writer = ZipWriter::new(archive);
    let options = SimpleFileOptions::default();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or_else(|_| entry.path());
        let name = relative.to_string_lossy().replace('\\', "/");

        writer.start_file(name, options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut writer)?;
    }

    writer.finish()?;
    tracing::info!(archive = %archive_path.display(), "packaged source directory");
    Ok(archive_path)
}
