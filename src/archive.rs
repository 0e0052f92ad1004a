// Zip handling: a located path may be an archive instead of a folder.
// Extraction goes to a sibling directory named after the archive with the
// suffix stripped. The confirmation prompt lives in the session layer so
// this module stays testable.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// True when the path names an existing `.zip` file.
pub fn looks_like_zip(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"))
        && path.is_file()
}

/// Extract every entry into `<archive-without-suffix>/` and return that
/// directory. A corrupt archive surfaces the error as-is; no cleanup of
/// partially extracted entries.
pub fn extract(path: &Path) -> Result<PathBuf> {
    let dest = path.with_extension("");
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid zip archive", path.display()))?;
    archive
        .extract(&dest)
        .with_context(|| format!("Failed to extract {}", path.display()))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("hello.txt", options).unwrap();
        writer.write_all(b"hi there").unwrap();
        writer.start_file("sub/nested.txt", options).unwrap();
        writer.write_all(b"deeper").unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn extracts_next_to_archive() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("bundle.zip");
        write_zip(&zip_path);

        let dest = extract(&zip_path).unwrap();
        assert_eq!(dest, dir.path().join("bundle"));
        assert_eq!(
            std::fs::read_to_string(dest.join("hello.txt")).unwrap(),
            "hi there"
        );
        assert_eq!(
            std::fs::read_to_string(dest.join("sub").join("nested.txt")).unwrap(),
            "deeper"
        );
    }

    #[test]
    fn detects_zip_only_when_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("real.zip");
        write_zip(&zip_path);

        assert!(looks_like_zip(&zip_path));
        assert!(!looks_like_zip(&dir.path().join("missing.zip")));
        let txt = dir.path().join("plain.txt");
        std::fs::write(&txt, "x").unwrap();
        assert!(!looks_like_zip(&txt));
    }

    #[test]
    fn corrupt_archive_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("bad.zip");
        std::fs::write(&zip_path, b"this is not a zip").unwrap();
        assert!(extract(&zip_path).is_err());
    }
}
