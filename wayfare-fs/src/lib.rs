//! Capability-based file access for Wayfare configuration files.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};

/// Open the directory containing `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` exists and is a regular file.
///
/// A missing file or parent directory yields `Ok(false)`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Read a UTF-8 text file through its parent directory capability.
pub fn read_utf8_file(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_dir_and_file(path)?;
    let mut file = dir.open(name.as_str())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use std::io::Write;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).expect("temp paths are UTF-8")
    }

    #[rstest]
    fn reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"taxi\": {{\"base_fare\": 60.0, \"per_km\": 12.0}}}}").expect("write");
        let contents = read_utf8_file(&utf8(file.path())).expect("read");
        assert!(contents.contains("base_fare"));
    }

    #[rstest]
    fn detects_regular_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = utf8(dir.path());
        let file = root.join("fares.json");
        std::fs::write(&file, "{}").expect("write");

        assert!(file_is_file(&file).expect("metadata"));
        assert!(!file_is_file(&root.join("missing.json")).expect("metadata"));
        assert!(!file_is_file(&root.join("no-such-dir/fares.json")).expect("metadata"));
    }

    #[rstest]
    fn bare_file_names_resolve_against_the_current_directory() {
        let (_, name) = open_dir_and_file(Utf8Path::new("Cargo.toml")).expect("cwd exists");
        assert_eq!(name, "Cargo.toml");
    }
}
