//! Capability-based file helpers for starhaul, built on `cap-std` and `camino`.
//!
//! Every path is split into an ambient parent directory handle and a file
//! name; all reads and writes then go through that handle.

#![forbid(unsafe_code)]

use std::io::{self, Read, Write};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open the parent directory of `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
/// Fails when the parent directory cannot be opened or the metadata lookup
/// fails for a reason other than the file being absent.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Read the whole of a UTF-8 file.
///
/// # Errors
/// Fails when the file cannot be opened or is not valid UTF-8.
pub fn read_utf8(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_dir_and_file(path)?;
    let mut file = dir.open(name.as_str())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Write `contents` to `path`, creating missing parent directories and
/// truncating any existing file.
///
/// # Errors
/// Fails when a directory cannot be created or the file cannot be written.
pub fn write_utf8(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    let mut file = dir.create(name.as_str())?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

/// Create the parent directory of `path` if it does not exist.
///
/// # Errors
/// Fails when the directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (base, relative) = split_base(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

/// Split `path` into an ambient base directory (root, drive or `.`) and the
/// remainder relative to it.
fn split_base(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let base = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let drive = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(drive).join(std::path::MAIN_SEPARATOR.to_string())
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if base.as_str() == "." {
        path.to_path_buf()
    } else {
        path.strip_prefix(&base)
            .map_err(|_| io::Error::other(format!("cannot strip {base} from {path}")))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn utf8(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("temp path is UTF-8")
    }

    #[rstest]
    fn write_then_read_round_trips(temp: TempDir) {
        let path = utf8(&temp, "nested/deeper/report.json");
        write_utf8(&path, "{\"cost\":9}").expect("write");
        assert_eq!(read_utf8(&path).expect("read"), "{\"cost\":9}");
    }

    #[rstest]
    fn write_truncates_existing_files(temp: TempDir) {
        let path = utf8(&temp, "report.txt");
        write_utf8(&path, "a longer first draft").expect("write");
        write_utf8(&path, "short").expect("rewrite");
        assert_eq!(read_utf8(&path).expect("read"), "short");
    }

    #[rstest]
    fn file_is_file_distinguishes_files_and_directories(temp: TempDir) {
        let file = utf8(&temp, "haul.json");
        write_utf8(&file, "{}").expect("write");
        assert!(file_is_file(&file).expect("metadata"));
        assert!(!file_is_file(&utf8(&temp, "missing.json")).expect("metadata"));

        let dir = utf8(&temp, "nested");
        ensure_parent_dir(&dir.join("child")).expect("mkdir");
        assert!(!file_is_file(&dir).expect("metadata"));
    }

    #[rstest]
    fn read_reports_missing_files(temp: TempDir) {
        let err = read_utf8(&utf8(&temp, "absent.json")).expect_err("file is missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn paths_without_file_names_are_rejected() {
        assert!(open_dir_and_file(Utf8Path::new("/")).is_err());
    }
}
