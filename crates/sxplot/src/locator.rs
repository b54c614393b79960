//! Finding Touchstone files on disk.
//!
//! [`discover`] lists the candidate files of one directory and [`select`]
//! picks a single file from them by a fragment of its path.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::SxplotError;

/// Lists the files directly under `directory` whose name contains `filter`.
///
/// The match is a plain substring match on the file name, so `.s2p` also
/// matches `amp.s2p.bak`. Subdirectories are neither descended into nor
/// returned. The result is sorted by path.
///
/// # Errors
///
/// Returns [`SxplotError::InvalidDirectory`] if `directory` does not exist
/// or is not a directory, and [`SxplotError::Io`] if it cannot be listed.
pub fn discover(directory: &Path, filter: &str) -> Result<Vec<PathBuf>, SxplotError> {
    if !directory.is_dir() {
        warn!(directory:? = directory; "Directory does not exist or is not a directory");
        return Err(SxplotError::InvalidDirectory(directory.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        // Follows symlinks; dangling links are skipped
        if !entry.path().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(filter) {
            candidates.push(entry.path());
        }
    }
    candidates.sort();

    info!(directory:? = directory, filter, candidates = candidates.len(); "Files discovered");
    Ok(candidates)
}

/// Returns the first candidate whose path contains `fragment`.
///
/// # Errors
///
/// Returns [`SxplotError::FileNotFound`] if no candidate matches.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use sxplot::locator::select;
///
/// let candidates = vec![PathBuf::from("a/x1.s2p"), PathBuf::from("a/x2.s2p")];
/// assert_eq!(select(&candidates, "x2").unwrap(), Path::new("a/x2.s2p"));
/// assert!(select(&candidates, "zz").is_err());
/// ```
pub fn select<'a, P: AsRef<Path>>(
    candidates: &'a [P],
    fragment: &str,
) -> Result<&'a Path, SxplotError> {
    let found = candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|path| path.to_string_lossy().contains(fragment));

    match found {
        Some(path) => {
            debug!(fragment, path:? = path; "File selected");
            Ok(path)
        }
        None => {
            warn!(fragment, candidates = candidates.len(); "No file matches fragment");
            Err(SxplotError::FileNotFound {
                fragment: fragment.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;

    #[test]
    fn test_discover_missing_directory() {
        let result = discover(Path::new("/does/not/exist"), ".s2p");
        assert!(matches!(result, Err(SxplotError::InvalidDirectory(_))));
    }

    #[test]
    fn test_discover_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.s2p");
        File::create(&file).unwrap();

        let result = discover(&file, ".s2p");
        assert!(matches!(result, Err(SxplotError::InvalidDirectory(path)) if path == file));
    }

    #[test]
    fn test_discover_substring_sorted_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.s2p", "a.s2p", "c.s4p", "notes.txt", "old.s2p.bak"] {
            File::create(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join("nested.s2p")).unwrap();
        File::create(dir.path().join("nested.s2p").join("d.s2p")).unwrap();

        let found = discover(dir.path(), ".s2p").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.s2p", "b.s2p", "old.s2p.bak"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_file_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let target = elsewhere.path().join("measured.s2p");
        File::create(&target).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("thru.s2p")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("gone.s2p"), dir.path().join("dangling.s2p"))
            .unwrap();

        let found = discover(dir.path(), ".s2p").unwrap();
        assert_eq!(found, vec![dir.path().join("thru.s2p")]);
        assert_eq!(select(&found, "thru").unwrap(), found[0].as_path());
    }

    #[test]
    fn test_discover_no_match_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.s2p")).unwrap();

        assert!(discover(dir.path(), ".s3p").unwrap().is_empty());
    }

    #[test]
    fn test_select_first_match_wins() {
        let candidates = vec![
            PathBuf::from("m/p1 - 1, p2 - 4.s2p"),
            PathBuf::from("m/p1 - 1, p2 -2.s2p"),
            PathBuf::from("m/p1 - 1, p2 -2 (repeat).s2p"),
        ];
        assert_eq!(
            select(&candidates, "p1 - 1, p2 -2").unwrap(),
            Path::new("m/p1 - 1, p2 -2.s2p")
        );
    }

    #[test]
    fn test_select_matches_directory_part() {
        let candidates = vec![PathBuf::from("run1/a.s2p"), PathBuf::from("run2/a.s2p")];
        assert_eq!(select(&candidates, "run2").unwrap(), Path::new("run2/a.s2p"));
    }

    #[test]
    fn test_select_not_found() {
        let candidates = vec![PathBuf::from("a/x1.s2p")];
        let err = select(&candidates, "zz").unwrap_err();
        assert!(matches!(err, SxplotError::FileNotFound { ref fragment } if fragment == "zz"));
        assert_eq!(err.to_string(), "No Touchstone file matches `zz`");
    }

    #[test]
    fn test_select_empty_candidates() {
        let candidates: Vec<PathBuf> = Vec::new();
        assert!(select(&candidates, "").is_err());
    }
}
