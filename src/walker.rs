use std::path::{Path, PathBuf};
use tracing::{trace, warn};
use walkdir::WalkDir;

/// Files found under a root, plus the entries that could not be read
#[derive(Debug, Default)]
pub struct SourceFiles {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<UnreadableEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableEntry {
    pub path: PathBuf,
    pub error: String,
}

/// Recursively collect regular files under `root` whose extension is `extension` (no dot), sorted.
/// A `root` that is itself a matching file yields just that file. Entries that cannot be read
/// are recorded and skipped; the rest of the tree is still walked.
pub fn find_source_files(root: &Path, extension: &str) -> SourceFiles {
    let mut found = SourceFiles::default();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                found.unreadable.push(UnreadableEntry {
                    path,
                    error: err.to_string(),
                });
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            trace!(path = %entry.path().display(), "matched source file");
            found.files.push(entry.into_path());
        }
    }

    found.files.sort();
    found
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy() == extension)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_nested_files_with_extension() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/User.kt"), "").unwrap();
        fs::write(dir.path().join("a/Order.kt"), "").unwrap();
        fs::write(dir.path().join("a/build.gradle.kts"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let found = find_source_files(dir.path(), "kt");
        assert_eq!(
            found.files,
            vec![dir.path().join("a/Order.kt"), dir.path().join("a/b/User.kt")]
        );
        assert!(found.unreadable.is_empty());
    }

    #[test]
    fn test_root_file_is_accepted() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Model.kt");
        fs::write(&file, "").unwrap();

        assert_eq!(find_source_files(&file, "kt").files, vec![file]);
    }

    #[test]
    fn test_missing_root_is_recorded_as_unreadable() {
        let dir = TempDir::new().unwrap();
        let absent = dir.path().join("absent");

        let found = find_source_files(&absent, "kt");
        assert!(found.files.is_empty());
        assert_eq!(found.unreadable.len(), 1);
        assert_eq!(found.unreadable[0].path, absent);
    }

    #[cfg(unix)]
    #[test]
    fn test_locked_directory_does_not_hide_other_files() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.kt"), "").unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("Hidden.kt"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions
        let still_readable = fs::read_dir(&locked).is_ok();

        let found = find_source_files(dir.path(), "kt");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(found.files.contains(&dir.path().join("A.kt")));
        if !still_readable {
            assert_eq!(found.unreadable.len(), 1);
            assert_eq!(found.unreadable[0].path, locked);
            assert!(!found.files.contains(&locked.join("Hidden.kt")));
        }
    }
}
