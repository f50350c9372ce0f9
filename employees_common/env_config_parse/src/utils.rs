use std::env;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Searches the current directory tree for `file_name` and returns its absolute path.
pub fn find_file(file_name: &str) -> Result<PathBuf, String> {
    let current_dir = env::current_dir()
        .map_err(|e| format!("Failed to get current directory: {}", e))?;
    find_file_in(&current_dir, file_name)
}

/// Same as [`find_file`] but rooted at `root`.
pub fn find_file_in(root: &Path, file_name: &str) -> Result<PathBuf, String> {
    let root = root.canonicalize()
        .map_err(|e| format!("Failed to canonicalize path: {}", e))?;

    for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.file_name() == Some(Path::new(file_name).as_os_str()) {
            return path.canonicalize()
                .map_err(|e| format!("Failed to canonicalize file path: {}", e));
        }
    }

    Err(format!("File '{}' not found in {}", file_name, root.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_file_in_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("conf").join("local");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("logging.yaml"), "loggers: []").unwrap();

        let found = find_file_in(dir.path(), "logging.yaml").unwrap();
        assert!(found.ends_with("conf/local/logging.yaml"));
    }

    #[test]
    fn test_find_file_in_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_file_in(dir.path(), "logging.yaml").unwrap_err();
        assert!(err.contains("not found"));
    }
}
