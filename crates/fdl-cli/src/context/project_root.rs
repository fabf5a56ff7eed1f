use std::path::{Path, PathBuf};

/// Walk upwards from `start` until a `.fdl` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(fdl_config::PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::find_project_root;

    #[test]
    fn finds_project_root_in_current_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".fdl")).expect(".fdl should create");

        let found = find_project_root(temp.path());
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn finds_project_root_in_parent_directory() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".fdl")).expect(".fdl should create");
        std::fs::create_dir_all(temp.path().join("tests/unit")).expect("nested dirs should create");

        let found = find_project_root(&temp.path().join("tests/unit"));
        assert_eq!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn a_plain_file_named_fdl_does_not_count() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::write(temp.path().join(".fdl"), "").expect("file should write");
        std::fs::create_dir_all(temp.path().join("a")).expect("dir should create");

        let found = find_project_root(&temp.path().join("a"));
        assert_ne!(found.as_deref(), Some(temp.path()));
    }
}
