use crate::error::FixError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists regular files under `root` whose extension is one of `extensions`
/// (case-insensitive, without the leading dot), sorted by path.
pub fn find_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, FixError> {
    if !root.exists() {
        return Err(FixError::FileNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(source) => FixError::Io { path, source },
                None => FixError::FileNotFound { path },
            }
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn md() -> Vec<String> {
        vec!["md".to_string()]
    }

    #[test]
    fn test_find_files_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let specs = dir.path().join("specs");
        fs::create_dir_all(specs.join("SPEC-24/Research")).unwrap();
        fs::write(specs.join("b.md"), "").unwrap();
        fs::write(specs.join("a.MD"), "").unwrap();
        fs::write(specs.join("SPEC-24/Research/notes.md"), "").unwrap();
        fs::write(specs.join("SPEC-24/Research/chart.py"), "").unwrap();

        let files = find_files(&specs, &md()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(&specs).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            rel,
            vec![
                PathBuf::from("SPEC-24/Research/notes.md"),
                PathBuf::from("a.MD"),
                PathBuf::from("b.md"),
            ]
        );
    }

    #[test]
    fn test_find_files_accepts_dotted_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.markdown"), "").unwrap();
        let files = find_files(dir.path(), &[".markdown".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_find_files_missing_root() {
        let dir = tempdir().unwrap();
        let result = find_files(&dir.path().join("nope"), &md());
        assert!(matches!(result, Err(FixError::FileNotFound { .. })));
    }
}
