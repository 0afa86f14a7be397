//! File-reading workers

use crate::models::FileResult;
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read one file. Unreadable files yield `None` and are not reported.
pub fn read_file(path: PathBuf, source_extension: &str) -> Option<FileResult> {
    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) => {
            debug!("Dropping unreadable file {}: {}", path.display(), e);
            return None;
        }
    };

    let is_source_file = is_source_file(&path, source_extension);
    Some(FileResult {
        content: String::from_utf8_lossy(&bytes).into_owned(),
        path,
        is_source_file,
    })
}

pub fn is_source_file(path: &Path, source_extension: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(source_extension))
}

/// Worker loop: drain the path queue, push results until either side closes
pub fn run_worker(rx: Receiver<PathBuf>, tx: Sender<FileResult>, source_extension: &str) {
    for path in rx {
        if let Some(result) = read_file(path, source_extension) {
            if tx.send(result).is_err() {
                break; // Consumer closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use tempfile::TempDir;

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("a/b/main.go"), ".go"));
        assert!(!is_source_file(Path::new("a/b/main.go.txt"), ".go"));
        assert!(!is_source_file(Path::new("go"), ".go"));
        assert!(!is_source_file(Path::new("README.md"), ".go"));
    }

    #[test]
    fn test_read_file_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bin.go");
        std::fs::write(&path, [b'p', 0xff, b'\n', b'x']).unwrap();

        let result = read_file(path.clone(), ".go").unwrap();
        assert!(result.is_source_file);
        assert_eq!(result.path, path);
        assert_eq!(result.content.split('\n').count(), 2);
    }

    #[test]
    fn test_worker_drops_missing_files() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("a.txt");
        std::fs::write(&present, "hello").unwrap();

        let (path_tx, path_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        path_tx.send(dir.path().join("missing.go")).unwrap();
        path_tx.send(present.clone()).unwrap();
        drop(path_tx);

        run_worker(path_rx, result_tx, ".go");
        let results: Vec<FileResult> = result_rx.iter().collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, present);
        assert!(!results[0].is_source_file);
    }
}
