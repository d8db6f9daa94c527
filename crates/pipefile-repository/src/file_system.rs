//! Local file system probe

use pipefile_core::FileSystemProbe;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Bytes inspected when deciding whether a file is text
const TEXT_SNIFF_LEN: usize = 8192;

/// [`FileSystemProbe`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystemProbe for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, _path: &Path) -> bool {
        false
    }

    /// A regular file whose first bytes are NUL-free UTF-8
    fn is_text_file(&self, path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }
        let mut head = Vec::with_capacity(TEXT_SNIFF_LEN);
        let read = File::open(path).and_then(|file| file.take(TEXT_SNIFF_LEN as u64).read_to_end(&mut head));
        if read.is_err() || head.contains(&0) {
            return false;
        }
        match std::str::from_utf8(&head) {
            Ok(_) => true,
            // A multi-byte character cut at the end of the window is fine
            Err(e) => e.error_len().is_none(),
        }
    }

    fn dir_name(&self, path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_name() {
        let fs = LocalFileSystem;
        assert_eq!(fs.dir_name(Path::new("/a/b/c.pipe")), PathBuf::from("/a/b"));
        assert_eq!(fs.dir_name(Path::new("c.pipe")), PathBuf::from("."));
    }

    #[test]
    fn test_text_and_binary_files() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("a.pipe");
        let binary = dir.path().join("a.bin");
        fs::write(&text, "echo héllo\n").unwrap();
        fs::write(&binary, [0x7f, b'E', b'L', b'F', 0, 1]).unwrap();

        let fs = LocalFileSystem;
        assert!(fs.is_text_file(&text));
        assert!(!fs.is_text_file(&binary));
        assert!(!fs.is_text_file(dir.path()));
        assert!(!fs.is_text_file(&dir.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        assert!(!LocalFileSystem.is_executable(&script));

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(LocalFileSystem.is_executable(&script));
    }
}
