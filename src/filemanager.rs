use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};

fn normalize_path(path: &Path) -> PathBuf {
    let mut output = PathBuf::new();
    for part in path.iter() {
        if part == "." {
            continue;
        }
        if part == ".." {
            if !output.pop() {
                output.push(part);
            }
        } else {
            output.push(part);
        }
    }
    output
}

trait FileManagerImpl {
    // Ok(None) when the file doesn't exist.
    fn read_optional(&self, path: &Path) -> Result<Option<String>>;
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

struct DefaultFileManagerImpl {
    root: PathBuf,
}

impl FileManagerImpl for DefaultFileManagerImpl {
    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        let full_path = self.root.join(normalize_path(path));
        match fs::read_to_string(&full_path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow!("unable to read {:?}: {}", &full_path, e)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let full_path = self.root.join(normalize_path(path));
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("unable to create directory {:?}: {}", parent, e))?;
        }
        fs::write(&full_path, contents)
            .map_err(|e| anyhow!("unable to write {:?}: {}", &full_path, e))
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let full_pattern = self.root.join(pattern);
        let full_pattern = full_pattern
            .to_str()
            .context(format!("unable to encode pattern {:?}", full_pattern))?;
        let mut paths = Vec::new();
        for entry in glob::glob(full_pattern)
            .map_err(|e| anyhow!("invalid pattern {:?}: {}", full_pattern, e))?
        {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("skipping unreadable path: {}", e);
                    continue;
                }
            };
            let relative = path
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .unwrap_or(path);
            paths.push(relative);
        }
        Ok(paths)
    }
}

// Keeps everything in memory. Used for tests and for tools that shouldn't touch disk.
struct MemoryFileManager {
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl FileManagerImpl for MemoryFileManager {
    fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        let path = normalize_path(path);
        Ok(self.files.borrow().get(&path).cloned())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let path = normalize_path(path);
        debug!("writing {} bytes to {:?} in memory", contents.len(), &path);
        self.files.borrow_mut().insert(path, contents.to_owned());
        Ok(())
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern =
            glob::Pattern::new(pattern).map_err(|e| anyhow!("invalid pattern {:?}: {}", pattern, e))?;
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| pattern.matches_path(path))
            .cloned()
            .collect())
    }
}

pub struct FileManager {
    internal: Box<dyn FileManagerImpl>,
}

impl FileManager {
    pub fn from_fs(root: &Path) -> Self {
        Self {
            internal: Box::new(DefaultFileManagerImpl {
                root: root.to_owned(),
            }),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            internal: Box::new(MemoryFileManager {
                files: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        self.internal
            .read_optional(path)?
            .ok_or_else(|| anyhow!("file not found: {:?}", path))
    }

    pub fn read_optional(&self, path: &Path) -> Result<Option<String>> {
        self.internal.read_optional(path)
    }

    pub fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.internal.write(path, contents)
    }

    // Paths come back relative to the root, in no particular order.
    pub fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.internal.glob(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(
            normalize_path(Path::new("assets/levels/../saved/./race.txt")),
            PathBuf::from("assets/saved/race.txt")
        );
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn memory_round_trip() {
        let files = FileManager::in_memory();
        let path = Path::new("assets/saved/race.txt");
        assert_eq!(files.read_optional(path).unwrap(), None);
        assert!(files.read_to_string(path).is_err());

        files.write(path, "0;5.3\n").unwrap();
        assert_eq!(files.read_to_string(path).unwrap(), "0;5.3\n");
    }

    #[test]
    fn memory_glob() {
        let files = FileManager::in_memory();
        files.write(Path::new("assets/levels/a.tmx"), "").unwrap();
        files.write(Path::new("assets/levels/b.tmx"), "").unwrap();
        files.write(Path::new("assets/levels/notes.txt"), "").unwrap();
        let found = files.glob("assets/levels/*.tmx").unwrap();
        assert_eq!(
            found,
            vec![
                PathBuf::from("assets/levels/a.tmx"),
                PathBuf::from("assets/levels/b.tmx")
            ]
        );
    }

    #[test]
    fn fs_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileManager::from_fs(dir.path());
        let path = Path::new("assets/saved/race.txt");
        assert_eq!(files.read_optional(path).unwrap(), None);

        files.write(path, "1;12.5\n").unwrap();
        assert_eq!(files.read_to_string(path).unwrap(), "1;12.5\n");
        assert!(dir.path().join("assets/saved/race.txt").exists());

        files.write(Path::new("assets/levels/race.tmx"), "").unwrap();
        let found = files.glob("assets/levels/*.tmx").unwrap();
        assert_eq!(found, vec![PathBuf::from("assets/levels/race.tmx")]);
    }
}
