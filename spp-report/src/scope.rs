//! Guards that tidy up the file system when they go out of scope.

use log::{debug, warn};
use std::{
    cell::RefCell,
    collections::HashSet,
    fs,
    io,
    path::{Path, PathBuf},
};

/// Lists every file and directory below `directory`, recursively.
fn snapshot(directory: &Path) -> io::Result<(HashSet<PathBuf>, HashSet<PathBuf>)> {
    let mut files = HashSet::new();
    let mut dirs = HashSet::new();
    let mut stack = vec![directory.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                dirs.insert(path.clone());
                stack.push(path);
            } else {
                files.insert(path);
            }
        }
    }

    Ok((files, dirs))
}

/// Records the contents of a directory when created, and when dropped, deletes the files and the
/// (empty) directories that were created in the meantime.
///
/// Files listed in `keep` survive, even if they are new. Nothing is deleted if the scope is
/// disabled.
#[derive(Debug)]
pub struct CleanDirectoryScope {
    directory: PathBuf,
    keep: Vec<PathBuf>,
    enabled: bool,
    files: HashSet<PathBuf>,
    dirs: HashSet<PathBuf>,
}

impl CleanDirectoryScope {
    /// Takes a snapshot of `directory`. Relative paths in `keep` are relative to `directory`.
    pub fn new<I, P>(directory: &Path, keep: I, enabled: bool) -> io::Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let (files, dirs) = snapshot(directory)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            keep: keep.into_iter().map(|path| directory.join(path)).collect(),
            enabled,
            files,
            dirs,
        })
    }

    /// Deletes the new files and directories.
    fn clean(&self) -> io::Result<()> {
        let (files, dirs) = snapshot(&self.directory)?;

        for file in files.difference(&self.files) {
            if !self.keep.contains(file) {
                debug!("removing `{}`", file.display());
                fs::remove_file(file)?;
            }
        }

        // deepest directories first, so that parents are empty by the time they are checked
        let mut new_dirs = dirs.difference(&self.dirs).collect::<Vec<_>>();
        new_dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));
        for dir in new_dirs {
            if fs::read_dir(dir)?.next().is_none() {
                debug!("removing directory `{}`", dir.display());
                fs::remove_dir(dir)?;
            }
        }

        Ok(())
    }
}

impl Drop for CleanDirectoryScope {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }

        if let Err(err) = self.clean() {
            warn!("could not clean `{}`: {}", self.directory.display(), err);
        }
    }
}

/// Keeps track of the marker files controlled by live [`FileScope`]s.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    controlled: RefCell<Vec<PathBuf>>,
}

impl ScopeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a live [`FileScope`] controls the given path.
    pub fn is_controlled(&self, path: &Path) -> bool {
        self.controlled.borrow().iter().any(|controlled| controlled == path)
    }

    fn register(&self, path: PathBuf) {
        self.controlled.borrow_mut().push(path);
    }

    fn unregister(&self, path: &Path) {
        let mut controlled = self.controlled.borrow_mut();
        if let Some(index) = controlled.iter().position(|controlled| controlled == path) {
            controlled.remove(index);
        }
    }
}

/// A marker file that exists for as long as the scope is alive.
///
/// On entry, the marker is created if it does not exist, and registered in the [`ScopeRegistry`].
/// When dropped, the marker is unregistered, and deleted unless it existed before the scope was
/// entered.
#[derive(Debug)]
pub struct FileScope<'a> {
    registry: &'a ScopeRegistry,
    path: PathBuf,
    existed: bool,
}

impl<'a> FileScope<'a> {
    /// Enters the scope for the marker at `path`.
    pub fn enter(registry: &'a ScopeRegistry, path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let existed = path.is_file();
        if !existed {
            fs::File::create(&path)?;
        }

        registry.register(path.clone());
        Ok(Self { registry, path, existed })
    }

    /// Returns the path of the marker.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileScope<'_> {
    fn drop(&mut self) {
        self.registry.unregister(&self.path);
        if !self.existed && self.path.is_file() {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!("could not remove marker `{}`: {}", self.path.display(), err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_files_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("old.txt"), "old").unwrap();

        {
            let _scope = CleanDirectoryScope::new(dir.path(), ["report.pdf"], true).unwrap();
            fs::write(dir.path().join("new.txt"), "new").unwrap();
            fs::write(dir.path().join("report.pdf"), "pdf").unwrap();
            fs::create_dir_all(dir.path().join("build/nested")).unwrap();
            fs::write(dir.path().join("build/nested/tmp.aux"), "aux").unwrap();
        }

        assert!(dir.path().join("old.txt").is_file());
        assert!(dir.path().join("report.pdf").is_file());
        assert!(!dir.path().join("new.txt").exists());
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn directories_with_old_files_survive() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("figures")).unwrap();

        {
            let _scope = CleanDirectoryScope::new(dir.path(), Vec::<PathBuf>::new(), true).unwrap();
            fs::write(dir.path().join("figures/plot.png"), "png").unwrap();
        }

        assert!(dir.path().join("figures").is_dir());
        assert!(!dir.path().join("figures/plot.png").exists());
    }

    #[test]
    fn disabled_scope_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();

        {
            let _scope = CleanDirectoryScope::new(dir.path(), Vec::<PathBuf>::new(), false).unwrap();
            fs::write(dir.path().join("new.txt"), "new").unwrap();
        }

        assert!(dir.path().join("new.txt").is_file());
    }

    #[test]
    fn marker_is_created_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("paper.lock");
        let registry = ScopeRegistry::new();

        {
            let scope = FileScope::enter(&registry, &marker).unwrap();
            assert_eq!(scope.path(), marker.as_path());
            assert!(marker.is_file());
            assert!(registry.is_controlled(&marker));
        }

        assert!(!marker.exists());
        assert!(!registry.is_controlled(&marker));
    }

    #[test]
    fn existing_marker_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("paper.lock");
        fs::write(&marker, "").unwrap();
        let registry = ScopeRegistry::new();

        {
            let _scope = FileScope::enter(&registry, &marker).unwrap();
            assert!(registry.is_controlled(&marker));
        }

        assert!(marker.is_file());
        assert!(!registry.is_controlled(&marker));
    }

    #[test]
    fn nested_scopes() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("paper.lock");
        let registry = ScopeRegistry::new();

        let outer = FileScope::enter(&registry, &marker).unwrap();
        {
            let _inner = FileScope::enter(&registry, &marker).unwrap();
        }
        // the inner scope found the marker already there
        assert!(marker.is_file());
        assert!(registry.is_controlled(&marker));
        drop(outer);
        assert!(!marker.exists());
    }
}
