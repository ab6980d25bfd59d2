use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// the directory the articles are written into
///
/// the directory is wiped when the guard is created and is guaranteed to exist again once the
/// guard is dropped, whatever happened in between
#[derive(Debug)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// remove whatever is at `path` and create it again empty
    pub fn recreate<T: AsRef<Path>>(path: T) -> io::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            log::debug!("Removing {path:?}");
            fs::remove_dir_all(path)?;
        }
        fs::create_dir_all(path)?;
        Ok(Self { path: path.into() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// write `contents` to `<dir>/<file_name>`, returning the written path
    pub fn write(&self, file_name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.path.join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for OutputDir {
    fn drop(&mut self) {
        if self.path.is_dir() {
            return;
        }
        if let Err(err) = fs::create_dir_all(&self.path) {
            log::warn!("Failed to restore {:?}: `{err}`", self.path);
        }
    }
}
