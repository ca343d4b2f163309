use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to get default data directory")]
    NoDefault,
    #[error("failed to create data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory holding the logs of the application.
#[derive(Clone, Debug, PartialEq)]
pub struct DataDirectory(PathBuf);

impl DataDirectory {
    pub fn new(p: PathBuf) -> Self {
        DataDirectory(p)
    }

    pub fn new_default() -> Result<Self, DirectoryError> {
        default_datadir().map(DataDirectory::new)
    }

    pub fn init(&self) -> Result<(), DirectoryError> {
        std::fs::create_dir_all(self.0.as_path())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.0.as_path()
    }
}

/// A "change-facility" directory in the local data directory of the OS.
fn default_datadir() -> Result<PathBuf, DirectoryError> {
    let mut path = dirs::data_local_dir().ok_or(DirectoryError::NoDefault)?;
    path.push("change-facility");
    Ok(path)
}
