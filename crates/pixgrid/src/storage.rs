//! Destinations a grid can be saved to.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter};

use pixgrid_core::Grid;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("destination rejected: {0}")]
    Rejected(String),
}

/// A sink that rendered grids are written to, keyed by destination name.
pub trait Storage {
    /// Writes `grid` to `destination`, replacing anything already there.
    fn save(&mut self, destination: &str, grid: &Grid) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn save(&mut self, destination: &str, grid: &Grid) -> Result<(), StorageError> {
        (**self).save(destination, grid)
    }
}

/// Saves grids to files, truncating existing ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileStorage;

impl Storage for FileStorage {
    fn save(&mut self, destination: &str, grid: &Grid) -> Result<(), StorageError> {
        let mut writer = BufWriter::new(File::create(destination)?);
        grid.save(&mut writer)?;
        Ok(())
    }
}

/// Keeps saved grids in memory instead of touching the filesystem.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    contents: HashMap<String, String>,
    order: Vec<String>,
    reject_reason: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A storage that refuses every write with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject_reason: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn read(&self, destination: &str) -> Option<&str> {
        self.contents.get(destination).map(String::as_str)
    }

    /// Destinations in the order they were first written.
    pub fn destinations(&self) -> &[String] {
        &self.order
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, destination: &str, grid: &Grid) -> Result<(), StorageError> {
        if let Some(reason) = &self.reject_reason {
            return Err(StorageError::Rejected(reason.clone()));
        }

        let mut buf = Vec::new();
        grid.save(&mut buf)?;
        let text = String::from_utf8(buf)
            .map_err(|e| StorageError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        if self.contents.insert(destination.to_string(), text).is_none() {
            self.order.push(destination.to_string());
        }
        Ok(())
    }
}
