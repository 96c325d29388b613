//! Dataset loading.
//!
//! The three collections are read once at startup and never change. They
//! come either from the sample data compiled into the binary or from a data
//! directory:
//!
//! ```text
//! data/
//! ├── config.toml     # Optional, see `config`
//! ├── users.json      # [{ "id": 1, "name": "Roma", "sex": "m" }, ...]
//! ├── albums.json     # [{ "id": 1, "title": "...", "userId": 1 }, ...]
//! └── photos.json     # [{ "id": 1, "title": "...", "albumId": 1, "url": "..." }, ...]
//! ```
//!
//! File names are configurable through `[dataset]`. Ids must be unique
//! within each collection; references between collections are checked later
//! by the join.

use crate::config::DatasetConfig;
use crate::join::{self, LookupError};
use crate::types::{Album, EnrichedPhoto, Photo, User};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error in {name}: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },
    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },
}

const BUILTIN_USERS: &str = include_str!("../data/users.json");
const BUILTIN_ALBUMS: &str = include_str!("../data/albums.json");
const BUILTIN_PHOTOS: &str = include_str!("../data/photos.json");

/// The static source collections.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub albums: Vec<Album>,
    pub photos: Vec<Photo>,
}

impl Dataset {
    /// The sample dataset shipped with the binary.
    pub fn builtin() -> Result<Self, DatasetError> {
        let dataset = Self {
            users: parse("users.json", BUILTIN_USERS)?,
            albums: parse("albums.json", BUILTIN_ALBUMS)?,
            photos: parse("photos.json", BUILTIN_PHOTOS)?,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load the collections from `dir` using the configured file names.
    pub fn load(dir: &Path, files: &DatasetConfig) -> Result<Self, DatasetError> {
        let dataset = Self {
            users: read_collection(&dir.join(&files.users))?,
            albums: read_collection(&dir.join(&files.albums))?,
            photos: read_collection(&dir.join(&files.photos))?,
        };
        dataset.validate()?;
        log::info!(
            "loaded {} users, {} albums, {} photos from {}",
            dataset.users.len(),
            dataset.albums.len(),
            dataset.photos.len(),
            dir.display()
        );
        Ok(dataset)
    }

    /// Reject duplicate ids within each collection.
    pub fn validate(&self) -> Result<(), DatasetError> {
        check_unique("user", self.users.iter().map(|u| u.id))?;
        check_unique("album", self.albums.iter().map(|a| a.id))?;
        check_unique("photo", self.photos.iter().map(|p| p.id))?;
        Ok(())
    }

    /// Run the join stage over this dataset.
    pub fn join(&self) -> Result<Vec<EnrichedPhoto>, LookupError> {
        join::join(&self.photos, &self.albums, &self.users)
    }

    /// Albums owned by `owner_id`, or every album when `None`.
    pub fn albums_of(&self, owner_id: Option<u32>) -> impl Iterator<Item = &Album> {
        self.albums
            .iter()
            .filter(move |a| owner_id.is_none_or(|owner| a.user_id == owner))
    }
}

fn check_unique(kind: &'static str, ids: impl Iterator<Item = u32>) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DatasetError::DuplicateId { kind, id });
        }
    }
    Ok(())
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&path.display().to_string(), &content)
}

fn parse<T: DeserializeOwned>(name: &str, content: &str) -> Result<Vec<T>, DatasetError> {
    serde_json::from_str(content).map_err(|source| DatasetError::Json {
        name: name.to_string(),
        source,
    })
}
