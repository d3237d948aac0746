use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single recipe from the dataset. Loaded once at startup and never mutated;
/// `name` doubles as the identity and the sort tie-break key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RecipeRecord {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug)]
pub enum DatasetLoadError {
    NotFound(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for DatasetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetLoadError::NotFound(path) => {
                write!(f, "Recipe dataset file not found at: {:?}", path)
            }
            DatasetLoadError::Io { path, source } => {
                write!(f, "Failed to read recipe dataset {:?}: {}", path, source)
            }
            DatasetLoadError::Parse { path, source } => {
                write!(f, "Failed to parse recipe dataset {:?}: {}", path, source)
            }
        }
    }
}

impl Error for DatasetLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetLoadError::Io { source, .. } => Some(source),
            DatasetLoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// In-memory recipe dataset. Loaded exactly once per process (from `main`,
/// before any request is served) and shared read-only behind an `Arc`, so the
/// request path needs no synchronization at all.
#[derive(Debug)]
pub struct RecipeStore {
    recipes: Vec<RecipeRecord>,
}

impl RecipeStore {
    /// Reads and parses the JSON dataset. Any failure here is fatal to the
    /// process: without the dataset there is nothing to ground answers on.
    pub fn load(path: &Path) -> Result<Self, DatasetLoadError> {
        if !path.exists() {
            return Err(DatasetLoadError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let recipes =
            serde_json::from_str(&raw).map_err(|source| DatasetLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { recipes })
    }

    pub fn from_records(recipes: Vec<RecipeRecord>) -> Self {
        Self { recipes }
    }

    /// Read-only view of the full dataset, in file order.
    pub fn get_all(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
