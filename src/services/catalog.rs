use std::path::Path;
use thiserror::Error;

use crate::models::{Catalog, ShoeModel, Sizing};

/// Errors that can occur while loading the shoe catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Catalog {
    /// Parse a catalog document of the form `{"sneakers": [...]}`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Read a catalog file, falling back to an empty catalog on any failure
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_path(path.as_ref()) {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} shoe models from {}",
                    catalog.len(),
                    path.as_ref().display()
                );
                catalog
            }
            Err(e) => {
                tracing::warn!("{}, using an empty catalog", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sneakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sneakers.is_empty()
    }

    /// Look up a model by its exact name
    pub fn find_model(&self, name: &str) -> Option<&ShoeModel> {
        self.sneakers.iter().find(|shoe| shoe.model == name)
    }

    /// Sizing of a model; unknown models are treated as athletic
    pub fn shoe_type(&self, name: &str) -> Sizing {
        self.find_model(name)
            .map(ShoeModel::sizing)
            .unwrap_or_default()
    }

    /// Pick any model, or none from an empty catalog
    pub fn random_model(&self) -> Option<&ShoeModel> {
        if self.sneakers.is_empty() {
            return None;
        }
        let index = (uuid::Uuid::new_v4().as_u128() % self.sneakers.len() as u128) as usize;
        self.sneakers.get(index)
    }
}
