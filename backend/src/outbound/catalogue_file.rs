//! Load the vacation catalogue from JSON files.
//!
//! The catalogue directory holds `destinations.json` and
//! `vacation_types.json`, each a JSON array of strings. Both files are read
//! once at start-up through a capability handle on the directory.

use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::info;

use crate::domain::{CatalogueError, VacationCatalogue};

/// File listing the allowed destinations.
pub const DESTINATIONS_FILE: &str = "destinations.json";
/// File listing the allowed vacation types.
pub const VACATION_TYPES_FILE: &str = "vacation_types.json";

/// Errors raised while loading the catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueLoadError {
    /// A catalogue file or its directory could not be read.
    #[error("failed to read catalogue file {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A catalogue file was not a JSON array of strings.
    #[error("failed to parse catalogue file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The parsed sets were rejected.
    #[error("invalid catalogue: {0}")]
    Invalid(#[from] CatalogueError),
}

fn read_values(dir: &Dir, root: &Path, file: &str) -> Result<Vec<String>, CatalogueLoadError> {
    let path = root.join(file);
    let payload = dir.read(file).map_err(|source| CatalogueLoadError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_slice(&payload).map_err(|source| CatalogueLoadError::Parse { path, source })
}

/// Read both option sets from `directory`.
///
/// # Errors
///
/// Returns [`CatalogueLoadError`] when a file is missing, malformed, or
/// empty.
pub fn load_catalogue(directory: &Path) -> Result<VacationCatalogue, CatalogueLoadError> {
    let dir = Dir::open_ambient_dir(directory, ambient_authority()).map_err(|source| {
        CatalogueLoadError::Read {
            path: directory.to_path_buf(),
            source,
        }
    })?;
    let destinations = read_values(&dir, directory, DESTINATIONS_FILE)?;
    let vacation_types = read_values(&dir, directory, VACATION_TYPES_FILE)?;
    let catalogue = VacationCatalogue::new(destinations, vacation_types)?;
    info!(
        destinations = catalogue.destinations().count(),
        vacation_types = catalogue.vacation_types().count(),
        path = %directory.display(),
        "vacation catalogue loaded"
    );
    Ok(catalogue)
}
