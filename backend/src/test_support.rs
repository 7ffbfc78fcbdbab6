//! Helpers shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::{ConsensusEngine, PreferenceService, SignupService, VacationCatalogue};
use crate::inbound::http::state::HttpState;
use crate::outbound::catalogue_file::{CatalogueLoadError, load_catalogue};
use crate::outbound::memory::MemoryStore;

pub mod cap_fs {
    //! Capability-safe file writes for tests, built on `cap_std::fs::Dir`.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vacation_planner::test_support::cap_fs::write_file;
    ///
    /// let dir = tempfile::tempdir()?;
    /// write_file(&dir.path().join("destinations.json"), br#"["Lisbon"]"#)?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

/// Directory of the catalogue shipped with the crate.
pub fn bundled_catalogue_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("catalogue")
}

/// Load the catalogue shipped with the crate.
///
/// # Errors
/// Propagates [`CatalogueLoadError`] when the fixtures are unreadable.
pub fn bundled_catalogue() -> Result<VacationCatalogue, CatalogueLoadError> {
    load_catalogue(&bundled_catalogue_dir())
}

/// Wire the HTTP state over fresh services backed by `store`.
pub fn memory_http_state(
    store: &MemoryStore,
    catalogue: VacationCatalogue,
    group_size: usize,
    user_quota: u32,
) -> HttpState {
    let users = Arc::new(store.users());
    let preferences = Arc::new(PreferenceService::new(
        users.clone(),
        Arc::new(store.preferences()),
        Arc::new(catalogue),
        ConsensusEngine::new(group_size),
    ));
    HttpState::new(
        preferences.clone(),
        preferences,
        Arc::new(SignupService::new(users, user_quota)),
    )
}
