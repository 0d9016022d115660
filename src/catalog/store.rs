//! Catalog snapshot store
//!
//! Readers take an `Arc` snapshot and keep using it for the whole request.
//! A rebuild builds a complete new catalog and swaps the pointer; an
//! in-flight request never sees a half-built catalog.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use super::{csv_store, scan, Catalog};
use crate::error::CharlotteResult;

pub struct CatalogStore {
    path: PathBuf,
    snapshot: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Open the catalog file at `path`
    ///
    /// A missing file gives an empty catalog; run a rebuild to fill it.
    pub fn open(path: PathBuf) -> CharlotteResult<Self> {
        let catalog = if path.exists() {
            csv_store::load(&path)?
        } else {
            warn!("⚠️ No catalog at {:?} yet, starting empty", path);
            Catalog::new()
        };

        Ok(Self::with_catalog(path, catalog))
    }

    /// Wrap an in-memory catalog (not written until the next rebuild)
    pub fn with_catalog(path: PathBuf, catalog: Catalog) -> Self {
        Self {
            path,
            snapshot: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot
    pub fn snapshot(&self) -> CharlotteResult<Arc<Catalog>> {
        Ok(self.snapshot.read()?.clone())
    }

    /// Replace the current snapshot
    pub fn replace(&self, catalog: Catalog) -> CharlotteResult<()> {
        let catalog = Arc::new(catalog);
        *self.snapshot.write()? = catalog;
        Ok(())
    }

    /// Rescan `music_dir`, rewrite the catalog file and swap the snapshot
    ///
    /// On failure the previous snapshot stays in place.
    pub fn rebuild(&self, music_dir: &Path) -> CharlotteResult<usize> {
        let catalog = scan::scan_directory(music_dir)?;
        csv_store::save(&catalog, &self.path)?;

        let count = catalog.len();
        self.replace(catalog)?;
        info!("🔄 Catalog rebuilt: {} tracks", count);
        Ok(count)
    }
}
