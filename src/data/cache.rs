//! Dataset Cache
//! Loads and transforms the spreadsheet once per process and shares the result read-only.

use crate::config::DashboardConfig;
use crate::data::loader::{DataLoader, LoaderError};
use crate::data::processor::{DataProcessor, ProcessorError};
use crate::data::range::YearRange;
use crate::data::records::CombinedRecord;
use once_cell::sync::OnceCell;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Transform(#[from] ProcessorError),
}

/// The combined per-year data, immutable after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    combined: DataFrame,
    year_bounds: Option<(i32, i32)>,
}

impl Dataset {
    pub fn new(combined: DataFrame) -> Result<Self, ProcessorError> {
        let year_bounds = DataProcessor::year_bounds(&combined)?;
        Ok(Self {
            combined,
            year_bounds,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.combined
    }

    /// `(min, max)` year present, or `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    pub fn len(&self) -> usize {
        self.combined.height()
    }

    pub fn is_empty(&self) -> bool {
        self.combined.height() == 0
    }

    /// Filtered view for one slider position.
    pub fn filter(&self, range: YearRange) -> Result<Vec<CombinedRecord>, ProcessorError> {
        let filtered = DataProcessor::filter_years(&self.combined, range)?;
        DataProcessor::to_records(&filtered)
    }
}

/// Load-once cache for the dataset behind a fixed path.
pub struct DatasetCache {
    path: PathBuf,
    loader: DataLoader,
    cell: OnceCell<Arc<Dataset>>,
}

static GLOBAL: OnceCell<DatasetCache> = OnceCell::new();

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loader: DataLoader::default(),
            cell: OnceCell::new(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            path: config.data_path.clone(),
            loader: DataLoader::new(config.car_sheet, config.co2_sheet),
            cell: OnceCell::new(),
        }
    }

    /// Process-wide cache, built from `config` on first call.
    ///
    /// Later calls return the same cache whatever config they pass.
    pub fn global(config: &DashboardConfig) -> &'static DatasetCache {
        GLOBAL.get_or_init(|| Self::from_config(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the cached dataset, loading it on first use. Failures are not cached.
    pub fn get_or_load(&self) -> Result<Arc<Dataset>, DataError> {
        self.cell
            .get_or_try_init(|| -> Result<Arc<Dataset>, DataError> {
                info!(path = %self.path.display(), "loading dataset");
                let tables = self.loader.load(&self.path)?;
                let combined = DataProcessor::transform(&tables.cars, &tables.co2)?;
                let dataset = Dataset::new(combined)?;
                info!(years = dataset.len(), bounds = ?dataset.year_bounds(), "dataset ready");
                Ok(Arc::new(dataset))
            })
            .cloned()
    }
}
