//! Data module - spreadsheet loading, transformation and caching

pub mod cache;
pub mod loader;
pub mod processor;
pub mod range;
pub mod records;

pub use cache::{DataError, Dataset, DatasetCache};
pub use loader::{DataLoader, LoaderError, RawTables, SchemaError};
pub use processor::{DataProcessor, ProcessorError};
pub use range::YearRange;
pub use records::{CombinedRecord, FuelCounts, FuelType, RawCO2Record, RawCarRecord};
