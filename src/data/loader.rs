//! Spreadsheet Data Loader Module
//! Reads the registrations and CO₂ sheets of an OpenDocument spreadsheet with calamine.

use crate::config::{CAR_SHEET_INDEX, CO2_SHEET_INDEX};
use crate::data::records::{
    FuelCounts, FuelType, RawCO2Record, RawCarRecord, CO2_COLUMN, DATE_COLUMN, YEAR_COLUMN,
};
use calamine::{open_workbook, Data, Ods, OdsError, Range, Reader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read spreadsheet {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: OdsError,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Expected sheet or column is absent or holds the wrong kind of value.
#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("Sheet {index} not found (document has {available} sheets)")]
    MissingSheet { index: usize, available: usize },
    #[error("Sheet {sheet} is empty")]
    EmptySheet { sheet: String },
    #[error("Column '{column}' not found in sheet {sheet}")]
    MissingColumn { sheet: String, column: String },
    #[error("Non-numeric value '{value}' in column '{column}' of sheet {sheet}, row {row}")]
    NonNumeric {
        sheet: String,
        column: String,
        row: usize,
        value: String,
    },
}

/// Both source sheets, parsed into typed rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTables {
    pub cars: Vec<RawCarRecord>,
    pub co2: Vec<RawCO2Record>,
}

/// Reads fixed-schema sheets out of an `.ods` document.
pub struct DataLoader {
    car_sheet: usize,
    co2_sheet: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(CAR_SHEET_INDEX, CO2_SHEET_INDEX)
    }
}

impl DataLoader {
    pub fn new(car_sheet: usize, co2_sheet: usize) -> Self {
        Self {
            car_sheet,
            co2_sheet,
        }
    }

    /// Load the registrations and CO₂ sheets from `path`.
    pub fn load(&self, path: &Path) -> Result<RawTables, LoaderError> {
        let file_access = |source| LoaderError::FileAccess {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook: Ods<_> = open_workbook(path).map_err(file_access)?;
        let sheet_names = workbook.sheet_names();
        info!(path = %path.display(), sheets = sheet_names.len(), "opened spreadsheet");

        let car_range = Self::sheet_range(&mut workbook, self.car_sheet, sheet_names.len())
            .map_err(|e| match e {
                SheetError::Schema(e) => LoaderError::Schema(e),
                SheetError::Parse(e) => file_access(e),
            })?;
        let co2_range = Self::sheet_range(&mut workbook, self.co2_sheet, sheet_names.len())
            .map_err(|e| match e {
                SheetError::Schema(e) => LoaderError::Schema(e),
                SheetError::Parse(e) => file_access(e),
            })?;

        let cars = Self::parse_car_sheet(&sheet_names[self.car_sheet], &car_range)?;
        let co2 = Self::parse_co2_sheet(&sheet_names[self.co2_sheet], &co2_range)?;

        info!(
            car_rows = cars.len(),
            co2_rows = co2.len(),
            "loaded registration and CO2 sheets"
        );
        Ok(RawTables { cars, co2 })
    }

    fn sheet_range<R: std::io::Read + std::io::Seek>(
        workbook: &mut Ods<R>,
        index: usize,
        available: usize,
    ) -> Result<Range<Data>, SheetError> {
        match workbook.worksheet_range_at(index) {
            Some(Ok(range)) => Ok(range),
            Some(Err(e)) => Err(SheetError::Parse(e)),
            None => Err(SheetError::Schema(SchemaError::MissingSheet { index, available })),
        }
    }

    /// Parse the registrations sheet: `Date` plus the five fuel columns.
    pub fn parse_car_sheet(
        sheet: &str,
        range: &Range<Data>,
    ) -> Result<Vec<RawCarRecord>, SchemaError> {
        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| SchemaError::EmptySheet {
            sheet: sheet.to_string(),
        })?;
        let columns = HeaderIndex::new(sheet, header);

        let date_idx = columns.require(DATE_COLUMN)?;
        let fuel_idx = FuelType::ALL
            .iter()
            .map(|fuel| Ok((*fuel, columns.require(fuel.column_name())?)))
            .collect::<Result<Vec<_>, SchemaError>>()?;

        let mut records = Vec::new();
        for (offset, row) in rows.enumerate() {
            // Spreadsheet rows are 1-based and the header is row 1
            let row_number = offset + 2;
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                debug!(sheet, row = row_number, "skipping blank row");
                continue;
            }

            let date = row.get(date_idx).map(cell_text).unwrap_or_default();

            let mut counts = FuelCounts::default();
            for (fuel, idx) in &fuel_idx {
                let value = numeric_cell(sheet, fuel.column_name(), row_number, row.get(*idx))?;
                if value < 0.0 {
                    warn!(
                        sheet,
                        row = row_number,
                        column = fuel.column_name(),
                        value,
                        "negative registration count"
                    );
                }
                counts.set(*fuel, value);
            }

            records.push(RawCarRecord::new(date, counts).at_row(row_number));
        }

        Ok(records)
    }

    /// Parse the CO₂ sheet: integer `Year` and `CO2(mil.tonnes)`.
    pub fn parse_co2_sheet(
        sheet: &str,
        range: &Range<Data>,
    ) -> Result<Vec<RawCO2Record>, SchemaError> {
        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| SchemaError::EmptySheet {
            sheet: sheet.to_string(),
        })?;
        let columns = HeaderIndex::new(sheet, header);

        let year_idx = columns.require(YEAR_COLUMN)?;
        let co2_idx = columns.require(CO2_COLUMN)?;

        let mut records = Vec::new();
        for (offset, row) in rows.enumerate() {
            let row_number = offset + 2;
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                debug!(sheet, row = row_number, "skipping blank row");
                continue;
            }

            let year_cell = row.get(year_idx);
            let year = numeric_cell(sheet, YEAR_COLUMN, row_number, year_cell)?;
            if year.fract() != 0.0 || matches!(year_cell, None | Some(Data::Empty)) {
                return Err(SchemaError::NonNumeric {
                    sheet: sheet.to_string(),
                    column: YEAR_COLUMN.to_string(),
                    row: row_number,
                    value: year_cell.map(cell_text).unwrap_or_default(),
                });
            }

            let co2_mt = numeric_cell(sheet, CO2_COLUMN, row_number, row.get(co2_idx))?;
            records.push(RawCO2Record {
                year: year as i32,
                co2_mt,
            });
        }

        Ok(records)
    }
}

enum SheetError {
    Schema(SchemaError),
    Parse(OdsError),
}

/// Column header name → position, for one sheet.
struct HeaderIndex<'a> {
    sheet: &'a str,
    positions: HashMap<String, usize>,
}

impl<'a> HeaderIndex<'a> {
    fn new(sheet: &'a str, header: &[Data]) -> Self {
        let mut positions = HashMap::new();
        for (i, cell) in header.iter().enumerate() {
            let name = cell_text(cell).trim().to_string();
            if !name.is_empty() {
                positions.entry(name).or_insert(i);
            }
        }
        Self { sheet, positions }
    }

    fn require(&self, column: &str) -> Result<usize, SchemaError> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| SchemaError::MissingColumn {
                sheet: self.sheet.to_string(),
                column: column.to_string(),
            })
    }
}

/// Text form of a cell; blank for empty cells.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::DateTimeIso(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric value of a cell. Blank cells count as zero.
fn numeric_cell(
    sheet: &str,
    column: &str,
    row: usize,
    cell: Option<&Data>,
) -> Result<f64, SchemaError> {
    let non_numeric = |value: String| SchemaError::NonNumeric {
        sheet: sheet.to_string(),
        column: column.to_string(),
        row,
        value,
    };

    match cell {
        None | Some(Data::Empty) => Ok(0.0),
        Some(Data::Float(v)) => Ok(*v),
        Some(Data::Int(v)) => Ok(*v as f64),
        Some(Data::String(s)) => {
            let trimmed = s.trim().replace(',', "");
            if trimmed.is_empty() {
                Ok(0.0)
            } else {
                trimmed.parse::<f64>().map_err(|_| non_numeric(s.clone()))
            }
        }
        Some(other) => Err(non_numeric(cell_text(other))),
    }
}
