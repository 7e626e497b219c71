//! Data Processor Module
//! Year extraction, per-year aggregation, the CO₂ join and year-range filtering.

use crate::data::range::YearRange;
use crate::data::records::{
    cars_frame, co2_frame, combined_records, CombinedRecord, FuelType, RawCO2Record,
    RawCarRecord, CO2_COLUMN, YEAR_COLUMN,
};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}").expect("year pattern is a valid regex"));

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No 4-digit year in date '{value}' (row {row})")]
    Extraction { row: usize, value: String },
}

/// Handles transformation of the raw sheets into per-year records.
pub struct DataProcessor;

impl DataProcessor {
    /// First run of four ASCII digits in `date`, as a year.
    pub fn extract_year(date: &str) -> Option<i32> {
        YEAR_PATTERN
            .find(date)
            .and_then(|m| m.as_str().parse::<i32>().ok())
    }

    /// Extract a year for every row, failing on the first row without one.
    ///
    /// `row` in the error is the 1-based sheet row. Records built in memory are
    /// numbered as if they followed a header row.
    pub fn extract_years(cars: &[RawCarRecord]) -> Result<Vec<i32>, ProcessorError> {
        cars.iter()
            .enumerate()
            .map(|(offset, record)| {
                Self::extract_year(&record.date).ok_or_else(|| ProcessorError::Extraction {
                    row: record.row.unwrap_or(offset + 2),
                    value: record.date.clone(),
                })
            })
            .collect()
    }

    /// Sum every fuel column per year.
    ///
    /// Output columns: ["Year", <fuel columns>], sorted by year ascending.
    pub fn aggregate_by_year(cars: &[RawCarRecord]) -> Result<DataFrame, ProcessorError> {
        let years = Self::extract_years(cars)?;

        let mut df = cars_frame(cars)?;
        df.with_column(Column::new(YEAR_COLUMN.into(), years))?;

        let sums: Vec<Expr> = FuelType::ALL
            .iter()
            .map(|fuel| col(fuel.column_name()).sum())
            .collect();

        // Only the fuel sums are aggregated, so `Date` drops out here
        let yearly = df
            .lazy()
            .group_by([col(YEAR_COLUMN)])
            .agg(sums)
            .sort([YEAR_COLUMN], SortMultipleOptions::default())
            .collect()?;

        debug!(rows = cars.len(), years = yearly.height(), "aggregated registrations by year");
        Ok(yearly)
    }

    /// Inner join of the yearly aggregate with the CO₂ sheet on `Year`.
    ///
    /// Years missing from either side are dropped; output is sorted by year.
    pub fn combine(yearly: &DataFrame, co2: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let co2 = co2
            .clone()
            .lazy()
            .select([col(YEAR_COLUMN).cast(DataType::Int32), col(CO2_COLUMN)]);

        let combined = yearly
            .clone()
            .lazy()
            .with_column(col(YEAR_COLUMN).cast(DataType::Int32))
            .inner_join(co2, col(YEAR_COLUMN), col(YEAR_COLUMN))
            .sort([YEAR_COLUMN], SortMultipleOptions::default())
            .collect()?;

        Ok(combined)
    }

    /// Full transform: extract years, aggregate, join with CO₂.
    pub fn transform(
        cars: &[RawCarRecord],
        co2: &[RawCO2Record],
    ) -> Result<DataFrame, ProcessorError> {
        let yearly = Self::aggregate_by_year(cars)?;
        let co2 = co2_frame(co2)?;
        let combined = Self::combine(&yearly, &co2)?;

        info!(
            car_years = yearly.height(),
            co2_years = co2.height(),
            combined_years = combined.height(),
            "combined registrations with CO2 totals"
        );
        Ok(combined)
    }

    /// Rows whose year lies in `range` (inclusive). An empty result is not an error.
    pub fn filter_years(df: &DataFrame, range: YearRange) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(
                col(YEAR_COLUMN)
                    .gt_eq(lit(range.low))
                    .and(col(YEAR_COLUMN).lt_eq(lit(range.high))),
            )
            .collect()?;

        debug!(
            low = range.low,
            high = range.high,
            rows = filtered.height(),
            "filtered combined data"
        );
        Ok(filtered)
    }

    /// Combined rows for plotting.
    pub fn to_records(df: &DataFrame) -> Result<Vec<CombinedRecord>, ProcessorError> {
        Ok(combined_records(df)?)
    }

    /// Smallest and largest year present, if any.
    pub fn year_bounds(df: &DataFrame) -> Result<Option<(i32, i32)>, ProcessorError> {
        let years = df.column(YEAR_COLUMN)?.cast(&DataType::Int32)?;
        let years = years.i32()?;
        Ok(years.min().zip(years.max()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{FuelCounts, DATE_COLUMN};

    fn petrol(date: &str, value: f64) -> RawCarRecord {
        RawCarRecord::new(date, FuelCounts::default().with(FuelType::Petrol, value))
    }

    fn years_of(df: &DataFrame) -> Vec<i32> {
        df.column(YEAR_COLUMN)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn extracts_first_four_digit_run() {
        assert_eq!(DataProcessor::extract_year("January 2020"), Some(2020));
        assert_eq!(DataProcessor::extract_year("2019 Q4"), Some(2019));
        assert_eq!(DataProcessor::extract_year("2019-2020"), Some(2019));
        assert_eq!(DataProcessor::extract_year("Q1 2023 (provisional)"), Some(2023));
        assert_eq!(DataProcessor::extract_year("Week 12"), None);
        assert_eq!(DataProcessor::extract_year("٢٠٢٠ / 2021"), Some(2021));
        assert_eq!(DataProcessor::extract_year("２０２０年"), None);
        assert_eq!(DataProcessor::extract_year(""), None);
    }

    #[test]
    fn extraction_failure_reports_row_and_text() {
        let cars = vec![petrol("2020", 1.0), petrol("Total", 2.0)];

        match DataProcessor::aggregate_by_year(&cars) {
            Err(ProcessorError::Extraction { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "Total");
            }
            other => panic!("expected extraction error, got {:?}", other.map(|df| df.height())),
        }
    }

    #[test]
    fn extraction_failure_keeps_sheet_row() {
        let cars = vec![petrol("2020", 1.0).at_row(2), petrol("Total", 2.0).at_row(9)];

        match DataProcessor::extract_years(&cars) {
            Err(ProcessorError::Extraction { row, .. }) => assert_eq!(row, 9),
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn aggregates_rows_sharing_a_year() {
        let cars = vec![
            petrol("March 2021", 5.0),
            petrol("January 2020", 100.0),
            petrol("March 2020", 50.0),
        ];

        let yearly = DataProcessor::aggregate_by_year(&cars).unwrap();
        assert_eq!(years_of(&yearly), vec![2020, 2021]);

        let petrol_sums: Vec<f64> = yearly
            .column("Petrol")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(petrol_sums, vec![150.0, 5.0]);
        assert!(yearly.column(DATE_COLUMN).is_err());
    }

    #[test]
    fn combine_keeps_only_shared_years() {
        let cars = vec![petrol("2019", 1.0), petrol("2020", 2.0), petrol("2021", 3.0)];
        let co2 = vec![
            RawCO2Record { year: 2022, co2_mt: 9.0 },
            RawCO2Record { year: 2021, co2_mt: 8.0 },
            RawCO2Record { year: 2020, co2_mt: 7.0 },
        ];

        let combined = DataProcessor::transform(&cars, &co2).unwrap();
        assert_eq!(years_of(&combined), vec![2020, 2021]);

        let records = DataProcessor::to_records(&combined).unwrap();
        assert_eq!(records[0].co2_mt, 7.0);
        assert_eq!(records[1].counts.get(FuelType::Petrol), 3.0);
    }

    #[test]
    fn filter_is_inclusive_and_tolerates_empty_ranges() {
        let cars: Vec<_> = (2014..=2024).map(|y| petrol(&y.to_string(), 1.0)).collect();
        let co2: Vec<_> = (2014..=2024)
            .map(|year| RawCO2Record { year, co2_mt: 1.0 })
            .collect();
        let combined = DataProcessor::transform(&cars, &co2).unwrap();

        let mid = DataProcessor::filter_years(&combined, YearRange::new(2016, 2018)).unwrap();
        assert_eq!(years_of(&mid), vec![2016, 2017, 2018]);

        let none = DataProcessor::filter_years(&combined, YearRange::new(2030, 2035)).unwrap();
        assert_eq!(none.height(), 0);
        assert!(DataProcessor::to_records(&none).unwrap().is_empty());
    }

    #[test]
    fn year_bounds_of_empty_frame_is_none() {
        let combined = DataProcessor::transform(&[], &[]).unwrap();
        assert_eq!(DataProcessor::year_bounds(&combined).unwrap(), None);
    }
}
