//! Record Types
//! Typed rows for both source sheets and the combined per-year result,
//! plus conversions to and from Polars frames.

use polars::prelude::*;

pub const DATE_COLUMN: &str = "Date";
pub const YEAR_COLUMN: &str = "Year";
pub const CO2_COLUMN: &str = "CO2(mil.tonnes)";

/// Vehicle powertrain classes tracked by the registrations sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Petrol,
    Diesel,
    HybridPetrol,
    PluginHybridPetrol,
    BatteryElectric,
}

impl FuelType {
    /// All fuel types in sheet column order.
    pub const ALL: [FuelType; 5] = [
        FuelType::Petrol,
        FuelType::Diesel,
        FuelType::HybridPetrol,
        FuelType::PluginHybridPetrol,
        FuelType::BatteryElectric,
    ];

    /// Column header as it appears in the spreadsheet.
    pub fn column_name(self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::HybridPetrol => "Hybrid electric (petrol)",
            FuelType::PluginHybridPetrol => "Plug-in hybrid electric (petrol)",
            FuelType::BatteryElectric => "Battery electric",
        }
    }

    pub fn index(self) -> usize {
        match self {
            FuelType::Petrol => 0,
            FuelType::Diesel => 1,
            FuelType::HybridPetrol => 2,
            FuelType::PluginHybridPetrol => 3,
            FuelType::BatteryElectric => 4,
        }
    }
}

/// Registrations per fuel type, in thousands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuelCounts(pub [f64; 5]);

impl FuelCounts {
    pub fn get(&self, fuel: FuelType) -> f64 {
        self.0[fuel.index()]
    }

    pub fn set(&mut self, fuel: FuelType, value: f64) {
        self.0[fuel.index()] = value;
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, fuel: FuelType, value: f64) -> Self {
        self.set(fuel, value);
        self
    }
}

/// One observation period from the registrations sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCarRecord {
    pub date: String,
    pub counts: FuelCounts,
    /// 1-based sheet row, when the record came from a spreadsheet
    pub row: Option<usize>,
}

impl RawCarRecord {
    pub fn new(date: impl Into<String>, counts: FuelCounts) -> Self {
        Self {
            date: date.into(),
            counts,
            row: None,
        }
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

/// One year from the CO₂ sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCO2Record {
    pub year: i32,
    pub co2_mt: f64,
}

/// Per-year registrations joined with that year's CO₂ total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedRecord {
    pub year: i32,
    pub counts: FuelCounts,
    pub co2_mt: f64,
}

/// Build the registrations frame: `Date` plus one `Float64` column per fuel type.
pub fn cars_frame(records: &[RawCarRecord]) -> PolarsResult<DataFrame> {
    let dates: Vec<String> = records.iter().map(|r| r.date.clone()).collect();

    let mut columns = vec![Column::new(DATE_COLUMN.into(), dates)];
    for fuel in FuelType::ALL {
        let values: Vec<f64> = records.iter().map(|r| r.counts.get(fuel)).collect();
        columns.push(Column::new(fuel.column_name().into(), values));
    }

    DataFrame::new(columns)
}

/// Build the CO₂ frame: `Year` (`Int32`) and `CO2(mil.tonnes)` (`Float64`).
pub fn co2_frame(records: &[RawCO2Record]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let co2: Vec<f64> = records.iter().map(|r| r.co2_mt).collect();

    DataFrame::new(vec![
        Column::new(YEAR_COLUMN.into(), years),
        Column::new(CO2_COLUMN.into(), co2),
    ])
}

/// Read combined rows back out of a `Year` + fuel + CO₂ frame.
pub fn combined_records(df: &DataFrame) -> PolarsResult<Vec<CombinedRecord>> {
    let years = df.column(YEAR_COLUMN)?.cast(&DataType::Int32)?;
    let years = years.i32()?;
    let co2 = df.column(CO2_COLUMN)?.cast(&DataType::Float64)?;
    let co2 = co2.f64()?;

    let mut fuel_columns = Vec::with_capacity(FuelType::ALL.len());
    for fuel in FuelType::ALL {
        fuel_columns.push(df.column(fuel.column_name())?.cast(&DataType::Float64)?);
    }
    let fuel_values = fuel_columns
        .iter()
        .map(|c| c.f64())
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let Some(year) = years.get(i) else {
            continue;
        };

        let mut counts = FuelCounts::default();
        for (fuel, values) in FuelType::ALL.iter().zip(fuel_values.iter()) {
            counts.set(*fuel, values.get(i).unwrap_or(0.0));
        }

        records.push(CombinedRecord {
            year,
            counts,
            co2_mt: co2.get(i).unwrap_or(f64::NAN),
        });
    }

    Ok(records)
}
