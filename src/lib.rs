//! UK car registrations by fuel type and CO₂ emissions dashboard.
//!
//! Loads a fixed OpenDocument spreadsheet once, aggregates registrations per year,
//! joins them with yearly CO₂ totals and plots both series over a user-chosen
//! year range.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
