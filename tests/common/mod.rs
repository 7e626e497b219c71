//! Shared fixtures: writes minimal OpenDocument spreadsheets for the loader.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

pub const FUEL_HEADERS: [&str; 5] = [
    "Petrol",
    "Diesel",
    "Hybrid electric (petrol)",
    "Plug-in hybrid electric (petrol)",
    "Battery electric",
];

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Typed date cell, ISO `YYYY-MM-DD`
    Date(String),
    Empty,
}

pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

pub fn date(iso: &str) -> Cell {
    Cell::Date(iso.to_string())
}

pub fn num(v: f64) -> Cell {
    Cell::Number(v)
}

pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: &str, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }
}

/// Registrations sheet: header plus `(date, [petrol, diesel, hybrid, plug-in, bev])` rows.
pub fn car_sheet(rows: &[(&str, [f64; 5])]) -> Sheet {
    let mut all = vec![std::iter::once(text("Date"))
        .chain(FUEL_HEADERS.iter().map(|h| text(h)))
        .collect::<Vec<_>>()];
    for (date, counts) in rows {
        let mut row = vec![text(date)];
        row.extend(counts.iter().map(|v| num(*v)));
        all.push(row);
    }
    Sheet::new("Cars by fuel", all)
}

/// CO₂ sheet: header plus `(year, megatonnes)` rows.
pub fn co2_sheet(rows: &[(i32, f64)]) -> Sheet {
    let mut all = vec![vec![text("Year"), text("CO2(mil.tonnes)")]];
    for (year, co2) in rows {
        all.push(vec![num(*year as f64), num(*co2)]);
    }
    Sheet::new("CO2", all)
}

/// Standard three-sheet workbook: cars, an unrelated notes sheet, CO₂.
pub fn workbook(cars: Sheet, co2: Sheet) -> Vec<Sheet> {
    vec![
        cars,
        Sheet::new("Notes", vec![vec![text("Source: DfT / DESNZ")]]),
        co2,
    ]
}

pub fn write_ods(dir: &Path, file_name: &str, sheets: &[Sheet]) -> PathBuf {
    let path = dir.join(file_name);
    let file = File::create(&path).unwrap();
    let mut zip = ZipWriter::new(file);
    let stored = FileOptions::default().compression_method(CompressionMethod::Stored);

    // mimetype must be the first, uncompressed entry
    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(MIMETYPE.as_bytes()).unwrap();

    zip.start_file("META-INF/manifest.xml", FileOptions::default())
        .unwrap();
    zip.write_all(manifest_xml().as_bytes()).unwrap();

    zip.start_file("content.xml", FileOptions::default()).unwrap();
    zip.write_all(content_xml(sheets).as_bytes()).unwrap();

    zip.finish().unwrap();
    path
}

fn manifest_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
 <manifest:file-entry manifest:full-path="/" manifest:media-type="{}"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
</manifest:manifest>"#,
        MIMETYPE
    )
}

fn content_xml(sheets: &[Sheet]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" office:version="1.2"><office:body><office:spreadsheet>"#,
    );

    for sheet in sheets {
        xml.push_str(&format!(r#"<table:table table:name="{}">"#, escape(&sheet.name)));
        for row in &sheet.rows {
            xml.push_str("<table:table-row>");
            for cell in row {
                match cell {
                    Cell::Text(s) => xml.push_str(&format!(
                        r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                        escape(s)
                    )),
                    Cell::Number(v) => xml.push_str(&format!(
                        r#"<table:table-cell office:value-type="float" office:value="{}"><text:p>{}</text:p></table:table-cell>"#,
                        v, v
                    )),
                    Cell::Date(iso) => xml.push_str(&format!(
                        r#"<table:table-cell office:value-type="date" office:date-value="{}"><text:p>{}</text:p></table:table-cell>"#,
                        escape(iso),
                        escape(iso)
                    )),
                    Cell::Empty => xml.push_str("<table:table-cell/>"),
                }
            }
            xml.push_str("</table:table-row>");
        }
        xml.push_str("</table:table>");
    }

    xml.push_str("</office:spreadsheet></office:body></office:document-content>");
    xml
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
