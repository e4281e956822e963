//! Lays out a [`BatchReport`] as named tables.

use crate::batch::{BatchReport, FileReport};
use crate::classify::ClassOrigin;
use crate::metrics::{DECIMAL_PLACES, Metric, MetricValue};
use std::fmt;

pub const PER_FILE_SHEET: &str = "Per-file Metrics";
pub const COMBINED_SHEET: &str = "Combined Metrics";
pub const CLASS_DENSITY_SHEET: &str = "Class Density";
pub const SHARED_TERMS_SHEET: &str = "Shared Terms";
pub const SKIPPED_FILES_SHEET: &str = "Skipped Files";

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Count(u64),
    Ratio(f64),
}

impl From<MetricValue> for Cell {
    fn from(value: MetricValue) -> Self {
        match value {
            MetricValue::Count(count) => Self::Count(count),
            MetricValue::Ratio(ratio) => Self::Ratio(ratio),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Count(count) => write!(f, "{count}"),
            Self::Ratio(ratio) => write!(f, "{ratio:.precision$}", precision = DECIMAL_PLACES),
        }
    }
}

/// A named table with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: &'static str,
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &'static str, header: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name,
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.header.len(), "row width of {}", self.name);
        self.rows.push(row);
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// Every sheet of the workbook, in order.
pub fn sheets(report: &BatchReport) -> Vec<Sheet> {
    vec![
        metrics_sheet(PER_FILE_SHEET, &report.files),
        metrics_sheet(COMBINED_SHEET, std::slice::from_ref(&report.combined)),
        class_density_sheet(report),
        shared_terms_sheet(report),
        skipped_files_sheet(report),
    ]
}

/// The per-file rows followed by the combined row, as a single table.
pub fn metrics_table(report: &BatchReport) -> Sheet {
    let mut sheet = metrics_sheet(PER_FILE_SHEET, &report.files);
    sheet.push(metrics_row(&report.combined));
    sheet
}

fn metrics_sheet(name: &'static str, files: &[FileReport]) -> Sheet {
    let mut sheet = Sheet::new(
        name,
        ["File"]
            .into_iter()
            .chain(Metric::ALL.into_iter().map(Metric::name)),
    );
    for file in files {
        sheet.push(metrics_row(file));
    }
    sheet
}

fn metrics_row(file: &FileReport) -> Vec<Cell> {
    let mut row = Vec::with_capacity(Metric::ALL.len() + 1);
    row.push(Cell::from(file.name.as_str()));
    row.extend(file.record.iter().map(|(_, value)| Cell::from(value)));
    row
}

fn class_density_sheet(report: &BatchReport) -> Sheet {
    let mut sheet = Sheet::new(
        CLASS_DENSITY_SHEET,
        [
            "File",
            "Class",
            "Origin",
            "Properties",
            "Individuals",
            "Density",
        ],
    );
    for file in report.files.iter().chain([&report.combined]) {
        for (class, origin, profile) in file.profile.classes() {
            sheet.push(vec![
                file.name.as_str().into(),
                class.into(),
                origin.map_or("", ClassOrigin::name).into(),
                Cell::Count(profile.property_count()),
                Cell::Count(profile.individual_count()),
                Cell::Ratio(profile.density()),
            ]);
        }
    }
    sheet
}

fn shared_terms_sheet(report: &BatchReport) -> Sheet {
    let mut sheet = Sheet::new(SHARED_TERMS_SHEET, ["Term", "Roles", "Files"]);
    for shared in &report.shared {
        sheet.push(vec![
            shared.term.as_str().into(),
            shared.roles.to_string().into(),
            shared.files.join(", ").into(),
        ]);
    }
    sheet
}

fn skipped_files_sheet(report: &BatchReport) -> Sheet {
    let mut sheet = Sheet::new(
        SKIPPED_FILES_SHEET,
        ["File", "Reason", "Lines", "Characters"],
    );
    for skipped in &report.skipped {
        let (lines, chars) = skipped
            .raw
            .as_ref()
            .map_or((0, 0), |raw| (raw.lines(), raw.chars()));
        sheet.push(vec![
            skipped.name.as_str().into(),
            skipped.error.reason().into(),
            Cell::Count(lines),
            Cell::Count(chars),
        ]);
    }
    sheet
}
