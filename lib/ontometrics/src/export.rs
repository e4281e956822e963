//! Writes reports to disk.

use crate::batch::BatchReport;
use crate::error::ExportError;
use crate::report::{Cell, Sheet, metrics_table, sheets};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The file format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// An Excel workbook with one sheet per table.
    #[default]
    Xlsx,
    /// A single comma-separated table of the per-file and combined metrics.
    Csv,
}

impl ReportFormat {
    #[inline]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    /// Looks for a known format from a file extension, case-insensitively.
    ///
    /// ```
    /// use ontometrics::export::ReportFormat;
    ///
    /// assert_eq!(ReportFormat::from_extension("CSV"), Some(ReportFormat::Csv));
    /// assert_eq!(ReportFormat::from_extension("ods"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        [Self::Xlsx, Self::Csv]
            .into_iter()
            .find(|format| format.file_extension().eq_ignore_ascii_case(extension))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_extension())
    }
}

impl FromStr for ReportFormat {
    type Err = UnknownReportFormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_extension(name).ok_or_else(|| UnknownReportFormatError(name.into()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown report format '{0}', expected 'xlsx' or 'csv'")]
pub struct UnknownReportFormatError(String);

/// Writes `report` to `path`.
pub fn export(report: &BatchReport, path: &Path, format: ReportFormat) -> Result<(), ExportError> {
    match format {
        ReportFormat::Xlsx => write_workbook(&sheets(report), path),
        ReportFormat::Csv => write_csv(&metrics_table(report), path),
    }
}

/// Writes `sheets` as an Excel workbook.
///
/// The document creation time is fixed so that the same sheets always give the same bytes.
pub fn write_workbook(sheets: &[Sheet], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let properties =
        DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
    workbook.set_properties(&properties);
    let header_format = Format::new().set_bold();
    let ratio_format = Format::new().set_num_format("0.0000");
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name())?;
        for (col, title) in (0_u16..).zip(sheet.header()) {
            worksheet.write_string_with_format(0, col, title, &header_format)?;
        }
        for (row, cells) in (1_u32..).zip(sheet.rows()) {
            for (col, cell) in (0_u16..).zip(cells) {
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    Cell::Count(count) => {
                        worksheet.write_number(row, col, *count as f64)?;
                    }
                    Cell::Ratio(ratio) => {
                        worksheet.write_number_with_format(row, col, *ratio, &ratio_format)?;
                    }
                }
            }
        }
        worksheet.set_freeze_panes(1, 0)?;
    }
    workbook.save(path)?;
    Ok(())
}

/// Writes `sheet` as a CSV table with a header line.
pub fn write_csv(sheet: &Sheet, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(sheet.header())?;
    for row in sheet.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::run;
    use std::error::Error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn format_names() -> Result<(), Box<dyn Error>> {
        assert_eq!("xlsx".parse::<ReportFormat>()?, ReportFormat::Xlsx);
        assert_eq!("Csv".parse::<ReportFormat>()?, ReportFormat::Csv);
        assert!("json".parse::<ReportFormat>().is_err(), "json is not supported");
        assert_eq!(
            ReportFormat::from_path(Path::new("out/report.XLSX")),
            Some(ReportFormat::Xlsx)
        );
        assert_eq!(ReportFormat::from_path(Path::new("report")), None);
        Ok(())
    }

    #[test]
    fn csv_export() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let input = dir.path().join("ttl");
        fs::create_dir(&input)?;
        fs::write(
            input.join("zoo.ttl"),
            "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             @prefix ex: <http://example.com/> .\n\
             ex:Animal a owl:Class .\nex:Dog a ex:Animal .\n",
        )?;
        let output = dir.path().join("metrics.csv");
        export(&run(&input)?, &output, ReportFormat::Csv)?;

        let mut reader = csv::Reader::from_path(&output)?;
        assert_eq!(&reader.headers()?[0], "File");
        assert_eq!(&reader.headers()?[1], "Total Triples");
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "zoo.ttl");
        assert_eq!(&rows[0][1], "2");
        assert_eq!(&rows[1][0], "ALL");
        assert_eq!(&rows[1][1], "2");
        Ok(())
    }

    #[test]
    fn workbook_export_is_reproducible() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let input = dir.path().join("ttl");
        fs::create_dir(&input)?;
        fs::write(
            input.join("zoo.ttl"),
            "<http://example.com/Dog> a <http://example.com/Animal> .\n",
        )?;
        let report = run(&input)?;
        let first = dir.path().join("first.xlsx");
        let second = dir.path().join("second.xlsx");
        export(&report, &first, ReportFormat::Xlsx)?;
        export(&report, &second, ReportFormat::Xlsx)?;
        assert_eq!(fs::read(first)?, fs::read(second)?);
        Ok(())
    }

    #[test]
    fn unwritable_output_is_an_error() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let input = dir.path().join("ttl");
        fs::create_dir(&input)?;
        fs::write(input.join("a.ttl"), "<http://e.com/s> <http://e.com/p> 1 .\n")?;
        let output = dir.path().join("missing").join("metrics.csv");
        assert!(
            export(&run(&input)?, &output, ReportFormat::Csv).is_err(),
            "the parent directory does not exist"
        );
        Ok(())
    }
}
