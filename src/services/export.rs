use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use tracing::{info, warn};

use crate::dates;
use crate::error::AppError;
use crate::models::CertificateRecord;

pub const SHEET_NAME: &str = "Certificates";

/// Header text and column width, in export order.
pub static COLUMNS: [(&str, f64); 10] = [
    ("Sr. No.", 8.0),
    ("Student Name", 25.0),
    ("Father Name", 25.0),
    ("Date of Birth", 15.0),
    ("Certificate Number", 18.0),
    ("Roll Number", 15.0),
    ("Passing Year", 12.0),
    ("Course Name", 20.0),
    ("Course Duration", 18.0),
    ("Created Date", 15.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub serial: u32,
    pub cells: [String; 9],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub rows: Vec<ExportRow>,
}

impl ExportSheet {
    pub fn headers() -> impl Iterator<Item = &'static str> {
        COLUMNS.iter().map(|(name, _)| *name)
    }
}

#[derive(Debug)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

pub fn export_filename(today: NaiveDate) -> String {
    format!("Tally_Expert_Certificates_{}.xlsx", today.format("%Y-%m-%d"))
}

/// Maps the collection onto spreadsheet rows. Refuses an empty collection.
pub fn build_sheet(records: &[CertificateRecord]) -> Result<ExportSheet, AppError> {
    if records.is_empty() {
        warn!("export requested with no certificates loaded");
        return Err(AppError::NothingToExport);
    }

    let rows = records
        .iter()
        .zip(1u32..)
        .map(|(record, serial)| ExportRow {
            serial,
            cells: [
                record.student_name.clone(),
                record.father_name.clone(),
                dates::localized(&record.date_of_birth),
                record.certificate_number.clone(),
                record.roll_no.clone(),
                record.passing_year.clone(),
                record.course_name.clone(),
                record.course_of_duration.clone(),
                dates::localized_timestamp(&record.created_at),
            ],
        })
        .collect();

    Ok(ExportSheet { rows })
}

/// Renders the collection as an in-memory `.xlsx` workbook.
pub fn export_workbook(records: &[CertificateRecord], today: NaiveDate) -> Result<ExportArtifact, AppError> {
    let sheet = build_sheet(records)?;

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (name, width)) in (0u16..).zip(COLUMNS.iter()) {
        worksheet.write_string_with_format(0, col, *name, &header_format)?;
        worksheet.set_column_width(col, *width)?;
    }

    for (row_index, row) in (1u32..).zip(sheet.rows.iter()) {
        worksheet.write_number(row_index, 0, row.serial)?;
        for (col, cell) in (1u16..).zip(row.cells.iter()) {
            worksheet.write_string(row_index, col, cell)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    let filename = export_filename(today);
    info!("exported {} certificates to {}", sheet.rows.len(), filename);

    Ok(ExportArtifact {
        filename,
        bytes,
        rows: sheet.rows.len(),
    })
}
