//! Spreadsheet report generation for completed event records.
//!
//! One summary workbook covers all sections; each selected component
//! category gets its own workbook with the category's line items. Export is
//! a pure transformation: the record is never mutated, and unset optional
//! fields render as blank cells.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use thiserror::Error;

use crate::record::{ComponentRecord, EventRecord};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Paths of the workbooks one export produced
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub summary: PathBuf,
    pub categories: Vec<PathBuf>,
}

struct ReportFormats {
    header: Format,
    section: Format,
    label: Format,
    text: Format,
    integer: Format,
}

fn create_formats() -> ReportFormats {
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(0x4472C4)
        .set_font_color(0xFFFFFF)
        .set_border(FormatBorder::Thin);

    let section = Format::new().set_bold().set_background_color(0xE2EFDA);

    let label = Format::new().set_bold().set_border(FormatBorder::Thin);

    let text = Format::new().set_border(FormatBorder::Thin);

    let integer = Format::new()
        .set_num_format("#,##0")
        .set_border(FormatBorder::Thin);

    ReportFormats {
        header,
        section,
        label,
        text,
        integer,
    }
}

/// Write the summary workbook plus one workbook per selected category
pub fn export_all(record: &EventRecord, exports_dir: &Path) -> Result<ReportPaths, ReportError> {
    std::fs::create_dir_all(exports_dir)?;

    let summary = write_summary(record, exports_dir)?;
    let categories = write_category_reports(record, exports_dir)?;

    tracing::info!(
        event = record.display_name(),
        workbooks = categories.len() + 1,
        "reports exported"
    );
    Ok(ReportPaths {
        summary,
        categories,
    })
}

/// Write the one-sheet summary workbook, named with the event name and a
/// generation timestamp.
pub fn write_summary(record: &EventRecord, exports_dir: &Path) -> Result<PathBuf, ReportError> {
    let mut workbook = Workbook::new();
    let formats = create_formats();

    let sheet = workbook.add_worksheet();
    sheet.set_name(&sanitize_sheet_name("Summary"))?;
    sheet.set_column_width(0, 28).ok();
    sheet.set_column_width(1, 40).ok();

    let mut row = 0;
    row = write_section(sheet, row, "Basic info", &formats)?;
    row = write_pair(sheet, row, "Event name", opt(&record.event_name), &formats)?;
    row = write_pair(sheet, row, "Organizer", opt(&record.organizer), &formats)?;
    row = write_pair(
        sheet,
        row,
        "Event type",
        &record.event_type.map(|t| t.to_string()).unwrap_or_default(),
        &formats,
    )?;
    row = write_pair(sheet, row, "Contract type", opt(&record.contract_type), &formats)?;

    row = write_section(sheet, row + 1, "Schedule", &formats)?;
    row = write_pair(sheet, row, "Start date", &date(record.start_date), &formats)?;
    row = write_pair(sheet, row, "End date", &date(record.end_date), &formats)?;
    row = write_pair(sheet, row, "Setup date", &date(record.setup_date), &formats)?;
    row = write_pair(sheet, row, "Teardown date", &date(record.teardown_date), &formats)?;

    row = write_venue_section(sheet, row + 1, record, &formats)?;

    row = write_section(sheet, row + 1, "Budget", &formats)?;
    row = write_pair(
        sheet,
        row,
        "Contract amount",
        &record
            .budget
            .contract_amount
            .map(|a| a.to_string())
            .unwrap_or_default(),
        &formats,
    )?;
    row = write_pair(
        sheet,
        row,
        "Component budgets total",
        &record.component_budget_total().to_string(),
        &formats,
    )?;
    if let Some(warning) = record.budget_warning() {
        row = write_pair(sheet, row, "Warning", &warning, &formats)?;
    }
    row = write_pair(sheet, row, "Notes", opt(&record.budget.notes), &formats)?;

    row = write_section(sheet, row + 1, "Components", &formats)?;
    for (category, component) in &record.components {
        let status = component
            .status
            .map(|s| s.display_name().to_string())
            .unwrap_or_default();
        row = write_pair(
            sheet,
            row,
            category,
            &format!(
                "{} / budget {} / {} item(s)",
                status,
                component.budget,
                component.items.len()
            ),
            &formats,
        )?;
    }

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!(
        "summary_{}_{}.xlsx",
        sanitize_file_stem(record.display_name()),
        timestamp
    );
    let path = exports_dir.join(filename);
    workbook.save(&path)?;
    Ok(path)
}

/// Write one workbook per selected category: identity header plus the
/// category's line-item table.
pub fn write_category_reports(
    record: &EventRecord,
    exports_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    let mut paths = Vec::new();

    for category in &record.selected_categories {
        let empty = ComponentRecord::default();
        let component = record.components.get(category).unwrap_or(&empty);

        let mut workbook = Workbook::new();
        let formats = create_formats();

        let sheet = workbook.add_worksheet();
        sheet.set_name(&sanitize_sheet_name(category))?;
        sheet.set_column_width(0, 28).ok();
        sheet.set_column_width(1, 12).ok();
        sheet.set_column_width(2, 10).ok();
        sheet.set_column_width(3, 14).ok();
        sheet.set_column_width(4, 14).ok();

        let mut row = 0;
        row = write_pair(sheet, row, "Event name", opt(&record.event_name), &formats)?;
        row = write_pair(sheet, row, "Organizer", opt(&record.organizer), &formats)?;
        row = write_pair(sheet, row, "Start date", &date(record.start_date), &formats)?;
        row = write_pair(sheet, row, "Category", category, &formats)?;
        let status = component
            .status
            .map(|s| s.display_name().to_string())
            .unwrap_or_default();
        row = write_pair(sheet, row, "Status", &status, &formats)?;
        row = write_pair(sheet, row, "Budget", &component.budget.to_string(), &formats)?;
        row += 1;

        for (col, title) in ["Item", "Quantity", "Unit", "Unit price", "Amount"]
            .iter()
            .enumerate()
        {
            sheet.write_with_format(row, col as u16, *title, &formats.header)?;
        }
        row += 1;

        let mut total: u64 = 0;
        for item in &component.items {
            sheet.write_with_format(row, 0, item.name.as_str(), &formats.text)?;
            sheet.write_with_format(row, 1, f64::from(item.quantity), &formats.integer)?;
            sheet.write_with_format(row, 2, item.unit.as_deref().unwrap_or(""), &formats.text)?;
            match item.price {
                Some(price) => {
                    sheet.write_with_format(row, 3, price as f64, &formats.integer)?;
                }
                None => {
                    sheet.write_with_format(row, 3, "", &formats.text)?;
                }
            }
            match item.amount() {
                Some(amount) => {
                    sheet.write_with_format(row, 4, amount as f64, &formats.integer)?;
                    total += amount;
                }
                None => {
                    sheet.write_with_format(row, 4, "", &formats.text)?;
                }
            }
            row += 1;
        }
        sheet.write_with_format(row, 0, "Total", &formats.label)?;
        sheet.write_with_format(row, 4, total as f64, &formats.integer)?;

        let filename = format!(
            "{}_{}.xlsx",
            sanitize_file_stem(category),
            sanitize_file_stem(record.display_name())
        );
        let path = exports_dir.join(filename);
        workbook.save(&path)?;
        paths.push(path);
    }

    Ok(paths)
}

fn write_section(
    sheet: &mut Worksheet,
    row: u32,
    title: &str,
    formats: &ReportFormats,
) -> Result<u32, ReportError> {
    sheet.write_with_format(row, 0, title, &formats.section)?;
    Ok(row + 1)
}

fn write_pair(
    sheet: &mut Worksheet,
    row: u32,
    label: &str,
    value: &str,
    formats: &ReportFormats,
) -> Result<u32, ReportError> {
    sheet.write_with_format(row, 0, label, &formats.label)?;
    sheet.write_with_format(row, 1, value, &formats.text)?;
    Ok(row + 1)
}

fn write_venue_section(
    sheet: &mut Worksheet,
    mut row: u32,
    record: &EventRecord,
    formats: &ReportFormats,
) -> Result<u32, ReportError> {
    if record.is_online() {
        row = write_section(sheet, row, "Location", formats)?;
        let preference = record
            .location_preference
            .map(|p| format!("{p:?}").to_lowercase())
            .unwrap_or_default();
        row = write_pair(sheet, row, "Preference", &preference, formats)?;
        row = write_pair(
            sheet,
            row,
            "Indoor description",
            opt(&record.indoor_location_description),
            formats,
        )?;
        row = write_pair(
            sheet,
            row,
            "Outdoor description",
            opt(&record.outdoor_location_description),
            formats,
        )?;
    } else {
        row = write_section(sheet, row, "Venue", formats)?;
        let status = record
            .venue_status
            .map(|s| s.display_name().to_string())
            .unwrap_or_default();
        row = write_pair(sheet, row, "Venue status", &status, formats)?;
        row = write_pair(sheet, row, "Desired region", opt(&record.desired_region), formats)?;
        for (i, venue) in record.venues.iter().enumerate() {
            row = write_pair(
                sheet,
                row,
                &format!("Venue {}", i + 1),
                &format!("{} ({})", venue.name, venue.address),
                formats,
            )?;
        }
    }
    Ok(row)
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Strip characters XLSX rejects in sheet titles and cap at the 31-char
/// limit. Empty results fall back to "Sheet1".
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\' | '\''))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

/// Filesystem-safe stem for report filenames
fn sanitize_file_stem(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "event".to_string()
    } else {
        slug
    }
}
