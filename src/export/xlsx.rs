// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{get_headers, line_to_row};
use crate::export::{PayrollExport, notify_export_success};
use crate::ui::messages::info;
use crate::utils::formatting::mins2hours;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// XLSX export: a "Lines" sheet with styling and auto column widths, and a
/// "Batch" sheet carrying the batch identity and period totals.
pub(crate) fn export_xlsx(doc: &PayrollExport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    // ---------------------------
    // Lines
    // ---------------------------
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Lines").map_err(to_io_app_error)?;

    let headers = get_headers();
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_io_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, line) in doc.lines.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in line_to_row(line).iter().enumerate() {
            let v = value.as_str();
            // project descriptions stay text even when they look numeric
            let as_text = headers[col] == "projects" || headers[col] == "absence_code";

            write_xlsx_cell(worksheet, row, col as u16, v, band_color, as_text)?;

            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(v));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_io_app_error)?;
    }

    // ---------------------------
    // Batch
    // ---------------------------
    let summary = workbook.add_worksheet();
    summary.set_name("Batch").map_err(to_io_app_error)?;

    let t = &doc.totals;
    let pairs: Vec<(&str, String)> = vec![
        ("period", doc.period.clone()),
        ("status", doc.status.clone()),
        ("revision_no", doc.revision_no.to_string()),
        ("batch_id", doc.batch_id.clone()),
        ("checksum", doc.checksum.clone()),
        ("created_at", doc.created_at.clone()),
        ("line_count", doc.lines.len().to_string()),
        ("normal_hours", mins2hours(t.normal_minutes)),
        ("overtime_hours", mins2hours(t.overtime_minutes)),
        ("ph_worked_hours", mins2hours(t.ph_worked_minutes)),
        ("leave_hours", mins2hours(t.leave_minutes)),
        ("paid_hours", mins2hours(t.paid_minutes)),
    ];

    summary
        .write_with_format(0, 0, "field", &header_format)
        .map_err(to_io_app_error)?;
    summary
        .write_with_format(0, 1, "value", &header_format)
        .map_err(to_io_app_error)?;

    let mut value_width = UnicodeWidthStr::width("value");
    for (i, (k, v)) in pairs.iter().enumerate() {
        let row = (i + 1) as u32;
        summary.write(row, 0, *k).map_err(to_io_app_error)?;
        summary.write(row, 1, v.as_str()).map_err(to_io_app_error)?;
        value_width = value_width.max(UnicodeWidthStr::width(v.as_str()));
    }

    summary.set_column_width(0, 18.0).map_err(to_io_app_error)?;
    summary
        .set_column_width(1, value_width as f64 + 2.0)
        .map_err(to_io_app_error)?;

    workbook.save(path_str(path)?).map_err(to_io_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Write one cell: dates and numbers as native Excel values, the rest as text.
fn write_xlsx_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    as_text: bool,
) -> AppResult<()> {
    if !as_text && let Some((num_format, serial)) = parse_to_excel_date(s) {
        let fmt = Format::new()
            .set_num_format(num_format)
            .set_background_color(bg)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        worksheet
            .write_with_format(row, col, serial, &fmt)
            .map_err(to_io_app_error)?;
        return Ok(());
    }

    if !as_text && let Ok(num) = s.parse::<f64>() {
        let fmt = Format::new()
            .set_align(FormatAlign::Right)
            .set_background_color(bg)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        worksheet
            .write_with_format(row, col, num, &fmt)
            .map_err(to_io_app_error)?;
        return Ok(());
    }

    let fmt = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    worksheet
        .write_with_format(row, col, s, &fmt)
        .map_err(to_io_app_error)?;

    Ok(())
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::from(io::Error::other("invalid path")))
}
