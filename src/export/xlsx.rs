use crate::errors::{AppError, AppResult};
use crate::export::render::{HEADERS, Report};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Write the report rows to a worksheet: same layout as the CSV, with the
/// title bold/centered, a styled header and TOTAL rows highlighted.
pub fn export_xlsx(report: &Report, path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance").map_err(to_app_error)?;

    let title_format = Format::new().set_bold().set_align(FormatAlign::Center);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let total_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xEAF3FB))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    let cell_format = Format::new().set_border(FormatBorder::Thin);

    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (row_index, row) in report.rows().enumerate() {
        let r = row_index as u32;

        let format = match row_index {
            1 => &title_format,
            3 => &header_format,
            _ if row.get(4).map(String::as_str) == Some("TOTAL") => &total_format,
            _ => &cell_format,
        };

        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_with_format(r, col as u16, value.as_str(), format)
                .map_err(to_app_error)?;

            // the title spans several columns, do not size on it
            if row_index != 1
                && let Some(w) = col_widths.get_mut(col)
            {
                *w = (*w).max(UnicodeWidthStr::width(value.as_str()));
            }
        }
    }

    worksheet.set_freeze_panes(4, 0).map_err(to_app_error)?;

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;
    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
