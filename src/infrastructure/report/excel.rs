//! Excel rendering for the user report
//!
//! Single `Users` worksheet. Header cells are grey, bordered and centered;
//! data cells are bordered and left-aligned, with the ID written as a
//! number. Columns are sized to content with a fixed minimum width.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use super::service::{UserReportRow, COLUMN_TITLES};
use crate::domain::DomainError;

/// Minimum column width in characters
const MIN_COLUMN_WIDTH: usize = 12;

pub(crate) fn render(rows: &[UserReportRow]) -> Result<Vec<u8>, DomainError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Users").map_err(excel_error)?;

    let header_format = Format::new()
        .set_background_color(Color::Silver)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    let cell_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Left);

    for (col, title) in COLUMN_TITLES.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(excel_error)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_number = (index + 1) as u32;

        worksheet
            .write_number_with_format(row_number, 0, row.id as f64, &cell_format)
            .map_err(excel_error)?;
        worksheet
            .write_string_with_format(row_number, 1, &row.first_name, &cell_format)
            .map_err(excel_error)?;
        worksheet
            .write_string_with_format(row_number, 2, &row.last_name, &cell_format)
            .map_err(excel_error)?;
        worksheet
            .write_string_with_format(row_number, 3, &row.email, &cell_format)
            .map_err(excel_error)?;
        worksheet
            .write_string_with_format(row_number, 4, &row.phone_number, &cell_format)
            .map_err(excel_error)?;
        worksheet
            .write_string_with_format(row_number, 5, &row.status, &cell_format)
            .map_err(excel_error)?;
    }

    for (col, width) in column_widths(rows).into_iter().enumerate() {
        worksheet
            .set_column_width(col as u16, width)
            .map_err(excel_error)?;
    }

    workbook.save_to_buffer().map_err(excel_error)
}

/// Content-fitted widths with the minimum applied per column
fn column_widths(rows: &[UserReportRow]) -> [f64; 6] {
    let mut widths = [0usize; 6];

    for (col, title) in COLUMN_TITLES.iter().enumerate() {
        widths[col] = title.chars().count();
    }

    for row in rows {
        widths[0] = widths[0].max(row.id.to_string().chars().count());
        widths[1] = widths[1].max(row.first_name.chars().count());
        widths[2] = widths[2].max(row.last_name.chars().count());
        widths[3] = widths[3].max(row.email.chars().count());
        widths[4] = widths[4].max(row.phone_number.chars().count());
        widths[5] = widths[5].max(row.status.chars().count());
    }

    widths.map(|width| width.max(MIN_COLUMN_WIDTH) as f64)
}

fn excel_error(err: XlsxError) -> DomainError {
    DomainError::internal(format!("Excel rendering failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> UserReportRow {
        UserReportRow {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe.with.a.long.address@example.com".to_string(),
            phone_number: "1234567890".to_string(),
            status: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn test_render_produces_xlsx_bytes() {
        let bytes = render(&[sample_row()]).unwrap();
        // XLSX files are zip archives
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_empty_report() {
        let bytes = render(&[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_column_widths_apply_minimum() {
        let widths = column_widths(&[]);

        // No caption is longer than the minimum
        for width in widths {
            assert_eq!(width, MIN_COLUMN_WIDTH as f64);
        }
    }

    #[test]
    fn test_column_widths_grow_with_content() {
        let row = sample_row();
        let widths = column_widths(std::slice::from_ref(&row));

        assert_eq!(widths[3], row.email.chars().count() as f64);
        assert_eq!(widths[5], MIN_COLUMN_WIDTH as f64);
    }
}
