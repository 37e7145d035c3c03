//! PDF rendering for the user report
//!
//! A4 portrait pages with 40pt side margins. The header block carries the
//! title, the generation date and the user count; the table header row is
//! repeated on every page.

use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::service::{UserReportRow, COLUMN_TITLES};
use crate::domain::DomainError;

pub(crate) fn render(
    rows: &[UserReportRow],
    generated_on: DateTime<Utc>,
) -> Result<Vec<u8>, DomainError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("User Report", Mm(210.0), Mm(297.0), "Layer 1");

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    layer.use_text("User Report", 18.0, Mm(14.0), Mm(277.0), &bold);
    layer.use_text(
        format!("Generated: {}", header_date(generated_on)),
        10.0,
        Mm(14.0),
        Mm(268.0),
        &regular,
    );
    layer.use_text(
        format!("Total Users: {}", rows.len()),
        10.0,
        Mm(14.0),
        Mm(262.0),
        &regular,
    );

    draw_header_row(&layer, Mm(252.0), &bold);

    let mut y = 245.0;
    for row in rows {
        // Continue on a fresh page once the bottom margin is reached
        if y < 16.0 {
            let (page, layer_index) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
            layer = doc.get_page(page).get_layer(layer_index);
            draw_header_row(&layer, Mm(277.0), &bold);
            y = 270.0;
        }

        draw_user_row(&layer, Mm(y), row, &regular);
        y -= 7.0;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

/// Generation date in en-US style, e.g. `August 5, 2026`
fn header_date(generated_on: DateTime<Utc>) -> String {
    generated_on.format("%B %-d, %Y").to_string()
}

fn column_positions() -> [Mm; 6] {
    [Mm(14.0), Mm(28.0), Mm(58.0), Mm(88.0), Mm(148.0), Mm(178.0)]
}

fn draw_header_row(layer: &PdfLayerReference, y: Mm, font: &IndirectFontRef) {
    for (x, title) in column_positions().into_iter().zip(COLUMN_TITLES) {
        layer.use_text(title, 9.0, x, y, font);
    }
}

fn draw_user_row(layer: &PdfLayerReference, y: Mm, row: &UserReportRow, font: &IndirectFontRef) {
    let values = [
        row.id.to_string(),
        row.first_name.clone(),
        row.last_name.clone(),
        row.email.clone(),
        row.phone_number.clone(),
        row.status.clone(),
    ];

    for (x, value) in column_positions().into_iter().zip(values) {
        layer.use_text(value, 9.0, x, y, font);
    }
}

fn pdf_error(err: printpdf::Error) -> DomainError {
    DomainError::internal(format!("PDF rendering failed: {}", err))
}
