//! Sequential panel labels (a, b, c … / A, B, C … / 1, 2, 3 …).

use serde::Serialize;

use crate::grid::PanelGrid;
use crate::layout::PageMap;
use crate::types::LabelScheme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelLabel {
    pub row: usize,
    pub col: usize,
    pub page: usize,
    pub text: String,
}

/// Label for the `ordinal`-th panel (1-based).
///
/// Letters continue past the alphabet the way spreadsheet columns do:
/// `z` is followed by `aa`, `ab`, … An ordinal of 0 yields an empty string.
pub fn label_text(scheme: LabelScheme, ordinal: usize) -> String {
    match scheme {
        LabelScheme::Numbers => {
            if ordinal == 0 {
                String::new()
            } else {
                ordinal.to_string()
            }
        }
        LabelScheme::LowercaseLetters => letters(ordinal, b'a'),
        LabelScheme::UppercaseLetters => letters(ordinal, b'A'),
    }
}

/// Bijective base-26 letters for a 1-based ordinal.
#[allow(clippy::cast_possible_truncation)]
fn letters(ordinal: usize, first: u8) -> String {
    let mut result = String::new();
    let mut n = ordinal;
    while n > 0 {
        n -= 1;
        let c = char::from(first + (n % 26) as u8);
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// Label every occupied cell, row-major. Numbering restarts on each page and
/// empty cells are skipped without consuming a symbol.
pub fn assign_labels(grid: &PanelGrid, pages: &PageMap, scheme: LabelScheme) -> Vec<PanelLabel> {
    let mut labels = Vec::new();
    for page in 0..pages.page_count {
        let mut counter = 0;
        for row in pages.rows_on(page) {
            for (col, _) in grid.row_cells(row) {
                counter += 1;
                labels.push(PanelLabel {
                    row,
                    col,
                    page,
                    text: label_text(scheme, counter),
                });
            }
        }
    }
    labels
}
