//! Row → page assignment.

use serde::Serialize;

use super::Insets;

/// Slack allowed past the bottom border before a row is pushed to the next
/// page, absorbing floating point error from the scale solve.
pub const PAGE_BREAK_TOLERANCE: f64 = 1e-2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMap {
    /// Page index of each row; never decreases with the row index.
    pub row_to_page: Vec<usize>,
    pub page_count: usize,
}

impl PageMap {
    pub fn page_of(&self, row: usize) -> Option<usize> {
        self.row_to_page.get(row).copied()
    }

    /// Rows on `page`, ascending.
    pub fn rows_on(&self, page: usize) -> impl Iterator<Item = usize> + '_ {
        self.row_to_page
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == page)
            .map(|(r, _)| r)
    }
}

/// Vertical page geometry used by the paginator.
#[derive(Debug, Clone, Copy)]
pub struct PageFrame {
    pub page_height: f64,
    pub border_bottom: f64,
    pub gap: f64,
}

/// Walk rows top to bottom, breaking to a new page when a row would cross the
/// bottom border. A row that doesn't fit even on an empty page stays alone on
/// its page and overflows.
pub fn paginate(row_heights: &[f64], scale: f64, insets: &Insets, frame: PageFrame) -> PageMap {
    let limit = frame.page_height - frame.border_bottom + PAGE_BREAK_TOLERANCE;
    let mut row_to_page = Vec::with_capacity(row_heights.len());
    let mut page = 0;
    let mut rows_on_page = 0;
    let mut cursor = insets.top(page);

    for (row, &height_rw) in row_heights.iter().enumerate() {
        let height = height_rw * scale;
        if cursor + height > limit && rows_on_page > 0 {
            page += 1;
            rows_on_page = 0;
            cursor = insets.top(page);
        }
        if cursor + height > limit {
            tracing::warn!(row, page, height, "row is taller than the printable page");
        }
        row_to_page.push(page);
        rows_on_page += 1;
        cursor += height + frame.gap;
    }

    PageMap {
        row_to_page,
        page_count: page + 1,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn insets(first: f64, later: f64) -> Insets {
        Insets {
            first_page_top: first,
            top: later,
            left: 0.0,
            ..Insets::default()
        }
    }

    const FRAME: PageFrame = PageFrame {
        page_height: 100.0,
        border_bottom: 10.0,
        gap: 2.0,
    };

    #[test]
    fn test_everything_fits_on_one_page() {
        let map = paginate(&[20.0, 20.0, 20.0], 1.0, &insets(10.0, 10.0), FRAME);
        assert_eq!(map.row_to_page, vec![0, 0, 0]);
        assert_eq!(map.page_count, 1);
    }

    #[test]
    fn test_overflow_starts_new_page() {
        // rows end at 50, 92 (> 90) -> second row breaks
        let map = paginate(&[40.0, 40.0], 1.0, &insets(10.0, 10.0), FRAME);
        assert_eq!(map.row_to_page, vec![0, 1]);
        assert_eq!(map.page_count, 2);
    }

    #[test]
    fn test_later_pages_skip_title_space() {
        // page 0 starts at 40, later pages at 10: 3 rows of 35 fit as [0], [1, 1]
        let map = paginate(&[35.0, 35.0, 35.0], 1.0, &insets(40.0, 10.0), FRAME);
        assert_eq!(map.row_to_page, vec![0, 1, 1]);
    }

    #[test]
    fn test_tolerance_absorbs_rounding() {
        // bottom lands at 90.005, within tolerance of 90
        let map = paginate(&[80.005], 1.0, &insets(10.0, 10.0), FRAME);
        assert_eq!(map.page_count, 1);
    }

    #[test]
    fn test_oversized_row_stays_alone() {
        let map = paginate(&[10.0, 500.0, 10.0], 1.0, &insets(10.0, 10.0), FRAME);
        assert_eq!(map.row_to_page, vec![0, 1, 2]);
        assert_eq!(map.page_count, 3);
    }

    #[test]
    fn test_oversized_first_row_keeps_page_zero() {
        let map = paginate(&[500.0], 1.0, &insets(10.0, 10.0), FRAME);
        assert_eq!(map.row_to_page, vec![0]);
        assert_eq!(map.page_count, 1);
    }

    #[test]
    fn test_no_rows_is_one_page() {
        let map = paginate(&[], 1.0, &insets(10.0, 10.0), FRAME);
        assert_eq!(map.page_count, 1);
        assert!(map.row_to_page.is_empty());
    }

    #[test_case(&[10.0; 12], 1.0 ; "small rows")]
    #[test_case(&[30.0, 5.0, 70.0, 0.0, 45.0, 45.0], 1.0 ; "mixed rows")]
    #[test_case(&[10.0, 20.0, 30.0, 40.0], 3.5 ; "scaled rows")]
    fn test_monotonic_and_idempotent(rows: &[f64], scale: f64) {
        let first = paginate(rows, scale, &insets(25.0, 10.0), FRAME);
        let second = paginate(rows, scale, &insets(25.0, 10.0), FRAME);
        assert_eq!(first, second);
        for pair in first.row_to_page.windows(2) {
            assert!(pair[1] >= pair[0]);
            assert!(pair[1] - pair[0] <= 1);
        }
        assert_eq!(first.page_count, first.row_to_page.last().copied().unwrap_or(0) + 1);
    }

    #[test]
    fn test_rows_on_page() {
        let map = paginate(&[40.0, 40.0, 40.0], 1.0, &insets(10.0, 10.0), FRAME);
        assert_eq!(map.rows_on(1).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(map.page_of(0), Some(0));
        assert_eq!(map.page_of(7), None);
    }
}
