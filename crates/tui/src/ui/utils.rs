//! Layout helpers shared by the UI components.

use ratatui::prelude::*;

/// Lays out `count` equally sized cells in one horizontally centered row.
///
/// Cells shrink from `preferred_width` down to `min_width` when the row does
/// not fit; below that the row is clipped on the right.
pub fn centered_row(area: Rect, count: usize, preferred_width: u16, min_width: u16, gap: u16) -> Vec<Rect> {
    if count == 0 || area.is_empty() {
        return Vec::new();
    }
    let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
    let gaps = gap.saturating_mul(count_u16.saturating_sub(1));
    let fit = area.width.saturating_sub(gaps) / count_u16;
    let width = fit.clamp(min_width.min(preferred_width), preferred_width);
    let total = width.saturating_mul(count_u16).saturating_add(gaps);
    let left = area.x + area.width.saturating_sub(total) / 2;

    (0..count_u16)
        .map(|index| {
            let x = left.saturating_add(index.saturating_mul(width + gap));
            Rect::new(x, area.y, width, area.height).intersection(area)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_is_centered_with_gaps() {
        let cells = centered_row(Rect::new(0, 0, 40, 3), 4, 5, 3, 1);
        assert_eq!(cells.len(), 4);
        // 4 * 5 + 3 gaps = 23 wide, (40 - 23) / 2 = 8
        assert_eq!(cells[0], Rect::new(8, 0, 5, 3));
        assert_eq!(cells[3], Rect::new(26, 0, 5, 3));
    }

    #[test]
    fn cells_shrink_to_fit() {
        let cells = centered_row(Rect::new(0, 0, 20, 3), 5, 7, 3, 1);
        assert!(cells.iter().all(|cell| cell.width == 3));
        assert!(cells.iter().all(|cell| cell.right() <= 20));
    }

    #[test]
    fn empty_inputs_produce_no_cells() {
        assert!(centered_row(Rect::new(0, 0, 20, 3), 0, 5, 3, 1).is_empty());
        assert!(centered_row(Rect::default(), 3, 5, 3, 1).is_empty());
    }
}
