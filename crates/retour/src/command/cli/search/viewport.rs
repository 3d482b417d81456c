use std::ops::Range;

/// Which rows of a list fit on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewport {
    /// There is no room to draw any rows; show a placeholder instead.
    NoRoom,
    /// The indices of the rows to draw.
    Visible(Range<usize>),
}

/// Compute the slice of `total` rows to show in `height` rows so that `cursor` stays visible.
///
/// The window starts at the top and only scrolls once the cursor moves past
/// the bottom, after which the cursor is pinned to the last visible row.
pub fn visible_range(total: usize, cursor: usize, height: usize) -> Viewport {
    if height == 0 {
        return Viewport::NoRoom;
    }
    if total <= height || cursor < height {
        return Viewport::Visible(0..total.min(height));
    }

    let start = cursor.min(total - 1) + 1 - height;
    Viewport::Visible(start..start + height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fits() {
        assert_eq!(visible_range(3, 0, 5), Viewport::Visible(0..3));
        assert_eq!(visible_range(5, 4, 5), Viewport::Visible(0..5));
        assert_eq!(visible_range(0, 0, 5), Viewport::Visible(0..0));
    }

    #[test]
    fn test_cursor_in_first_page() {
        assert_eq!(visible_range(10, 3, 5), Viewport::Visible(0..5));
        assert_eq!(visible_range(10, 4, 5), Viewport::Visible(0..5));
    }

    #[test]
    fn test_scrolls_to_keep_cursor_on_last_row() {
        assert_eq!(visible_range(10, 5, 5), Viewport::Visible(1..6));
        assert_eq!(visible_range(10, 7, 5), Viewport::Visible(3..8));
        assert_eq!(visible_range(10, 9, 5), Viewport::Visible(5..10));
    }

    #[test]
    fn test_no_room() {
        assert_eq!(visible_range(10, 2, 0), Viewport::NoRoom);
        assert_eq!(visible_range(0, 0, 0), Viewport::NoRoom);
    }

    #[test]
    fn test_cursor_always_visible() {
        for total in 1..20 {
            for height in 1..8 {
                for cursor in 0..total {
                    let Viewport::Visible(range) = visible_range(total, cursor, height) else {
                        panic!("expected rows for height {height}");
                    };
                    assert!(range.contains(&cursor), "{total} {cursor} {height}");
                    assert_eq!(range.len(), total.min(height));
                    assert!(range.end <= total);
                }
            }
        }
    }
}
