// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ### Which rows are in the window
//!
//! [`visible_range`] runs on every scroll event, so it never walks the rows. It does two
//! binary searches over the cumulative offsets of the [`RowIndex`].
//!
//! ```text
//!   offsets     rows
//!      0  +-----------------+
//!         |  0 header(A)    |
//!     20  +-----------------+
//!         |  1 opt(1)       |
//!     50  +-----------------+ ....................
//!         |  2 opt(2)       |  <- first_index     ↑
//!     60  |.................|.... scroll_offset   |
//!     80  +-----------------+                     | viewport_height
//!         |  3 header(B)    |  <- last_index      |
//!    100  +-----------------+.... scroll_offset   ↓
//!         |  4 opt(3)       |     + viewport_height
//!    130  +-----------------+
//! ```
//!
//! - `first_index` is the row that contains `scroll_offset`, ie: the largest `i` with
//!   `offsets[i] <= scroll_offset`.
//! - `last_index` is the row just before the first row that starts at or after the
//!   bottom edge of the viewport.
//!
//! Both are then widened by `overscan` rows on each side.

use serde::{Deserialize, Serialize};

use super::DEBUG_SELECT_WINDOW;
use crate::{Px, RowIndex, call_if_true};

/// Mutated only by scroll and resize events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ViewportState {
    pub scroll_offset: Px,
    pub viewport_height: Px,
}

impl ViewportState {
    #[must_use]
    pub fn new(scroll_offset: Px, viewport_height: Px) -> Self {
        Self {
            scroll_offset,
            viewport_height,
        }
    }

    /// Exclusive bottom edge of the viewport.
    #[must_use]
    pub fn end(&self) -> Px { self.scroll_offset + self.viewport_height }
}

/// Inclusive range of row indices to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    pub first_index: usize,
    pub last_index: usize,
}

impl VisibleRange {
    #[must_use]
    pub fn len(&self) -> usize { self.last_index - self.first_index + 1 }

    /// Never empty, an empty row index has no range at all.
    #[must_use]
    pub fn is_empty(&self) -> bool { false }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        (self.first_index..=self.last_index).contains(&index)
    }

    #[must_use]
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.first_index..=self.last_index
    }
}

/// Returns `None` for an empty row index, and a valid range for any viewport state
/// otherwise:
/// - a scroll offset past the end of the content clamps to the last row,
/// - a zero viewport height yields the single row at `first_index`.
#[must_use]
pub fn visible_range(
    row_index: &RowIndex,
    viewport: ViewportState,
    overscan: usize,
) -> Option<VisibleRange> {
    if row_index.is_empty() {
        return None;
    }

    let offsets = row_index.offsets();
    let last_row = row_index.len() - 1;

    // offsets[0] is 0, so this partition point is at least 1.
    let first_index = offsets
        .partition_point(|&offset| offset <= viewport.scroll_offset)
        .saturating_sub(1)
        .min(last_row);

    // Smallest i with offsets[i] >= viewport end. Row i starts outside the viewport.
    let end_boundary = offsets.partition_point(|&offset| offset < viewport.end());
    let last_index = end_boundary.saturating_sub(1).clamp(first_index, last_row);

    let it = VisibleRange {
        first_index: first_index.saturating_sub(overscan),
        last_index: last_index.saturating_add(overscan).min(last_row),
    };

    call_if_true!(DEBUG_SELECT_WINDOW, {
        tracing::debug!(
            message = "🪟 visible range",
            scroll_offset = %viewport.scroll_offset,
            viewport_height = %viewport.viewport_height,
            overscan,
            range = ?it,
        );
    });

    Some(it)
}

/// The largest scroll offset that still fills the viewport with content.
#[must_use]
pub fn max_scroll_offset(row_index: &RowIndex, viewport_height: Px) -> Px {
    row_index.total_height() - viewport_height
}

/// Scroll offset that brings the row at `index` into view, moving as little as
/// possible. Hosts use this to follow keyboard focus. Returns the current offset when
/// the row is already fully visible, or when `index` is out of range.
#[must_use]
pub fn scroll_offset_to_reveal(
    row_index: &RowIndex,
    viewport: ViewportState,
    index: usize,
) -> Px {
    let Some((top, bottom)) = row_index.row_span(index) else {
        return viewport.scroll_offset;
    };
    if top < viewport.scroll_offset {
        top
    } else if bottom > viewport.end() {
        bottom - viewport.viewport_height
    } else {
        viewport.scroll_offset
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{GroupKey, OptionItem, RowLayout, assert_eq2, px};

    /// `[header(A,20), opt(1,30), opt(2,30), header(B,20), opt(3,30)]`,
    /// offsets `[0, 20, 50, 80, 100, 130]`.
    fn scenario_index() -> RowIndex {
        let options = vec![
            OptionItem::new("1", "one").with_group("A"),
            OptionItem::new("2", "two").with_group("A"),
            OptionItem::new("3", "three").with_group("B"),
        ];
        let layout = RowLayout::try_new(true, px(30), Some(px(20))).unwrap();
        RowIndex::build(&options, &layout, |it: &OptionItem| -> Option<GroupKey> {
            it.group.clone()
        })
        .unwrap()
    }

    fn range(first_index: usize, last_index: usize) -> Option<VisibleRange> {
        Some(VisibleRange {
            first_index,
            last_index,
        })
    }

    #[test_case(60, 40, 0, range(2, 3) ; "scenario from the middle")]
    #[test_case(0, 40, 0, range(0, 1) ; "top")]
    #[test_case(0, 500, 0, range(0, 4) ; "viewport taller than content")]
    #[test_case(50, 30, 0, range(2, 2) ; "viewport exactly one row")]
    #[test_case(60, 0, 0, range(2, 2) ; "zero viewport height")]
    #[test_case(50, 0, 0, range(2, 2) ; "zero viewport height on a boundary")]
    #[test_case(500, 40, 0, range(4, 4) ; "scroll past the end clamps")]
    #[test_case(130, 40, 0, range(4, 4) ; "scroll exactly at the end")]
    #[test_case(60, 40, 1, range(1, 4) ; "overscan one")]
    #[test_case(60, 40, 10, range(0, 4) ; "overscan clamps")]
    fn test_visible_range(
        scroll_offset: u32,
        viewport_height: u32,
        overscan: usize,
        expected: Option<VisibleRange>,
    ) {
        let viewport = ViewportState::new(px(scroll_offset), px(viewport_height));
        assert_eq2!(visible_range(&scenario_index(), viewport, overscan), expected);
    }

    #[test]
    fn test_empty_index_has_no_range() {
        let viewport = ViewportState::new(px(0), px(100));
        assert_eq2!(visible_range(&RowIndex::empty(), viewport, 3), None);
    }

    /// Every row that intersects `[scroll, scroll + height)` is in the range, and with no
    /// overscan every row in the range intersects it.
    #[test]
    fn test_window_correctness_exhaustive() {
        let row_index = scenario_index();
        let total = *row_index.total_height();

        for scroll_offset in 0..=total + 10 {
            for viewport_height in 1..=total + 10 {
                let viewport = ViewportState::new(px(scroll_offset), px(viewport_height));
                let it = visible_range(&row_index, viewport, 0).unwrap();

                for index in 0..row_index.len() {
                    let (top, bottom) = row_index.row_span(index).unwrap();
                    let intersects = top < viewport.end() && bottom > viewport.scroll_offset;
                    if intersects {
                        assert!(it.contains(index), "{viewport:?} must include row {index}");
                    } else if scroll_offset < total {
                        assert!(
                            !it.contains(index),
                            "{viewport:?} must exclude row {index}, got {it:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_large_uniform_index() {
        let options: Vec<OptionItem> = (0..100_000)
            .map(|it| OptionItem::new(it.to_string(), format!("Item {it}")))
            .collect();
        let layout = RowLayout::try_new(false, px(31), None).unwrap();
        let row_index = RowIndex::build(&options, &layout, |_| None).unwrap();

        let viewport = ViewportState::new(px(31 * 50_000 + 15), px(300));
        let it = visible_range(&row_index, viewport, 2).unwrap();

        // Row 50_000 holds the top edge, the bottom edge reaches into row 50_010.
        assert_eq2!(it, VisibleRange {
            first_index: 49_998,
            last_index: 50_012,
        });
    }

    #[test]
    fn test_scroll_helpers() {
        let row_index = scenario_index();
        assert_eq2!(max_scroll_offset(&row_index, px(40)), px(90));
        assert_eq2!(max_scroll_offset(&row_index, px(400)), px(0));

        let viewport = ViewportState::new(px(60), px(40));
        assert_eq2!(scroll_offset_to_reveal(&row_index, viewport, 0), px(0));
        assert_eq2!(scroll_offset_to_reveal(&row_index, viewport, 4), px(90));
        assert_eq2!(scroll_offset_to_reveal(&row_index, viewport, 3), px(60));
        assert_eq2!(scroll_offset_to_reveal(&row_index, viewport, 99), px(60));
    }
}
