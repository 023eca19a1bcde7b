// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Flatten options (and the group headers they imply) into rows with cumulative offsets.
//!
//! ```text
//!   options                     rows                        offsets
//!   ───────                     ────                        ───────
//!   { 1, group: A } ──┐         0 header(A)   h=20          [0]   0
//!                     └──────▶  1 opt(1)      h=30          [1]  20
//!   { 2, group: A } ─────────▶  2 opt(2)      h=30          [2]  50
//!   { 3, group: B } ──┐         3 header(B)   h=20          [3]  80
//!                     └──────▶  4 opt(3)      h=30          [4] 100
//!                                                           [5] 130 <- total height
//! ```
//!
//! `offsets[i]` is the top of row `i`. There is always one more offset than there are
//! rows, so the last offset is the total content height and an empty index has offsets
//! `[0]`.

use rustc_hash::FxHashSet;

use super::DEBUG_SELECT_ROW_INDEX;
use crate::{GroupKey, Px, SelectError, SelectOption, call_if_true};

/// Row heights and whether the grouping pass runs. Built from
/// [`SelectProps`](crate::SelectProps), or directly with [`RowLayout::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLayout {
    pub grouped: bool,
    pub option_height: Px,
    /// Already resolved, see [`RowLayout::try_new`].
    pub group_header_height: Px,
}

impl RowLayout {
    /// The group header height falls back to the option height when it isn't given, or
    /// when it is zero. Headers then line up with option rows by default.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidRowHeight`] when `option_height` is zero.
    pub fn try_new(
        grouped: bool,
        option_height: Px,
        maybe_group_header_height: Option<Px>,
    ) -> Result<Self, SelectError> {
        if option_height.is_zero() {
            return Err(SelectError::InvalidRowHeight {
                height: option_height,
            });
        }

        let group_header_height = match maybe_group_header_height {
            Some(height) if !height.is_zero() => height,
            _ => option_height,
        };

        Ok(Self {
            grouped,
            option_height,
            group_header_height,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Points into the option slice the index was built from.
    Option { option_index: usize },
    GroupHeader { group_key: GroupKey },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    pub kind: RowKind,
    pub height: Px,
}

impl Row {
    #[must_use]
    pub fn option(option_index: usize, height: Px) -> Self {
        Self {
            kind: RowKind::Option { option_index },
            height,
        }
    }

    #[must_use]
    pub fn group_header(group_key: GroupKey, height: Px) -> Self {
        Self {
            kind: RowKind::GroupHeader { group_key },
            height,
        }
    }

    #[must_use]
    pub fn is_group_header(&self) -> bool {
        matches!(self.kind, RowKind::GroupHeader { .. })
    }

    #[must_use]
    pub fn option_index(&self) -> Option<usize> {
        match self.kind {
            RowKind::Option { option_index } => Some(option_index),
            RowKind::GroupHeader { .. } => None,
        }
    }
}

/// Ordered rows and their cumulative offsets. Immutable once built: when options or the
/// layout change, build a new one and replace the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIndex {
    rows: Vec<Row>,
    /// `offsets.len() == rows.len() + 1`, non decreasing, starts at 0.
    offsets: Vec<Px>,
}

impl Default for RowIndex {
    fn default() -> Self { Self::empty() }
}

impl RowIndex {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: vec![],
            offsets: vec![Px::ZERO],
        }
    }

    /// Build the index in a single pass over `options`.
    ///
    /// - When `layout.grouped` is `false`, every option becomes one option row and
    ///   `group_key_of` is never called.
    /// - When it is `true`, a header row is inserted before the first option of every
    ///   group key that hasn't been seen yet. Input order is kept as is, so a group that
    ///   shows up again later, after another group, does not get a second header. Its
    ///   options just follow wherever they are. Options without a group key get no
    ///   header.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidOption`] for the first option that has no key.
    pub fn build<T: SelectOption>(
        options: &[T],
        layout: &RowLayout,
        group_key_of: impl Fn(&T) -> Option<GroupKey>,
    ) -> Result<Self, SelectError> {
        let mut acc = RowIndexAccumulator::with_capacity(options.len());

        if layout.grouped {
            let mut seen_group_keys: FxHashSet<GroupKey> = FxHashSet::default();
            for (position, option) in options.iter().enumerate() {
                validate_option(position, option)?;
                if let Some(group_key) = group_key_of(option)
                    && !seen_group_keys.contains(&group_key)
                {
                    seen_group_keys.insert(group_key.clone());
                    acc.push(Row::group_header(group_key, layout.group_header_height));
                }
                acc.push(Row::option(position, layout.option_height));
            }
        } else {
            for (position, option) in options.iter().enumerate() {
                validate_option(position, option)?;
                acc.push(Row::option(position, layout.option_height));
            }
        }

        let it = acc.finish();

        call_if_true!(DEBUG_SELECT_ROW_INDEX, {
            tracing::debug!(
                message = "🗂️ row index rebuilt",
                option_count = options.len(),
                row_count = it.len(),
                total_height = %it.total_height(),
                grouped = layout.grouped,
            );
        });

        Ok(it)
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] { &self.rows }

    #[must_use]
    pub fn offsets(&self) -> &[Px] { &self.offsets }

    #[must_use]
    pub fn len(&self) -> usize { self.rows.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> { self.rows.get(index) }

    /// Top of the row at `index`.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Option<Px> {
        if index < self.rows.len() {
            self.offsets.get(index).copied()
        } else {
            None
        }
    }

    /// `(top, bottom)` of the row at `index`. The bottom is exclusive.
    #[must_use]
    pub fn row_span(&self, index: usize) -> Option<(Px, Px)> {
        let top = self.offset_of(index)?;
        let bottom = self.offsets.get(index + 1).copied()?;
        Some((top, bottom))
    }

    /// Total scrollable height, `offsets[rows.len()]`.
    #[must_use]
    pub fn total_height(&self) -> Px {
        self.offsets.last().copied().unwrap_or(Px::ZERO)
    }

    /// The row that shows the option at `option_index`, if any.
    #[must_use]
    pub fn row_of_option(&self, option_index: usize) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.option_index() == Some(option_index))
    }

    #[must_use]
    pub fn group_header_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_group_header()).count()
    }
}

fn validate_option<T: SelectOption>(position: usize, option: &T) -> Result<(), SelectError> {
    match option.key() {
        Some(key) if !key.is_empty() => Ok(()),
        _ => Err(SelectError::InvalidOption {
            position,
            label: option.label().to_string(),
        }),
    }
}

/// Keeps `rows` and `offsets` in lock step while the index is being built.
struct RowIndexAccumulator {
    rows: Vec<Row>,
    offsets: Vec<Px>,
    running_offset: Px,
}

impl RowIndexAccumulator {
    fn with_capacity(option_count: usize) -> Self {
        let mut offsets = Vec::with_capacity(option_count + 1);
        offsets.push(Px::ZERO);
        Self {
            rows: Vec::with_capacity(option_count),
            offsets,
            running_offset: Px::ZERO,
        }
    }

    fn push(&mut self, row: Row) {
        self.running_offset += row.height;
        self.rows.push(row);
        self.offsets.push(self.running_offset);
    }

    fn finish(self) -> RowIndex {
        RowIndex {
            rows: self.rows,
            offsets: self.offsets,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{OptionItem, assert_eq2, px};

    fn fruit_and_veg() -> Vec<OptionItem> {
        vec![
            OptionItem::new("1", "Apple").with_group("A"),
            OptionItem::new("2", "Banana").with_group("A"),
            OptionItem::new("3", "Carrot").with_group("B"),
        ]
    }

    fn group_of(option: &OptionItem) -> Option<GroupKey> { option.group.clone() }

    #[test]
    fn test_grouped_scenario() {
        let layout = RowLayout::try_new(true, px(30), Some(px(20))).unwrap();
        let row_index = RowIndex::build(&fruit_and_veg(), &layout, group_of).unwrap();

        assert_eq2!(
            row_index.rows(),
            &[
                Row::group_header("A".into(), px(20)),
                Row::option(0, px(30)),
                Row::option(1, px(30)),
                Row::group_header("B".into(), px(20)),
                Row::option(2, px(30)),
            ]
        );
        assert_eq2!(
            row_index.offsets(),
            &[px(0), px(20), px(50), px(80), px(100), px(130)]
        );
        assert_eq2!(row_index.total_height(), px(130));
    }

    #[test]
    fn test_ungrouped_never_calls_group_key_of() {
        let layout = RowLayout::try_new(false, px(31), None).unwrap();
        let row_index = RowIndex::build(&fruit_and_veg(), &layout, |_| {
            panic!("group key extractor must not run for ungrouped layout")
        })
        .unwrap();

        assert_eq2!(row_index.len(), 3);
        assert!(row_index.rows().iter().all(|row| !row.is_group_header()));
        assert!(row_index.rows().iter().all(|row| row.height == px(31)));
    }

    #[test]
    fn test_empty_options() {
        let layout = RowLayout::try_new(true, px(30), None).unwrap();
        let row_index = RowIndex::build::<OptionItem>(&[], &layout, group_of).unwrap();

        assert!(row_index.is_empty());
        assert_eq2!(row_index.offsets(), &[px(0)]);
        assert_eq2!(row_index, RowIndex::empty());
    }

    #[test_case(None, px(30) ; "missing header height falls back")]
    #[test_case(Some(px(0)), px(30) ; "zero header height falls back")]
    #[test_case(Some(px(18)), px(18) ; "explicit header height wins")]
    fn test_group_header_height_resolution(given: Option<Px>, expected: Px) {
        let layout = RowLayout::try_new(true, px(30), given).unwrap();
        assert_eq2!(layout.group_header_height, expected);
    }

    #[test]
    fn test_zero_option_height_is_rejected() {
        assert_eq2!(
            RowLayout::try_new(false, px(0), None),
            Err(SelectError::InvalidRowHeight { height: px(0) })
        );
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let mut options = fruit_and_veg();
        options[1].value = None;

        for grouped in [true, false] {
            let layout = RowLayout::try_new(grouped, px(30), None).unwrap();
            assert_eq2!(
                RowIndex::build(&options, &layout, group_of),
                Err(SelectError::InvalidOption {
                    position: 1,
                    label: "Banana".into()
                })
            );
        }
    }

    #[test]
    fn test_non_contiguous_group_gets_single_header() {
        let options = vec![
            OptionItem::new("1", "Apple").with_group("A"),
            OptionItem::new("2", "Carrot").with_group("B"),
            OptionItem::new("3", "Cherry").with_group("A"),
        ];
        let layout = RowLayout::try_new(true, px(10), Some(px(5))).unwrap();
        let row_index = RowIndex::build(&options, &layout, group_of).unwrap();

        assert_eq2!(row_index.len(), 5);
        assert_eq2!(row_index.group_header_count(), 2);
        assert_eq2!(
            row_index.rows()[4],
            Row::option(2, px(10)),
            "option keeps its input position, no header is repeated"
        );
    }

    #[test]
    fn test_options_without_group_key_get_no_header() {
        let options = vec![
            OptionItem::new("1", "Loose"),
            OptionItem::new("2", "Apple").with_group("A"),
            OptionItem::new("3", "Also loose"),
        ];
        let layout = RowLayout::try_new(true, px(10), None).unwrap();
        let row_index = RowIndex::build(&options, &layout, group_of).unwrap();

        assert_eq2!(
            row_index.rows(),
            &[
                Row::option(0, px(10)),
                Row::group_header("A".into(), px(10)),
                Row::option(1, px(10)),
                Row::option(2, px(10)),
            ]
        );
    }

    #[test]
    fn test_grouping_invariant_on_many_options() {
        let options: Vec<OptionItem> = (0..1_000)
            .map(|it| {
                OptionItem::new(it.to_string(), format!("Item {it}"))
                    .with_group(format!("G{}", it / 37))
            })
            .collect();
        let layout = RowLayout::try_new(true, px(31), Some(px(24))).unwrap();
        let row_index = RowIndex::build(&options, &layout, group_of).unwrap();

        let group_count = 1_000_usize.div_ceil(37);
        assert_eq2!(row_index.len(), options.len() + group_count);
        assert_eq2!(row_index.offsets().len(), row_index.len() + 1);

        // Every header is directly followed by the first option of its group.
        for (index, row) in row_index.rows().iter().enumerate() {
            if let RowKind::GroupHeader { group_key } = &row.kind {
                let next_option = row_index.rows()[index + 1].option_index().unwrap();
                assert_eq2!(options[next_option].group.as_ref(), Some(group_key));
                assert_eq2!(next_option % 37, 0);
            }
        }

        // Offsets are monotonic, and the last one is the sum of all heights.
        assert!(row_index.offsets().windows(2).all(|it| it[0] <= it[1]));
        let sum = row_index.rows().iter().fold(px(0), |acc, row| acc + row.height);
        assert_eq2!(row_index.total_height(), sum);
    }

    #[test]
    fn test_row_span_and_lookup() {
        let layout = RowLayout::try_new(true, px(30), Some(px(20))).unwrap();
        let row_index = RowIndex::build(&fruit_and_veg(), &layout, group_of).unwrap();

        assert_eq2!(row_index.row_span(3), Some((px(80), px(100))));
        assert_eq2!(row_index.row_span(5), None);
        assert_eq2!(row_index.offset_of(5), None);
        assert_eq2!(row_index.row_of_option(2), Some(4));
        assert_eq2!(row_index.row_of_option(9), None);
    }
}
