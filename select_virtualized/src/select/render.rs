// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Materialize only the rows in the window, each positioned at its precomputed offset.
//!
//! The list host sees rows through [`RowSource`]. [`render_window()`] turns the visible
//! range into a [`RenderedFrame`], which also carries the total content height so the
//! host can size its scroll area as if every row were there.
//!
//! [`RenderingAdapter`] sits between the host's event stream and the renderer. Scroll
//! and resize events only record the latest viewport. The next animation frame renders
//! it once, so a burst of events costs one frame.
//!
//! ```text
//!  scroll(10) scroll(40) resize(300) scroll(90)      animation frame
//!  ─────┬──────────┬──────────┬──────────┬───────────────┬─────────▶ time
//!       └──────────┴──────────┴──────────┘               │
//!              pending = { 90, 300 }  ──────────────────▶ render once
//! ```

use serde::{Deserialize, Serialize};

use super::DEBUG_SELECT_RENDER;
use crate::{DisplayContent, GroupHeaderFormatter, GroupKey, InlineString, InlineVec, Px,
            RowIndex, RowKind, SelectOption, Selection, ViewportState, VisibleRange,
            call_if_true, visible_range};

/// What the list host needs to know about rows.
pub trait RowSource {
    fn row_count(&self) -> usize;

    /// `None` when `index` is out of range.
    fn row_height(&self, index: usize) -> Option<Px>;

    /// `None` when `index` is out of range.
    fn row_content(&self, index: usize) -> Option<RowContent>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowContent {
    Option {
        option_index: usize,
        key: InlineString,
        label: String,
        is_selected: bool,
    },
    GroupHeader {
        group_key: GroupKey,
        display: DisplayContent,
    },
}

/// Rows backed by the caller's options and a row index built from them.
#[derive(Debug)]
pub struct ListSource<'a, T> {
    pub options: &'a [T],
    pub row_index: &'a RowIndex,
    pub formatter: &'a GroupHeaderFormatter,
    pub selection: Option<&'a Selection<T>>,
}

impl<T: SelectOption> RowSource for ListSource<'_, T> {
    fn row_count(&self) -> usize { self.row_index.len() }

    fn row_height(&self, index: usize) -> Option<Px> {
        self.row_index.row(index).map(|row| row.height)
    }

    fn row_content(&self, index: usize) -> Option<RowContent> {
        let row = self.row_index.row(index)?;
        match &row.kind {
            RowKind::Option { option_index } => {
                let option = self.options.get(*option_index)?;
                let key = option.key().unwrap_or_default();
                Some(RowContent::Option {
                    option_index: *option_index,
                    key: key.into(),
                    label: option.label().to_string(),
                    is_selected: self
                        .selection
                        .is_some_and(|selection| selection.contains_key(key)),
                })
            }
            RowKind::GroupHeader { group_key } => Some(RowContent::GroupHeader {
                group_key: group_key.clone(),
                display: self.formatter.format(group_key, row.height),
            }),
        }
    }
}

/// A row placed at its absolute offset in the scroll content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionedRow {
    pub index: usize,
    pub top: Px,
    pub height: Px,
    pub content: RowContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFrame {
    /// Height of all rows, rendered or not.
    pub total_height: Px,
    pub viewport: ViewportState,
    /// `None` when there are no rows.
    pub range: Option<VisibleRange>,
    pub rows: InlineVec<PositionedRow>,
}

/// Render the rows of `source` that fall in the window for `viewport`. Tops come from
/// `row_index`, so `source` must describe the same rows.
pub fn render_window(
    row_index: &RowIndex,
    source: &impl RowSource,
    viewport: ViewportState,
    overscan: usize,
) -> RenderedFrame {
    let range = visible_range(row_index, viewport, overscan);

    let rows: InlineVec<PositionedRow> = range
        .iter()
        .flat_map(VisibleRange::iter)
        .filter_map(|index| {
            Some(PositionedRow {
                index,
                top: row_index.offset_of(index)?,
                height: source.row_height(index)?,
                content: source.row_content(index)?,
            })
        })
        .collect();

    RenderedFrame {
        total_height: row_index.total_height(),
        viewport,
        range,
        rows,
    }
}

/// Coalesces viewport events into at most one frame per animation frame. The last
/// event wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderingAdapter {
    /// Viewport of the last rendered frame.
    rendered: Option<ViewportState>,
    pending: ViewportState,
    /// Set when the rows changed underneath, eg: a rebuilt index or a new selection.
    dirty: bool,
    frames_rendered: u64,
}

impl RenderingAdapter {
    #[must_use]
    pub fn new(viewport: ViewportState) -> Self {
        Self {
            rendered: None,
            pending: viewport,
            dirty: true,
            frames_rendered: 0,
        }
    }

    /// The viewport the next frame will use.
    #[must_use]
    pub fn viewport(&self) -> ViewportState { self.pending }

    pub fn on_scroll(&mut self, scroll_offset: Px) { self.pending.scroll_offset = scroll_offset; }

    pub fn on_resize(&mut self, viewport_height: Px) {
        self.pending.viewport_height = viewport_height;
    }

    pub fn mark_dirty(&mut self) { self.dirty = true; }

    #[must_use]
    pub fn needs_frame(&self) -> bool { self.dirty || self.rendered != Some(self.pending) }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 { self.frames_rendered }

    /// Renders only if something changed since the last frame.
    pub fn on_animation_frame(
        &mut self,
        row_index: &RowIndex,
        source: &impl RowSource,
        overscan: usize,
    ) -> Option<RenderedFrame> {
        if !self.needs_frame() {
            return None;
        }
        Some(self.force_render(row_index, source, overscan))
    }

    pub fn force_render(
        &mut self,
        row_index: &RowIndex,
        source: &impl RowSource,
        overscan: usize,
    ) -> RenderedFrame {
        let frame = render_window(row_index, source, self.pending, overscan);

        self.rendered = Some(self.pending);
        self.dirty = false;
        self.frames_rendered += 1;

        call_if_true!(DEBUG_SELECT_RENDER, {
            tracing::debug!(
                message = "🖼️ frame rendered",
                frame = self.frames_rendered,
                viewport = ?frame.viewport,
                range = ?frame.range,
                row_count = frame.rows.len(),
                total_height = %frame.total_height,
            );
        });

        frame
    }
}
