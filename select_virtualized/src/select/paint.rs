// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Paint a [`RenderedFrame`] to a terminal with [crossterm].
//!
//! One layout unit is one terminal line, so the frame needs option and header heights
//! of 1 to look like a list. Taller rows print their content on their first visible line
//! and leave the rest blank.
//!
//! The painter draws the viewport in place, starting at the cursor, and moves the cursor
//! back up when it is done. Calling it again repaints over the previous frame.

use std::io::Write;

use crossterm::{cursor::{MoveToColumn, MoveToNextLine, MoveToPreviousLine},
                style::{Print, PrintStyledContent, Stylize},
                terminal::{Clear, ClearType}};
use miette::IntoDiagnostic as _;
use unicode_width::UnicodeWidthChar as _;

use crate::{InlineVec, Px, RenderedFrame, RowContent, queue_commands_no_lock};

const OPTION_INDENT: &str = "  ";
const SELECTED_MARKER: &str = "› ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Blank,
    GroupHeader { emphasized: bool },
    Option { is_selected: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintLine {
    pub text: String,
    pub style: LineStyle,
}

/// One line per layout unit of the viewport, clipped to `max_width` columns. A terminal
/// can't show more than [`u16::MAX`] lines, taller viewports are cut there.
#[must_use]
pub fn frame_lines(frame: &RenderedFrame, max_width: u16) -> InlineVec<PaintLine> {
    let viewport = frame.viewport;
    let line_count = u32::from(viewport.viewport_height.as_u16());
    let mut acc = InlineVec::new();

    for line in 0..line_count {
        let y = viewport.scroll_offset + Px(line);
        let maybe_row = frame
            .rows
            .iter()
            .find(|row| row.top <= y && y < row.top + row.height);

        let Some(row) = maybe_row else {
            acc.push(blank());
            continue;
        };

        // Only the first visible line of a tall row carries its content.
        if y != row.top && line != 0 {
            acc.push(blank());
            continue;
        }

        let (text, style) = match &row.content {
            RowContent::GroupHeader { display, .. } => (
                display.text.clone(),
                LineStyle::GroupHeader {
                    emphasized: display.emphasized,
                },
            ),
            RowContent::Option {
                label, is_selected, ..
            } => {
                let prefix = if *is_selected { SELECTED_MARKER } else { OPTION_INDENT };
                (
                    format!("{prefix}{label}"),
                    LineStyle::Option {
                        is_selected: *is_selected,
                    },
                )
            }
        };

        acc.push(PaintLine {
            text: clip_to_width(&text, max_width),
            style,
        });
    }

    acc
}

fn blank() -> PaintLine {
    PaintLine {
        text: String::new(),
        style: LineStyle::Blank,
    }
}

/// Cut `text` so it takes at most `max_width` display columns. Wide characters that
/// would straddle the edge are dropped.
#[must_use]
pub fn clip_to_width(text: &str, max_width: u16) -> String {
    let max_width = usize::from(max_width);
    let mut used = 0;
    let mut acc = String::with_capacity(text.len());
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        used += ch_width;
        acc.push(ch);
    }
    acc
}

/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn paint_frame(
    writer: &mut impl Write,
    frame: &RenderedFrame,
    max_width: u16,
) -> miette::Result<()> {
    let lines = frame_lines(frame, max_width);

    for line in &lines {
        queue_commands_no_lock! {
            writer,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
        };

        match line.style {
            LineStyle::Blank => {}
            LineStyle::GroupHeader { emphasized: true } => {
                queue_commands_no_lock!(writer, PrintStyledContent(line.text.as_str().bold()));
            }
            LineStyle::GroupHeader { emphasized: false }
            | LineStyle::Option { is_selected: false } => {
                queue_commands_no_lock!(writer, Print(&line.text));
            }
            LineStyle::Option { is_selected: true } => {
                queue_commands_no_lock!(
                    writer,
                    PrintStyledContent(line.text.as_str().reverse())
                );
            }
        }

        queue_commands_no_lock!(writer, MoveToNextLine(1));
    }

    // Move the cursor back up.
    if let Ok(line_count) = u16::try_from(lines.len())
        && line_count > 0
    {
        queue_commands_no_lock!(writer, MoveToPreviousLine(line_count));
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
