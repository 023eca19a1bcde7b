// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors from building the row index and validating props. See [`SelectError`].

use crate::Px;

/// Errors surfaced by the windowing engine.
///
/// Only malformed input is an error. Out of range scroll offsets and viewport sizes are
/// clamped instead, and callback errors from the caller are passed through untouched as
/// [`miette::Report`]s.
///
/// | Variant              | Cause                                               |
/// | :------------------- | :-------------------------------------------------- |
/// | [`InvalidOption`]    | An option has no key, so no row can refer to it     |
/// | [`InvalidRowHeight`] | The option height is zero, so offsets can't advance |
///
/// [`InvalidOption`]: Self::InvalidOption
/// [`InvalidRowHeight`]: Self::InvalidRowHeight
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum SelectError {
    /// Dropping the option instead would shift every offset after it.
    #[error("Option at position {position} (label: '{label}') has no key")]
    #[diagnostic(
        code(select_virtualized::row_index::invalid_option),
        help(
            "Every option needs a non-empty key that is unique in the option list. \
             Set the `value` field, or return `Some(..)` from `SelectOption::key()`."
        )
    )]
    InvalidOption { position: usize, label: String },

    #[error("Option height must be greater than zero, got {height}")]
    #[diagnostic(
        code(select_virtualized::props::invalid_row_height),
        help("Set `option_height` to the height of one option row, eg: 31.")
    )]
    InvalidRowHeight { height: Px },
}
