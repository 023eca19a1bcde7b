// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Caller facing configuration of the widget, see [`SelectProps`].
//!
//! Props deserialize from JSON with every field optional:
//!
//! ```
//! use select_virtualized::{SelectProps, px};
//!
//! let props: SelectProps = serde_json::from_str(r#"{ "grouped": true }"#).unwrap();
//! assert!(props.grouped);
//! assert_eq!(props.option_height, px(31));
//! assert_eq!(props.overscan, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::{Px, RowLayout, SelectError, px};

pub const DEFAULT_OPTION_HEIGHT: u32 = 31;
pub const DEFAULT_OVERSCAN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectProps {
    /// Options carry group keys and need header rows. A custom header formatter or an
    /// explicit header height turns this on as well, see
    /// [`SelectProps::header_rows_enabled`].
    pub grouped: bool,
    pub option_height: Px,
    /// Falls back to `option_height` when unset or zero.
    pub group_header_height: Option<Px>,
    /// Extra rows rendered above and below the viewport.
    pub overscan: usize,
    /// Passed through to the host, which owns the creatable workflow.
    pub creatable: bool,
    pub is_multi: bool,
    pub is_clearable: bool,
    pub is_searchable: bool,
    pub blur_input_on_select: bool,
}

impl Default for SelectProps {
    fn default() -> Self {
        Self {
            grouped: false,
            option_height: px(DEFAULT_OPTION_HEIGHT),
            group_header_height: None,
            overscan: DEFAULT_OVERSCAN,
            creatable: false,
            is_multi: false,
            is_clearable: true,
            is_searchable: true,
            blur_input_on_select: true,
        }
    }
}

impl SelectProps {
    /// Header rows are laid out when any header related setting is present, not only
    /// when `grouped` is set. A zero header height counts as unset.
    #[must_use]
    pub fn header_rows_enabled(&self, has_custom_formatter: bool) -> bool {
        self.grouped
            || has_custom_formatter
            || self.group_header_height.is_some_and(|it| !it.is_zero())
    }

    /// # Errors
    ///
    /// Returns [`SelectError::InvalidRowHeight`] when `option_height` is zero.
    pub fn row_layout(&self, has_custom_formatter: bool) -> Result<RowLayout, SelectError> {
        RowLayout::try_new(
            self.header_rows_enabled(has_custom_formatter),
            self.option_height,
            self.group_header_height,
        )
    }

    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> miette::Result<Self> {
        use miette::IntoDiagnostic as _;
        serde_json::from_str(json).into_diagnostic()
    }
}

/// Uses the default group header formatter.
impl TryFrom<&SelectProps> for RowLayout {
    type Error = SelectError;

    fn try_from(props: &SelectProps) -> Result<Self, Self::Error> { props.row_layout(false) }
}
