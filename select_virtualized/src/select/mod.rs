// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod error;
pub mod group_header;
pub mod option_types;
pub mod paint;
pub mod props;
pub mod render;
pub mod row_index;
pub mod selection;
pub mod widget;
pub mod window;

// Re-export.
pub use error::*;
pub use group_header::*;
pub use option_types::*;
pub use paint::*;
pub use props::*;
pub use render::*;
pub use row_index::*;
pub use selection::*;
pub use widget::*;
pub use window::*;

// Debug flags.
pub const DEBUG_SELECT_ROW_INDEX: bool = false;
pub const DEBUG_SELECT_WINDOW: bool = false;
pub const DEBUG_SELECT_GROUP_HEADER: bool = false;
pub const DEBUG_SELECT_SELECTION: bool = false;
pub const DEBUG_SELECT_RENDER: bool = false;
