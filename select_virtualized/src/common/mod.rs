// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod decl_macros;
pub mod log;
pub mod lru_cache;
pub mod units;

// Re-export.
pub use log::*;
pub use lru_cache::*;
pub use units::*;
