// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # select_virtualized
//!
//! A windowed option list engine for select controls that have to stay responsive with
//! very large option lists, optionally organized into labeled groups. It is meant to sit
//! underneath a conventional single or multi select control (the "host"), which keeps
//! ownership of keyboard navigation, filtering, and styling.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//!
//! - [Architecture](#architecture)
//! - [Row index](#row-index)
//! - [Windowing](#windowing)
//! - [Selection sync](#selection-sync)
//! - [Logging](#logging)
//!
//! <!-- /TOC -->
//!
//! # Architecture
//!
//! ```text
//!   options + props
//!        │
//!        ▼
//!  ┌───────────────┐   RowIndex   ┌──────────────────┐  VisibleRange  ┌───────────────────┐
//!  │ row_index     │ ───────────▶ │ window           │ ─────────────▶ │ render            │
//!  │ (rebuild on   │              │ (binary search,  │                │ (absolute rows,   │
//!  │  data change) │              │  every scroll)   │ ◀── scroll ─── │  frame coalescing)│
//!  └───────────────┘              └──────────────────┘     resize     └───────────────────┘
//!                                                                              │
//!                                          ┌───────────────────┐   change      │
//!                               caller ◀── │ selection         │ ◀─────────────┘
//!                                          │ (two state sync)  │
//!                                          └───────────────────┘
//! ```
//!
//! The composing type is [`SelectVirtualized`]. Every piece is also usable on its own.
//!
//! # Row index
//!
//! [`RowIndex::build()`] flattens options into option rows and group header rows, and
//! keeps a cumulative offset for each row, so `offsets[i]` is the top of row `i` and
//! `offsets[rows.len()]` is the total content height.
//!
//! # Windowing
//!
//! [`visible_range()`] runs two binary searches over the offsets, so it is `O(log n)` on
//! every scroll event regardless of the number of options.
//!
//! ```
//! use select_virtualized::{OptionItem, RowIndex, RowLayout, ViewportState, px,
//!                          visible_range};
//!
//! let options = vec![
//!     OptionItem::new("1", "one").with_group("A"),
//!     OptionItem::new("2", "two").with_group("A"),
//!     OptionItem::new("3", "three").with_group("B"),
//! ];
//! let layout = RowLayout::try_new(true, px(30), Some(px(20))).unwrap();
//! let row_index = RowIndex::build(&options, &layout, |it| it.group.clone()).unwrap();
//!
//! let range = visible_range(&row_index, ViewportState::new(px(60), px(40)), 0).unwrap();
//! assert_eq!((range.first_index, range.last_index), (2, 3));
//! ```
//!
//! # Selection sync
//!
//! [`SelectionSynchronizer`] is a two state machine. A value supplied by the caller
//! always wins over whatever the user picked last. Imperative `clear`, `focus`, and
//! `select` calls are sent as [`SelectCommand`] values.
//!
//! # Logging
//!
//! Verbose debug events are gated behind the `DEBUG_SELECT_*` constants. Use
//! [`try_initialize_logging_global()`] with a [`TracingConfig`] to see them.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
// Production library code must not unwrap in functions that return `Result`.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod common;
pub mod select;

// Re-export.
pub use common::*;
pub use select::*;
