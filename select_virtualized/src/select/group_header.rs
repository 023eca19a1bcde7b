// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turn a group key into what a group header row displays.
//!
//! The formatter is plain data: a function value. The default one renders the group key
//! as plain text sized to the header height. A caller supplied one replaces it
//! entirely, nothing from the default output is merged in.
//!
//! The same headers scroll in and out of the window all the time, so results are
//! memoized per `(group key, header height)` in a bounded [`LruCache`].

use std::{cell::RefCell, fmt::Debug, sync::Arc};

use serde::{Deserialize, Serialize};

use super::DEBUG_SELECT_GROUP_HEADER;
use crate::{GroupKey, LruCache, Px, call_if_true};

pub const GROUP_HEADER_CACHE_CAPACITY: usize = 1_024;

/// What a group header row shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayContent {
    pub text: String,
    pub height: Px,
    /// Hint for the host: headers rendered by the default formatter are emphasized.
    pub emphasized: bool,
}

impl DisplayContent {
    pub fn new(text: impl Into<String>, height: Px) -> Self {
        Self {
            text: text.into(),
            height,
            emphasized: false,
        }
    }

    #[must_use]
    pub fn emphasized(mut self) -> Self {
        self.emphasized = true;
        self
    }
}

/// Must be pure, the result is cached.
pub type GroupHeaderFormatFn = Arc<dyn Fn(&GroupKey, Px) -> DisplayContent + Send + Sync>;

/// Plain text label, sized to the header height.
#[must_use]
pub fn default_group_format(group_key: &GroupKey, header_height: Px) -> DisplayContent {
    DisplayContent::new(group_key.as_str(), header_height).emphasized()
}

pub struct GroupHeaderFormatter {
    format_fn: GroupHeaderFormatFn,
    is_custom: bool,
    cache: RefCell<LruCache<(GroupKey, Px), DisplayContent>>,
}

impl Debug for GroupHeaderFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupHeaderFormatter")
            .field("is_custom", &self.is_custom)
            .field("cached", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Default for GroupHeaderFormatter {
    fn default() -> Self { Self::new(None) }
}

impl GroupHeaderFormatter {
    /// `None` picks [`default_group_format`].
    #[must_use]
    pub fn new(maybe_custom: Option<GroupHeaderFormatFn>) -> Self {
        let is_custom = maybe_custom.is_some();
        let format_fn: GroupHeaderFormatFn = match maybe_custom {
            Some(it) => it,
            None => Arc::new(default_group_format),
        };
        Self {
            format_fn,
            is_custom,
            cache: RefCell::new(LruCache::new(GROUP_HEADER_CACHE_CAPACITY)),
        }
    }

    pub fn new_custom(
        format_fn: impl Fn(&GroupKey, Px) -> DisplayContent + Send + Sync + 'static,
    ) -> Self {
        Self::new(Some(Arc::new(format_fn)))
    }

    #[must_use]
    pub fn is_custom(&self) -> bool { self.is_custom }

    pub fn format(&self, group_key: &GroupKey, header_height: Px) -> DisplayContent {
        let cache_key = (group_key.clone(), header_height);
        self.cache.borrow_mut().get_or_insert_with(cache_key, || {
            call_if_true!(DEBUG_SELECT_GROUP_HEADER, {
                tracing::debug!(
                    message = "🏷️ format group header (cache miss)",
                    group_key = %group_key,
                    header_height = %header_height,
                    is_custom = self.is_custom,
                );
            });
            (self.format_fn)(group_key, header_height)
        })
    }

    #[must_use]
    pub fn cached_len(&self) -> usize { self.cache.borrow().len() }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{assert_eq2, px};

    #[test]
    fn test_default_format() {
        let formatter = GroupHeaderFormatter::default();
        assert!(!formatter.is_custom());
        assert_eq2!(
            formatter.format(&"Fruit".into(), px(20)),
            DisplayContent {
                text: "Fruit".into(),
                height: px(20),
                emphasized: true,
            }
        );
    }

    #[test]
    fn test_custom_format_replaces_default() {
        let formatter = GroupHeaderFormatter::new_custom(|group_key, height| {
            DisplayContent::new(format!("== {group_key} =="), height)
        });
        let it = formatter.format(&"Veg".into(), px(24));

        assert!(formatter.is_custom());
        assert_eq2!(it.text, "== Veg ==");
        assert!(!it.emphasized, "nothing from the default formatter leaks in");
    }

    #[test]
    fn test_memoized_per_key_and_height() {
        let calls = Arc::new(AtomicUsize::new(0));
        let formatter = GroupHeaderFormatter::new_custom({
            let calls = Arc::clone(&calls);
            move |group_key, height| {
                calls.fetch_add(1, Ordering::Relaxed);
                DisplayContent::new(group_key.as_str(), height)
            }
        });

        for _ in 0..5 {
            formatter.format(&"A".into(), px(20));
            formatter.format(&"B".into(), px(20));
        }
        assert_eq2!(calls.load(Ordering::Relaxed), 2);

        // A different height is a different entry.
        let it = formatter.format(&"A".into(), px(31));
        assert_eq2!(it.height, px(31));
        assert_eq2!(calls.load(Ordering::Relaxed), 3);
        assert_eq2!(formatter.cached_len(), 3);
    }
}
