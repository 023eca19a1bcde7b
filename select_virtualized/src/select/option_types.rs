// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! What an option is, from the point of view of the windowing engine.
//!
//! Options are owned by the caller and never mutated. The engine only needs a key (to
//! refer to the option from rows and selections), a label (to render it), an optional
//! group key, and whether the host's creatable workflow just made it up. Any type can
//! take part by implementing [`SelectOption`]. [`OptionItem`] is a ready made
//! implementation that deserializes from the `{ value, label, group, __isNew__ }` JSON
//! shape that select controls commonly use.

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};
use smallstr::SmallString;
use smallvec::SmallVec;

pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;
pub const DEFAULT_LIST_STORAGE_SIZE: usize = 16;

/// Keys and short labels fit inline without a heap allocation.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;

/// A window of rows usually fits inline without a heap allocation.
pub type InlineVec<T> = SmallVec<[T; DEFAULT_LIST_STORAGE_SIZE]>;

pub trait SelectOption {
    /// Unique key of the option. `None` or an empty string marks the option as
    /// malformed, and building a row index from it fails.
    fn key(&self) -> Option<&str>;

    fn label(&self) -> &str;

    /// Used when the caller doesn't pass its own group key extractor.
    fn group_key(&self) -> Option<GroupKey> { None }

    /// `true` for an entry that the creatable workflow has just made up, and that hasn't
    /// been submitted yet.
    fn is_new(&self) -> bool { false }
}

/// Identifies a group of options. Groups only exist because options point at them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub InlineString);

impl GroupKey {
    pub fn new(arg_key: impl Into<GroupKey>) -> Self { arg_key.into() }

    #[must_use]
    pub fn as_str(&self) -> &str { self.0.as_str() }
}

impl Debug for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GroupKey({:?})", self.0.as_str())
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

mod convert_to_group_key {
    use super::{GroupKey, InlineString};

    impl From<&str> for GroupKey {
        fn from(key: &str) -> Self { GroupKey(InlineString::from(key)) }
    }

    impl From<String> for GroupKey {
        fn from(key: String) -> Self { GroupKey(InlineString::from(key)) }
    }

    impl From<InlineString> for GroupKey {
        fn from(key: InlineString) -> Self { GroupKey(key) }
    }
}

/// A plain option: `{ "value": "1", "label": "Apple", "group": "Fruit" }`.
///
/// `__isNew__` is the marker that creatable select controls put on entries typed in by
/// the user that don't exist in the option list yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<InlineString>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupKey>,
    #[serde(default, rename = "__isNew__", skip_serializing_if = "std::ops::Not::not")]
    pub is_new: bool,
}

impl OptionItem {
    pub fn new(value: impl Into<InlineString>, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            label: label.into(),
            group: None,
            is_new: false,
        }
    }

    /// An entry typed in by the user. The label doubles as the value, which is what
    /// creatable controls do before the entry is submitted.
    pub fn created(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: Some(InlineString::from(label.as_str())),
            label,
            group: None,
            is_new: true,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<GroupKey>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl SelectOption for OptionItem {
    fn key(&self) -> Option<&str> {
        self.value.as_deref().filter(|it| !it.is_empty())
    }

    fn label(&self) -> &str { &self.label }

    fn group_key(&self) -> Option<GroupKey> { self.group.clone() }

    fn is_new(&self) -> bool { self.is_new }
}

/// Parse a JSON array of [`OptionItem`]s.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or doesn't match the option shape.
pub fn parse_options_json(json: &str) -> miette::Result<Vec<OptionItem>> {
    use miette::IntoDiagnostic as _;
    serde_json::from_str(json).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_option_item_key() {
        assert_eq2!(OptionItem::new("1", "Apple").key(), Some("1"));
        assert_eq2!(OptionItem::new("", "Apple").key(), None);

        let missing = OptionItem {
            value: None,
            label: "Pear".into(),
            group: None,
            is_new: false,
        };
        assert_eq2!(missing.key(), None);
    }

    #[test]
    fn test_parse_options_json() {
        let json = r#"[
            { "value": "1", "label": "Apple", "group": "Fruit" },
            { "value": "2", "label": "Carrot" },
            { "label": "Kiwi", "__isNew__": true }
        ]"#;
        let options = parse_options_json(json).unwrap();

        assert_eq2!(options.len(), 3);
        assert_eq2!(options[0].group_key(), Some(GroupKey::from("Fruit")));
        assert_eq2!(options[1].group_key(), None);
        assert!(options[2].is_new());
        assert_eq2!(options[2].key(), None);
    }

    #[test]
    fn test_created_option_serializes_marker() {
        let json = serde_json::to_string(&OptionItem::created("Kiwi")).unwrap();
        assert_eq2!(json, r#"{"value":"Kiwi","label":"Kiwi","__isNew__":true}"#);

        let json = serde_json::to_string(&OptionItem::new("1", "Apple")).unwrap();
        assert_eq2!(json, r#"{"value":"1","label":"Apple"}"#);
    }

    #[test]
    fn test_parse_options_json_rejects_garbage() {
        assert!(parse_options_json("{ not json").is_err());
    }
}
