// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keep the selection consistent between the caller and the user.
//!
//! ```text
//!                set_external_value(v)
//!        ┌──────────────────────────────────────────┐
//!        ▼                                          │
//!  ┌────────────────────┐  on_change(v), clear,  ┌──────────┐
//!  │ ExternalControlled │ ─────────────────────▶ │ Internal │ ──┐ on_change(v),
//!  └────────────────────┘  select(v)             └──────────┘ ◀─┘ clear, select(v)
//! ```
//!
//! - A value supplied by the caller always overrides whatever the user picked, even
//!   when the new value is "nothing".
//! - A change event for an entry that the creatable workflow has just made up is
//!   swallowed. The caller sees it again once the host has turned it into a real
//!   option.
//! - Commands never invoke the change callback.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use super::DEBUG_SELECT_SELECTION;
use crate::{SelectOption, call_if_true};

/// What the user has picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection<T> {
    Single(T),
    Multi(Vec<T>),
}

impl<T: SelectOption> Selection<T> {
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Selection::Single(it) => it.key() == Some(key),
            Selection::Multi(items) => items.iter().any(|it| it.key() == Some(key)),
        }
    }

    /// Only a single value can carry the creatable marker. A multi value is a list of
    /// options and is always forwarded, even when one of them was just created.
    #[must_use]
    pub fn is_new_option(&self) -> bool {
        match self {
            Selection::Single(it) => it.is_new(),
            Selection::Multi(_) => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(_) => 1,
            Selection::Multi(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyncState {
    /// The selection is whatever the caller last supplied.
    #[default]
    ExternalControlled,
    /// The selection came from the user or from a command.
    Internal,
}

/// Names match the ones that select controls pass to their change callback.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ChangeAction {
    SelectOption,
    DeselectOption,
    RemoveValue,
    PopValue,
    Clear,
    CreateOption,
    SetValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMeta {
    pub action: ChangeAction,
}

impl From<ChangeAction> for ActionMeta {
    fn from(action: ChangeAction) -> Self { Self { action } }
}

/// The imperative handle of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectCommand<T> {
    Clear,
    /// The synchronizer has nothing to do for this, see [`CommandOutcome::DelegateFocus`].
    Focus,
    Select(Option<Selection<T>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The host control has to move focus to its input.
    DelegateFocus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The callback ran and the selection was updated.
    Forwarded,
    /// The value was a newly created entry. Nothing happened.
    SuppressedNewOption,
}

/// Change callback. Gets the new selection (or `None` when it was cleared) and the
/// action that caused it. An error aborts the change.
pub type OnChangeFn<T> =
    Box<dyn FnMut(Option<&Selection<T>>, ActionMeta) -> miette::Result<()>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSynchronizer<T> {
    selection: Option<Selection<T>>,
    state: SyncState,
}

impl<T> Default for SelectionSynchronizer<T> {
    fn default() -> Self {
        Self {
            selection: None,
            state: SyncState::ExternalControlled,
        }
    }
}

impl<T: SelectOption + Clone> SelectionSynchronizer<T> {
    /// The external value wins over the default value for the initial selection. The
    /// default only applies when no value is given.
    #[must_use]
    pub fn new(
        maybe_default_value: Option<Selection<T>>,
        maybe_value: Option<Selection<T>>,
    ) -> Self {
        Self {
            selection: maybe_value.or(maybe_default_value),
            state: SyncState::ExternalControlled,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection<T>> { self.selection.as_ref() }

    #[must_use]
    pub fn state(&self) -> SyncState { self.state }

    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.contains_key(key))
    }

    /// Call this every time the caller supplies a value. `None` clears the selection.
    pub fn set_external_value(&mut self, maybe_value: Option<Selection<T>>) {
        call_if_true!(DEBUG_SELECT_SELECTION, {
            tracing::debug!(
                message = "🔒 external value overrides selection",
                prev_state = ?self.state,
                has_value = maybe_value.is_some(),
            );
        });
        self.selection = maybe_value;
        self.state = SyncState::ExternalControlled;
    }

    /// Handle a change event from the host control.
    ///
    /// # Errors
    ///
    /// Returns whatever `on_change` returns. The selection is left as it was.
    pub fn on_change(
        &mut self,
        maybe_value: Option<Selection<T>>,
        meta: ActionMeta,
        on_change: &mut impl FnMut(Option<&Selection<T>>, ActionMeta) -> miette::Result<()>,
    ) -> miette::Result<ChangeOutcome> {
        if let Some(value) = &maybe_value
            && value.is_new_option()
        {
            call_if_true!(DEBUG_SELECT_SELECTION, {
                tracing::debug!(
                    message = "🆕 newly created option, change suppressed",
                    action = %meta.action,
                );
            });
            return Ok(ChangeOutcome::SuppressedNewOption);
        }

        on_change(maybe_value.as_ref(), meta)?;

        call_if_true!(DEBUG_SELECT_SELECTION, {
            tracing::debug!(
                message = "✅ change forwarded",
                action = %meta.action,
                prev_state = ?self.state,
                count = maybe_value.as_ref().map_or(0, Selection::len),
            );
        });

        self.selection = maybe_value;
        self.state = SyncState::Internal;
        Ok(ChangeOutcome::Forwarded)
    }

    pub fn apply_command(&mut self, command: SelectCommand<T>) -> CommandOutcome {
        call_if_true!(DEBUG_SELECT_SELECTION, {
            tracing::debug!(message = "🎛️ apply command", command = ?command_name(&command));
        });

        match command {
            SelectCommand::Clear => {
                self.selection = None;
                self.state = SyncState::Internal;
                CommandOutcome::Applied
            }
            SelectCommand::Select(maybe_item) => {
                self.selection = maybe_item;
                self.state = SyncState::Internal;
                CommandOutcome::Applied
            }
            SelectCommand::Focus => CommandOutcome::DelegateFocus,
        }
    }
}

fn command_name<T>(command: &SelectCommand<T>) -> &'static str {
    match command {
        SelectCommand::Clear => "clear",
        SelectCommand::Focus => "focus",
        SelectCommand::Select(_) => "select",
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use test_case::test_case;

    use super::*;
    use crate::{OptionItem, assert_eq2};

    fn single(value: &str) -> Option<Selection<OptionItem>> {
        Some(Selection::Single(OptionItem::new(value, value)))
    }

    /// Records every callback invocation as `(keys, action)`.
    fn recorder(
        calls: &mut Vec<(Vec<String>, ChangeAction)>,
    ) -> impl FnMut(Option<&Selection<OptionItem>>, ActionMeta) -> miette::Result<()> + '_
    {
        move |maybe_value, meta| {
            let keys = match maybe_value {
                None => vec![],
                Some(Selection::Single(it)) => vec![it.label.clone()],
                Some(Selection::Multi(items)) => {
                    items.iter().map(|it| it.label.clone()).collect()
                }
            };
            calls.push((keys, meta.action));
            Ok(())
        }
    }

    #[test]
    fn test_initial_selection_prefers_value() {
        let it = SelectionSynchronizer::new(single("d"), single("v"));
        assert_eq2!(it.selection(), single("v").as_ref());
        assert_eq2!(it.state(), SyncState::ExternalControlled);

        let it = SelectionSynchronizer::new(single("d"), None);
        assert_eq2!(it.selection(), single("d").as_ref());

        let it = SelectionSynchronizer::<OptionItem>::new(None, None);
        assert_eq2!(it.selection(), None);
    }

    #[test]
    fn test_external_value_overrides_internal() {
        let mut calls = vec![];
        let mut it = SelectionSynchronizer::new(None, None);

        it.on_change(single("x"), ChangeAction::SelectOption.into(), &mut recorder(&mut calls))
            .unwrap();
        assert_eq2!(it.state(), SyncState::Internal);

        it.set_external_value(single("y"));
        assert_eq2!(it.selection(), single("y").as_ref());
        assert_eq2!(it.state(), SyncState::ExternalControlled);

        // "Nothing" is a value too.
        it.set_external_value(None);
        assert_eq2!(it.selection(), None);
        assert_eq2!(calls.len(), 1);
    }

    #[test]
    fn test_change_forwards_then_updates() {
        let mut calls = vec![];
        let mut it = SelectionSynchronizer::new(None, None);

        let outcome = it
            .on_change(single("x"), ChangeAction::SelectOption.into(), &mut recorder(&mut calls))
            .unwrap();

        assert_eq2!(outcome, ChangeOutcome::Forwarded);
        assert_eq2!(calls, vec![(vec!["x".to_string()], ChangeAction::SelectOption)]);
        assert!(it.is_selected("x"));
    }

    #[test]
    fn test_cleared_by_user_is_forwarded() {
        let mut calls = vec![];
        let mut it = SelectionSynchronizer::new(single("x"), None);

        let outcome = it
            .on_change(None, ChangeAction::Clear.into(), &mut recorder(&mut calls))
            .unwrap();

        assert_eq2!(outcome, ChangeOutcome::Forwarded);
        assert_eq2!(calls, vec![(vec![], ChangeAction::Clear)]);
        assert_eq2!(it.selection(), None);
    }

    #[test]
    fn test_newly_created_option_is_suppressed() {
        let mut calls = vec![];
        let mut it = SelectionSynchronizer::new(single("x"), None);

        let outcome = it
            .on_change(
                Some(Selection::Single(OptionItem::created("Kiwi"))),
                ChangeAction::CreateOption.into(),
                &mut recorder(&mut calls),
            )
            .unwrap();

        assert_eq2!(outcome, ChangeOutcome::SuppressedNewOption);
        assert!(calls.is_empty());
        assert_eq2!(it.selection(), single("x").as_ref());
        assert_eq2!(it.state(), SyncState::ExternalControlled);
    }

    #[test]
    fn test_multi_value_with_created_option_is_forwarded() {
        let mut calls = vec![];
        let mut it = SelectionSynchronizer::new(None, None);
        let value = Selection::Multi(vec![
            OptionItem::new("1", "Apple"),
            OptionItem::created("Kiwi"),
        ]);

        let outcome = it
            .on_change(
                Some(value),
                ChangeAction::CreateOption.into(),
                &mut recorder(&mut calls),
            )
            .unwrap();

        assert_eq2!(outcome, ChangeOutcome::Forwarded);
        assert_eq2!(calls[0].0, vec!["Apple".to_string(), "Kiwi".to_string()]);
        assert!(it.is_selected("1"));
        assert!(it.is_selected("Kiwi"));
    }

    #[test]
    fn test_callback_error_leaves_selection_alone() {
        let mut it = SelectionSynchronizer::new(single("x"), None);
        let mut failing = |_: Option<&Selection<OptionItem>>, _: ActionMeta| -> miette::Result<()> {
            Err(miette::miette!("rejected by caller"))
        };

        let result = it.on_change(single("y"), ChangeAction::SelectOption.into(), &mut failing);

        assert_eq2!(result.unwrap_err().to_string(), "rejected by caller");
        assert_eq2!(it.selection(), single("x").as_ref());
        assert_eq2!(it.state(), SyncState::ExternalControlled);
    }

    #[test]
    fn test_commands_never_invoke_callback() {
        let mut it = SelectionSynchronizer::new(None, None);
        it.apply_command(SelectCommand::Select(single("x")));
        assert!(it.is_selected("x"));

        assert_eq2!(it.apply_command(SelectCommand::Clear), CommandOutcome::Applied);
        assert_eq2!(it.selection(), None);
        assert_eq2!(it.state(), SyncState::Internal);

        it.apply_command(SelectCommand::Select(single("z")));
        assert_eq2!(
            it.apply_command(SelectCommand::Focus),
            CommandOutcome::DelegateFocus
        );
        assert!(it.is_selected("z"));
    }

    #[test_case(ChangeAction::SelectOption, "select-option")]
    #[test_case(ChangeAction::DeselectOption, "deselect-option")]
    #[test_case(ChangeAction::RemoveValue, "remove-value")]
    #[test_case(ChangeAction::PopValue, "pop-value")]
    #[test_case(ChangeAction::Clear, "clear")]
    #[test_case(ChangeAction::CreateOption, "create-option")]
    #[test_case(ChangeAction::SetValue, "set-value")]
    fn test_change_action_names(action: ChangeAction, name: &str) {
        assert_eq2!(action.to_string(), name);
        assert_eq2!(ChangeAction::from_str(name).unwrap(), action);
        assert_eq2!(
            serde_json::to_string(&action).unwrap(),
            format!("\"{name}\"")
        );
    }
}
