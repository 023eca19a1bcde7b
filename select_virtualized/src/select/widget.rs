// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`SelectVirtualized`] owns every piece of state and wires the pieces together.
//!
//! | Event                        | Row index | Selection      | Next frame |
//! | :--------------------------- | :-------- | :------------- | :--------- |
//! | options, props, formatter    | rebuilt   |                | yes        |
//! | external value               |           | overridden     | yes        |
//! | user change, command         |           | maybe updated  | yes        |
//! | scroll, resize               |           |                | if moved   |
//!
//! A failed rebuild leaves the previous options, props, and row index in place.

use crate::{ActionMeta, ChangeOutcome, CommandOutcome, GroupHeaderFormatter, GroupKey,
            ListSource, OnChangeFn, Px, RenderedFrame, RenderingAdapter, RowIndex,
            SelectCommand, SelectError, SelectOption, SelectProps, Selection,
            SelectionSynchronizer, SyncState, ViewportState, scroll_offset_to_reveal};

/// Picks the group key of an option. Defaults to [`SelectOption::group_key`].
pub type GroupKeyFn<T> = Box<dyn Fn(&T) -> Option<GroupKey>>;

pub struct SelectVirtualized<T> {
    options: Vec<T>,
    props: SelectProps,
    maybe_group_key_of: Option<GroupKeyFn<T>>,
    formatter: GroupHeaderFormatter,
    row_index: RowIndex,
    synchronizer: SelectionSynchronizer<T>,
    adapter: RenderingAdapter,
    maybe_on_change: Option<OnChangeFn<T>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for SelectVirtualized<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectVirtualized")
            .field("option_count", &self.options.len())
            .field("props", &self.props)
            .field("row_count", &self.row_index.len())
            .field("formatter", &self.formatter)
            .field("synchronizer", &self.synchronizer)
            .field("adapter", &self.adapter)
            .finish_non_exhaustive()
    }
}

pub struct SelectVirtualizedBuilder<T> {
    options: Vec<T>,
    props: SelectProps,
    viewport: ViewportState,
    maybe_default_value: Option<Selection<T>>,
    maybe_value: Option<Selection<T>>,
    maybe_group_key_of: Option<GroupKeyFn<T>>,
    formatter: GroupHeaderFormatter,
    maybe_on_change: Option<OnChangeFn<T>>,
}

impl<T> std::fmt::Debug for SelectVirtualizedBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectVirtualizedBuilder")
            .field("option_count", &self.options.len())
            .field("props", &self.props)
            .field("viewport", &self.viewport)
            .field("has_custom_group_key_of", &self.maybe_group_key_of.is_some())
            .field("has_on_change", &self.maybe_on_change.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: SelectOption + Clone> SelectVirtualizedBuilder<T> {
    #[must_use]
    pub fn props(mut self, props: SelectProps) -> Self {
        self.props = props;
        self
    }

    #[must_use]
    pub fn viewport(mut self, viewport: ViewportState) -> Self {
        self.viewport = viewport;
        self
    }

    /// Initial selection when no [`Self::value`] is given.
    #[must_use]
    pub fn default_value(mut self, default_value: Selection<T>) -> Self {
        self.maybe_default_value = Some(default_value);
        self
    }

    #[must_use]
    pub fn value(mut self, value: Selection<T>) -> Self {
        self.maybe_value = Some(value);
        self
    }

    #[must_use]
    pub fn group_key_of(
        mut self,
        group_key_of: impl Fn(&T) -> Option<GroupKey> + 'static,
    ) -> Self {
        self.maybe_group_key_of = Some(Box::new(group_key_of));
        self
    }

    #[must_use]
    pub fn group_header_formatter(mut self, formatter: GroupHeaderFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn on_change(
        mut self,
        on_change: impl FnMut(Option<&Selection<T>>, ActionMeta) -> miette::Result<()>
        + 'static,
    ) -> Self {
        self.maybe_on_change = Some(Box::new(on_change));
        self
    }

    /// # Errors
    ///
    /// Returns an error if the props are invalid or an option has no key.
    pub fn build(self) -> Result<SelectVirtualized<T>, SelectError> {
        let row_index = build_row_index(
            &self.options,
            &self.props,
            self.maybe_group_key_of.as_ref(),
            &self.formatter,
        )?;
        Ok(SelectVirtualized {
            options: self.options,
            props: self.props,
            maybe_group_key_of: self.maybe_group_key_of,
            formatter: self.formatter,
            row_index,
            synchronizer: SelectionSynchronizer::new(
                self.maybe_default_value,
                self.maybe_value,
            ),
            adapter: RenderingAdapter::new(self.viewport),
            maybe_on_change: self.maybe_on_change,
        })
    }
}

fn build_row_index<T: SelectOption>(
    options: &[T],
    props: &SelectProps,
    maybe_group_key_of: Option<&GroupKeyFn<T>>,
    formatter: &GroupHeaderFormatter,
) -> Result<RowIndex, SelectError> {
    let layout = props.row_layout(formatter.is_custom())?;
    match maybe_group_key_of {
        Some(group_key_of) => RowIndex::build(options, &layout, |it| group_key_of(it)),
        None => RowIndex::build(options, &layout, T::group_key),
    }
}

impl<T: SelectOption + Clone> SelectVirtualized<T> {
    pub fn builder(options: Vec<T>) -> SelectVirtualizedBuilder<T> {
        SelectVirtualizedBuilder {
            options,
            props: SelectProps::default(),
            viewport: ViewportState::default(),
            maybe_default_value: None,
            maybe_value: None,
            maybe_group_key_of: None,
            formatter: GroupHeaderFormatter::default(),
            maybe_on_change: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[T] { &self.options }

    #[must_use]
    pub fn props(&self) -> &SelectProps { &self.props }

    #[must_use]
    pub fn row_index(&self) -> &RowIndex { &self.row_index }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection<T>> { self.synchronizer.selection() }

    #[must_use]
    pub fn sync_state(&self) -> SyncState { self.synchronizer.state() }

    #[must_use]
    pub fn viewport(&self) -> ViewportState { self.adapter.viewport() }

    #[must_use]
    pub fn row_source(&self) -> ListSource<'_, T> {
        ListSource {
            options: &self.options,
            row_index: &self.row_index,
            formatter: &self.formatter,
            selection: self.synchronizer.selection(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if an option has no key. The previous options stay.
    pub fn set_options(&mut self, options: Vec<T>) -> Result<(), SelectError> {
        self.row_index = build_row_index(
            &options,
            &self.props,
            self.maybe_group_key_of.as_ref(),
            &self.formatter,
        )?;
        self.options = options;
        self.adapter.mark_dirty();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the props are invalid. The previous props stay.
    pub fn set_props(&mut self, props: SelectProps) -> Result<(), SelectError> {
        self.row_index = build_row_index(
            &self.options,
            &props,
            self.maybe_group_key_of.as_ref(),
            &self.formatter,
        )?;
        self.props = props;
        self.adapter.mark_dirty();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the options can't be laid out with the new formatter. The
    /// previous formatter stays.
    pub fn set_group_header_formatter(
        &mut self,
        formatter: GroupHeaderFormatter,
    ) -> Result<(), SelectError> {
        self.row_index = build_row_index(
            &self.options,
            &self.props,
            self.maybe_group_key_of.as_ref(),
            &formatter,
        )?;
        self.formatter = formatter;
        self.adapter.mark_dirty();
        Ok(())
    }

    /// The caller supplied a (possibly empty) value. It overrides the selection.
    pub fn set_value(&mut self, maybe_value: Option<Selection<T>>) {
        self.synchronizer.set_external_value(maybe_value);
        self.adapter.mark_dirty();
    }

    /// The host control reports a change made by the user.
    ///
    /// # Errors
    ///
    /// Returns the change callback's error. The selection is left as it was.
    pub fn on_change(
        &mut self,
        maybe_value: Option<Selection<T>>,
        meta: ActionMeta,
    ) -> miette::Result<ChangeOutcome> {
        let outcome = match self.maybe_on_change.as_mut() {
            Some(on_change) => self.synchronizer.on_change(maybe_value, meta, on_change)?,
            None => self
                .synchronizer
                .on_change(maybe_value, meta, &mut |_, _| Ok(()))?,
        };
        if outcome == ChangeOutcome::Forwarded {
            self.adapter.mark_dirty();
        }
        Ok(outcome)
    }

    pub fn apply_command(&mut self, command: SelectCommand<T>) -> CommandOutcome {
        let outcome = self.synchronizer.apply_command(command);
        if outcome == CommandOutcome::Applied {
            self.adapter.mark_dirty();
        }
        outcome
    }

    pub fn on_scroll(&mut self, scroll_offset: Px) { self.adapter.on_scroll(scroll_offset); }

    pub fn on_resize(&mut self, viewport_height: Px) {
        self.adapter.on_resize(viewport_height);
    }

    /// Scroll just enough to show the row of the option at `option_index`, eg: to
    /// follow keyboard focus in the host.
    pub fn reveal_option(&mut self, option_index: usize) {
        if let Some(row) = self.row_index.row_of_option(option_index) {
            let scroll_offset =
                scroll_offset_to_reveal(&self.row_index, self.adapter.viewport(), row);
            self.adapter.on_scroll(scroll_offset);
        }
    }

    /// `None` when nothing changed since the last frame.
    pub fn on_animation_frame(&mut self) -> Option<RenderedFrame> {
        let source = ListSource {
            options: &self.options,
            row_index: &self.row_index,
            formatter: &self.formatter,
            selection: self.synchronizer.selection(),
        };
        self.adapter
            .on_animation_frame(&self.row_index, &source, self.props.overscan)
    }

    /// Renders now, whether anything changed or not.
    pub fn render(&mut self) -> RenderedFrame {
        let source = ListSource {
            options: &self.options,
            row_index: &self.row_index,
            formatter: &self.formatter,
            selection: self.synchronizer.selection(),
        };
        self.adapter
            .force_render(&self.row_index, &source, self.props.overscan)
    }

    /// New options and a new viewport arriving together. The row index is rebuilt
    /// before the window is computed against it.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has no key. Nothing changes in that case, not even
    /// the viewport.
    pub fn update(
        &mut self,
        options: Vec<T>,
        viewport: ViewportState,
    ) -> Result<Option<RenderedFrame>, SelectError> {
        self.set_options(options)?;
        self.on_scroll(viewport.scroll_offset);
        self.on_resize(viewport.viewport_height);
        Ok(self.on_animation_frame())
    }
}
