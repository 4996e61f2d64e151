// SPDX-License-Identifier: MPL-2.0

//! The cascade controller state machine.
//!
//! [`CascadeChain`] owns the ordered level widgets and drives propagation: a
//! value change at level `i` re-renders level `i + 1` from the children of
//! the new value, which resets level `i + 1` to its default, which in turn
//! re-renders level `i + 2`, and so on to the end of the chain. Downstream
//! re-renders are always silent relative to the triggering event, so one
//! external change fires the selection hook at most once, attributed to the
//! level where it originated.
//!
//! The widgets are the source of truth for the current path; the controller
//! never keeps a second copy of the selected values. Cascades run to
//! completion inside a single `&mut self` call, so two changes on the same
//! chain can never interleave mid-flight.

use crate::cache::ChildCache;
use crate::config::CascadeConfig;
use crate::present;
use crate::select::SelectWidget;
use crate::source::{CascadeSource, DataSource, SourceError};

/// Hook invoked once per originating change, with the level index and the
/// widget at that level.
pub type SelectedHook<W> = Box<dyn FnMut(usize, &W) + Send>;

/// Controller for one chain of dependent select widgets.
///
/// The chain depth is fixed at construction. Data flows in through the
/// source `S` (by default [`CascadeSource`], chosen from the config) and is
/// filtered and memoized per parent key by an instance-owned cache.
pub struct CascadeChain<W, S = CascadeSource> {
    levels: Vec<W>,
    config: CascadeConfig,
    cache: ChildCache,
    source: S,
    on_selected: Option<SelectedHook<W>>,
}

impl<W: SelectWidget> CascadeChain<W, CascadeSource> {
    /// Creates a controller backed by the config's own source: the remote
    /// endpoint when `url` is set, the static `data` otherwise.
    pub fn new(levels: Vec<W>, config: CascadeConfig) -> Result<Self, SourceError> {
        let source = CascadeSource::from_config(&config)?;
        Ok(Self::with_source(levels, config, source))
    }
}

impl<W: SelectWidget, S: DataSource> CascadeChain<W, S> {
    /// Creates a controller over a custom data source.
    pub fn with_source(levels: Vec<W>, config: CascadeConfig, source: S) -> Self {
        let cache = ChildCache::new(config.parent_field.clone());
        Self {
            levels,
            config,
            cache,
            source,
            on_selected: None,
        }
    }

    /// Registers the selection hook.
    ///
    /// The hook fires once per external change (a [`level_changed`] event
    /// or an explicitly assigned `set_values` level) and never during
    /// [`initialize`] or downstream cascades.
    ///
    /// [`level_changed`]: Self::level_changed
    /// [`initialize`]: Self::initialize
    pub fn on_selected(mut self, hook: impl FnMut(usize, &W) + Send + 'static) -> Self {
        self.on_selected = Some(Box::new(hook));
        self
    }

    /// Number of levels in the chain.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The widget at `level`, if the chain is that deep.
    pub fn level(&self, level: usize) -> Option<&W> {
        self.levels.get(level)
    }

    /// Mutable access to the widget at `level`.
    ///
    /// Embedders update the widget here when the user interacts with it,
    /// then report the interaction via [`level_changed`](Self::level_changed).
    pub fn level_mut(&mut self, level: usize) -> Option<&mut W> {
        self.levels.get_mut(level)
    }

    /// Renders the root level and silently applies the configured initial
    /// path.
    ///
    /// Call once before using the chain. Never fires the selection hook.
    pub async fn initialize(&mut self) {
        if self.levels.is_empty() {
            return;
        }

        let root = self.config.root_parent_id.clone();
        let records = self.cache.children(&self.source, Some(&root)).await;
        present::render(&mut self.levels[0], &records, &self.config);

        let initial = self.config.selected_values.clone();
        self.set_values(&initial, false).await;
    }

    /// Entry point for an externally observed change at `level`: the user
    /// picked an option, the embedder updated the widget, and the chain now
    /// rebuilds everything below it. Fires the hook once, for `level`.
    pub async fn level_changed(&mut self, level: usize) {
        if level >= self.levels.len() {
            return;
        }
        self.cascade_from(level, false).await;
    }

    /// Sets the whole path in one left-to-right pass.
    ///
    /// Level `i` receives `values[i]`; levels beyond the end of `values`
    /// fall back to the default option (or to no selection when the default
    /// is disabled). Each assignment re-runs the cascade below its level,
    /// so a later assignment overrides the default the earlier cascade just
    /// selected; the pass cannot be reordered or parallelized. With
    /// `fire`, the hook fires for each explicitly assigned level; the
    /// fallback levels stay silent.
    pub async fn set_values<V: AsRef<str>>(&mut self, values: &[V], fire: bool) {
        for level in 0..self.levels.len() {
            match values.get(level) {
                Some(value) => self.levels[level].set_value(value.as_ref()),
                None => {
                    let fallback = self
                        .config
                        .default_option
                        .as_ref()
                        .map(|d| d.value.clone())
                        .unwrap_or_default();
                    self.levels[level].set_value(&fallback);
                }
            }

            let suppress = !fire || level >= values.len();
            self.cascade_from(level, suppress).await;
        }
    }

    /// The current path, read straight from the widgets.
    ///
    /// A level with no selection reports an empty string.
    pub fn values(&self) -> Vec<String> {
        self.levels
            .iter()
            .map(|widget| widget.value().unwrap_or_default())
            .collect()
    }

    /// Joined labels of the current path.
    ///
    /// Levels whose value equals `empty_value` (conventionally the default
    /// option's value, `"0"`) and levels with no selection are skipped, so
    /// the result reads as a breadcrumb of the actual choices.
    pub fn descript(&self, separator: &str, empty_value: &str) -> String {
        let mut labels = Vec::new();
        for widget in &self.levels {
            let (Some(value), Some(text)) = (widget.value(), widget.selected_text()) else {
                continue;
            };
            if value != empty_value {
                labels.push(text);
            }
        }
        labels.join(separator)
    }

    /// Re-renders every level below `origin` from the value chain, then
    /// fires the hook for `origin` unless suppressed.
    async fn cascade_from(&mut self, origin: usize, suppress: bool) {
        let mut level = origin;
        while level + 1 < self.levels.len() {
            let parent = self.levels[level].value();
            let records = self.cache.children(&self.source, parent.as_deref()).await;
            present::render(&mut self.levels[level + 1], &records, &self.config);
            level += 1;
        }

        if !suppress {
            if let Some(hook) = self.on_selected.as_mut() {
                hook(origin, &self.levels[origin]);
            }
        }
    }
}
