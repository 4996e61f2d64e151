// SPDX-License-Identifier: MPL-2.0

use std::time::Duration;

use crate::record::Record;

/// The synthetic "nothing chosen" entry appended to every rendered level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultOption {
    /// Value reported while the default entry is selected.
    pub value: String,
    /// Label shown for the default entry.
    pub text: String,
}

impl Default for DefaultOption {
    fn default() -> Self {
        Self {
            value: String::from("0"),
            text: String::from("---please choose---"),
        }
    }
}

/// Configuration for a [`CascadeChain`](crate::CascadeChain).
///
/// Every recognized option is enumerated here with an explicit default; a
/// plain `..CascadeConfig::default()` update is the intended way to set the
/// handful a caller cares about.
#[derive(Debug, Clone)]
pub struct CascadeConfig {
    /// Static dataset, used when no `url` is configured.
    pub data: Vec<Record>,
    /// Remote endpoint returning a JSON array of records; takes precedence
    /// over `data` when set.
    pub url: Option<String>,
    /// Initial path, applied silently by `initialize`.
    pub selected_values: Vec<String>,
    /// Parent key of the root level.
    pub root_parent_id: String,
    /// Field holding a record's parent reference.
    pub parent_field: String,
    /// Field holding a record's display text.
    pub text_field: String,
    /// Field holding a record's value.
    pub value_field: String,
    /// Sentinel entry appended to every level; `None` disables it.
    pub default_option: Option<DefaultOption>,
    /// Hide a widget whose level has no matching records.
    pub empty_select_hidden: bool,
    /// Disable a widget whose level has no matching records.
    pub empty_select_disabled: bool,
    /// Upper bound on a single remote fetch.
    pub fetch_timeout: Duration,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            url: None,
            selected_values: Vec::new(),
            root_parent_id: String::from("0"),
            parent_field: String::from("ParentID"),
            text_field: String::from("Text"),
            value_field: String::from("Value"),
            default_option: Some(DefaultOption::default()),
            empty_select_hidden: false,
            empty_select_disabled: true,
            fetch_timeout: Duration::from_millis(1000),
        }
    }
}
