// SPDX-License-Identifier: MPL-2.0

//! Projection of a record set into a select widget.

use crate::config::CascadeConfig;
use crate::record::Record;
use crate::select::SelectWidget;

/// Renders `records`, plus the configured default sentinel, into `widget`.
///
/// The widget is cleared first, so a render always resets the selection:
/// the default option, when configured, goes last and wins it until a later
/// assignment overrides it. Records missing the value or text field render
/// as empty strings. The visibility and enablement policies apply only when
/// their config flags are set, keyed on whether `records` was empty.
pub fn render<W: SelectWidget>(widget: &mut W, records: &[Record], config: &CascadeConfig) {
    widget.clear_options();

    let has_records = !records.is_empty();
    for record in records {
        let value = record.field_str(&config.value_field).unwrap_or_default();
        let text = record.field_str(&config.text_field).unwrap_or_default();
        widget.push_option(value, text);
    }

    if let Some(default) = &config.default_option {
        widget.push_option(default.value.clone(), default.text.clone());
        widget.set_value(&default.value);
    }

    if config.empty_select_hidden {
        widget.set_hidden(!has_records);
    }
    if config.empty_select_disabled {
        widget.set_disabled(!has_records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::MemorySelect;
    use serde_json::json;

    fn rec(value: &str, text: &str) -> Record {
        Record::try_from(json!({ "Value": value, "ParentID": "0", "Text": text })).unwrap()
    }

    #[test]
    fn appends_default_last_and_selects_it() {
        let mut widget = MemorySelect::new();
        let config = CascadeConfig::default();

        render(&mut widget, &[rec("1", "Asia"), rec("2", "Europe")], &config);

        assert_eq!(widget.options().len(), 3);
        assert_eq!(widget.options()[0], (String::from("1"), String::from("Asia")));
        assert_eq!(
            widget.options()[2],
            (String::from("0"), String::from("---please choose---"))
        );
        assert_eq!(widget.value().as_deref(), Some("0"));
        assert!(!widget.is_disabled());
    }

    #[test]
    fn empty_level_renders_default_only_and_disables() {
        let mut widget = MemorySelect::new();
        let config = CascadeConfig::default();

        render(&mut widget, &[], &config);

        assert_eq!(widget.options().len(), 1);
        assert_eq!(widget.value().as_deref(), Some("0"));
        assert!(widget.is_disabled());
    }

    #[test]
    fn hidden_policy_tracks_emptiness() {
        let mut widget = MemorySelect::new();
        let config = CascadeConfig {
            empty_select_hidden: true,
            ..CascadeConfig::default()
        };

        render(&mut widget, &[], &config);
        assert!(widget.is_hidden());

        render(&mut widget, &[rec("1", "Asia")], &config);
        assert!(!widget.is_hidden());
    }

    #[test]
    fn rerender_resets_a_previous_selection() {
        let mut widget = MemorySelect::new();
        let config = CascadeConfig::default();
        let records = [rec("1", "Asia")];

        render(&mut widget, &records, &config);
        widget.set_value("1");
        render(&mut widget, &records, &config);

        assert_eq!(widget.value().as_deref(), Some("0"));
    }

    #[test]
    fn without_default_nothing_is_selected() {
        let mut widget = MemorySelect::new();
        let config = CascadeConfig {
            default_option: None,
            ..CascadeConfig::default()
        };

        render(&mut widget, &[rec("1", "Asia")], &config);

        assert_eq!(widget.options().len(), 1);
        assert_eq!(widget.value(), None);
    }
}
