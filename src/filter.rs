// SPDX-License-Identifier: MPL-2.0

//! Parent-key matching for cascade datasets.

use crate::record::Record;

/// Returns the records whose parent-reference field matches `parent_key`.
///
/// This is the single filtering rule for every level: normalized string
/// equality between the record's parent field and the key, with scalar
/// coercion on the record side so a numeric `ParentID` matches the string
/// key `"3"`. Records missing the parent field never match.
pub fn children_of(records: &[Record], parent_field: &str, parent_key: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| {
            record
                .field_str(parent_field)
                .is_some_and(|parent| parent == parent_key)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: serde_json::Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn matches_on_normalized_parent_field() {
        let records = vec![
            rec(json!({ "Value": "1", "ParentID": "0", "Text": "Asia" })),
            rec(json!({ "Value": "2", "ParentID": 0, "Text": "Europe" })),
            rec(json!({ "Value": "3", "ParentID": "1", "Text": "Japan" })),
        ];

        let children = children_of(&records, "ParentID", "0");
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].field_str("Text").as_deref(), Some("Asia"));
        assert_eq!(children[1].field_str("Text").as_deref(), Some("Europe"));
    }

    #[test]
    fn records_without_parent_field_never_match() {
        let records = vec![
            rec(json!({ "Value": "1", "Text": "orphan" })),
            rec(json!({ "Value": "2", "ParentID": null, "Text": "null parent" })),
        ];

        assert!(children_of(&records, "ParentID", "0").is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let records = vec![
            rec(json!({ "Value": "b", "ParentID": "0" })),
            rec(json!({ "Value": "a", "ParentID": "0" })),
        ];

        let children = children_of(&records, "ParentID", "0");
        assert_eq!(children[0].field_str("Value").as_deref(), Some("b"));
        assert_eq!(children[1].field_str("Value").as_deref(), Some("a"));
    }
}
