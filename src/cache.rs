// SPDX-License-Identifier: MPL-2.0

//! Per-parent-key memoization of filtered child sets.

use std::collections::HashMap;

use crate::filter;
use crate::record::Record;
use crate::source::DataSource;

/// Memoizes the filtered children of every visited parent key.
///
/// Each controller instance owns its cache; nothing is shared across
/// controllers. Entries are immutable once populated, and only a successful
/// fetch populates one: a failed fetch leaves its key uncached so the next
/// visit retries instead of pinning the failure.
#[derive(Debug, Default)]
pub struct ChildCache {
    parent_field: String,
    entries: HashMap<String, Vec<Record>>,
}

impl ChildCache {
    /// Creates an empty cache filtering on `parent_field`.
    pub fn new(parent_field: impl Into<String>) -> Self {
        Self {
            parent_field: parent_field.into(),
            entries: HashMap::new(),
        }
    }

    /// Number of populated parent keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any parent key has been populated yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the children of `parent_key`, fetching and filtering on the
    /// first visit.
    ///
    /// `None` (an upstream level with no selection) yields an empty set
    /// without touching the cache or the source. Fetch failures are logged
    /// and also yield an empty set, leaving the key uncached.
    pub async fn children<S: DataSource>(
        &mut self,
        source: &S,
        parent_key: Option<&str>,
    ) -> Vec<Record> {
        let Some(key) = parent_key else {
            return Vec::new();
        };

        if let Some(hit) = self.entries.get(key) {
            return hit.clone();
        }

        tracing::debug!(parent_key = key, "cache miss, fetching children");
        match source.fetch(key).await {
            Ok(records) => {
                let children = filter::children_of(&records, &self.parent_field, key);
                self.entries.insert(key.to_string(), children.clone());
                children
            }
            Err(err) => {
                tracing::warn!(parent_key = key, error = %err, "fetch failed, treating level as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rec(value: &str, parent: &str) -> Record {
        Record::try_from(json!({ "Value": value, "ParentID": parent, "Text": value })).unwrap()
    }

    struct CountingSource {
        records: Vec<Record>,
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new(records: Vec<Record>) -> Self {
            Self {
                records,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DataSource for CountingSource {
        async fn fetch(&self, _parent_key: &str) -> Result<Vec<Record>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.clone())
        }
    }

    /// Fails the first call, succeeds afterwards.
    struct FlakySource {
        records: Vec<Record>,
        calls: AtomicUsize,
    }

    impl DataSource for FlakySource {
        async fn fetch(&self, _parent_key: &str) -> Result<Vec<Record>, SourceError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SourceError::ConnectionFailed(String::from(
                    "connection reset",
                )))
            } else {
                Ok(self.records.clone())
            }
        }
    }

    #[tokio::test]
    async fn second_lookup_hits_the_cache() {
        let source = CountingSource::new(vec![rec("1", "0"), rec("2", "1")]);
        let mut cache = ChildCache::new("ParentID");

        let first = cache.children(&source, Some("0")).await;
        let second = cache.children(&source, Some("0")).await;

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stores_only_the_filtered_subset() {
        let source = CountingSource::new(vec![rec("1", "0"), rec("2", "1"), rec("3", "1")]);
        let mut cache = ChildCache::new("ParentID");

        let children = cache.children(&source, Some("1")).await;
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].field_str("Value").as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn missing_parent_key_skips_cache_and_source() {
        let source = CountingSource::new(vec![rec("1", "0")]);
        let mut cache = ChildCache::new("ParentID");

        assert!(cache.children(&source, None).await.is_empty());
        assert!(cache.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let source = FlakySource {
            records: vec![rec("1", "0")],
            calls: AtomicUsize::new(0),
        };
        let mut cache = ChildCache::new("ParentID");

        assert!(cache.children(&source, Some("0")).await.is_empty());
        assert!(cache.is_empty());

        // The failure did not poison the key: the retry fetches again.
        let retry = cache.children(&source, Some("0")).await;
        assert_eq!(retry.len(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
