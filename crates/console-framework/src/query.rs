//! Query parameters owned by a list controller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PER_PAGE: u32 = 10;

/// Filter, sort and page parameters sent with a list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub page: u32,
    pub per_page: u32,
    /// Free-form keys such as `search`, `sort`, `role`.
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::with_per_page(DEFAULT_PER_PAGE)
    }
}

impl QueryParams {
    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            filters: BTreeMap::new(),
        }
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Query-string pairs. Empty filter values are not sent.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        pairs.extend(
            self.filters
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        pairs
    }

    /// Shallow-merges `patch`.
    ///
    /// `page` goes back to 1 when the patch touches any other field, unless
    /// the patch sets `page` itself.
    pub fn apply(&mut self, patch: QueryPatch) {
        let resets_page = patch.touches_non_page_fields();

        if let Some(per_page) = patch.per_page {
            self.per_page = per_page.max(1);
        }
        for (key, value) in patch.filters {
            match value {
                Some(value) => {
                    self.filters.insert(key, value);
                }
                None => {
                    self.filters.remove(&key);
                }
            }
        }

        match patch.page {
            Some(page) => self.page = page.max(1),
            None if resets_page => self.page = 1,
            None => {}
        }
    }
}

/// A partial update of [`QueryParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
    page: Option<u32>,
    per_page: Option<u32>,
    filters: BTreeMap<String, Option<String>>,
}

impl QueryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), Some(value.into()));
        self
    }

    pub fn search(self, term: impl Into<String>) -> Self {
        self.set("search", term)
    }

    /// Removes `key` from the filters.
    pub fn clear(mut self, key: impl Into<String>) -> Self {
        self.filters.insert(key.into(), None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none() && !self.touches_non_page_fields()
    }

    pub fn touches_non_page_fields(&self) -> bool {
        self.per_page.is_some() || !self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: u32) -> QueryParams {
        let mut params = QueryParams::default();
        params.page = page;
        params
    }

    #[test]
    fn search_resets_page() {
        let mut params = on_page(4);
        params.apply(QueryPatch::new().search("x"));
        assert_eq!(params.page, 1);
        assert_eq!(params.filter("search"), Some("x"));
    }

    #[test]
    fn search_resets_page_even_when_unchanged() {
        let mut params = on_page(1);
        params.apply(QueryPatch::new().search("x"));
        params.apply(QueryPatch::new().page(3));
        params.apply(QueryPatch::new().search("x"));
        assert_eq!(params.page, 1);
    }

    #[test]
    fn explicit_page_wins_over_reset() {
        let mut params = on_page(4);
        params.apply(QueryPatch::new().search("x").page(2));
        assert_eq!(params.page, 2);
    }

    #[test]
    fn page_only_patch_keeps_filters() {
        let mut params = QueryParams::default();
        params.apply(QueryPatch::new().set("role", "admin"));
        params.apply(QueryPatch::new().page(5));
        assert_eq!(params.page, 5);
        assert_eq!(params.filter("role"), Some("admin"));
    }

    #[test]
    fn clear_removes_filter_and_resets_page() {
        let mut params = QueryParams::default();
        params.apply(QueryPatch::new().set("role", "admin").page(3));
        params.apply(QueryPatch::new().clear("role"));
        assert_eq!(params.filter("role"), None);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn per_page_change_resets_page() {
        let mut params = on_page(3);
        params.apply(QueryPatch::new().per_page(25));
        assert_eq!((params.page, params.per_page), (1, 25));
    }

    #[test]
    fn pairs_skip_empty_values() {
        let mut params = QueryParams::default();
        params.apply(QueryPatch::new().search("").set("sort", "name"));
        assert_eq!(
            params.to_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "10".to_string()),
                ("sort".to_string(), "name".to_string()),
            ]
        );
    }
}
