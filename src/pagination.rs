//! Pagination types for Sonar API responses.

use serde::{Deserialize, Deserializer, Serialize};

/// Paging descriptor returned alongside every search result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Current page number (1-indexed).
    #[serde(default)]
    pub page_index: u32,
    /// Number of items per page.
    #[serde(default)]
    pub page_size: u32,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total: u64,
}

impl Paging {
    /// Number of pages needed to hold `total` items.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    /// Whether pages after this one hold more items.
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.page_index) * u64::from(self.page_size) < self.total
    }
}

/// A page of results from the Sonar API.
///
/// Search endpoints name their item list `components`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Where this page sits in the full result set.
    #[serde(default)]
    pub paging: Paging,
    /// The items on this page.
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub components: Vec<T>,
}

/// `null` and a missing list both mean no items.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<T> Page<T> {
    /// Whether pages after this one hold more items.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.paging.has_more()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            paging: self.paging,
            components: self.components.into_iter().map(f).collect(),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.components.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}
