//! Blog List State
//!
//! The visible list is always derived from the full item set by applying
//! filter → search → sort, then a growing pagination window.

use std::cmp::Ordering;

use crate::models::BlogEntry;

/// Filter value that disables category/tag filtering
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first
    #[default]
    Date,
    /// Longest first
    ReadingTime,
    /// Alphabetical
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::ReadingTime, SortKey::Category];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::ReadingTime => "reading_time",
            SortKey::Category => "category",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Date => "Newest",
            SortKey::ReadingTime => "Longest read",
            SortKey::Category => "Category",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        SortKey::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub items: Vec<BlogEntry>,
    pub filtered_items: Vec<BlogEntry>,
    pub page: usize,
    pub per_page: usize,
    pub current_sort: SortKey,
    pub current_filter: String,
    pub current_search: String,
}

impl ListState {
    pub fn new(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            filtered_items: Vec::new(),
            page: 1,
            per_page: per_page.max(1),
            current_sort: SortKey::default(),
            current_filter: FILTER_ALL.to_string(),
            current_search: String::new(),
        }
    }

    /// Replace the full item set (after a fetch)
    pub fn set_items(&mut self, items: Vec<BlogEntry>) {
        self.items = items;
        self.recompute();
    }

    pub fn apply_filter(&mut self, filter: &str) {
        self.current_filter = filter.trim().to_string();
        self.recompute();
    }

    pub fn apply_search(&mut self, search: &str) {
        self.current_search = search.trim().to_string();
        self.recompute();
    }

    pub fn apply_sort(&mut self, sort: SortKey) {
        self.current_sort = sort;
        self.recompute();
    }

    fn recompute(&mut self) {
        let needle = self.current_search.to_lowercase();
        let mut filtered: Vec<BlogEntry> = self
            .items
            .iter()
            .filter(|entry| matches_filter(entry, &self.current_filter))
            .filter(|entry| matches_search(entry, &needle))
            .cloned()
            .collect();
        sort_entries(&mut filtered, self.current_sort);
        self.filtered_items = filtered;
        self.page = 1;
    }

    /// First `page * per_page` filtered entries
    pub fn visible(&self) -> &[BlogEntry] {
        let end = self.page.saturating_mul(self.per_page).min(self.filtered_items.len());
        &self.filtered_items[..end]
    }

    pub fn has_more(&self) -> bool {
        self.visible().len() < self.filtered_items.len()
    }

    /// Advance the window; no-op once everything is shown
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Distinct categories and tags of the loaded items, sorted
    pub fn filter_options(&self) -> Vec<String> {
        let mut options: Vec<String> = self
            .items
            .iter()
            .flat_map(|entry| std::iter::once(&entry.category).chain(entry.tags.iter()))
            .filter(|value| !value.is_empty())
            .cloned()
            .collect();
        options.sort_by(|a, b| compare_text(a, b));
        options.dedup();
        options
    }
}

pub fn matches_filter(entry: &BlogEntry, filter: &str) -> bool {
    filter.is_empty() || filter == FILTER_ALL || entry.category == filter || entry.has_tag(filter)
}

/// `needle` must already be lowercase
pub fn matches_search(entry: &BlogEntry, needle: &str) -> bool {
    needle.is_empty() || entry.title.to_lowercase().contains(needle)
}

/// Case-insensitive first, original text as the tie break
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

pub fn sort_entries(entries: &mut [BlogEntry], sort: SortKey) {
    match sort {
        // Undated entries sort last
        SortKey::Date => entries.sort_by(|a, b| b.published().cmp(&a.published())),
        SortKey::ReadingTime => {
            entries.sort_by(|a, b| b.reading_minutes().total_cmp(&a.reading_minutes()))
        }
        SortKey::Category => entries.sort_by(|a, b| compare_text(&a.category, &b.category)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(
        title: &str,
        category: &str,
        reading_time: &str,
        date: &str,
        tags: &[&str],
    ) -> BlogEntry {
        BlogEntry {
            title: title.to_string(),
            author: "Ann".to_string(),
            published_date: date.to_string(),
            reading_time: reading_time.to_string(),
            content: String::new(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
        }
    }

    fn titles(entries: &[BlogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    fn sample() -> Vec<BlogEntry> {
        vec![
            make_entry("Rust Ownership", "rust", "8", "2024-01-10", &["memory"]),
            make_entry("Async Basics", "rust", "12", "2024-03-01", &["async"]),
            make_entry("CSS Grid", "web", "5", "2023-11-20", &["layout"]),
            make_entry("Web Async Patterns", "web", "10", "2024-02-15", &["async"]),
            make_entry("Garden Notes", "Life", "3", "not a date", &[]),
        ]
    }

    #[test]
    fn test_filter_then_search_example() {
        let mut state = ListState::new(10);
        state.set_items(vec![
            make_entry("A", "x", "5", "2024-01-01", &[]),
            make_entry("B", "y", "10", "2024-01-02", &[]),
        ]);

        state.apply_filter("x");
        assert_eq!(titles(&state.filtered_items), vec!["A"]);

        state.apply_filter(FILTER_ALL);
        state.apply_search("b");
        assert_eq!(titles(&state.filtered_items), vec!["B"]);
    }

    #[test]
    fn test_filter_matches_category_or_tag() {
        let mut state = ListState::new(10);
        state.set_items(sample());

        state.apply_filter("async");
        assert_eq!(titles(&state.filtered_items), vec!["Async Basics", "Web Async Patterns"]);

        state.apply_filter("web");
        assert_eq!(titles(&state.filtered_items), vec!["Web Async Patterns", "CSS Grid"]);
    }

    #[test]
    fn test_order_of_changes_does_not_matter() {
        let mut one = ListState::new(10);
        one.set_items(sample());
        one.apply_sort(SortKey::ReadingTime);
        one.apply_search("ASYNC");
        one.apply_filter("async");

        let mut two = ListState::new(10);
        two.set_items(sample());
        two.apply_filter("async");
        two.apply_sort(SortKey::ReadingTime);
        two.apply_search("async");

        // Reference: filter, then search, then sort over the full set
        let mut expected: Vec<BlogEntry> = sample()
            .into_iter()
            .filter(|e| matches_filter(e, "async"))
            .filter(|e| matches_search(e, "async"))
            .collect();
        sort_entries(&mut expected, SortKey::ReadingTime);

        assert_eq!(one.filtered_items, expected);
        assert_eq!(two.filtered_items, expected);
        assert_eq!(titles(&expected), vec!["Async Basics", "Web Async Patterns"]);
    }

    #[test]
    fn test_sort_keys() {
        let mut state = ListState::new(10);
        state.set_items(sample());
        assert_eq!(
            titles(&state.filtered_items),
            vec!["Async Basics", "Web Async Patterns", "Rust Ownership", "CSS Grid", "Garden Notes"]
        );

        state.apply_sort(SortKey::ReadingTime);
        assert_eq!(state.filtered_items[0].title, "Async Basics");
        assert_eq!(state.filtered_items[4].title, "Garden Notes");

        state.apply_sort(SortKey::Category);
        let categories: Vec<&str> =
            state.filtered_items.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Life", "rust", "rust", "web", "web"]);
    }

    #[test]
    fn test_pagination_window_grows_and_resets() {
        let mut state = ListState::new(2);
        state.set_items(sample());
        assert_eq!(state.visible().len(), 2);
        assert!(state.has_more());

        assert!(state.load_more());
        assert_eq!(state.visible().len(), 4);
        assert!(state.load_more());
        assert_eq!(state.visible().len(), 5);
        assert!(!state.load_more());
        assert_eq!(state.page, 3);

        state.apply_sort(SortKey::Category);
        assert_eq!(state.page, 1);
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn test_empty_result_and_unknown_sort() {
        let mut state = ListState::new(3);
        state.set_items(sample());
        state.apply_search("kotlin");

        assert!(state.visible().is_empty());
        assert!(!state.has_more());
        assert_eq!(SortKey::parse("reading_time"), Some(SortKey::ReadingTime));
        assert_eq!(SortKey::parse("popularity"), None);
    }

    #[test]
    fn test_filter_options_are_distinct() {
        let mut state = ListState::new(3);
        state.set_items(sample());

        assert_eq!(
            state.filter_options(),
            vec!["async", "layout", "Life", "memory", "rust", "web"]
        );
    }
}
