//! Query types for filtering and paginating todos.
//!
//! A [`TodoFilter`] is a conjunction of optional predicates. Backends either
//! evaluate it directly with [`TodoFilter::matches`] or translate it into
//! their own query language.

use super::models::{Priority, Todo};
use super::validation::ValidationError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Filter predicates for listing todos. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Exact match on the completion flag.
    pub completed: Option<bool>,
    /// Exact match on priority.
    pub priority: Option<Priority>,
    /// The todo's tags must contain this tag.
    pub tag: Option<String>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl TodoFilter {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn tagged(tag: impl Into<String>) -> Self {
        Self::default().with_tag(tag)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Empty tags are treated as "no tag filter".
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into()).filter(|t| !t.is_empty());
        self
    }

    /// Empty search terms are treated as "no search".
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into()).filter(|s| !s.is_empty());
        self
    }

    /// Drop empty tag/search strings so they behave like absent parameters.
    pub fn normalized(self) -> Self {
        Self {
            tag: self.tag.filter(|t| !t.is_empty()),
            search: self.search.filter(|s| !s.is_empty()),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_none()
            && self.priority.is_none()
            && self.tag.is_none()
            && self.search.is_none()
    }

    /// Evaluate the filter against a todo.
    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(completed) = self.completed
            && todo.completed != completed
        {
            return false;
        }

        if let Some(priority) = self.priority
            && todo.priority != priority
        {
            return false;
        }

        if let Some(tag) = &self.tag
            && !todo.tags.iter().any(|t| t == tag)
        {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = todo.title.to_lowercase().contains(&needle);
            let in_description = todo
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }

        true
    }
}

/// Page selection: 1-indexed page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Build a pagination from optional parameters, applying defaults.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, ValidationError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(ValidationError::new("page", "must be at least 1"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::new(
                "limit",
                format!("must be between 1 and {}", MAX_LIMIT),
            ));
        }

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of matching items skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Number of pages needed to show `total` items.
    pub fn total_pages(&self, total: usize) -> u64 {
        (total as u64).div_ceil(u64::from(self.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn todo(title: &str, description: Option<&str>, tags: &[&str]) -> Todo {
        let now = Utc::now();
        Todo {
            id: "000000000001".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            completed: false,
            priority: Priority::Medium,
            due_date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = TodoFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&todo("anything", None, &[])));
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let filter = TodoFilter::default().with_search("MILK");
        assert!(filter.matches(&todo("Buy milk", None, &[])));
        assert!(filter.matches(&todo("Groceries", Some("oat Milk and eggs"), &[])));
        assert!(!filter.matches(&todo("Buy bread", Some("wholegrain"), &[])));
    }

    #[test]
    fn tag_filter_is_membership() {
        let filter = TodoFilter::tagged("urgent");
        assert!(filter.matches(&todo("a", None, &["work", "urgent"])));
        assert!(!filter.matches(&todo("b", None, &["work"])));
        assert!(!filter.matches(&todo("c", None, &["urgently"])));
    }

    #[test]
    fn predicates_are_combined_with_and() {
        let filter = TodoFilter::completed(false).with_priority(Priority::High);
        let mut t = todo("a", None, &[]);
        assert!(!filter.matches(&t));

        t.priority = Priority::High;
        assert!(filter.matches(&t));

        t.completed = true;
        assert!(!filter.matches(&t));
    }

    #[test]
    fn empty_strings_are_ignored() {
        let filter = TodoFilter::default().with_tag("").with_search("");
        assert!(filter.is_empty());

        let normalized = TodoFilter {
            tag: Some(String::new()),
            search: Some(String::new()),
            ..Default::default()
        }
        .normalized();
        assert!(normalized.is_empty());
    }

    #[test]
    fn pagination_defaults() {
        let page = Pagination::new(None, None).unwrap();
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn pagination_offset_is_page_minus_one_times_limit() {
        let page = Pagination::new(Some(3), Some(25)).unwrap();
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn pagination_rejects_out_of_range_values() {
        assert_eq!(Pagination::new(Some(0), None).unwrap_err().field, "page");
        assert_eq!(Pagination::new(None, Some(0)).unwrap_err().field, "limit");
        assert_eq!(Pagination::new(None, Some(101)).unwrap_err().field, "limit");
        assert!(Pagination::new(None, Some(100)).is_ok());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Pagination::new(None, Some(10)).unwrap();
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
    }
}
