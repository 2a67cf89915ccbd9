//! Shared helper functions for SQLite repositories.

use crate::db::{Pagination, TodoFilter};

/// Default ordering: newest first, id as a tiebreaker for stable pages.
pub const ORDER_CLAUSE: &str = "ORDER BY created_at DESC, id DESC";

/// Translate a filter into a WHERE clause and its positional bind values.
///
/// Returns an empty clause when the filter has no predicates. The completion
/// flag is inlined as a literal; everything user-supplied is bound.
pub fn build_where_clause(filter: &TodoFilter) -> (String, Vec<String>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(completed) = filter.completed {
        conditions.push(format!("completed = {}", i32::from(completed)));
    }

    if let Some(priority) = filter.priority {
        conditions.push("priority = ?".to_string());
        bind_values.push(priority.to_string());
    }

    if let Some(tag) = filter.tag.as_deref().filter(|t| !t.is_empty()) {
        conditions
            .push("EXISTS (SELECT 1 FROM json_each(todo.tags) WHERE json_each.value = ?)".to_string());
        bind_values.push(tag.to_string());
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        conditions.push(
            "(title_folded LIKE ? ESCAPE '\\' OR description_folded LIKE ? ESCAPE '\\')"
                .to_string(),
        );
        let pattern = format!("%{}%", escape_like(&fold_case(search)));
        bind_values.push(pattern.clone());
        bind_values.push(pattern);
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Build LIMIT/OFFSET clause from pagination parameters.
pub fn build_limit_offset_clause(page: &Pagination) -> String {
    format!("LIMIT {} OFFSET {}", page.limit(), page.offset())
}

/// Lowercase text for the `*_folded` search columns.
///
/// Applied to both stored text and search terms.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Escape LIKE wildcards so the search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
