//! Client-side query pipeline over a user collection.
//!
//! Every function here is pure: inputs are borrowed and results are fresh
//! vectors. A list query is `filter → sort → paginate` ([`run_list_query`]);
//! [`search`] is a separate path and is never chained into it.

use std::cmp::Ordering;

use feruca::Collator;
use tracing::trace;

use crate::domain::{SortField, SortOrder, User, UserFilters, UserListResponse};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Keeps users whose name contains `filters.name` (case-insensitive) and whose
/// status equals `filters.status`. Other fields of `filters` are ignored.
pub fn filter(users: &[User], filters: &UserFilters) -> Vec<User> {
    let needle = filters
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase);

    users
        .iter()
        .filter(|user| {
            needle
                .as_deref()
                .map_or(true, |needle| user.name.to_lowercase().contains(needle))
        })
        .filter(|user| filters.status.map_or(true, |status| user.status == status))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against name or email. A blank query
/// returns the input unchanged.
pub fn search(users: &[User], query: &str) -> Vec<User> {
    if query.trim().is_empty() {
        return users.to_vec();
    }
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|user| {
            user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Text value of a sortable field, `None` for fields that are not text.
fn text_field(user: &User, field: SortField) -> Option<&str> {
    match field {
        SortField::Id => None,
        SortField::Name => Some(&user.name),
        SortField::Email => Some(&user.email),
        SortField::Status => Some(user.status.as_str()),
        SortField::Phone => Some(&user.phone),
        SortField::Website => Some(&user.website),
    }
}

/// Stable sort by `sort_by`. Text fields are collated with the Unicode
/// Collation Algorithm (CLDR root locale), so accents sort beside their base
/// letter and lower case precedes upper case on a tie. Any other pair of values
/// counts as equal and keeps its input order. `None` leaves the order alone.
pub fn sort(users: &[User], sort_by: Option<SortField>, sort_order: Option<SortOrder>) -> Vec<User> {
    let mut sorted = users.to_vec();
    let Some(field) = sort_by else {
        return sorted;
    };
    let descending = sort_order == Some(SortOrder::Desc);
    let mut collator = Collator::default();

    sorted.sort_by(|a, b| match (text_field(a, field), text_field(b, field)) {
        (Some(a), Some(b)) => {
            let ordering = collator.collate(a, b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        _ => Ordering::Equal,
    });
    sorted
}

/// Slices `[(page - 1) * limit, page * limit)` out of `users`. Zero or absent
/// `page`/`limit` fall back to 1 and 10. A page past the end is empty but still
/// reports the full `total`.
pub fn paginate(users: &[User], page: Option<usize>, limit: Option<usize>) -> UserListResponse {
    let page = page.filter(|page| *page > 0).unwrap_or(DEFAULT_PAGE);
    let limit = limit.filter(|limit| *limit > 0).unwrap_or(DEFAULT_LIMIT);
    let start = (page - 1).saturating_mul(limit);

    let slice = users.iter().skip(start).take(limit).cloned().collect();
    UserListResponse {
        users: slice,
        total: users.len(),
        page,
        limit,
    }
}

/// Name/status filtering followed by sorting.
pub fn apply_filters(users: &[User], filters: &UserFilters) -> Vec<User> {
    let filtered = filter(users, filters);
    sort(&filtered, filters.sort_by, filters.sort_order)
}

/// The full list query: filter, sort, then paginate.
pub fn run_list_query(users: &[User], filters: &UserFilters) -> UserListResponse {
    let filtered = apply_filters(users, filters);
    trace!(matched = filtered.len(), of = users.len(), "List query filtered");
    paginate(&filtered, filters.page, filters.limit)
}
