use std::collections::HashSet;

use tracing::{debug, warn};

use super::Observable;
use crate::domain::{User, UserFilters};

/// Sole owner of the user collection and its status fields.
///
/// Every mutation updates the current value and notifies subscribers before it
/// returns. No mutation can fail; callers are expected to hand in validated data.
pub struct UserStore {
    users: Observable<Vec<User>>,
    loading: Observable<bool>,
    error: Observable<Option<String>>,
    filters: Observable<UserFilters>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: Observable::new(Vec::new()),
            loading: Observable::new(false),
            error: Observable::new(None),
            filters: Observable::new(UserFilters::default()),
        }
    }

    // --- Observables ---

    pub fn users(&self) -> &Observable<Vec<User>> {
        &self.users
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.loading
    }

    pub fn error(&self) -> &Observable<Option<String>> {
        &self.error
    }

    pub fn filters(&self) -> &Observable<UserFilters> {
        &self.filters
    }

    // --- Snapshots ---

    pub fn current_users(&self) -> Vec<User> {
        self.users.get()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn current_error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn current_filters(&self) -> UserFilters {
        self.filters.get()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.users.with(|users| users.iter().any(|user| user.id == id))
    }

    // --- Collection mutations ---

    /// Replaces the whole collection. Later duplicates of an id are dropped.
    pub fn set_users(&self, users: Vec<User>) {
        let mut seen = HashSet::with_capacity(users.len());
        let before = users.len();
        let users: Vec<User> = users.into_iter().filter(|user| seen.insert(user.id)).collect();
        if users.len() != before {
            warn!(dropped = before - users.len(), "Dropped users with duplicate ids");
        }
        debug!(user_count = users.len(), "Setting users");
        self.users.set(users);
    }

    /// Appends a user. An existing record with the same id is replaced in place.
    pub fn add_user(&self, user: User) {
        debug!(user_id = user.id, "Adding user");
        self.users.update(move |users| {
            match users.iter_mut().find(|existing| existing.id == user.id) {
                Some(existing) => {
                    warn!(user_id = user.id, "User id already present, replacing");
                    *existing = user;
                }
                None => users.push(user),
            }
        });
    }

    /// Swaps in the record with a matching id; leaves the collection as is otherwise.
    pub fn replace_user(&self, user: User) {
        debug!(user_id = user.id, "Replacing user");
        self.users.update(move |users| {
            if let Some(existing) = users.iter_mut().find(|existing| existing.id == user.id) {
                *existing = user;
            }
        });
    }

    pub fn remove_user(&self, id: u64) {
        debug!(user_id = id, "Removing user");
        self.users.update(|users| users.retain(|user| user.id != id));
    }

    // --- Status mutations ---

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.error.set(error);
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    pub fn set_filters(&self, filters: UserFilters) {
        self.filters.set(filters);
    }

    pub fn update_filters(&self, f: impl FnOnce(&mut UserFilters)) {
        self.filters.update(f);
    }

    pub fn clear_filters(&self) {
        self.filters.set(UserFilters::default());
    }

    /// Back to the initial state: no users, not loading, no error, no filters.
    pub fn reset(&self) {
        self.users.set(Vec::new());
        self.loading.set(false);
        self.clear_error();
        self.clear_filters();
    }
}
