use std::fmt;

use serde::{Deserialize, Serialize};

/// Account status. Every materialized [`User`] carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// Status assigned to records coming from the remote source: even ids are
    /// active, odd ids inactive.
    pub fn from_id(id: u64) -> Self {
        if id % 2 == 0 {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Option<Geo>,
}

/// A user record as held by the [`UserStore`](crate::store::UserStore).
///
/// `company` and `address` are either fully populated or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub phone: String,
    pub website: String,
    pub company: Option<Company>,
    pub address: Option<Address>,
}

/// Fields a caller submits when creating or editing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFormData {
    pub name: String,
    pub email: String,
    pub status: UserStatus,
}

impl UserFormData {
    pub fn new(name: impl Into<String>, email: impl Into<String>, status: UserStatus) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            status,
        }
    }
}

impl User {
    /// Builds a record from submitted form data. Optional fields start empty and
    /// the nested groups absent.
    pub fn from_form(id: u64, form: UserFormData) -> Self {
        Self {
            id,
            name: form.name,
            email: form.email,
            status: form.status,
            phone: String::new(),
            website: String::new(),
            company: None,
            address: None,
        }
    }
}
