use super::{RawAddress, RawCompany, RawGeo, RawUser};
use crate::domain::{Address, Company, Geo, User, UserStatus};

pub const UNKNOWN_NAME: &str = "Unknown Name";

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Maps a raw payload into a [`User`].
///
/// - `name` falls back to `username`, then to [`UNKNOWN_NAME`]; empty strings count as missing.
/// - `status` is derived from the id parity; the payload never sets it.
/// - `company`, `address` and `address.geo` exist only when the payload had that
///   object, and each string inside falls back to empty.
pub fn map_raw_user(raw: RawUser) -> User {
    let name = present(&raw.name)
        .or_else(|| present(&raw.username))
        .unwrap_or(UNKNOWN_NAME)
        .to_string();

    User {
        id: raw.id,
        name,
        email: or_empty(raw.email),
        status: UserStatus::from_id(raw.id),
        phone: or_empty(raw.phone),
        website: or_empty(raw.website),
        company: raw.company.map(map_company),
        address: raw.address.map(map_address),
    }
}

pub fn map_raw_users(raw: Vec<RawUser>) -> Vec<User> {
    raw.into_iter().map(map_raw_user).collect()
}

fn map_company(raw: RawCompany) -> Company {
    Company {
        name: or_empty(raw.name),
        catch_phrase: or_empty(raw.catch_phrase),
        bs: or_empty(raw.bs),
    }
}

fn map_address(raw: RawAddress) -> Address {
    Address {
        street: or_empty(raw.street),
        suite: or_empty(raw.suite),
        city: or_empty(raw.city),
        zipcode: or_empty(raw.zipcode),
        geo: raw.geo.map(map_geo),
    }
}

fn map_geo(raw: RawGeo) -> Geo {
    Geo {
        lat: or_empty(raw.lat),
        lng: or_empty(raw.lng),
    }
}
