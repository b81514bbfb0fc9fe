use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A user exactly as the remote source sent it. Nothing here is trusted; see
/// [`map_raw_user`](super::map_raw_user) for how each field is defaulted.
///
/// Only `id` is strict. Text leaves accept any JSON scalar (numbers and
/// booleans keep their text form) and read anything else as missing. Nested
/// groups are kept only when the payload holds an object for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_group")]
    pub company: Option<RawCompany>,
    #[serde(default, deserialize_with = "lenient_group")]
    pub address: Option<RawAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompany {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub catch_phrase: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bs: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAddress {
    #[serde(default, deserialize_with = "lenient_text")]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub suite: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub zipcode: Option<String>,
    #[serde(default, deserialize_with = "lenient_group")]
    pub geo: Option<RawGeo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGeo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub lat: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub lng: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_group<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        object @ Value::Object(_) => serde_json::from_value(object).map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}
