//! Typed view of `docker inspect` output.
//!
//! Only the fields the inspector needs are modelled; everything else in the
//! JSON is ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::error::InspectError;

/// One element of the JSON array printed by `docker inspect <id>`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InspectRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub network_settings: NetworkSettings,
    #[serde(deserialize_with = "null_as_default")]
    pub state: State,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkSettings {
    #[serde(rename = "IPAddress", deserialize_with = "null_as_default")]
    pub ip_address: String,
    /// `"<port>/<proto>"` → host bindings. A `null` list means unpublished.
    #[serde(deserialize_with = "null_as_default")]
    pub ports: BTreeMap<String, Bindings>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct State {
    pub paused: bool,
    pub running: bool,
}

/// Host bindings of one port key, `null` decoded as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(pub Vec<HostBinding>);

impl<'de> Deserialize<'de> for Bindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        null_as_default(deserializer).map(Bindings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostBinding {
    pub host_ip: String,
    pub host_port: String,
}

/// Docker prints `null` rather than omitting empty sections.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode raw `docker inspect` stdout into its records.
///
/// Blank output and a bare `null` decode to no records, which the caller
/// reports as not found.
pub fn decode(raw: &str) -> Result<Vec<InspectRecord>, InspectError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Option<Vec<InspectRecord>> = serde_json::from_str(raw)?;
    Ok(records.unwrap_or_default())
}
