//! The `systemd` and `networkd` sections: unit files to install.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::compose::Compose;

#[derive(Clone, Compose, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[compose(path_overrides(compose = "crate::compose"))]
#[serde(rename_all = "camelCase", default)]
pub struct Systemd {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
}

/// A systemd unit to install, enable or mask.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Unit {
    /// Unit file name, including its suffix, e.g. `etcd.service`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Mask the unit by linking it to `/dev/null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropins: Vec<Dropin>,
}

/// A drop-in fragment overriding parts of a [`Unit`].
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dropin {
    /// Drop-in file name, e.g. `10-override.conf`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

#[derive(Clone, Compose, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[compose(path_overrides(compose = "crate::compose"))]
#[serde(rename_all = "camelCase", default)]
pub struct Networkd {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<NetworkdUnit>,
}

/// A networkd unit file, e.g. `static.network`.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkdUnit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}
