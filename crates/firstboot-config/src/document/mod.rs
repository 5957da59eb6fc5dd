//! The configuration document schema.
//!
//! A [`Config`] is the parsed form of one provisioning document. It is made
//! of independent top-level sections, one per concern: [`Firstboot`] holds
//! metadata about the document itself and the chain it belongs to, the rest
//! declare resources to ensure on the machine.
//!
//! Every type here is `Default`-constructible, and `Config::default()` is
//! the empty document: the starting point of a provisioning chain and the
//! identity-like value for list concatenation.
//!
//! How two documents combine is declared right on the fields, via
//! [`Compose`](crate::compose::Compose) derive attributes: `retain` for
//! schema metadata, `replace` for chain control, and plain recursion
//! everywhere else, with `Vec` fields concatenating. See [`crate::compose`]
//! for the rules themselves.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::compose::Compose;

pub mod firstboot;
pub mod passwd;
pub mod storage;
pub mod unit;
pub mod verification;

pub use firstboot::Firstboot;
pub use passwd::Passwd;
pub use storage::Storage;
pub use unit::{Networkd, Systemd};

/// The root configuration document.
#[derive(Clone, Compose, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[compose(path_overrides(compose = "crate::compose"))]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Metadata about the document and the provisioning chain.
    pub firstboot: Firstboot,
    /// Disks, filesystems and file-tree entries to ensure.
    pub storage: Storage,
    /// Systemd units to install, enable or mask.
    pub systemd: Systemd,
    /// Networkd units to install.
    pub networkd: Networkd,
    /// Users and groups to ensure.
    pub passwd: Passwd,
}
