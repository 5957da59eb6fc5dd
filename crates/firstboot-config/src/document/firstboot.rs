//! The `firstboot` section: schema metadata and chain control.

use schemars::JsonSchema;
use semver::Version;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{compose::Compose, document::verification::Verification};

/// Metadata about the document itself and the chain it belongs to.
#[derive(Clone, Compose, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[compose(path_overrides(compose = "crate::compose"))]
#[serde(rename_all = "camelCase", default)]
pub struct Firstboot {
    /// Version of the config schema this document was written against.
    ///
    /// The version of the already-applied base always stands; a follow-up
    /// document cannot re-pin the schema mid-chain.
    #[compose(strategy = "retain")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    /// Follow-up documents to fetch and fold into the chain.
    ///
    /// Chain control belongs to the most recently fetched document: whatever
    /// an earlier stage requested is void once a later stage has been
    /// fetched, even when the later stage requests nothing at all.
    #[compose(strategy = "replace")]
    pub chain: ChainConfig,

    /// Timeouts for fetching referenced documents.
    pub timeouts: Timeouts,

    /// Transport security settings for fetching referenced documents.
    pub security: Security,
}

/// Pointers to further configuration documents.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainConfig {
    /// Documents to fold into the result, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub append: Vec<ConfigReference>,

    /// A document that supersedes the result assembled so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<ConfigReference>,
}

/// Where to fetch a referenced resource, and how to verify what arrives.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Url>,
    pub verification: Verification,
}

/// Timeouts applied when fetching referenced documents, in seconds.
///
/// Unset fields fall back to the agent's defaults. Across stages a set
/// incoming value wins over the base value.
#[derive(Clone, Compose, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[compose(path_overrides(compose = "crate::compose"))]
#[serde(rename_all = "camelCase", default)]
pub struct Timeouts {
    /// Time to wait for the first response headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_response_headers: Option<u32>,

    /// Time to wait for a whole fetch to finish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_total: Option<u32>,
}

/// Transport security settings for fetching referenced documents.
#[derive(Clone, Compose, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[compose(path_overrides(compose = "crate::compose"))]
#[serde(rename_all = "camelCase", default)]
pub struct Security {
    pub tls: Tls,
}

#[derive(Clone, Compose, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[compose(path_overrides(compose = "crate::compose"))]
#[serde(rename_all = "camelCase", default)]
pub struct Tls {
    /// Additional certificate authorities to trust, collected across stages.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificate_authorities: Vec<ConfigReference>,
}
