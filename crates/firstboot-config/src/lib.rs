//! Types and composition rules for staged provisioning configurations.
//!
//! A machine is provisioned from a *chain* of configuration documents: the
//! first document may point at a follow-up document to fetch, that document
//! at another one, and so on. Each fetched stage is folded into the result of
//! the stages before it, producing one effective [`Config`] that the
//! execution engine applies in a single pass.
//!
//! This crate owns the document schema ([`document`]) and the folding rules
//! ([`compose`]). Fetching documents, decoding and validating them, and
//! applying the final result to the machine are the surrounding agent's
//! concern; everything here operates on in-memory values only.
//!
//! ```
//! use firstboot_config::{Config, compose::compose};
//!
//! let base = Config::default();
//! let incoming = Config::default();
//! assert_eq!(compose(&base, &incoming), Config::default());
//! ```

pub mod compose;
pub mod document;

pub use document::Config;
