//! Derive macros for [`firstboot-config`](https://docs.rs/firstboot-config).

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod compose;

/// Derives `Compose` for a struct, composing it field by field.
///
/// Composition folds a document fetched later in a provisioning chain (the
/// *incoming* side) into the document assembled so far (the *base* side).
/// Every field is classified by an optional `#[compose(strategy = "...")]`
/// attribute:
///
/// | Strategy | Effect |
/// | -------- | ------ |
/// | *(none)* | recurse via the field type's `Compose` impl |
/// | `retain` | keep the base value; the incoming value is never consulted |
/// | `replace` | take the incoming value wholesale, discarding the base value |
///
/// `retain` and `replace` treat the field as one atomic unit, nested
/// structure included. Fields without a strategy delegate to their type:
/// structs derived with this macro compose field by field, `Vec`s
/// concatenate, and optional atomic leaves overlay (a set incoming value
/// wins).
///
/// # Example
///
/// ```
/// use firstboot_config::compose::{Compose, compose};
///
/// #[derive(Clone, Compose, Debug, PartialEq)]
/// struct Resolv {
///     #[compose(strategy = "retain")]
///     domain: Option<String>,
///     nameservers: Vec<String>,
/// }
///
/// let merged = compose(
///     &Resolv {
///         domain: Some("example.com".to_owned()),
///         nameservers: vec!["10.0.0.1".to_owned()],
///     },
///     &Resolv {
///         domain: None,
///         nameservers: vec!["10.0.0.2".to_owned()],
///     },
/// );
/// assert_eq!(merged.domain.as_deref(), Some("example.com"));
/// assert_eq!(merged.nameservers, ["10.0.0.1", "10.0.0.2"]);
/// ```
///
/// # Container options
///
/// - `#[compose(bounds = "T: Compose")]` adds extra where-predicates to the
///   generated impl, for generic types whose bounds cannot be inferred.
/// - `#[compose(path_overrides(compose = "..."))]` overrides the path to the
///   `compose` module, for use inside the defining crate and its tests.
#[proc_macro_derive(Compose, attributes(compose))]
pub fn derive_compose(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    compose::derive(input).into()
}
