//! Composition of configuration documents fetched in stages.
//!
//! Provisioning happens in stages: a *base* document has already been folded
//! together when an *incoming* document is fetched, and the two must be
//! combined into a single effective document. The rules are deliberately
//! non-uniform, because the sections of a document mean different things:
//!
//! - schema metadata belongs to the first document of the chain and is
//!   *retained* from the base,
//! - chain control (which document to fetch next) is *replaced* wholesale by
//!   the incoming side,
//! - declarative resource lists *concatenate*, base elements first,
//! - any other structured section recurses field by field by the same rules.
//!
//! The categories are declared per field with the [`Compose`] derive macro,
//! so the whole policy is readable off the schema definition instead of
//! being scattered over hand-written assignments.

pub use firstboot_config_derive::Compose;

/// A value that can absorb a later-fetched counterpart of itself.
///
/// `self` is the base side (the chain folded so far) and turns into the
/// effective value; `incoming` is the newly fetched side and is only read.
/// Implementations must never fail: composition is total over every pair of
/// well-typed values.
///
/// Most users will want to implement this for document types using
/// [the associated derive macro](`derive@Compose`).
///
/// # Example
///
/// ```
/// use firstboot_config::compose::Compose;
///
/// #[derive(Compose, Debug, PartialEq)]
/// struct Section {
///     entries: Vec<u8>,
///     limit: Option<u8>,
/// }
///
/// let mut effective = Section {
///     entries: vec![1],
///     limit: Some(10),
/// };
/// effective.compose(&Section {
///     entries: vec![2],
///     limit: None,
/// });
/// assert_eq!(effective, Section {
///     entries: vec![1, 2], // lists concatenate, base first
///     limit: Some(10),     // unset incoming leaves the base value alone
/// });
/// ```
pub trait Compose {
    /// Folds `incoming` into `self`, leaving `incoming` untouched.
    fn compose(&mut self, incoming: &Self);
}

impl<T: Compose> Compose for Box<T> {
    fn compose(&mut self, incoming: &Self) {
        T::compose(self, incoming)
    }
}

/// Resource lists concatenate: base elements first, incoming elements after
/// them, in their original order. Nothing is deduplicated; two stages that
/// declare the same disk produce two entries, and catching that is the
/// validator's job, not the composer's.
impl<T: Clone> Compose for Vec<T> {
    fn compose(&mut self, incoming: &Self) {
        self.extend(incoming.iter().cloned());
    }
}

/// A marker trait for leaf values that are composed as one indivisible unit
/// rather than field by field.
pub trait Atomic: Clone {}
impl Atomic for u8 {}
impl Atomic for u16 {}
impl Atomic for u32 {}
impl Atomic for u64 {}
impl Atomic for u128 {}
impl Atomic for usize {}
impl Atomic for i8 {}
impl Atomic for i16 {}
impl Atomic for i32 {}
impl Atomic for i64 {}
impl Atomic for i128 {}
impl Atomic for isize {}
impl Atomic for bool {}
impl Atomic for String {}
impl<'a> Atomic for &'a str {}

/// Optional atomic leaves overlay: a set incoming value wins, an unset one
/// leaves the base value in place.
///
/// This rule only applies to leaves reached *through* recursion. Sections
/// marked `retain` or `replace` in the schema are atomic as a whole and
/// never consult this impl.
impl<T: Atomic> Compose for Option<T> {
    fn compose(&mut self, incoming: &Self) {
        if incoming.is_some() {
            self.clone_from(incoming);
        }
    }
}

/// Pure, by-value form of [`Compose::compose`].
///
/// Returns a freshly built document that shares no mutable state with either
/// input: mutating the result afterwards is never observable through `base`
/// or `incoming`.
pub fn compose<T: Compose + Clone>(base: &T, incoming: &T) -> T {
    let mut effective = base.clone();
    effective.compose(incoming);
    effective
}

/// Folds a whole provisioning chain into one effective document,
/// left to right: `compose(compose(compose(c0, c1), c2), c3)`.
///
/// The fold order is part of the contract. Composition is *not* assumed to
/// be associative; retained and replaced sections make the grouping
/// significant, so callers must hand the documents over in fetch order. An
/// empty chain yields the empty document.
pub fn compose_chain<T: Compose + Default>(documents: impl IntoIterator<Item = T>) -> T {
    documents
        .into_iter()
        .reduce(|mut base, incoming| {
            base.compose(&incoming);
            base
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Compose, compose, compose_chain};

    #[test]
    fn compose_derived_struct() {
        #[derive(Clone, Compose, Debug, Eq, PartialEq)]
        #[compose(path_overrides(compose = "super"))]
        struct Composable {
            one: Option<u8>,
            two: Option<bool>,
        }

        assert_eq!(
            compose(
                &Composable {
                    one: Some(0),
                    two: None,
                },
                &Composable {
                    one: Some(1),
                    two: None,
                }
            ),
            Composable {
                one: Some(1),
                two: None,
            }
        );
        assert_eq!(
            compose(
                &Composable {
                    one: Some(0),
                    two: Some(true),
                },
                &Composable {
                    one: None,
                    two: None,
                }
            ),
            Composable {
                one: Some(0),
                two: Some(true),
            }
        );
    }

    #[test]
    fn compose_derived_struct_with_strategies() {
        #[derive(Clone, Compose, Debug, Eq, PartialEq)]
        #[compose(path_overrides(compose = "super"))]
        struct Sections {
            #[compose(strategy = "retain")]
            version: Option<u8>,
            #[compose(strategy = "replace")]
            pointer: Option<String>,
            entries: Vec<u8>,
        }

        // A set incoming version loses, and an unset incoming pointer still
        // erases the base pointer: both strategies act on the whole field.
        assert_eq!(
            compose(
                &Sections {
                    version: None,
                    pointer: Some("base".to_owned()),
                    entries: vec![1, 2],
                },
                &Sections {
                    version: Some(2),
                    pointer: None,
                    entries: vec![2, 3],
                }
            ),
            Sections {
                version: None,
                pointer: None,
                entries: vec![1, 2, 2, 3],
            }
        );
        assert_eq!(
            compose(
                &Sections {
                    version: Some(2),
                    pointer: None,
                    entries: vec![],
                },
                &Sections {
                    version: None,
                    pointer: Some("incoming".to_owned()),
                    entries: vec![7],
                }
            ),
            Sections {
                version: Some(2),
                pointer: Some("incoming".to_owned()),
                entries: vec![7],
            }
        );
    }

    #[test]
    fn compose_nested_derived_struct() {
        #[derive(Clone, Compose, Debug, Eq, PartialEq)]
        #[compose(path_overrides(compose = "super"))]
        struct Parent {
            one: Option<u8>,
            child: Child,
        }
        #[derive(Clone, Compose, Debug, Eq, PartialEq)]
        #[compose(path_overrides(compose = "super"))]
        struct Child {
            two: Vec<u8>,
            three: Option<bool>,
        }

        assert_eq!(
            compose(
                &Parent {
                    one: Some(0),
                    child: Child {
                        two: vec![1],
                        three: Some(true),
                    }
                },
                &Parent {
                    one: None,
                    child: Child {
                        two: vec![2],
                        three: Some(false),
                    }
                },
            ),
            Parent {
                one: Some(0),
                child: Child {
                    two: vec![1, 2],
                    three: Some(false),
                },
            }
        );
    }

    #[test]
    fn compose_derived_struct_with_generics() {
        #[derive(Compose, Debug, Eq, PartialEq)]
        #[compose(bounds = "B: Compose", path_overrides(compose = "super"))]
        struct Composable<'a, B, const C: u8> {
            one: Option<&'a str>,
            two: B,
            three: ParametrizedUnit<C>,
        }
        #[derive(Debug, Eq, PartialEq)]
        struct ParametrizedUnit<const N: u8>;
        impl<const N: u8> Compose for ParametrizedUnit<N> {
            fn compose(&mut self, _incoming: &Self) {}
        }

        let mut composable = Composable {
            one: Some("abc"),
            two: Some(23),
            three: ParametrizedUnit::<23>,
        };
        composable.compose(&Composable {
            one: None,
            two: None,
            three: ParametrizedUnit,
        });
        assert_eq!(
            composable,
            Composable {
                one: Some("abc"),
                two: Some(23),
                three: ParametrizedUnit,
            }
        );
    }

    #[test]
    fn compose_derived_tuple_struct() {
        #[derive(Clone, Compose, Debug, Eq, PartialEq)]
        #[compose(path_overrides(compose = "super"))]
        struct Composable(Option<u8>, Vec<u16>);

        assert_eq!(
            compose(&Composable(Some(1), vec![2]), &Composable(None, vec![3])),
            Composable(Some(1), vec![2, 3])
        );
    }

    #[rstest]
    #[case::both_empty(vec![], vec![], vec![])]
    #[case::empty_incoming(vec![1, 2], vec![], vec![1, 2])]
    #[case::empty_base(vec![], vec![3], vec![3])]
    #[case::duplicates_survive(vec![1, 2], vec![2, 3], vec![1, 2, 2, 3])]
    fn vec_composition_concatenates(
        #[case] base: Vec<u8>,
        #[case] incoming: Vec<u8>,
        #[case] expected: Vec<u8>,
    ) {
        assert_eq!(compose(&base, &incoming), expected);
    }

    #[test]
    fn compose_does_not_mutate_its_inputs() {
        let base = vec!["base".to_owned()];
        let incoming = vec!["incoming".to_owned()];
        let mut effective = compose(&base, &incoming);
        effective[0].push_str("-mutated");
        effective.push("appended".to_owned());
        assert_eq!(base, ["base"]);
        assert_eq!(incoming, ["incoming"]);
    }

    #[test]
    fn compose_chain_folds_left_to_right() {
        #[derive(Clone, Compose, Debug, Default, Eq, PartialEq)]
        #[compose(path_overrides(compose = "super"))]
        struct Stage {
            #[compose(strategy = "retain")]
            version: Option<u8>,
            #[compose(strategy = "replace")]
            pointer: Option<String>,
            entries: Vec<u8>,
        }

        let chain = [
            Stage {
                version: Some(1),
                pointer: Some("next".to_owned()),
                entries: vec![1],
            },
            Stage {
                version: Some(9),
                pointer: Some("later".to_owned()),
                entries: vec![2],
            },
            Stage {
                version: None,
                pointer: None,
                entries: vec![3],
            },
        ];

        let folded = compose_chain(chain.clone());
        assert_eq!(
            folded,
            Stage {
                version: Some(1),
                pointer: None,
                entries: vec![1, 2, 3],
            }
        );
        // The left fold is the contract, so folding manually must agree.
        let [c0, c1, c2] = chain;
        assert_eq!(folded, compose(&compose(&c0, &c1), &c2));
    }

    #[test]
    fn compose_chain_of_nothing_is_empty() {
        assert_eq!(compose_chain(Vec::<Vec<u8>>::new()), Vec::<u8>::new());
    }
}
