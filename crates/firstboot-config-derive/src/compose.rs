use darling::{
    FromDeriveInput, FromField, FromMeta,
    ast::Data,
    util::Ignored,
};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{DeriveInput, Generics, Index, Path, WherePredicate, parse_quote};

#[derive(FromMeta)]
struct PathOverrides {
    #[darling(default = "PathOverrides::default_compose")]
    compose: Path,
}
impl Default for PathOverrides {
    fn default() -> Self {
        Self {
            compose: Self::default_compose(),
        }
    }
}
impl PathOverrides {
    fn default_compose() -> Path {
        parse_quote!(::firstboot_config::compose)
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(compose))]
struct ComposeInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, ComposeField>,
    #[darling(default)]
    path_overrides: PathOverrides,
    #[darling(default)]
    bounds: Option<Vec<WherePredicate>>,
}

#[derive(FromField)]
#[darling(attributes(compose))]
struct ComposeField {
    ident: Option<Ident>,
    strategy: Option<Strategy>,
}

/// Per-field composition policy, as written in `#[compose(strategy = "...")]`.
///
/// A field without a strategy recurses into the field type's `Compose` impl.
#[derive(Clone, Copy, Debug, Eq, FromMeta, PartialEq)]
enum Strategy {
    /// Keep the base value untouched; the incoming side is never consulted.
    Retain,
    /// Take the incoming value wholesale, discarding the base value.
    Replace,
}

pub fn derive(input: DeriveInput) -> TokenStream {
    let ComposeInput {
        ident,
        mut generics,
        data,
        path_overrides: PathOverrides {
            compose: compose_mod,
        },
        bounds,
    } = match ComposeInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    let fields = match data {
        Data::Enum(_) => {
            return quote! {
                compile_error!("`#[derive(Compose)]` does not currently support enums");
            };
        }
        Data::Struct(fields) => fields,
    };

    let self_prefix = format_ident!("self");
    let incoming_prefix = format_ident!("incoming");
    let mut self_fields = TokenStream::new();
    let mut incoming_fields = TokenStream::new();
    let mut body = TokenStream::new();
    for (index, field) in fields.into_iter().enumerate() {
        let field_ident = field.ident.as_ref().ok_or(index);
        // Retained fields are bound but never read, so their bindings get an
        // underscore prefix to keep the expansion warning-free.
        let retained = field.strategy == Some(Strategy::Retain);
        let self_binding = prefix_ident(field_ident, &self_prefix, retained);
        let incoming_binding = prefix_ident(field_ident, &incoming_prefix, retained);
        let member = field_member(field_ident);
        self_fields.extend(quote! { #member: #self_binding, });
        incoming_fields.extend(quote! { #member: #incoming_binding, });
        body.extend(match field.strategy {
            Some(Strategy::Retain) => quote! {},
            Some(Strategy::Replace) => quote! {
                *#self_binding = ::std::clone::Clone::clone(#incoming_binding);
            },
            None => quote! {
                #compose_mod::Compose::compose(#self_binding, #incoming_binding);
            },
        });
    }

    if let Some(bounds) = bounds {
        let where_clause = generics.make_where_clause();
        where_clause.predicates.extend(bounds);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics #compose_mod::Compose for #ident #ty_generics #where_clause {
            fn compose(&mut self, incoming: &Self) {
                match (self, incoming) {
                    (
                        #ident { #self_fields },
                        #ident { #incoming_fields },
                    ) => { #body }
                }
            }
        }
    }
}

fn field_member(ident: Result<&Ident, usize>) -> TokenStream {
    match ident {
        Ok(ident) => quote! { #ident },
        Err(index) => {
            let index = Index::from(index);
            quote! { #index }
        }
    }
}

fn prefix_ident(ident: Result<&Ident, usize>, prefix: &Ident, retained: bool) -> Ident {
    let bound = match ident {
        Ok(ident) => format_ident!("{prefix}_{ident}"),
        Err(index) => format_ident!("{prefix}_{index}"),
    };
    if retained {
        format_ident!("_{bound}")
    } else {
        bound
    }
}
