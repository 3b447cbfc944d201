use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit};

/// A fieldless enum accepted as a variant tag type.
pub struct TagEnum {
    ident: Ident,
    variants: Vec<Ident>,
}

impl TagEnum {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &input.data else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`Discriminant` can only be derived for enums",
            ));
        };

        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "`Discriminant` cannot be derived for generic enums",
            ));
        }

        if data.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "a tag enum needs at least one variant",
            ));
        }

        let mut variants = Vec::with_capacity(data.variants.len());
        for (position, variant) in data.variants.iter().enumerate() {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    &variant.fields,
                    "tag enum variants cannot carry fields",
                ));
            }

            if let Some((_, expr)) = &variant.discriminant {
                check_position(expr, position)?;
            }
            variants.push(variant.ident.clone());
        }

        Ok(TagEnum {
            ident: input.ident.clone(),
            variants,
        })
    }
}

/// Explicit discriminants are allowed as long as they restate the position.
fn check_position(expr: &Expr, position: usize) -> syn::Result<()> {
    let value = match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<usize>()?,
        _ => {
            return Err(syn::Error::new_spanned(
                expr,
                "tag enum discriminants must be integer literals",
            ));
        }
    };

    if value != position {
        return Err(syn::Error::new_spanned(
            expr,
            format!("expected discriminant {position}, tag enums must count up from zero"),
        ));
    }
    Ok(())
}

pub fn expand(tags: &TagEnum) -> TokenStream {
    let TagEnum { ident, variants } = tags;
    let count = Literal::usize_unsuffixed(variants.len());
    let indices = (0..variants.len()).map(Literal::usize_unsuffixed);
    let indices2 = indices.clone();

    quote! {
        impl tvariant::Discriminant for #ident {
            const COUNT: usize = #count;

            fn from_index(index: usize) -> ::core::option::Option<Self> {
                match index {
                    #(#indices => ::core::option::Option::Some(Self::#variants),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn index(self) -> usize {
                match self {
                    #(Self::#variants => #indices2,)*
                }
            }
        }
    }
}
