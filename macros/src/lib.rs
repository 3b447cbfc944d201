use proc_macro::TokenStream;

mod discriminant;

/// Implements `tvariant::Discriminant` for a fieldless enum whose variants
/// count up from zero.
///
/// The expansion names the trait as `tvariant::Discriminant`, so the
/// dependency must not be renamed in `Cargo.toml`.
#[proc_macro_derive(Discriminant)]
pub fn derive_discriminant(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match discriminant::TagEnum::from_input(&input) {
        Ok(tags) => discriminant::expand(&tags).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
