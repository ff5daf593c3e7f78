use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_quote, Error, LitStr, TypeParamBound};

use crate::misc::{ident_muchmatch, GenericsEx};

use super::parsed::Parsed;

/// Generated `Reflect` implementation.
pub(crate) struct Reflected {
    parsed: Parsed,
    name: LitStr,
}

impl Reflected {
    pub(crate) fn new(parsed: Parsed) -> Result<Self, Error> {
        let name = match &parsed.attribs.rename {
            Some(name) if name.value().is_empty() => {
                return Err(Error::new(name.span(), "rename requires a non-empty name"))
            }
            Some(name) => name.clone(),
            None => LitStr::new(&parsed.ident.to_string(), parsed.ident.span()),
        };

        Ok(Self { parsed, name })
    }

    fn body(&self) -> TokenStream {
        let muchmatch = ident_muchmatch();
        let name = &self.name;

        if let (true, Some(field)) = (self.parsed.attribs.transparent, self.parsed.fields.first()) {
            let member = &field.member;

            return quote! {
                #muchmatch::Reflect::reflect(&self.#member).retyped(#name)
            };
        }

        let fields = self.parsed.fields.iter().map(|field| {
            let member = &field.member;
            let field_name = &field.name;
            let hidden = field.hidden;

            quote! {
                #muchmatch::value::Field::new(
                    #field_name,
                    #muchmatch::Reflect::reflect(&self.#member),
                    #hidden,
                )
            }
        });

        quote! {
            #muchmatch::Value::Record(#muchmatch::value::Record::new(
                #name,
                ::std::vec![ #( #fields ),* ],
            ))
        }
    }
}

impl ToTokens for Reflected {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let muchmatch = ident_muchmatch();
        let ident = &self.parsed.ident;
        let name = &self.name;

        let bound: TypeParamBound = parse_quote!(#muchmatch::Reflect);
        let generics = self.parsed.generics.clone().add_type_bound(&bound);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let body = self.body();

        let display = self.parsed.attribs.display.then(|| {
            quote! {
                let value = value.with_display(::std::string::ToString::to_string(self));
            }
        });

        let methods = self.parsed.attribs.methods.then(|| {
            quote! {
                let value = value.with_methods(::std::sync::Arc::new(::std::clone::Clone::clone(self)));
            }
        });

        tokens.extend(quote! {
            impl #impl_generics #muchmatch::Reflect for #ident #ty_generics #where_clause {
                fn type_name() -> ::std::borrow::Cow<'static, str> {
                    ::std::borrow::Cow::Borrowed(#name)
                }

                #[allow(clippy::let_and_return)]
                fn reflect(&self) -> #muchmatch::Value {
                    let value = #body;
                    #display
                    #methods

                    value
                }
            }
        });
    }
}
