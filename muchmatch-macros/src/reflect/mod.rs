mod parsed;
mod reflected;

use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::parse2;

use parsed::Parsed;
use reflected::Reflected;

pub(crate) fn exec(input: TokenStream) -> TokenStream {
    let parsed = match parse2::<Parsed>(input) {
        Ok(parsed) => parsed,
        Err(err) => return err.to_compile_error(),
    };

    let reflected = match Reflected::new(parsed) {
        Ok(reflected) => reflected,
        Err(err) => return err.to_compile_error(),
    };

    #[allow(clippy::let_and_return)]
    let tokens = reflected.into_token_stream();

    #[cfg(feature = "debug")]
    println!("\nReflect:\n{tokens:#}\n");

    tokens
}
