mod generics_ex;

use proc_macro2::Ident;
use quote::format_ident;

pub(crate) use generics_ex::GenericsEx;

#[cfg(feature = "force-name")]
pub(crate) fn ident_muchmatch() -> Ident {
    format_ident!("muchmatch")
}

#[cfg(not(feature = "force-name"))]
pub(crate) fn ident_muchmatch() -> Ident {
    use proc_macro_crate::{crate_name, FoundCrate};

    match crate_name("muchmatch") {
        Ok(FoundCrate::Itself) => format_ident!("crate"),
        Ok(FoundCrate::Name(name)) => format_ident!("{name}"),
        Err(_) => format_ident!("muchmatch"),
    }
}
