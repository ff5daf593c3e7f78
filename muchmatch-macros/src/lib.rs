#![warn(
    unused,
    clippy::pedantic,
    future_incompatible,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![allow(clippy::module_name_repetitions)]

use proc_macro::TokenStream;

mod misc;
mod reflect;

/// Implements `muchmatch::Reflect` for a struct.
///
/// Public fields become visible record fields, all other fields become
/// hidden fields.
///
/// Container attributes (`#[reflect(...)]`):
/// - `display`: attach the `Display` output of the value
/// - `methods`: attach the `muchmatch::Invoke` implementation of the value
/// - `transparent`: reflect as the single field, renamed to the struct name
/// - `rename = "Name"`: use a different type name
///
/// Field attributes (`#[reflect(...)]`):
/// - `skip`: do not reflect the field
/// - `hidden`: reflect the field as hidden field, even if it is public
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    reflect::exec(input.into()).into()
}
