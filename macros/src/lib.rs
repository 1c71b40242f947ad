mod model;
mod route;

use proc_macro::TokenStream;

/// Generates an `OpenAPI` documentation function for an admin route, named after
/// the original function with the suffix `_docs`.
///
/// The first line of the doc comment becomes the summary, the rest the description.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Generates input structs for a stored record: `CreateX` (all client-supplied
/// fields verbatim) and `UpdateX` (the same fields wrapped in [`Option`]).
///
/// Fields with `#[serde(skip_deserializing)]` or `#[serde(skip)]` are assigned by
/// the store and never appear in either input. Use `#[model(create)]` or
/// `#[model(update)]` to generate only one of them.
#[proc_macro_attribute]
pub fn model(args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(args, input)
}
