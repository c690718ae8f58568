//! Procedural macros for trial.

#![recursion_limit = "256"]

extern crate proc_macro;

mod test;

use proc_macro::TokenStream;

/// Register a function as a test of the named test case.
#[proc_macro_attribute]
pub fn test(args: TokenStream, item: TokenStream) -> TokenStream {
    crate::test::test(args.into(), item.into()).into()
}

/// Register a function as a test running against a fixture.
#[proc_macro_attribute]
pub fn test_f(args: TokenStream, item: TokenStream) -> TokenStream {
    crate::test::test_f(args.into(), item.into()).into()
}
