use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, quote_spanned, ToTokens, TokenStreamExt as _};
use syn::{
    ext::IdentExt as _,
    parse::{Error, ParseStream, Result},
    spanned::Spanned as _,
    Attribute, Ident, ItemFn, Path, Token,
};

macro_rules! try_quote {
    ($e:expr) => {
        match $e {
            Ok(parsed) => parsed,
            Err(err) => return err.to_compile_error(),
        }
    };
}

pub(crate) fn test(args: TokenStream, item: TokenStream) -> TokenStream {
    if args.is_empty() {
        return Error::new(
            Span::call_site(),
            "the name of the test case is required: #[test(TestCaseName)]",
        )
        .to_compile_error();
    }
    let test_case_name = try_quote!(syn::parse2::<Ident>(args));
    let mut item = try_quote!(syn::parse2::<ItemFn>(item));
    try_quote!(validate_signature(&item));

    if !item.sig.inputs.is_empty() {
        return Error::new_spanned(
            &item.sig.inputs,
            "test functions cannot take arguments; use #[test_f] to receive a fixture",
        )
        .to_compile_error();
    }

    let params = try_quote!(Params::from_attrs(&mut item.attrs));
    add_termination_bound(&mut item);

    Generated {
        item: &item,
        params: &params,
        test_case_name: &test_case_name,
        fixture: None,
    }
    .to_token_stream()
}

pub(crate) fn test_f(args: TokenStream, item: TokenStream) -> TokenStream {
    if args.is_empty() {
        return Error::new(
            Span::call_site(),
            "the fixture type is required: #[test_f(FixtureName)]",
        )
        .to_compile_error();
    }
    let fixture = try_quote!(syn::parse2::<Path>(args));
    let test_case_name = match fixture.segments.last() {
        Some(segment) if segment.arguments.is_empty() => segment.ident.clone(),
        _ => {
            return Error::new_spanned(&fixture, "the fixture must be a plain type name")
                .to_compile_error()
        }
    };

    let mut item = try_quote!(syn::parse2::<ItemFn>(item));
    try_quote!(validate_signature(&item));

    if item.sig.inputs.len() != 1 {
        return Error::new_spanned(
            &item.sig.inputs,
            "test functions with a fixture take exactly one argument of type `&mut Fixture`",
        )
        .to_compile_error();
    }

    let params = try_quote!(Params::from_attrs(&mut item.attrs));
    add_termination_bound(&mut item);

    Generated {
        item: &item,
        params: &params,
        test_case_name: &test_case_name,
        fixture: Some(&fixture),
    }
    .to_token_stream()
}

fn validate_signature(item: &ItemFn) -> Result<()> {
    if !item.sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &item.sig.generics,
            "test functions cannot take generic parameters",
        ));
    }
    if let Some(asyncness) = &item.sig.asyncness {
        return Err(Error::new_spanned(
            asyncness,
            "test functions cannot be async",
        ));
    }
    Ok(())
}

// append bounds to where clause.
fn add_termination_bound(item: &mut ItemFn) {
    if let syn::ReturnType::Type(_, ref ty) = item.sig.output {
        let where_clause = item.sig.generics.make_where_clause();
        where_clause
            .predicates
            .push(syn::parse_quote!(#ty: __trial::Termination));
    }
}

struct Params {
    crate_path: Path,
}

impl Params {
    fn from_attrs(attrs: &mut Vec<Attribute>) -> Result<Self> {
        let mut crate_path = None;

        let mut parse_attr = |input: ParseStream<'_>| -> Result<()> {
            match input.call(Ident::parse_any)? {
                id if id == "crate" => {
                    let _: Token![=] = input.parse()?;
                    let path = input.call(Path::parse_mod_style)?;
                    crate_path.replace(path);
                    Ok(())
                }
                id => Err(Error::new_spanned(id, "unknown parameter name")),
            }
        };

        let mut errors = Errors::default();
        attrs.retain(|attr| {
            if !attr.path.is_ident("trial") {
                return true;
            }
            errors.append_if_error(attr.parse_args_with(&mut parse_attr));
            false
        });
        errors.into_result()?;

        Ok(Self {
            crate_path: crate_path.unwrap_or_else(|| syn::parse_quote!(::trial)),
        })
    }
}

#[derive(Default)]
struct Errors(Option<Error>);

impl Errors {
    fn append_if_error(&mut self, res: Result<()>) {
        match (self.0.as_mut(), res) {
            (Some(errors), Err(error)) => errors.combine(error),
            (None, Err(error)) => self.0 = Some(error),
            (_, Ok(())) => (),
        }
    }

    fn into_result(self) -> Result<()> {
        match self.0 {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

struct Generated<'a> {
    params: &'a Params,
    item: &'a ItemFn,
    test_case_name: &'a Ident,
    fixture: Option<&'a Path>,
}

impl ToTokens for Generated<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let crate_path = &self.params.crate_path;
        let item = &*self.item;
        let ident = &self.item.sig.ident;
        let location = quote_spanned!(self.item.sig.span() => __trial::location!());

        let test_case_name = self.test_case_name.unraw().to_string();
        let name = ident.unraw().to_string();

        let (fixture_ty, body) = match self.fixture {
            Some(fixture) => (
                quote!(#fixture),
                quote! {
                    fn __trial_test_body(fixture: &mut #fixture) -> __trial::Result<(), __trial::Error> {
                        __trial::Termination::into_result(#ident(fixture))
                    }
                },
            ),
            None => (
                quote!(()),
                quote! {
                    fn __trial_test_body(_: &mut ()) -> __trial::Result<(), __trial::Error> {
                        __trial::Termination::into_result(#ident())
                    }
                },
            ),
        };

        let registration_id = format_ident!("__trial_test_{}_{}", test_case_name, name);
        let static_id = format_ident!("__TRIAL_TEST_{}_{}", test_case_name, name);

        tokens.append_all(Some(quote! {
            #[allow(non_upper_case_globals)]
            const #registration_id: #crate_path::_test_reexports::TestRegistration = {
                #[allow(unused_imports)]
                use #crate_path::_test_reexports as __trial;

                #item

                #body

                __trial::TestRegistration {
                    test_case_name: #test_case_name,
                    name: #name,
                    location: #location,
                    fixture: __trial::FixtureDesc::of::<#fixture_ty>(),
                    factory: &__trial::FixtureFactory::<#fixture_ty>::new(__trial_test_body)
                }
            };
        }));

        tokens.append_all(Some(quote! {
            #crate_path::__test_registration! {
                #[allow(non_upper_case_globals)]
                static #static_id: #crate_path::_test_reexports::TestRegistration = #registration_id;
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use syn::{parse::Parser as _, Item};

    fn parse_items(input: ParseStream) -> Result<Vec<Item>> {
        let mut items = vec![];
        while !input.is_empty() {
            items.push(input.parse()?);
        }
        Ok(items)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> TokenStream {
        let content = std::fs::read_to_string(path).unwrap();
        let items = parse_items.parse_str(&content).unwrap();
        quote!(#(#items)*)
    }

    fn test_expanded(name: &str, args: &str) {
        let args: TokenStream = args.parse().unwrap();
        let item = read_file(format!("tests/expand/{}.in.rs", name));
        let expected = read_file(format!("tests/expand/{}.out.rs", name));
        let output = test(args, item);
        assert_eq!(expected.to_string(), output.to_string());
    }

    fn test_f_expanded(name: &str, args: &str) {
        let args: TokenStream = args.parse().unwrap();
        let item = read_file(format!("tests/expand/{}.in.rs", name));
        let expected = read_file(format!("tests/expand/{}.out.rs", name));
        let output = test_f(args, item);
        assert_eq!(expected.to_string(), output.to_string());
    }

    #[test]
    fn test_simple() {
        test_expanded("01-simple", "MyTest");
    }

    #[test]
    fn test_return_result() {
        test_expanded("02-return-result", "MyTest");
    }

    #[test]
    fn test_crate_path() {
        test_expanded("03-crate-path", "MyTest");
    }

    #[test]
    fn test_fixture() {
        test_f_expanded("04-fixture", "fixtures::Counter");
    }

    #[test]
    fn missing_test_case_name() {
        let item = quote!(
            fn foo() {}
        );
        let output = test(TokenStream::new(), item).to_string();
        assert!(output.contains("compile_error"));
        assert!(output.contains("the name of the test case is required"));
    }

    #[test]
    fn rejects_arguments() {
        let item = quote!(
            fn foo(x: i32) {}
        );
        let output = test(quote!(MyTest), item).to_string();
        assert!(output.contains("test functions cannot take arguments"));
    }

    #[test]
    fn rejects_async() {
        let item = quote!(
            async fn foo() {}
        );
        let output = test(quote!(MyTest), item).to_string();
        assert!(output.contains("test functions cannot be async"));
    }

    #[test]
    fn fixture_takes_one_argument() {
        let item = quote!(
            fn foo() {}
        );
        let output = test_f(quote!(Counter), item).to_string();
        assert!(output.contains("take exactly one argument"));
    }
}
