//! Expansion of `#[derive(ErrorKind)]`.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    punctuated::Punctuated,
    Data,
    DeriveInput,
    Error,
    Expr,
    Fields,
    MetaNameValue,
    Result,
    Token,
};

/// The tags of an `#[error(...)]` attribute.
#[derive(Default)]
struct Tags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Tags {
    /// Collects the tags from every `error` attribute on the item.
    fn from_attrs(input: &DeriveInput) -> Result<Self> {
        let mut tags = Self::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            let pairs = attr.parse_args_with(
                Punctuated::<MetaNameValue, Token![,]>::parse_terminated,
            )?;
            for pair in pairs {
                let slot = if pair.path.is_ident("message") {
                    &mut tags.message
                } else if pair.path.is_ident("labels") {
                    &mut tags.labels
                } else if pair.path.is_ident("help") {
                    &mut tags.help
                } else {
                    let expected = "expected `message`, `labels` or `help`";
                    return Err(Error::new_spanned(&pair.path, expected));
                };
                *slot = Some(pair.value);
            }
        }
        Ok(tags)
    }
}

/// Binds the named fields of `self` to local variables, so the tag expressions can use them.
fn bind_fields(input: &DeriveInput) -> Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
    };

    let name = &input.ident;
    match &data.fields {
        Fields::Named(fields) => {
            let names = fields.named.iter().map(|field| &field.ident);
            Ok(quote! {
                #[allow(unused_variables)]
                let #name { #(#names),* } = self;
            })
        },
        Fields::Unnamed(_) => Err(Error::new_spanned(
            name,
            "`ErrorKind` cannot be derived for tuple structs",
        )),
        Fields::Unit => Ok(TokenStream2::new()),
    }
}

/// Generates the `ErrorKind` implementation for a struct.
pub fn expand(input: DeriveInput) -> Result<TokenStream2> {
    let tags = Tags::from_attrs(&input)?;
    let bindings = bind_fields(&input)?;

    let name = &input.ident;
    let Some(message) = tags.message else {
        return Err(Error::new_spanned(name, "missing `message` tag in `#[error(...)]`"));
    };
    let labels = match tags.labels {
        Some(labels) => quote! { #labels },
        None => quote! { Vec::<String>::new() },
    };
    let help = tags.help.map(|help| quote! { report.set_help(#help); });

    Ok(quote! {
        impl ErrorKind for #name {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bindings

                let start = spans.first().map_or(0, |span| span.start);
                let labels = #labels
                    .into_iter()
                    .zip(spans)
                    .map(|(text, span)| {
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(calx_error::EXPR);
                        let text = text.to_string();
                        if text.is_empty() {
                            label
                        } else {
                            label.with_message(text)
                        }
                    })
                    .collect::<Vec<_>>();

                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, start)
                    .with_message(#message)
                    .with_labels(labels);
                #help
                report.finish()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn unit_struct() {
        let input: DeriveInput = parse_quote! {
            #[error(message = "unexpected end of file", labels = ["add something here"])]
            struct UnexpectedEof;
        };
        let output = expand(input).unwrap().to_string();
        assert!(output.contains("impl ErrorKind for UnexpectedEof"));
        assert!(!output.contains("set_help"));
    }

    #[test]
    fn named_fields_are_bound() {
        let input: DeriveInput = parse_quote! {
            #[error(message = format!("unknown function `{}`", name), help = "check the spelling")]
            struct UnknownFunction {
                name: String,
            }
        };
        let output = expand(input).unwrap().to_string();
        assert!(output.contains("let UnknownFunction { name } = self"));
        assert!(output.contains("set_help"));
    }

    #[test]
    fn rejects_bad_input() {
        let tuple: DeriveInput = parse_quote! {
            #[error(message = "oops")]
            struct Tuple(u8);
        };
        assert!(expand(tuple).is_err());

        let missing: DeriveInput = parse_quote! {
            #[error(labels = ["here"])]
            struct Missing;
        };
        assert!(expand(missing).is_err());

        let unknown: DeriveInput = parse_quote! {
            #[error(message = "oops", note = "what")]
            struct Unknown;
        };
        assert!(expand(unknown).is_err());
    }
}
