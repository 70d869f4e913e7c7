use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let collection = extract_collection(input)?;
    let fields = named_fields(input)?;
    let id_field = extract_id_field(input, fields)?;
    require_field(input, fields, "created_at")?;
    require_field(input, fields, "updated_at")?;

    Ok(quote! {
        impl #impl_generics pricebook::Record for #name #ty_generics #where_clause {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }

            fn created_at(&self) -> i64 {
                self.created_at
            }

            fn updated_at(&self) -> i64 {
                self.updated_at
            }

            fn touch(&mut self, now: i64) {
                self.updated_at = ::std::cmp::max(now, self.updated_at);
            }
        }
    })
}

fn named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            return Ok(fields);
        }
    }
    Err(syn::Error::new_spanned(
        &input.ident,
        "Record derive: only structs with named fields are supported",
    ))
}

fn extract_collection(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut collection = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `collection = \"...\"`"))
            }
        })?;

        if let Some(c) = collection {
            return Ok(c);
        }
    }

    // Default: snake_case struct name + "s"
    let name = input.ident.to_string();
    Ok(format!("{}s", to_snake_case(&name)))
}

fn extract_id_field(input: &DeriveInput, fields: &syn::FieldsNamed) -> syn::Result<Ident> {
    for field in &fields.named {
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            let mut is_id = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    is_id = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `id`"))
                }
            })?;
            if is_id {
                if let Some(ident) = &field.ident {
                    return Ok(ident.clone());
                }
            }
        }
    }

    // Default: look for a field named "id"
    for field in &fields.named {
        if let Some(ident) = &field.ident {
            if ident == "id" {
                return Ok(ident.clone());
            }
        }
    }

    Err(syn::Error::new_spanned(
        &input.ident,
        "Record derive: no field marked with #[record(id)] and no field named `id`",
    ))
}

fn require_field(input: &DeriveInput, fields: &syn::FieldsNamed, wanted: &str) -> syn::Result<()> {
    let found = fields
        .named
        .iter()
        .any(|field| field.ident.as_ref().is_some_and(|ident| ident == wanted));
    if found {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.ident,
            format!("Record derive: missing `{}: i64` field", wanted),
        ))
    }
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
