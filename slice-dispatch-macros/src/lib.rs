//! Procedural macros for slice-dispatch

use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Merge)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(merge), supports(struct_named))]
struct MergeOpts {
    ident: syn::Ident,
    vis: syn::Visibility,
    generics: syn::Generics,
    data: darling::ast::Data<(), MergeField>,

    /// Name of the generated patch type (defaults to `{Name}Patch`)
    #[darling(default)]
    patch: Option<syn::Ident>,

    /// Extra derives for the patch type, e.g. `derive(Debug, PartialEq)`
    #[darling(default)]
    derive: darling::util::PathList,
}

/// Field-level attributes
#[derive(Debug, FromField)]
#[darling(attributes(merge))]
struct MergeField {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    /// Leave the field out of the patch; it is always carried over
    #[darling(default)]
    skip: bool,
}

/// Derive macro for the Merge trait
///
/// Generates a patch struct with one `Option<T>` per field and a shallow
/// merge: `Some` overwrites the field, `None` keeps it. The state type must
/// implement `Clone`.
///
/// Generated items:
/// - `{Name}Patch` struct (rename with `#[merge(patch = "OtherName")]`)
/// - a builder method per field, `patch.field(value)`
/// - `is_empty()` on the patch
/// - `impl Merge for {Name}`
///
/// # Example
/// ```ignore
/// #[derive(Merge, Clone, Debug)]
/// #[merge(derive(Debug, PartialEq))]
/// struct AppState {
///     input_text: String,
///     todos: Vec<Todo>,
///     #[merge(skip)]
///     session_id: u64,
/// }
///
/// let patch = AppStatePatch::default().input_text("milk");
/// let next = state.merge(patch)?;
/// ```
#[proc_macro_derive(Merge, attributes(merge))]
pub fn derive_merge(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match MergeOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    if !opts.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &opts.generics,
            "Merge cannot be derived for generic structs",
        )
        .to_compile_error()
        .into();
    }

    let name = &opts.ident;
    let vis = &opts.vis;
    let patch_name = opts
        .patch
        .clone()
        .unwrap_or_else(|| format_ident!("{}Patch", name));
    let extra_derives = opts.derive.iter();

    let fields = match &opts.data {
        darling::ast::Data::Struct(fields) => fields,
        _ => {
            return syn::Error::new_spanned(&input, "Merge can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let patched: Vec<_> = fields
        .iter()
        .filter(|f| !f.skip)
        .filter_map(|f| f.ident.as_ref().map(|ident| (ident, &f.ty)))
        .collect();

    let patch_fields = patched.iter().map(|(ident, ty)| {
        quote! {
            pub #ident: ::core::option::Option<#ty>
        }
    });

    let setters = patched.iter().map(|(ident, ty)| {
        let doc = format!("Overwrite `{}` when merged.", ident);
        quote! {
            #[doc = #doc]
            pub fn #ident(mut self, value: impl ::core::convert::Into<#ty>) -> Self {
                self.#ident = ::core::option::Option::Some(value.into());
                self
            }
        }
    });

    let empty_checks = patched.iter().map(|(ident, _)| {
        quote! { self.#ident.is_none() }
    });

    let merge_arms = patched.iter().map(|(ident, _)| {
        quote! {
            if let ::core::option::Option::Some(value) = patch.#ident {
                next.#ident = value;
            }
        }
    });

    let patch_doc = format!(
        "Partial [`{}`] produced by `#[derive(Merge)]`.\n\n\
         `Some` fields overwrite the state when merged; `None` fields keep it.",
        name
    );

    let expanded: proc_macro2::TokenStream = quote! {
        #[doc = #patch_doc]
        #[derive(Clone, Default, #(#extra_derives),*)]
        #vis struct #patch_name {
            #(#patch_fields,)*
        }

        impl #patch_name {
            #(#setters)*

            /// Returns true if merging this patch changes nothing.
            pub fn is_empty(&self) -> bool {
                true #(&& #empty_checks)*
            }
        }

        impl slice_dispatch::Merge for #name {
            type Patch = #patch_name;

            #[allow(unused_mut, unused_variables)]
            fn merge(
                &self,
                patch: Self::Patch,
            ) -> ::core::result::Result<Self, slice_dispatch::MergeError> {
                let mut next = ::core::clone::Clone::clone(self);
                #(#merge_arms)*
                ::core::result::Result::Ok(next)
            }
        }
    };

    TokenStream::from(expanded)
}
