use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, Error};

/// This will start a preconfigured runtime for your App. Make sure you have a Default implementation
#[proc_macro_derive(JengaApp)]
pub fn jenga_app(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    if let Data::Union(_) = &input.data {
        return Error::new(input.span(), "JengaApp can only be derived for structs and enums")
            .to_compile_error()
            .into();
    }

    let logger = cfg!(feature = "derive_env_logger").then(|| {
        quote!(
            ::jenga::env_logger::builder()
                .filter_level(::jenga::log::LevelFilter::Info)
                .parse_default_env()
                .init();
        )
    });

    let app_name = &input.ident;

    quote! {
        fn main() {
            #logger

            let app = ::jenga::AppRuntime::configure(#app_name::default(), stringify!(#app_name), 1280, 720)
                .with_config(::jenga::JengaConfig::from_env());

            if let Err(e) = ::jenga::AppSettings::run(app) {
                ::jenga::log::error!("{e}");
                ::std::process::exit(1);
            }
        }
    }
    .into()
}
