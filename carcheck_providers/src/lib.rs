#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod autoria;
mod bazagai;
mod http;
mod json;
mod registry;
mod vin_decoder;

pub use autoria::AutoRiaProvider;
pub use bazagai::BazaGaiProvider;
pub use http::build_client;
pub use registry::{build_providers, build_resolver};
pub use vin_decoder::VinDecoderProvider;
