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

//! Vehicle lookup core: query shape, normalized record, provider contract,
//! fallback resolution and report rendering.

pub mod locale;
pub mod provider;
pub mod query;
pub mod record;
pub mod report;
pub mod resolver;

pub use locale::Locale;
pub use provider::{ProviderError, VehicleProvider};
pub use query::{Query, QueryError};
pub use record::{Field, Placeholder, VehicleRecord};
pub use report::{Report, format_report};
pub use resolver::Resolver;
