//! HTTP adapters for the contact-data providers behind the waterfall.
//!
//! Every client implements [`ProviderAdapter`]; Apollo additionally implements
//! [`BatchProviderAdapter`]. [`ProviderRegistry::standard`] wires all five.

pub mod adapter;
pub mod apollo;
pub mod error;
pub mod http;
pub mod lusha;
pub mod poll;
pub mod prospeo;
pub mod registry;
pub mod rocketreach;
pub mod snov;

mod shape;

pub use adapter::{BatchProviderAdapter, ProviderAdapter};
pub use apollo::ApolloClient;
pub use error::ProviderError;
pub use http::HttpSettings;
pub use lusha::LushaClient;
pub use poll::{PollPolicy, PollStatus};
pub use prospeo::ProspeoClient;
pub use registry::ProviderRegistry;
pub use rocketreach::RocketReachClient;
pub use snov::SnovClient;
