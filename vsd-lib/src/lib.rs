//! VSD query layer
//!
//! Turns declarative query configurations into paginated requests against
//! the Nuage VSD REST API, applying search, sort and result transforms.

pub mod api;
pub mod error;
pub mod model;
pub mod template;
pub mod transform;
pub mod transport;

mod service;

pub use api::FetchResult;
pub use service::*;
