//! Query operations

mod fetch;
mod pages;
pub mod query;

pub use fetch::*;
pub use pages::*;
