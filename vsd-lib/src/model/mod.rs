//! Typed models

mod config;
mod entity;

pub use config::*;
pub use entity::*;
