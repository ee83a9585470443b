//! Session module - per-user orchestration and the UI read model
//!
//! Re-exports only. All logic in submodules.

mod catalog;
mod facade;
mod read_model;

pub use catalog::Catalog;
pub use facade::Session;
pub use read_model::ReadModel;
