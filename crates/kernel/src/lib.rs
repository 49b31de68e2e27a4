//! Core traits, settings, and the module registry shared by every crate.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, TableSchema};
pub use registry::ModuleRegistry;
