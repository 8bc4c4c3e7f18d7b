//! Declarative toolkit SDK facade.
//!
//! Depend on this crate via `cargo add toolset`. It bundles the registry
//! crates behind feature flags so downstream users can enable or disable
//! components as needed for their toolkits.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use toolset_primitives as primitives;

/// Declaration registry, schema builder, and configuration emitter
/// (enabled by the `registry` feature).
#[cfg(feature = "registry")]
pub use toolset_registry as registry;

/// Validated execution gate and invocation lifecycle (enabled by the `exec`
/// feature).
#[cfg(feature = "exec")]
pub use toolset_exec as exec;
