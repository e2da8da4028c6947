//! Semantic model — code objects, the namespace store, and name resolution.
//!
//! ## Key Data Structures
//!
//! - [`CodeObject`] - A discovered entity keyed by its [`PathKey`](crate::base::PathKey)
//! - [`NamespaceStore`] - Insertion-ordered table of all code objects
//! - [`Resolver`] - Scope-walking name resolution over a store
//! - [`Proxy`] - Placeholder for a name that did not resolve

mod object;
mod resolve;
mod store;

pub use object::{Capability, CodeObject, PropertyValue, Proxy, Registrable, TypeFilter, TypeTag};
pub use resolve::{ResolveResult, Resolver};
pub use store::{NamespaceStore, Registrar};
