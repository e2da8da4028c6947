//! Foundation types for the symbol table.
//!
//! This module provides:
//! - [`PathKey`] - Hierarchical object paths (root is the empty path)
//! - [`Separator`], [`NSEP`], [`ISEP`] - Path separator tokens
//!
//! This module has NO dependencies on other symtab modules.

mod path;

pub use path::{ISEP, NSEP, PathKey, Separator};
