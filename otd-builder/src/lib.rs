//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod debug;
mod resolver;

pub mod allocator;
pub mod assembler;
pub mod catalog;
pub mod error;
pub mod graph;
pub mod topology;

pub use crate::allocator::{IndexAllocator, StridePolicy};
pub use crate::assembler::{AssemblyOptions, GraphBuilder};
pub use crate::catalog::{
    OpenConfigCatalog, PermissiveCatalog, SchemaCatalog, SchemaViolation,
};
pub use crate::error::{
    AssemblyError, CapacityViolation, Error, Reference, Stage,
};
pub use crate::graph::{ConfigurationGraph, Link, NodeKey, NodeRef};
pub use crate::topology::{SliceMode, Topology};
