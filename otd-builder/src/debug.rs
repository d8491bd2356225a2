//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span, trace, trace_span};

use crate::allocator::StridePolicy;
use crate::graph::{ConfigurationGraph, Link, NodeKey};

// Graph builder debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    IndicesAllocated(&'a StridePolicy, &'a [u32]),
    IndexReserved(u32),
    NodeBuilt(&'a NodeKey),
    ReferenceResolved(&'a Link),
    GraphAssembled(&'a ConfigurationGraph),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::IndicesAllocated(policy, indices) => {
                debug_span!("allocator").in_scope(|| {
                    debug!(
                        base = policy.base,
                        stride = policy.stride,
                        ports = policy.ports,
                        lanes = policy.lanes,
                        count = indices.len(),
                        "{}", self
                    );
                });
            }
            Debug::IndexReserved(index) => {
                trace_span!("allocator").in_scope(|| {
                    trace!(%index, "{}", self);
                });
            }
            Debug::NodeBuilt(node) => {
                trace_span!("assembler").in_scope(|| {
                    trace!(%node, "{}", self);
                });
            }
            Debug::ReferenceResolved(link) => {
                trace_span!("resolver").in_scope(|| {
                    trace!(
                        source = %link.source, target = %link.target,
                        "{}", self
                    );
                });
            }
            Debug::GraphAssembled(graph) => {
                debug_span!("assembler").in_scope(|| {
                    debug!(
                        interfaces = graph.interfaces().len(),
                        logical_channels = graph.logical_channels().len(),
                        optical_channels = graph.optical_channels().len(),
                        links = graph.links().len(),
                        "{}", self
                    );
                });
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::IndicesAllocated(..) => {
                write!(f, "allocated logical channel indices")
            }
            Debug::IndexReserved(..) => {
                write!(f, "reserved logical channel index")
            }
            Debug::NodeBuilt(..) => {
                write!(f, "node built")
            }
            Debug::ReferenceResolved(..) => {
                write!(f, "reference resolved")
            }
            Debug::GraphAssembled(..) => {
                write!(f, "configuration graph assembled")
            }
        }
    }
}
