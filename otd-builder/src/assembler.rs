//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_model::{
    AssignmentCfg, InterfaceCfg, LogicalChannelCfg, OpticalChannelCfg,
};
use serde::{Deserialize, Serialize};

use crate::allocator::{IndexAllocator, StridePolicy};
use crate::catalog::SchemaCatalog;
use crate::debug::Debug;
use crate::error::{AssemblyError, Error, Stage};
use crate::graph::{ConfigurationGraph, NodeRef};
use crate::resolver;

// Optional resolver checks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssemblyOptions {
    // Bound the sum of all allocations out of a channel by its capacity.
    pub aggregate_capacity: bool,
    // Require ingress transceivers to name declared interfaces.
    pub strict_ingress: bool,
}

// Collects node declarations and assembles them into a configuration graph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    allocator: IndexAllocator,
    interfaces: Vec<InterfaceCfg>,
    logical_channels: Vec<LogicalChannelCfg>,
    optical_channels: Vec<OpticalChannelCfg>,
}

// ===== impl GraphBuilder =====

impl GraphBuilder {
    pub fn new() -> GraphBuilder {
        Default::default()
    }

    // Allocates a block of logical channel indices for channels declared
    // later on.
    pub fn allocate_indices(
        &mut self,
        policy: &StridePolicy,
    ) -> Result<Vec<u32>, Error> {
        self.allocator.allocate(policy)
    }

    pub fn reserve_index(&mut self, index: u32) -> Result<(), Error> {
        self.allocator.reserve(index)
    }

    pub fn allocator(&self) -> &IndexAllocator {
        &self.allocator
    }

    pub fn interface(&mut self, iface: InterfaceCfg) -> &mut Self {
        self.interfaces.push(iface);
        self
    }

    pub fn logical_channel(&mut self, channel: LogicalChannelCfg) -> &mut Self {
        self.logical_channels.push(channel);
        self
    }

    pub fn optical_channel(&mut self, och: OpticalChannelCfg) -> &mut Self {
        self.optical_channels.push(och);
        self
    }

    // Builds, validates and resolves all declared nodes.
    //
    // Stages run in a fixed order and the first failure aborts the whole
    // build.
    pub fn assemble(
        self,
        catalog: &dyn SchemaCatalog,
        options: &AssemblyOptions,
    ) -> Result<ConfigurationGraph, AssemblyError> {
        let GraphBuilder {
            mut allocator,
            interfaces,
            logical_channels,
            optical_channels,
        } = self;
        let mut graph = ConfigurationGraph::default();

        // Interfaces.
        for cfg in interfaces {
            let stage = Stage::Interfaces;
            let iface = cfg.build().map_err(|error| fail(stage, error))?;
            validate(catalog, NodeRef::Interface(&iface), stage)?;
            graph
                .insert_interface(iface)
                .map_err(|error| fail(stage, error))?;
        }

        // Logical channels. Assignments are set aside until all channels are
        // in place.
        let mut assignments = vec![];
        for mut cfg in logical_channels {
            let stage = Stage::LogicalChannels;
            let pending = std::mem::take(&mut cfg.assignments);
            let channel = cfg.build().map_err(|error| fail(stage, error))?;
            if !allocator.contains(channel.index) {
                allocator
                    .reserve(channel.index)
                    .map_err(|error| fail(stage, error))?;
            }
            validate(catalog, NodeRef::LogicalChannel(&channel), stage)?;
            assignments.push((channel.index, pending));
            graph
                .insert_logical_channel(channel)
                .map_err(|error| fail(stage, error))?;
        }

        // Assignments.
        for (index, pending) in assignments {
            let stage = Stage::Assignments;
            for cfg in pending {
                add_assignment(&mut graph, catalog, index, cfg)
                    .map_err(|error| fail(stage, error))?;
            }
        }

        // Optical channels.
        for cfg in optical_channels {
            let stage = Stage::OpticalChannels;
            let och = cfg.build().map_err(|error| fail(stage, error))?;
            validate(catalog, NodeRef::OpticalChannel(&och), stage)?;
            graph
                .insert_optical_channel(och)
                .map_err(|error| fail(stage, error))?;
        }

        // Cross-references.
        let links = resolver::resolve(&graph, options)
            .map_err(|error| fail(Stage::Resolution, error))?;
        graph.seal(links);

        for key in graph.traversal() {
            Debug::NodeBuilt(key).log();
        }
        Debug::GraphAssembled(&graph).log();

        Ok(graph)
    }
}

// ===== helper functions =====

fn fail(stage: Stage, error: impl Into<Error>) -> AssemblyError {
    AssemblyError::new(stage, error.into())
}

fn validate(
    catalog: &dyn SchemaCatalog,
    node: NodeRef<'_>,
    stage: Stage,
) -> Result<(), AssemblyError> {
    catalog.validate(node).map_err(|error| fail(stage, error))
}

fn add_assignment(
    graph: &mut ConfigurationGraph,
    catalog: &dyn SchemaCatalog,
    index: u32,
    cfg: AssignmentCfg,
) -> Result<(), Error> {
    let assignment = cfg.build(index)?;
    if let Some(channel) = graph.logical_channel(index) {
        catalog.validate(NodeRef::Assignment(channel, &assignment))?;
    }
    graph.insert_assignment(index, assignment)
}
