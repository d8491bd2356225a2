//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use otd_model::{Assignment, Interface, LogicalChannel, OpticalChannel};
use serde::Serialize;

use crate::error::Error;

// Unique key of a configuration node.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKey {
    Interface(String),
    LogicalChannel(u32),
    // (logical channel, assignment index)
    Assignment(u32, u32),
    OpticalChannel(String),
}

// Borrowed view of a configuration node.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Interface(&'a Interface),
    LogicalChannel(&'a LogicalChannel),
    Assignment(&'a LogicalChannel, &'a Assignment),
    OpticalChannel(&'a OpticalChannel),
}

// Resolved cross-reference between two nodes.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
pub struct Link {
    pub source: NodeKey,
    pub target: NodeKey,
}

// Fully resolved configuration graph.
//
// A graph is only handed out after every cross-reference resolved, so
// consumers can look up any referenced node without further checks.
#[derive(Clone, Debug, Default)]
pub struct ConfigurationGraph {
    interfaces: Vec<Interface>,
    logical_channels: Vec<LogicalChannel>,
    optical_channels: Vec<OpticalChannel>,
    // Name/index trees pointing into the node vectors.
    interface_tree: BTreeMap<String, usize>,
    logical_channel_tree: BTreeMap<u32, usize>,
    optical_channel_tree: BTreeMap<String, usize>,
    links: Vec<Link>,
    traversal: Vec<NodeKey>,
    positions: BTreeMap<NodeKey, usize>,
}

// ===== impl NodeKey =====

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Interface(name) => write!(f, "interface {name}"),
            NodeKey::LogicalChannel(index) => {
                write!(f, "logical channel {index}")
            }
            NodeKey::Assignment(channel, index) => {
                write!(f, "assignment {channel}/{index}")
            }
            NodeKey::OpticalChannel(name) => {
                write!(f, "optical channel {name}")
            }
        }
    }
}

// ===== impl NodeRef =====

impl NodeRef<'_> {
    pub fn key(&self) -> NodeKey {
        match self {
            NodeRef::Interface(iface) => NodeKey::Interface(iface.name.clone()),
            NodeRef::LogicalChannel(channel) => {
                NodeKey::LogicalChannel(channel.index)
            }
            NodeRef::Assignment(channel, assignment) => {
                NodeKey::Assignment(channel.index, assignment.index)
            }
            NodeRef::OpticalChannel(och) => {
                NodeKey::OpticalChannel(och.name.clone())
            }
        }
    }
}

// ===== impl Link =====

impl Link {
    pub fn new(source: NodeKey, target: NodeKey) -> Link {
        Link { source, target }
    }
}

// ===== impl ConfigurationGraph =====

impl ConfigurationGraph {
    pub(crate) fn insert_interface(
        &mut self,
        iface: Interface,
    ) -> Result<(), Error> {
        if self.interface_tree.contains_key(&iface.name) {
            return Err(Error::DuplicateNode(NodeKey::Interface(iface.name)));
        }
        self.interface_tree
            .insert(iface.name.clone(), self.interfaces.len());
        self.interfaces.push(iface);
        Ok(())
    }

    pub(crate) fn insert_logical_channel(
        &mut self,
        channel: LogicalChannel,
    ) -> Result<(), Error> {
        if self.logical_channel_tree.contains_key(&channel.index) {
            return Err(Error::IndexCollision(channel.index));
        }
        self.logical_channel_tree
            .insert(channel.index, self.logical_channels.len());
        self.logical_channels.push(channel);
        Ok(())
    }

    // Attaches an assignment to an already inserted logical channel.
    pub(crate) fn insert_assignment(
        &mut self,
        channel: u32,
        assignment: Assignment,
    ) -> Result<(), Error> {
        let pos = self
            .logical_channel_tree
            .get(&channel)
            .copied()
            .ok_or(Error::InvalidIndex(channel.into()))?;
        self.logical_channels[pos].add_assignment(assignment)?;
        Ok(())
    }

    pub(crate) fn insert_optical_channel(
        &mut self,
        och: OpticalChannel,
    ) -> Result<(), Error> {
        if self.optical_channel_tree.contains_key(&och.name) {
            return Err(Error::DuplicateNode(NodeKey::OpticalChannel(
                och.name,
            )));
        }
        self.optical_channel_tree
            .insert(och.name.clone(), self.optical_channels.len());
        self.optical_channels.push(och);
        Ok(())
    }

    // Freezes the graph: stores the resolved links and computes the
    // traversal order (interfaces, then each logical channel followed by its
    // assignments, then optical channels, all in declaration order).
    pub(crate) fn seal(&mut self, links: Vec<Link>) {
        let traversal = self.nodes().map(|node| node.key()).collect::<Vec<_>>();
        self.positions = traversal
            .iter()
            .cloned()
            .enumerate()
            .map(|(pos, key)| (key, pos))
            .collect();
        self.traversal = traversal;
        self.links = links;
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn logical_channels(&self) -> &[LogicalChannel] {
        &self.logical_channels
    }

    pub fn optical_channels(&self) -> &[OpticalChannel] {
        &self.optical_channels
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interface_tree
            .get(name)
            .map(|pos| &self.interfaces[*pos])
    }

    pub fn logical_channel(&self, index: u32) -> Option<&LogicalChannel> {
        self.logical_channel_tree
            .get(&index)
            .map(|pos| &self.logical_channels[*pos])
    }

    pub fn optical_channel(&self, name: &str) -> Option<&OpticalChannel> {
        self.optical_channel_tree
            .get(name)
            .map(|pos| &self.optical_channels[*pos])
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    // Links leaving the given node.
    pub fn links_from<'a>(
        &'a self,
        source: &'a NodeKey,
    ) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.source == *source)
    }

    pub fn traversal(&self) -> &[NodeKey] {
        &self.traversal
    }

    // Iterates over all nodes in traversal order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        let interfaces = self.interfaces.iter().map(NodeRef::Interface);
        let logical_channels = self.logical_channels.iter().flat_map(|channel| {
            std::iter::once(NodeRef::LogicalChannel(channel)).chain(
                channel
                    .assignments
                    .iter()
                    .map(move |assignment| {
                        NodeRef::Assignment(channel, assignment)
                    }),
            )
        });
        let optical_channels =
            self.optical_channels.iter().map(NodeRef::OpticalChannel);
        interfaces.chain(logical_channels).chain(optical_channels)
    }

    pub fn node(&self, key: &NodeKey) -> Option<NodeRef<'_>> {
        match key {
            NodeKey::Interface(name) => {
                self.interface(name).map(NodeRef::Interface)
            }
            NodeKey::LogicalChannel(index) => {
                self.logical_channel(*index).map(NodeRef::LogicalChannel)
            }
            NodeKey::Assignment(channel, index) => {
                let channel = self.logical_channel(*channel)?;
                let assignment = channel.assignment(*index)?;
                Some(NodeRef::Assignment(channel, assignment))
            }
            NodeKey::OpticalChannel(name) => {
                self.optical_channel(name).map(NodeRef::OpticalChannel)
            }
        }
    }

    // Position of the node in the traversal order.
    pub fn position(&self, key: &NodeKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    // Total number of nodes, assignments included.
    pub fn len(&self) -> usize {
        self.traversal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traversal.is_empty()
    }
}
