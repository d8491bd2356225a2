//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_builder::ConfigurationGraph;
use otd_model::{Interface, LogicalChannel, OpticalChannel};
use serde::{Deserialize, Serialize};

use crate::debug::Debug;
use crate::error::TransportError;

// Target datastore of an edit.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Datastore {
    #[default]
    Candidate,
    Running,
}

// Top-level configuration aggregate, edited as a unit.
#[derive(Clone, Copy, Debug)]
pub enum Section<'a> {
    Interfaces(&'a [Interface]),
    TerminalDevice(&'a [LogicalChannel]),
    Components(&'a [OpticalChannel]),
}

// Device-facing side of a configuration push.
//
// Implementations own the session with the device. Errors are returned as
// they come, the push sequence never retries.
pub trait ConfigTransport {
    fn lock(&mut self, _datastore: Datastore) -> Result<(), TransportError> {
        Ok(())
    }

    fn unlock(&mut self, _datastore: Datastore) -> Result<(), TransportError> {
        Ok(())
    }

    // Merges one configuration section into the given datastore.
    fn apply(
        &mut self,
        datastore: Datastore,
        section: Section<'_>,
    ) -> Result<(), TransportError>;

    // Makes all staged changes effective.
    fn commit(&mut self) -> Result<(), TransportError>;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushOptions {
    pub datastore: Datastore,
    // Hold the datastore lock for the whole sequence.
    pub lock: bool,
}

// ===== impl Datastore =====

impl std::fmt::Display for Datastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Datastore::Candidate => write!(f, "candidate"),
            Datastore::Running => write!(f, "running"),
        }
    }
}

// ===== impl Section =====

impl<'a> Section<'a> {
    // Sections of a graph, in the order they're pushed.
    pub fn all(graph: &'a ConfigurationGraph) -> [Section<'a>; 3] {
        [
            Section::Interfaces(graph.interfaces()),
            Section::TerminalDevice(graph.logical_channels()),
            Section::Components(graph.optical_channels()),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Section::Interfaces(..) => "interfaces",
            Section::TerminalDevice(..) => "terminal-device",
            Section::Components(..) => "components",
        }
    }
}

// ===== global functions =====

// Pushes a configuration graph: one apply per section followed by a single
// commit.
pub fn push(
    graph: &ConfigurationGraph,
    transport: &mut dyn ConfigTransport,
    options: &PushOptions,
) -> Result<(), TransportError> {
    let datastore = options.datastore;

    if options.lock {
        transport.lock(datastore)?;
        Debug::Locked(datastore).log();
    }

    let result = push_sections(graph, transport, datastore);

    if options.lock {
        match transport.unlock(datastore) {
            Ok(()) => Debug::Unlocked(datastore).log(),
            // The push error takes precedence.
            Err(error) if result.is_err() => error.log(),
            Err(error) => return Err(error),
        }
    }

    result
}

fn push_sections(
    graph: &ConfigurationGraph,
    transport: &mut dyn ConfigTransport,
    datastore: Datastore,
) -> Result<(), TransportError> {
    for section in Section::all(graph) {
        transport.apply(datastore, section)?;
        Debug::SectionApplied(datastore, section.name()).log();
    }
    transport.commit()?;
    Debug::Committed(datastore).log();

    Ok(())
}
