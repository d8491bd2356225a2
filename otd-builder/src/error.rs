//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_model::{AssignmentTarget, Decimal64, RateClass};
use tracing::{warn, warn_span};

use crate::catalog::SchemaViolation;
use crate::graph::NodeKey;

// Configuration graph errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    IncompleteNode(otd_model::Error),
    IndexCollision(u32),
    InvalidIndex(u64),
    DuplicateNode(NodeKey),
    DanglingReference(Reference),
    CapacityExceeded(CapacityViolation),
    AggregateCapacityExceeded(CapacityViolation),
    AssignmentCycle(Vec<u32>),
    SchemaViolation(SchemaViolation),
    InvalidTopology(String),
}

// Cross-reference that failed to resolve.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reference {
    // (source channel, assignment index, target)
    Assignment(u32, u32, AssignmentTarget),
    // (optical channel, line port)
    LinePort(String, String),
    // (logical channel, transceiver)
    Transceiver(u32, String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapacityViolation {
    pub channel: u32,
    // Offending assignment, unset when the aggregate is exceeded.
    pub assignment: Option<u32>,
    pub rate_class: RateClass,
    pub allocation: Decimal64,
    pub capacity: Decimal64,
}

// Failure of a graph build, tagged with the stage that detected it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssemblyError {
    pub stage: Stage,
    pub error: Error,
}

// Graph assembly stages, in execution order.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Stage {
    Allocation,
    Interfaces,
    LogicalChannels,
    Assignments,
    OpticalChannels,
    Resolution,
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::IncompleteNode(error) => {
                warn!(
                    kind = %error.node_kind(), key = %error.node_key(),
                    "{}", self
                );
            }
            Error::IndexCollision(index) => {
                warn!(%index, "{}", self);
            }
            Error::InvalidIndex(index) => {
                warn!(%index, "{}", self);
            }
            Error::DuplicateNode(node) => {
                warn!(%node, "{}", self);
            }
            Error::DanglingReference(reference) => {
                warn!(?reference, "{}", self);
            }
            Error::CapacityExceeded(violation)
            | Error::AggregateCapacityExceeded(violation) => {
                warn_span!("logical-channel", index = %violation.channel)
                    .in_scope(|| {
                        warn!(
                            assignment = ?violation.assignment,
                            rate_class = %violation.rate_class,
                            allocation = %violation.allocation,
                            capacity = %violation.capacity,
                            "{}", self
                        );
                    });
            }
            Error::AssignmentCycle(cycle) => {
                warn!(?cycle, "{}", self);
            }
            Error::SchemaViolation(violation) => {
                warn!(
                    node = %violation.node, path = %violation.path,
                    "{}", self
                );
            }
            Error::InvalidTopology(reason) => {
                warn!(%reason, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IncompleteNode(error) => {
                write!(f, "incomplete node: {error}")
            }
            Error::IndexCollision(index) => {
                write!(f, "logical channel index {index} already allocated")
            }
            Error::InvalidIndex(index) => {
                write!(f, "invalid logical channel index {index}")
            }
            Error::DuplicateNode(node) => {
                write!(f, "duplicate {node}")
            }
            Error::DanglingReference(reference) => {
                write!(f, "dangling reference: {reference}")
            }
            Error::CapacityExceeded(violation) => {
                write!(
                    f,
                    "allocation {} exceeds the {} capacity ({}) of logical channel {}",
                    violation.allocation,
                    violation.rate_class,
                    violation.capacity,
                    violation.channel
                )
            }
            Error::AggregateCapacityExceeded(violation) => {
                write!(
                    f,
                    "total allocation {} exceeds the {} capacity ({}) of logical channel {}",
                    violation.allocation,
                    violation.rate_class,
                    violation.capacity,
                    violation.channel
                )
            }
            Error::AssignmentCycle(cycle) => {
                let cycle = itertools::join(cycle, " -> ");
                write!(f, "logical channel assignment cycle: {cycle}")
            }
            Error::SchemaViolation(violation) => {
                write!(f, "schema violation: {violation}")
            }
            Error::InvalidTopology(reason) => {
                write!(f, "invalid topology: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IncompleteNode(error) => Some(error),
            Error::SchemaViolation(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<otd_model::Error> for Error {
    fn from(error: otd_model::Error) -> Error {
        Error::IncompleteNode(error)
    }
}

impl From<SchemaViolation> for Error {
    fn from(violation: SchemaViolation) -> Error {
        Error::SchemaViolation(violation)
    }
}

// ===== impl Reference =====

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Assignment(channel, index, target) => {
                write!(f, "assignment {channel}/{index} targets unknown {target}")
            }
            Reference::LinePort(name, port) => {
                write!(f, "optical channel {name} uses unknown line port {port}")
            }
            Reference::Transceiver(channel, transceiver) => {
                write!(
                    f,
                    "logical channel {channel} ingress uses unknown transceiver {transceiver}"
                )
            }
        }
    }
}

// ===== impl AssemblyError =====

impl AssemblyError {
    pub fn new(stage: Stage, error: Error) -> AssemblyError {
        AssemblyError { stage, error }
    }

    pub fn log(&self) {
        warn_span!("assembler", stage = ?self.stage).in_scope(|| {
            self.error.log();
        });
    }
}

impl std::fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "graph assembly failed ({})", self.stage)
    }
}

impl std::error::Error for AssemblyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

// ===== impl Stage =====

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Allocation => write!(f, "index allocation"),
            Stage::Interfaces => write!(f, "interfaces"),
            Stage::LogicalChannels => write!(f, "logical channels"),
            Stage::Assignments => write!(f, "assignments"),
            Stage::OpticalChannels => write!(f, "optical channels"),
            Stage::Resolution => write!(f, "cross-reference resolution"),
        }
    }
}
