//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

// Placeholder key used when a node is missing its own key.
pub(crate) const UNKNOWN_KEY: &str = "?";

// Configuration node errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    // (node kind, node key, field)
    MissingField(NodeKind, String, &'static str),
    // (node kind, node key, field, offending value)
    InvalidField(NodeKind, String, &'static str, String),
    // (node kind, node key)
    DuplicateKey(NodeKind, String),
}

// Kinds of configuration nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NodeKind {
    Interface,
    LogicalChannel,
    Ingress,
    Assignment,
    OpticalChannel,
}

// ===== impl Error =====

impl Error {
    pub fn node_kind(&self) -> NodeKind {
        match self {
            Error::MissingField(kind, ..)
            | Error::InvalidField(kind, ..)
            | Error::DuplicateKey(kind, ..) => *kind,
        }
    }

    pub fn node_key(&self) -> &str {
        match self {
            Error::MissingField(_, key, ..)
            | Error::InvalidField(_, key, ..)
            | Error::DuplicateKey(_, key) => key,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingField(kind, key, field) => {
                write!(f, "{kind} {key}: missing mandatory field '{field}'")
            }
            Error::InvalidField(kind, key, field, value) => {
                write!(f, "{kind} {key}: invalid value '{value}' for '{field}'")
            }
            Error::DuplicateKey(kind, key) => {
                write!(f, "duplicate {kind} {key}")
            }
        }
    }
}

impl std::error::Error for Error {}

// ===== impl NodeKind =====

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Interface => write!(f, "interface"),
            NodeKind::LogicalChannel => write!(f, "logical channel"),
            NodeKind::Ingress => write!(f, "ingress"),
            NodeKind::Assignment => write!(f, "assignment"),
            NodeKind::OpticalChannel => write!(f, "optical channel"),
        }
    }
}
