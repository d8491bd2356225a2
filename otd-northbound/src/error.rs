//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{warn, warn_span};

// Configuration transport errors.
#[derive(Debug)]
pub enum TransportError {
    Locked,
    Encode(String),
    Storage(pickledb::error::Error),
    Device(String),
}

// ===== impl TransportError =====

impl TransportError {
    pub fn log(&self) {
        warn_span!("transport").in_scope(|| match self {
            TransportError::Locked => warn!("{}", self),
            TransportError::Encode(error) => {
                warn!(%error, "{}", self);
            }
            TransportError::Storage(error) => {
                warn!(%error, "{}", self);
            }
            TransportError::Device(error) => {
                warn!(%error, "{}", self);
            }
        })
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Locked => {
                write!(f, "datastore is locked by another session")
            }
            TransportError::Encode(..) => {
                write!(f, "failed to encode configuration")
            }
            TransportError::Storage(..) => {
                write!(f, "failed to access the local datastore")
            }
            TransportError::Device(..) => {
                write!(f, "device rejected the configuration")
            }
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Storage(error) => Some(error),
            _ => None,
        }
    }
}

impl From<pickledb::error::Error> for TransportError {
    fn from(error: pickledb::error::Error) -> TransportError {
        TransportError::Storage(error)
    }
}

impl From<xml::writer::Error> for TransportError {
    fn from(error: xml::writer::Error) -> TransportError {
        TransportError::Encode(error.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(error: serde_json::Error) -> TransportError {
        TransportError::Encode(error.to_string())
    }
}
