//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span, trace, trace_span};

use crate::transport::Datastore;

// Transport debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    Locked(Datastore),
    Unlocked(Datastore),
    SectionApplied(Datastore, &'a str),
    Committed(Datastore),
    SectionStaged(Datastore, &'a str, usize),
    NothingToCommit,
    TransactionRecorded(u32),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::Locked(datastore) | Debug::Unlocked(datastore) => {
                debug_span!("transport").in_scope(|| {
                    debug!(%datastore, "{}", self);
                });
            }
            Debug::SectionApplied(datastore, section) => {
                debug_span!("transport").in_scope(|| {
                    debug!(%datastore, %section, "{}", self);
                });
            }
            Debug::Committed(datastore) => {
                debug_span!("transport").in_scope(|| {
                    debug!(%datastore, "{}", self);
                });
            }
            Debug::SectionStaged(datastore, section, len) => {
                trace_span!("datastore").in_scope(|| {
                    trace!(%datastore, %section, %len, "{}", self);
                });
            }
            Debug::NothingToCommit => {
                debug_span!("datastore").in_scope(|| {
                    debug!("{}", self);
                });
            }
            Debug::TransactionRecorded(id) => {
                debug_span!("datastore").in_scope(|| {
                    debug!(%id, "{}", self);
                });
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::Locked(..) => {
                write!(f, "datastore locked")
            }
            Debug::Unlocked(..) => {
                write!(f, "datastore unlocked")
            }
            Debug::SectionApplied(..) => {
                write!(f, "configuration section applied")
            }
            Debug::Committed(..) => {
                write!(f, "configuration committed")
            }
            Debug::SectionStaged(..) => {
                write!(f, "configuration section stored")
            }
            Debug::NothingToCommit => {
                write!(f, "no staged changes to commit")
            }
            Debug::TransactionRecorded(..) => {
                write!(f, "transaction recorded in the rollback log")
            }
        }
    }
}
