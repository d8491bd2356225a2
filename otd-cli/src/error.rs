//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_builder::AssemblyError;
use otd_northbound::TransportError;
use tracing::warn;

// Command errors.
#[derive(Debug)]
pub enum Error {
    ReadFile(String, std::io::Error),
    ParseFile(String, toml::de::Error),
    Assembly(String, AssemblyError),
    Transport(String, TransportError),
    DuplicateDevice(String),
    UnknownTransaction(u32),
    Runtime(std::io::Error),
    Task(tokio::task::JoinError),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::ReadFile(path, error) => {
                warn!(%path, %error, "{}", self);
            }
            Error::ParseFile(path, error) => {
                warn!(%path, %error, "{}", self);
            }
            Error::Assembly(path, error) => {
                warn!(%path, "{}", self);
                error.log();
            }
            Error::Transport(device, error) => {
                warn!(%device, "{}", self);
                error.log();
            }
            Error::DuplicateDevice(device) => {
                warn!(%device, "{}", self);
            }
            Error::UnknownTransaction(id) => {
                warn!(%id, "{}", self);
            }
            Error::Runtime(error) => {
                warn!(%error, "{}", self);
            }
            Error::Task(error) => {
                warn!(%error, "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReadFile(path, error) => {
                write!(f, "failed to read {path}: {error}")
            }
            Error::ParseFile(path, error) => {
                write!(f, "failed to parse {path}: {error}")
            }
            Error::Assembly(path, error) => {
                write!(f, "{path}: {error}: {}", error.error)
            }
            Error::Transport(device, error) => match error {
                TransportError::Encode(reason)
                | TransportError::Device(reason) => {
                    write!(f, "{device}: {error}: {reason}")
                }
                TransportError::Storage(storage) => {
                    write!(f, "{device}: {error}: {storage}")
                }
                TransportError::Locked => write!(f, "{device}: {error}"),
            },
            Error::DuplicateDevice(device) => {
                write!(f, "device {device} appears in more than one topology")
            }
            Error::UnknownTransaction(id) => {
                write!(f, "transaction {id} not found")
            }
            Error::Runtime(error) => {
                write!(f, "failed to create async runtime: {error}")
            }
            Error::Task(error) => {
                write!(f, "worker task failed: {error}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadFile(_, error) => Some(error),
            Error::ParseFile(_, error) => Some(error),
            Error::Assembly(_, error) => Some(error),
            Error::Transport(_, error) => Some(error),
            Error::Runtime(error) => Some(error),
            Error::Task(error) => Some(error),
            Error::DuplicateDevice(..) | Error::UnknownTransaction(..) => {
                None
            }
        }
    }
}
