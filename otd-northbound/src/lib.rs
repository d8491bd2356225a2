//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod debug;

pub mod codec;
pub mod datastore;
pub mod error;
pub mod transport;

pub use crate::codec::DataFormat;
pub use crate::datastore::{LocalDatastore, Transaction};
pub use crate::error::TransportError;
pub use crate::transport::{
    ConfigTransport, Datastore, PushOptions, Section, push,
};
