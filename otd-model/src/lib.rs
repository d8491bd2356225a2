//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Configuration nodes of an OpenConfig terminal device.
//!
//! Every entity comes in two flavors: a declaration (`*Cfg`) whose fields are
//! all optional, and the complete node produced by its `build()` method once
//! all mandatory fields are present and well-formed.

pub mod decimal;
pub mod error;
pub mod interface;
pub mod logical_channel;
pub mod optical_channel;
pub mod types;
pub mod yang;

pub use crate::decimal::Decimal64;
pub use crate::error::{Error, NodeKind};
pub use crate::interface::{Interface, InterfaceCfg};
pub use crate::logical_channel::{
    Assignment, AssignmentCfg, AssignmentTarget, Ingress, IngressCfg,
    LogicalChannel, LogicalChannelCfg,
};
pub use crate::optical_channel::{OpticalChannel, OpticalChannelCfg};
pub use crate::types::{
    AdminState, AssignmentType, InterfaceType, LogicalChannelType,
    OperationalMode, RateClass, TribProtocol,
};
pub use crate::yang::{ToYang, TryFromYang};
