//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_model::LogicalChannelType;

use crate::graph::{NodeKey, NodeRef};

// Allocation precision accepted by the terminal-device schema.
pub const ALLOCATION_FRACTION_DIGITS: u8 = 3;
// Target output power precision accepted by the platform schema.
pub const POWER_FRACTION_DIGITS: u8 = 2;

// Schema lookup used to validate nodes as they are built.
pub trait SchemaCatalog: Send + Sync {
    fn validate(&self, node: NodeRef<'_>) -> Result<(), SchemaViolation>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaViolation {
    pub node: NodeKey,
    pub path: &'static str,
    pub message: String,
}

// Catalog that accepts every node.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveCatalog;

// Catalog enforcing the OpenConfig terminal-device and platform constraints
// that the node builders don't cover.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenConfigCatalog;

// ===== impl SchemaViolation =====

impl SchemaViolation {
    pub fn new(
        node: NodeKey,
        path: &'static str,
        message: impl Into<String>,
    ) -> SchemaViolation {
        SchemaViolation {
            node,
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.node, self.path, self.message)
    }
}

impl std::error::Error for SchemaViolation {}

// ===== impl PermissiveCatalog =====

impl SchemaCatalog for PermissiveCatalog {
    fn validate(&self, _node: NodeRef<'_>) -> Result<(), SchemaViolation> {
        Ok(())
    }
}

// ===== impl OpenConfigCatalog =====

impl SchemaCatalog for OpenConfigCatalog {
    fn validate(&self, node: NodeRef<'_>) -> Result<(), SchemaViolation> {
        match node {
            NodeRef::Interface(iface) => {
                if iface.name.is_empty() {
                    return Err(SchemaViolation::new(
                        node.key(),
                        "/interfaces/interface/name",
                        "empty interface name",
                    ));
                }
                if iface.name.chars().any(char::is_whitespace) {
                    return Err(SchemaViolation::new(
                        node.key(),
                        "/interfaces/interface/name",
                        "whitespace in interface name",
                    ));
                }
            }
            NodeRef::LogicalChannel(channel) => {
                let Some(protocol) = channel.trib_protocol else {
                    return Ok(());
                };
                if let Some(rate_class) = channel.rate_class
                    && protocol.rate_class() != Some(rate_class)
                {
                    return Err(SchemaViolation::new(
                        node.key(),
                        "/terminal-device/logical-channels/channel/config/trib-protocol",
                        format!("{protocol} doesn't run at {rate_class}"),
                    ));
                }
                let consistent = match channel.logical_channel_type {
                    LogicalChannelType::Ethernet => protocol.is_ethernet(),
                    LogicalChannelType::Otn => protocol.is_otn(),
                };
                if !consistent {
                    return Err(SchemaViolation::new(
                        node.key(),
                        "/terminal-device/logical-channels/channel/config/logical-channel-type",
                        format!(
                            "{protocol} isn't a {} protocol",
                            channel.logical_channel_type
                        ),
                    ));
                }
            }
            NodeRef::Assignment(_, assignment) => {
                if assignment.allocation.precision()
                    > ALLOCATION_FRACTION_DIGITS
                {
                    return Err(SchemaViolation::new(
                        node.key(),
                        "/terminal-device/logical-channels/channel/logical-channel-assignments/assignment/config/allocation",
                        format!(
                            "allocation {} has more than {} fraction digits",
                            assignment.allocation, ALLOCATION_FRACTION_DIGITS
                        ),
                    ));
                }
            }
            NodeRef::OpticalChannel(och) => {
                if och.frequency == 0 {
                    return Err(SchemaViolation::new(
                        node.key(),
                        "/components/component/optical-channel/config/frequency",
                        "zero frequency",
                    ));
                }
                if och.target_output_power.precision() > POWER_FRACTION_DIGITS {
                    return Err(SchemaViolation::new(
                        node.key(),
                        "/components/component/optical-channel/config/target-output-power",
                        format!(
                            "power {} has more than {} fraction digits",
                            och.target_output_power, POWER_FRACTION_DIGITS
                        ),
                    ));
                }
            }
        }

        Ok(())
    }
}
