//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;

use enum_as_inner::EnumAsInner;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::decimal::Decimal64;
use crate::error::{Error, NodeKind, UNKNOWN_KEY};
use crate::types::{
    AdminState, AssignmentType, LogicalChannelType, RateClass, TribProtocol,
};

// ===== declarations =====

// Logical channel declaration.
#[derive(Clone, Debug, Default)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct LogicalChannelCfg {
    pub index: Option<u32>,
    pub description: Option<String>,
    pub admin_state: Option<AdminState>,
    pub rate_class: Option<RateClass>,
    pub trib_protocol: Option<TribProtocol>,
    pub logical_channel_type: Option<LogicalChannelType>,
    pub ingress: Option<IngressCfg>,
    #[serde(rename = "assignment")]
    pub assignments: Vec<AssignmentCfg>,
}

// Ingress mapping declaration.
#[derive(Clone, Debug, Default)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct IngressCfg {
    pub transceiver: Option<String>,
    #[serde(rename = "physical-channel")]
    pub physical_channels: Vec<u16>,
}

// Logical channel assignment declaration.
#[derive(Clone, Debug, Default)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AssignmentCfg {
    pub index: Option<u32>,
    pub allocation: Option<Decimal64>,
    pub assignment_type: Option<AssignmentType>,
    pub logical_channel: Option<u32>,
    pub optical_channel: Option<String>,
}

// ===== complete nodes =====

// Logical signal path within the transport stack of the device.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LogicalChannel {
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state: Option<AdminState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_class: Option<RateClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trib_protocol: Option<TribProtocol>,
    pub logical_channel_type: LogicalChannelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<Ingress>,
    #[serde(rename = "assignment", skip_serializing_if = "Vec::is_empty")]
    pub assignments: Vec<Assignment>,
}

// Client transceiver and physical lanes feeding a logical channel.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ingress {
    pub transceiver: String,
    #[serde(rename = "physical-channel")]
    pub physical_channels: Vec<u16>,
}

// Directed mapping of part of a channel's capacity onto another channel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assignment {
    pub index: u32,
    pub allocation: Decimal64,
    pub target: AssignmentTarget,
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(EnumAsInner)]
pub enum AssignmentTarget {
    // Logical channel index.
    LogicalChannel(u32),
    // Optical channel component name.
    OpticalChannel(String),
}

// ===== impl LogicalChannelCfg =====

impl LogicalChannelCfg {
    pub fn new(index: u32, logical_channel_type: LogicalChannelType) -> Self {
        LogicalChannelCfg {
            index: Some(index),
            logical_channel_type: Some(logical_channel_type),
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<LogicalChannel, Error> {
        let index = match self.index {
            Some(0) => {
                return Err(Error::InvalidField(
                    NodeKind::LogicalChannel,
                    "0".to_owned(),
                    "index",
                    "0".to_owned(),
                ));
            }
            Some(index) => index,
            None => {
                return Err(Error::MissingField(
                    NodeKind::LogicalChannel,
                    UNKNOWN_KEY.to_owned(),
                    "index",
                ));
            }
        };
        let Some(logical_channel_type) = self.logical_channel_type else {
            return Err(Error::MissingField(
                NodeKind::LogicalChannel,
                index.to_string(),
                "logical-channel-type",
            ));
        };
        let ingress = self
            .ingress
            .map(|ingress| ingress.build(index))
            .transpose()?;

        let mut channel = LogicalChannel {
            index,
            description: self.description,
            admin_state: self.admin_state,
            rate_class: self.rate_class,
            trib_protocol: self.trib_protocol,
            logical_channel_type,
            ingress,
            assignments: Vec::with_capacity(self.assignments.len()),
        };
        for assignment in self.assignments {
            let assignment = assignment.build(index)?;
            channel.add_assignment(assignment)?;
        }

        Ok(channel)
    }
}

// ===== impl IngressCfg =====

impl IngressCfg {
    pub fn new(
        transceiver: impl Into<String>,
        physical_channels: Vec<u16>,
    ) -> Self {
        IngressCfg {
            transceiver: Some(transceiver.into()),
            physical_channels,
        }
    }

    pub fn build(self, channel: u32) -> Result<Ingress, Error> {
        let key = channel.to_string();
        let Some(transceiver) =
            self.transceiver.filter(|transceiver| !transceiver.is_empty())
        else {
            return Err(Error::MissingField(
                NodeKind::Ingress,
                key,
                "transceiver",
            ));
        };
        if self.physical_channels.is_empty() {
            return Err(Error::MissingField(
                NodeKind::Ingress,
                key,
                "physical-channel",
            ));
        }

        let mut lanes = BTreeSet::new();
        for lane in &self.physical_channels {
            if *lane == 0 {
                return Err(Error::InvalidField(
                    NodeKind::Ingress,
                    key,
                    "physical-channel",
                    lane.to_string(),
                ));
            }
            if !lanes.insert(*lane) {
                return Err(Error::DuplicateKey(
                    NodeKind::Ingress,
                    format!("{key}/{lane}"),
                ));
            }
        }

        Ok(Ingress {
            transceiver,
            physical_channels: self.physical_channels,
        })
    }
}

// ===== impl AssignmentCfg =====

impl AssignmentCfg {
    pub fn logical_channel(
        index: u32,
        logical_channel: u32,
        allocation: Decimal64,
    ) -> Self {
        AssignmentCfg {
            index: Some(index),
            allocation: Some(allocation),
            assignment_type: Some(AssignmentType::LogicalChannel),
            logical_channel: Some(logical_channel),
            optical_channel: None,
        }
    }

    pub fn optical_channel(
        index: u32,
        optical_channel: impl Into<String>,
        allocation: Decimal64,
    ) -> Self {
        AssignmentCfg {
            index: Some(index),
            allocation: Some(allocation),
            assignment_type: Some(AssignmentType::OpticalChannel),
            logical_channel: None,
            optical_channel: Some(optical_channel.into()),
        }
    }

    // Builds the assignment as a child of the given logical channel.
    pub fn build(self, channel: u32) -> Result<Assignment, Error> {
        let Some(index) = self.index else {
            return Err(Error::MissingField(
                NodeKind::Assignment,
                format!("{channel}/{UNKNOWN_KEY}"),
                "index",
            ));
        };
        let key = format!("{channel}/{index}");

        let Some(allocation) = self.allocation else {
            return Err(Error::MissingField(
                NodeKind::Assignment,
                key,
                "allocation",
            ));
        };
        if !allocation.is_positive() {
            return Err(Error::InvalidField(
                NodeKind::Assignment,
                key,
                "allocation",
                allocation.to_string(),
            ));
        }

        let Some(assignment_type) = self.assignment_type else {
            return Err(Error::MissingField(
                NodeKind::Assignment,
                key,
                "assignment-type",
            ));
        };
        let target = match assignment_type {
            AssignmentType::LogicalChannel => {
                if let Some(optical_channel) = self.optical_channel {
                    return Err(Error::InvalidField(
                        NodeKind::Assignment,
                        key,
                        "optical-channel",
                        optical_channel,
                    ));
                }
                let Some(logical_channel) = self.logical_channel else {
                    return Err(Error::MissingField(
                        NodeKind::Assignment,
                        key,
                        "logical-channel",
                    ));
                };
                AssignmentTarget::LogicalChannel(logical_channel)
            }
            AssignmentType::OpticalChannel => {
                if let Some(logical_channel) = self.logical_channel {
                    return Err(Error::InvalidField(
                        NodeKind::Assignment,
                        key,
                        "logical-channel",
                        logical_channel.to_string(),
                    ));
                }
                let Some(optical_channel) =
                    self.optical_channel.filter(|name| !name.is_empty())
                else {
                    return Err(Error::MissingField(
                        NodeKind::Assignment,
                        key,
                        "optical-channel",
                    ));
                };
                AssignmentTarget::OpticalChannel(optical_channel)
            }
        };

        Ok(Assignment {
            index,
            allocation,
            target,
        })
    }
}

// ===== impl LogicalChannel =====

impl LogicalChannel {
    // Nominal capacity of the channel, if bounded by a rate class.
    pub fn capacity(&self) -> Option<Decimal64> {
        self.rate_class.map(|rate_class| rate_class.capacity())
    }

    // Sum of all allocations out of this channel. Returns `None` on overflow.
    pub fn allocated(&self) -> Option<Decimal64> {
        self.assignments
            .iter()
            .try_fold(Decimal64::ZERO, |total, assignment| {
                total.checked_add(assignment.allocation)
            })
    }

    pub fn assignment(&self, index: u32) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.index == index)
    }

    // Appends an assignment, keeping the declaration order.
    pub fn add_assignment(
        &mut self,
        assignment: Assignment,
    ) -> Result<(), Error> {
        if self.assignment(assignment.index).is_some() {
            return Err(Error::DuplicateKey(
                NodeKind::Assignment,
                format!("{}/{}", self.index, assignment.index),
            ));
        }
        self.assignments.push(assignment);
        Ok(())
    }
}

// ===== impl Assignment =====

impl Assignment {
    pub fn assignment_type(&self) -> AssignmentType {
        self.target.assignment_type()
    }
}

impl Serialize for Assignment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Assignment", 4)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("allocation", &self.allocation)?;
        state.serialize_field("assignment-type", &self.assignment_type())?;
        match &self.target {
            AssignmentTarget::LogicalChannel(index) => {
                state.serialize_field("logical-channel", index)?;
            }
            AssignmentTarget::OpticalChannel(name) => {
                state.serialize_field("optical-channel", name)?;
            }
        }
        state.end()
    }
}

// ===== impl AssignmentTarget =====

impl AssignmentTarget {
    pub fn assignment_type(&self) -> AssignmentType {
        match self {
            AssignmentTarget::LogicalChannel(_) => {
                AssignmentType::LogicalChannel
            }
            AssignmentTarget::OpticalChannel(_) => {
                AssignmentType::OpticalChannel
            }
        }
    }
}

impl std::fmt::Display for AssignmentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentTarget::LogicalChannel(index) => {
                write!(f, "logical channel {index}")
            }
            AssignmentTarget::OpticalChannel(name) => {
                write!(f, "optical channel {name}")
            }
        }
    }
}
