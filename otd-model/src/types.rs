//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::borrow::Cow;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal64;
use crate::yang::{ToYang, TryFromYang};

// Interface media type (iana-if-type identities).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum InterfaceType {
    #[serde(rename = "opticalChannel")]
    OpticalChannel,
    #[serde(rename = "opticalTransport")]
    OpticalTransport,
    #[serde(rename = "ethernetCsmacd")]
    EthernetCsmacd,
}

// Nominal rate of a tributary signal.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum RateClass {
    #[serde(rename = "TRIB_RATE_1G")]
    Trib1G,
    #[serde(rename = "TRIB_RATE_2.5G")]
    Trib2_5G,
    #[serde(rename = "TRIB_RATE_10G")]
    Trib10G,
    #[serde(rename = "TRIB_RATE_40G")]
    Trib40G,
    #[serde(rename = "TRIB_RATE_100G")]
    Trib100G,
    #[serde(rename = "TRIB_RATE_200G")]
    Trib200G,
    #[serde(rename = "TRIB_RATE_400G")]
    Trib400G,
}

// Protocol framing of a tributary signal.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum TribProtocol {
    #[serde(rename = "PROT_1GE")]
    Prot1Ge,
    #[serde(rename = "PROT_10GE_LAN")]
    Prot10GeLan,
    #[serde(rename = "PROT_10GE_WAN")]
    Prot10GeWan,
    #[serde(rename = "PROT_40GE")]
    Prot40Ge,
    #[serde(rename = "PROT_100GE")]
    Prot100Ge,
    #[serde(rename = "PROT_400GE")]
    Prot400Ge,
    #[serde(rename = "PROT_OTU2")]
    ProtOtu2,
    #[serde(rename = "PROT_OTU2E")]
    ProtOtu2e,
    #[serde(rename = "PROT_OTU3")]
    ProtOtu3,
    #[serde(rename = "PROT_OTU4")]
    ProtOtu4,
    #[serde(rename = "PROT_ODU4")]
    ProtOdu4,
    #[serde(rename = "PROT_OTUCN")]
    ProtOtuCn,
}

// Type of a logical channel.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
pub enum LogicalChannelType {
    #[serde(rename = "PROT_ETHERNET")]
    Ethernet,
    #[serde(rename = "PROT_OTN")]
    Otn,
}

// Administrative state of a logical channel.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdminState {
    Enabled,
    Disabled,
    #[serde(rename = "MAINT")]
    Maintenance,
}

// Kind of entity targeted by a logical channel assignment.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentType {
    LogicalChannel,
    OpticalChannel,
}

// Vendor operational mode of an optical channel, identifying its FEC scheme.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum OperationalMode {
    // 7% overhead hard-decision FEC.
    Fec7 = 1,
    // 20% overhead soft-decision FEC.
    Fec20 = 2,
}

// ===== impl InterfaceType =====

impl std::fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterfaceType::OpticalChannel => write!(f, "opticalChannel"),
            InterfaceType::OpticalTransport => write!(f, "opticalTransport"),
            InterfaceType::EthernetCsmacd => write!(f, "ethernetCsmacd"),
        }
    }
}

impl ToYang for InterfaceType {
    fn to_yang(&self) -> Cow<'static, str> {
        format!("ianaift:{self}").into()
    }
}

impl TryFromYang for InterfaceType {
    fn try_from_yang(identity: &str) -> Option<InterfaceType> {
        match identity {
            "ianaift:opticalChannel" => Some(InterfaceType::OpticalChannel),
            "ianaift:opticalTransport" => Some(InterfaceType::OpticalTransport),
            "ianaift:ethernetCsmacd" => Some(InterfaceType::EthernetCsmacd),
            _ => None,
        }
    }
}

// ===== impl RateClass =====

impl RateClass {
    // Nominal capacity, in units of Gbit/s.
    pub fn capacity(&self) -> Decimal64 {
        match self {
            RateClass::Trib1G => Decimal64::from_int(1),
            RateClass::Trib2_5G => Decimal64::new(25, 1).unwrap_or_default(),
            RateClass::Trib10G => Decimal64::from_int(10),
            RateClass::Trib40G => Decimal64::from_int(40),
            RateClass::Trib100G => Decimal64::from_int(100),
            RateClass::Trib200G => Decimal64::from_int(200),
            RateClass::Trib400G => Decimal64::from_int(400),
        }
    }
}

impl std::fmt::Display for RateClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateClass::Trib1G => write!(f, "TRIB_RATE_1G"),
            RateClass::Trib2_5G => write!(f, "TRIB_RATE_2.5G"),
            RateClass::Trib10G => write!(f, "TRIB_RATE_10G"),
            RateClass::Trib40G => write!(f, "TRIB_RATE_40G"),
            RateClass::Trib100G => write!(f, "TRIB_RATE_100G"),
            RateClass::Trib200G => write!(f, "TRIB_RATE_200G"),
            RateClass::Trib400G => write!(f, "TRIB_RATE_400G"),
        }
    }
}

impl ToYang for RateClass {
    fn to_yang(&self) -> Cow<'static, str> {
        format!("oc-opt-types:{self}").into()
    }
}

impl TryFromYang for RateClass {
    fn try_from_yang(identity: &str) -> Option<RateClass> {
        match identity.strip_prefix("oc-opt-types:")? {
            "TRIB_RATE_1G" => Some(RateClass::Trib1G),
            "TRIB_RATE_2.5G" => Some(RateClass::Trib2_5G),
            "TRIB_RATE_10G" => Some(RateClass::Trib10G),
            "TRIB_RATE_40G" => Some(RateClass::Trib40G),
            "TRIB_RATE_100G" => Some(RateClass::Trib100G),
            "TRIB_RATE_200G" => Some(RateClass::Trib200G),
            "TRIB_RATE_400G" => Some(RateClass::Trib400G),
            _ => None,
        }
    }
}

// ===== impl TribProtocol =====

impl TribProtocol {
    // Rate class the protocol is carried at, when fixed.
    pub fn rate_class(&self) -> Option<RateClass> {
        match self {
            TribProtocol::Prot1Ge => Some(RateClass::Trib1G),
            TribProtocol::Prot10GeLan
            | TribProtocol::Prot10GeWan
            | TribProtocol::ProtOtu2
            | TribProtocol::ProtOtu2e => Some(RateClass::Trib10G),
            TribProtocol::Prot40Ge | TribProtocol::ProtOtu3 => {
                Some(RateClass::Trib40G)
            }
            TribProtocol::Prot100Ge
            | TribProtocol::ProtOtu4
            | TribProtocol::ProtOdu4 => Some(RateClass::Trib100G),
            TribProtocol::Prot400Ge => Some(RateClass::Trib400G),
            TribProtocol::ProtOtuCn => None,
        }
    }

    pub fn is_ethernet(&self) -> bool {
        matches!(
            self,
            TribProtocol::Prot1Ge
                | TribProtocol::Prot10GeLan
                | TribProtocol::Prot10GeWan
                | TribProtocol::Prot40Ge
                | TribProtocol::Prot100Ge
                | TribProtocol::Prot400Ge
        )
    }

    pub fn is_otn(&self) -> bool {
        !self.is_ethernet()
    }
}

impl std::fmt::Display for TribProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TribProtocol::Prot1Ge => write!(f, "PROT_1GE"),
            TribProtocol::Prot10GeLan => write!(f, "PROT_10GE_LAN"),
            TribProtocol::Prot10GeWan => write!(f, "PROT_10GE_WAN"),
            TribProtocol::Prot40Ge => write!(f, "PROT_40GE"),
            TribProtocol::Prot100Ge => write!(f, "PROT_100GE"),
            TribProtocol::Prot400Ge => write!(f, "PROT_400GE"),
            TribProtocol::ProtOtu2 => write!(f, "PROT_OTU2"),
            TribProtocol::ProtOtu2e => write!(f, "PROT_OTU2E"),
            TribProtocol::ProtOtu3 => write!(f, "PROT_OTU3"),
            TribProtocol::ProtOtu4 => write!(f, "PROT_OTU4"),
            TribProtocol::ProtOdu4 => write!(f, "PROT_ODU4"),
            TribProtocol::ProtOtuCn => write!(f, "PROT_OTUCN"),
        }
    }
}

impl ToYang for TribProtocol {
    fn to_yang(&self) -> Cow<'static, str> {
        format!("oc-opt-types:{self}").into()
    }
}

impl TryFromYang for TribProtocol {
    fn try_from_yang(identity: &str) -> Option<TribProtocol> {
        match identity.strip_prefix("oc-opt-types:")? {
            "PROT_1GE" => Some(TribProtocol::Prot1Ge),
            "PROT_10GE_LAN" => Some(TribProtocol::Prot10GeLan),
            "PROT_10GE_WAN" => Some(TribProtocol::Prot10GeWan),
            "PROT_40GE" => Some(TribProtocol::Prot40Ge),
            "PROT_100GE" => Some(TribProtocol::Prot100Ge),
            "PROT_400GE" => Some(TribProtocol::Prot400Ge),
            "PROT_OTU2" => Some(TribProtocol::ProtOtu2),
            "PROT_OTU2E" => Some(TribProtocol::ProtOtu2e),
            "PROT_OTU3" => Some(TribProtocol::ProtOtu3),
            "PROT_OTU4" => Some(TribProtocol::ProtOtu4),
            "PROT_ODU4" => Some(TribProtocol::ProtOdu4),
            "PROT_OTUCN" => Some(TribProtocol::ProtOtuCn),
            _ => None,
        }
    }
}

// ===== impl LogicalChannelType =====

impl std::fmt::Display for LogicalChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalChannelType::Ethernet => write!(f, "PROT_ETHERNET"),
            LogicalChannelType::Otn => write!(f, "PROT_OTN"),
        }
    }
}

impl ToYang for LogicalChannelType {
    fn to_yang(&self) -> Cow<'static, str> {
        format!("oc-opt-types:{self}").into()
    }
}

impl TryFromYang for LogicalChannelType {
    fn try_from_yang(identity: &str) -> Option<LogicalChannelType> {
        match identity {
            "oc-opt-types:PROT_ETHERNET" => Some(LogicalChannelType::Ethernet),
            "oc-opt-types:PROT_OTN" => Some(LogicalChannelType::Otn),
            _ => None,
        }
    }
}

// ===== impl AdminState =====

impl ToYang for AdminState {
    fn to_yang(&self) -> Cow<'static, str> {
        match self {
            AdminState::Enabled => "ENABLED".into(),
            AdminState::Disabled => "DISABLED".into(),
            AdminState::Maintenance => "MAINT".into(),
        }
    }
}

impl TryFromYang for AdminState {
    fn try_from_yang(value: &str) -> Option<AdminState> {
        match value {
            "ENABLED" => Some(AdminState::Enabled),
            "DISABLED" => Some(AdminState::Disabled),
            "MAINT" => Some(AdminState::Maintenance),
            _ => None,
        }
    }
}

// ===== impl AssignmentType =====

impl ToYang for AssignmentType {
    fn to_yang(&self) -> Cow<'static, str> {
        match self {
            AssignmentType::LogicalChannel => "LOGICAL_CHANNEL".into(),
            AssignmentType::OpticalChannel => "OPTICAL_CHANNEL".into(),
        }
    }
}

impl TryFromYang for AssignmentType {
    fn try_from_yang(value: &str) -> Option<AssignmentType> {
        match value {
            "LOGICAL_CHANNEL" => Some(AssignmentType::LogicalChannel),
            "OPTICAL_CHANNEL" => Some(AssignmentType::OpticalChannel),
            _ => None,
        }
    }
}

// ===== impl OperationalMode =====

impl OperationalMode {
    pub fn fec_overhead(&self) -> u8 {
        match self {
            OperationalMode::Fec7 => 7,
            OperationalMode::Fec20 => 20,
        }
    }
}

impl Default for OperationalMode {
    fn default() -> OperationalMode {
        OperationalMode::Fec20
    }
}

impl TryFrom<u16> for OperationalMode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        OperationalMode::from_u16(value)
            .ok_or_else(|| format!("unknown operational mode: {value}"))
    }
}

impl From<OperationalMode> for u16 {
    fn from(mode: OperationalMode) -> u16 {
        mode.to_u16().unwrap_or_default()
    }
}

impl ToYang for OperationalMode {
    fn to_yang(&self) -> Cow<'static, str> {
        u16::from(*self).to_string().into()
    }
}

impl TryFromYang for OperationalMode {
    fn try_from_yang(value: &str) -> Option<OperationalMode> {
        value.parse::<u16>().ok().and_then(OperationalMode::from_u16)
    }
}
