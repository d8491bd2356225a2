//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::str::FromStr;

use otd_model::{
    AdminState, AssignmentCfg, Decimal64, IngressCfg, InterfaceCfg,
    InterfaceType, LogicalChannelCfg, LogicalChannelType, OperationalMode,
    OpticalChannelCfg, RateClass, TribProtocol,
};
use serde::{Deserialize, Serialize};

use crate::allocator::StridePolicy;
use crate::assembler::{AssemblyOptions, GraphBuilder};
use crate::catalog::SchemaCatalog;
use crate::error::{AssemblyError, Error, Stage};
use crate::graph::ConfigurationGraph;

// Client/line mapping ratio of a line card slice.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum SliceMode {
    #[default]
    #[serde(rename = "20x10GE-1x200G")]
    Slice20x10Ge,
    #[serde(rename = "2x100GE-1x200G")]
    Slice2x100Ge,
    #[serde(rename = "custom")]
    Custom,
}

// Fixed parameters of a preset slice mode.
#[derive(Clone, Copy, Debug)]
struct SlicePreset {
    ports: usize,
    lanes: u32,
    rate: RateClass,
    protocol: TribProtocol,
}

// Declarative terminal device topology: client ports multiplexed into one
// OTN line channel carried over one optical channel.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Topology {
    pub name: String,
    pub mode: SliceMode,
    pub line_port: String,
    // Client transceiver names, one per port.
    pub clients: Vec<String>,
    pub lanes_per_port: Option<u32>,
    pub base_index: u32,
    pub stride: u32,
    pub client_rate: Option<RateClass>,
    pub client_protocol: Option<TribProtocol>,
    pub line_index: u32,
    pub optical_channel: String,
    pub operational_mode: OperationalMode,
    // In dBm.
    pub target_output_power: Decimal64,
    // In MHz.
    pub frequency: u64,
}

// ===== impl SliceMode =====

impl SliceMode {
    fn preset(&self) -> Option<SlicePreset> {
        match self {
            SliceMode::Slice20x10Ge => Some(SlicePreset {
                ports: 5,
                lanes: 4,
                rate: RateClass::Trib10G,
                protocol: TribProtocol::Prot10GeLan,
            }),
            SliceMode::Slice2x100Ge => Some(SlicePreset {
                ports: 2,
                lanes: 1,
                rate: RateClass::Trib100G,
                protocol: TribProtocol::Prot100Ge,
            }),
            SliceMode::Custom => None,
        }
    }
}

impl std::fmt::Display for SliceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliceMode::Slice20x10Ge => write!(f, "20x10GE-1x200G"),
            SliceMode::Slice2x100Ge => write!(f, "2x100GE-1x200G"),
            SliceMode::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for SliceMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "20x10GE-1x200G" => Ok(SliceMode::Slice20x10Ge),
            "2x100GE-1x200G" => Ok(SliceMode::Slice2x100Ge),
            "custom" => Ok(SliceMode::Custom),
            _ => Err(Error::InvalidTopology(format!("unknown slice mode {s}"))),
        }
    }
}

// ===== impl Topology =====

impl Topology {
    // Index layout of the client channels.
    pub fn client_policy(&self) -> Result<StridePolicy, Error> {
        let (ports, lanes, ..) = self.client_params()?;
        let ports = u32::try_from(ports).map_err(|_| {
            Error::InvalidTopology(format!("too many clients ({ports})"))
        })?;
        Ok(StridePolicy::new(self.base_index, self.stride, ports, lanes))
    }

    // Declares all nodes of the topology on a new graph builder.
    pub fn builder(&self) -> Result<GraphBuilder, AssemblyError> {
        let (_, lanes, rate, protocol) = self
            .client_params()
            .map_err(|error| AssemblyError::new(Stage::Allocation, error))?;
        let policy = self
            .client_policy()
            .map_err(|error| AssemblyError::new(Stage::Allocation, error))?;

        let mut builder = GraphBuilder::new();
        let indices = builder
            .allocate_indices(&policy)
            .map_err(|error| AssemblyError::new(Stage::Allocation, error))?;
        builder
            .reserve_index(self.line_index)
            .map_err(|error| AssemblyError::new(Stage::Allocation, error))?;

        builder.interface(InterfaceCfg::new(
            self.line_port.clone(),
            InterfaceType::OpticalChannel,
        ));

        // Client channels, each feeding a share of the line channel.
        let allocation = rate.capacity();
        let lanes = lanes as usize;
        for (pos, index) in indices.iter().enumerate() {
            let transceiver = &self.clients[pos / lanes];
            let lane = (pos % lanes + 1) as u16;
            let mut channel =
                LogicalChannelCfg::new(*index, LogicalChannelType::Ethernet);
            channel.rate_class = Some(rate);
            channel.trib_protocol = Some(protocol);
            channel.ingress =
                Some(IngressCfg::new(transceiver.clone(), vec![lane]));
            channel.assignments.push(AssignmentCfg::logical_channel(
                1,
                self.line_index,
                allocation,
            ));
            builder.logical_channel(channel);
        }

        // Line channel.
        let line_allocation = indices
            .iter()
            .try_fold(Decimal64::ZERO, |total, _| {
                total.checked_add(allocation)
            })
            .ok_or_else(|| {
                let error = Error::InvalidTopology(
                    "line allocation overflow".to_owned(),
                );
                AssemblyError::new(Stage::Allocation, error)
            })?;
        let mut line =
            LogicalChannelCfg::new(self.line_index, LogicalChannelType::Otn);
        line.admin_state = Some(AdminState::Enabled);
        line.assignments.push(AssignmentCfg::optical_channel(
            1,
            self.optical_channel.clone(),
            line_allocation,
        ));
        builder.logical_channel(line);

        let mut och = OpticalChannelCfg::new(
            self.optical_channel.clone(),
            self.line_port.clone(),
            self.frequency,
        );
        och.operational_mode = Some(self.operational_mode);
        och.target_output_power = Some(self.target_output_power);
        builder.optical_channel(och);

        Ok(builder)
    }

    pub fn build_graph(
        &self,
        catalog: &dyn SchemaCatalog,
        options: &AssemblyOptions,
    ) -> Result<ConfigurationGraph, AssemblyError> {
        self.builder()?.assemble(catalog, options)
    }

    // Resolves the client parameters from the slice mode and the explicit
    // settings, which must agree with the preset when both are present.
    fn client_params(
        &self,
    ) -> Result<(usize, u32, RateClass, TribProtocol), Error> {
        let ports = self.clients.len();
        let (lanes, rate, protocol) = match self.mode.preset() {
            Some(preset) => {
                if ports != preset.ports {
                    return Err(Error::InvalidTopology(format!(
                        "{} needs {} clients, got {}",
                        self.mode, preset.ports, ports
                    )));
                }
                let lanes = agree(
                    self.mode,
                    "lanes",
                    self.lanes_per_port,
                    preset.lanes,
                )?;
                let rate = agree(
                    self.mode,
                    "client rate",
                    self.client_rate,
                    preset.rate,
                )?;
                let protocol = agree(
                    self.mode,
                    "client protocol",
                    self.client_protocol,
                    preset.protocol,
                )?;
                (lanes, rate, protocol)
            }
            None => {
                let missing = |what: &str| {
                    Error::InvalidTopology(format!("custom mode needs {what}"))
                };
                let lanes = self
                    .lanes_per_port
                    .ok_or_else(|| missing("lanes-per-port"))?;
                let rate =
                    self.client_rate.ok_or_else(|| missing("client-rate"))?;
                let protocol = self
                    .client_protocol
                    .ok_or_else(|| missing("client-protocol"))?;
                (lanes, rate, protocol)
            }
        };
        if ports == 0 || lanes == 0 {
            return Err(Error::InvalidTopology(
                "no client ports or lanes".to_owned(),
            ));
        }
        if lanes > u32::from(u16::MAX) {
            return Err(Error::InvalidTopology(format!(
                "too many lanes per port ({lanes})"
            )));
        }

        Ok((ports, lanes, rate, protocol))
    }
}

impl Default for Topology {
    fn default() -> Topology {
        Topology {
            name: "default".to_owned(),
            mode: SliceMode::Slice20x10Ge,
            line_port: "Optics0/0/0/6".to_owned(),
            clients: (0..5)
                .map(|port| format!("0/0-Optics0/0/0/{port}"))
                .collect(),
            lanes_per_port: None,
            base_index: 100,
            stride: 10,
            client_rate: None,
            client_protocol: None,
            line_index: 200,
            optical_channel: "0/0-OpticalChannel0/0/0/6".to_owned(),
            operational_mode: OperationalMode::Fec20,
            target_output_power: Decimal64::ZERO,
            frequency: 191_300_000,
        }
    }
}

// ===== helper functions =====

fn agree<T>(
    mode: SliceMode,
    what: &str,
    value: Option<T>,
    preset: T,
) -> Result<T, Error>
where
    T: Copy + PartialEq + std::fmt::Display,
{
    match value {
        Some(value) if value != preset => Err(Error::InvalidTopology(format!(
            "{mode} uses {what} {preset}, got {value}"
        ))),
        _ => Ok(preset),
    }
}
