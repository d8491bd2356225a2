//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

use crate::decimal::Decimal64;
use crate::error::{Error, NodeKind, UNKNOWN_KEY};
use crate::types::OperationalMode;

// Optical channel component declaration.
#[derive(Clone, Debug, Default)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct OpticalChannelCfg {
    pub name: Option<String>,
    pub line_port: Option<String>,
    pub operational_mode: Option<OperationalMode>,
    pub target_output_power: Option<Decimal64>,
    pub frequency: Option<u64>,
}

// Line-side optical channel: wavelength, launch power and FEC scheme.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpticalChannel {
    pub name: String,
    pub line_port: String,
    pub operational_mode: OperationalMode,
    // In dBm, with two fraction digits.
    pub target_output_power: Decimal64,
    // In MHz.
    pub frequency: u64,
}

// ===== impl OpticalChannelCfg =====

impl OpticalChannelCfg {
    pub fn new(
        name: impl Into<String>,
        line_port: impl Into<String>,
        frequency: u64,
    ) -> Self {
        OpticalChannelCfg {
            name: Some(name.into()),
            line_port: Some(line_port.into()),
            frequency: Some(frequency),
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<OpticalChannel, Error> {
        let Some(name) = self.name.filter(|name| !name.is_empty()) else {
            return Err(Error::MissingField(
                NodeKind::OpticalChannel,
                UNKNOWN_KEY.to_owned(),
                "name",
            ));
        };
        let Some(line_port) = self.line_port.filter(|port| !port.is_empty())
        else {
            return Err(Error::MissingField(
                NodeKind::OpticalChannel,
                name,
                "line-port",
            ));
        };
        let frequency = match self.frequency {
            Some(0) => {
                return Err(Error::InvalidField(
                    NodeKind::OpticalChannel,
                    name,
                    "frequency",
                    "0".to_owned(),
                ));
            }
            Some(frequency) => frequency,
            None => {
                return Err(Error::MissingField(
                    NodeKind::OpticalChannel,
                    name,
                    "frequency",
                ));
            }
        };

        Ok(OpticalChannel {
            name,
            line_port,
            operational_mode: self.operational_mode.unwrap_or_default(),
            target_output_power: self.target_output_power.unwrap_or_default(),
            frequency,
        })
    }
}
