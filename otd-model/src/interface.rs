//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

use crate::error::{Error, NodeKind, UNKNOWN_KEY};
use crate::types::InterfaceType;

// Interface declaration.
#[derive(Clone, Debug, Default)]
#[derive(Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct InterfaceCfg {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub if_type: Option<InterfaceType>,
    pub enabled: Option<bool>,
    pub description: Option<String>,
}

// Physical port taking part in the device configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Interface {
    pub name: String,
    #[serde(rename = "type")]
    pub if_type: InterfaceType,
    // "true" means the port is in "no shutdown" mode.
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ===== impl InterfaceCfg =====

impl InterfaceCfg {
    pub fn new(name: impl Into<String>, if_type: InterfaceType) -> Self {
        InterfaceCfg {
            name: Some(name.into()),
            if_type: Some(if_type),
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<Interface, Error> {
        let Some(name) = self.name.filter(|name| !name.is_empty()) else {
            return Err(Error::MissingField(
                NodeKind::Interface,
                UNKNOWN_KEY.to_owned(),
                "name",
            ));
        };
        let Some(if_type) = self.if_type else {
            return Err(Error::MissingField(NodeKind::Interface, name, "type"));
        };

        Ok(Interface {
            name,
            if_type,
            enabled: self.enabled.unwrap_or(true),
            description: self.description,
        })
    }
}
