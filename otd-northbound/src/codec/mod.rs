//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod json;
mod xml;

use std::str::FromStr;

use otd_builder::ConfigurationGraph;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::transport::Section;

// Wire format of encoded configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Xml,
    Json,
}

// ===== impl DataFormat =====

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Xml => write!(f, "xml"),
            DataFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(DataFormat::Xml),
            "json" => Ok(DataFormat::Json),
            _ => Err(format!("unknown data format: {s}")),
        }
    }
}

// ===== global functions =====

// Encodes one configuration section as an OpenConfig document.
pub fn encode(
    section: Section<'_>,
    format: DataFormat,
) -> Result<String, TransportError> {
    match format {
        DataFormat::Xml => xml::encode(section),
        DataFormat::Json => json::encode(section),
    }
}

// Encodes all sections of a graph, in push order.
pub fn encode_graph(
    graph: &ConfigurationGraph,
    format: DataFormat,
) -> Result<Vec<(&'static str, String)>, TransportError> {
    Section::all(graph)
        .into_iter()
        .map(|section| Ok((section.name(), encode(section, format)?)))
        .collect()
}
