//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::io::Write;

use ::xml::writer::{EmitterConfig, EventWriter, XmlEvent};
use otd_model::yang::{
    NS_INTERFACES, NS_PLATFORM, NS_TERMINAL_DEVICE, identity_namespace,
};
use otd_model::{
    Assignment, AssignmentTarget, Interface, LogicalChannel, OpticalChannel,
    ToYang,
};

use crate::error::TransportError;
use crate::transport::Section;

type Result<T> = std::result::Result<T, TransportError>;

// Thin layer over the xml-rs event writer.
struct Encoder<W: Write> {
    writer: EventWriter<W>,
}

// ===== impl Encoder =====

impl<W: Write> Encoder<W> {
    fn new(sink: W) -> Self {
        let writer = EmitterConfig::new()
            .perform_indent(true)
            .write_document_declaration(false)
            .create_writer(sink);
        Encoder { writer }
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.writer.write(XmlEvent::start_element(name))?;
        Ok(())
    }

    // Starts an element that switches to another module namespace.
    fn start_ns(&mut self, name: &str, ns: &str) -> Result<()> {
        self.writer
            .write(XmlEvent::start_element(name).default_ns(ns))?;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.writer.write(XmlEvent::end_element())?;
        Ok(())
    }

    fn leaf(&mut self, name: &str, value: &str) -> Result<()> {
        self.start(name)?;
        self.writer.write(XmlEvent::characters(value))?;
        self.end()
    }

    // Identity leaves declare the namespace of their prefix.
    fn identity(&mut self, name: &str, identity: &str) -> Result<()> {
        let mut element = XmlEvent::start_element(name);
        if let Some((prefix, ns)) = identity_namespace(identity) {
            element = element.ns(prefix, ns);
        }
        self.writer.write(element)?;
        self.writer.write(XmlEvent::characters(identity))?;
        self.end()
    }

    fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

// ===== global functions =====

pub(crate) fn encode(section: Section<'_>) -> Result<String> {
    let mut encoder = Encoder::new(Vec::new());
    match section {
        Section::Interfaces(interfaces) => {
            encoder.start_ns("interfaces", NS_INTERFACES)?;
            for iface in interfaces {
                encode_interface(&mut encoder, iface)?;
            }
            encoder.end()?;
        }
        Section::TerminalDevice(channels) => {
            encoder.start_ns("terminal-device", NS_TERMINAL_DEVICE)?;
            encoder.start("logical-channels")?;
            for channel in channels {
                encode_logical_channel(&mut encoder, channel)?;
            }
            encoder.end()?;
            encoder.end()?;
        }
        Section::Components(components) => {
            encoder.start_ns("components", NS_PLATFORM)?;
            for och in components {
                encode_optical_channel(&mut encoder, och)?;
            }
            encoder.end()?;
        }
    }

    String::from_utf8(encoder.into_inner())
        .map_err(|error| TransportError::Encode(error.to_string()))
}

fn encode_interface<W: Write>(
    encoder: &mut Encoder<W>,
    iface: &Interface,
) -> Result<()> {
    encoder.start("interface")?;
    encoder.leaf("name", &iface.name)?;
    encoder.start("config")?;
    encoder.leaf("name", &iface.name)?;
    encoder.identity("type", &iface.if_type.to_yang())?;
    encoder.leaf("enabled", &iface.enabled.to_string())?;
    if let Some(description) = &iface.description {
        encoder.leaf("description", description)?;
    }
    encoder.end()?;
    encoder.end()
}

fn encode_logical_channel<W: Write>(
    encoder: &mut Encoder<W>,
    channel: &LogicalChannel,
) -> Result<()> {
    let index = channel.index.to_string();
    encoder.start("channel")?;
    encoder.leaf("index", &index)?;
    encoder.start("config")?;
    encoder.leaf("index", &index)?;
    if let Some(description) = &channel.description {
        encoder.leaf("description", description)?;
    }
    if let Some(admin_state) = &channel.admin_state {
        encoder.leaf("admin-state", &admin_state.to_yang())?;
    }
    if let Some(rate_class) = &channel.rate_class {
        encoder.identity("rate-class", &rate_class.to_yang())?;
    }
    if let Some(trib_protocol) = &channel.trib_protocol {
        encoder.identity("trib-protocol", &trib_protocol.to_yang())?;
    }
    encoder.identity(
        "logical-channel-type",
        &channel.logical_channel_type.to_yang(),
    )?;
    encoder.end()?;

    if let Some(ingress) = &channel.ingress {
        encoder.start("ingress")?;
        encoder.start("config")?;
        encoder.leaf("transceiver", &ingress.transceiver)?;
        for lane in &ingress.physical_channels {
            encoder.leaf("physical-channel", &lane.to_string())?;
        }
        encoder.end()?;
        encoder.end()?;
    }

    if !channel.assignments.is_empty() {
        encoder.start("logical-channel-assignments")?;
        for assignment in &channel.assignments {
            encode_assignment(encoder, assignment)?;
        }
        encoder.end()?;
    }

    encoder.end()
}

fn encode_assignment<W: Write>(
    encoder: &mut Encoder<W>,
    assignment: &Assignment,
) -> Result<()> {
    let index = assignment.index.to_string();
    encoder.start("assignment")?;
    encoder.leaf("index", &index)?;
    encoder.start("config")?;
    encoder.leaf("index", &index)?;
    encoder.leaf("allocation", &assignment.allocation.to_string())?;
    encoder.leaf("assignment-type", &assignment.assignment_type().to_yang())?;
    match &assignment.target {
        AssignmentTarget::LogicalChannel(index) => {
            encoder.leaf("logical-channel", &index.to_string())?;
        }
        AssignmentTarget::OpticalChannel(name) => {
            encoder.leaf("optical-channel", name)?;
        }
    }
    encoder.end()?;
    encoder.end()
}

fn encode_optical_channel<W: Write>(
    encoder: &mut Encoder<W>,
    och: &OpticalChannel,
) -> Result<()> {
    encoder.start("component")?;
    encoder.leaf("name", &och.name)?;
    encoder.start("config")?;
    encoder.leaf("name", &och.name)?;
    encoder.end()?;
    encoder.start_ns("optical-channel", NS_TERMINAL_DEVICE)?;
    encoder.start("config")?;
    encoder.leaf("frequency", &och.frequency.to_string())?;
    encoder.leaf(
        "target-output-power",
        &och.target_output_power.to_string(),
    )?;
    encoder.leaf("operational-mode", &och.operational_mode.to_yang())?;
    encoder.leaf("line-port", &och.line_port)?;
    encoder.end()?;
    encoder.end()?;
    encoder.end()
}
