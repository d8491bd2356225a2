//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_builder::{Error, *};
use otd_model::*;

const LINE_PORT: &str = "Optics0/0/0/6";
const OCH: &str = "0/0-OpticalChannel0/0/0/6";

pub(crate) fn client(index: u32, allocation: i64) -> LogicalChannelCfg {
    LogicalChannelCfg {
        rate_class: Some(RateClass::Trib10G),
        trib_protocol: Some(TribProtocol::Prot10GeLan),
        ingress: Some(IngressCfg::new("0/0-Optics0/0/0/0", vec![1])),
        assignments: vec![AssignmentCfg::logical_channel(
            1,
            200,
            Decimal64::from_int(allocation),
        )],
        ..LogicalChannelCfg::new(index, LogicalChannelType::Ethernet)
    }
}

pub(crate) fn line(allocation: i64) -> LogicalChannelCfg {
    LogicalChannelCfg {
        admin_state: Some(AdminState::Enabled),
        assignments: vec![AssignmentCfg::optical_channel(
            1,
            OCH,
            Decimal64::from_int(allocation),
        )],
        ..LogicalChannelCfg::new(200, LogicalChannelType::Otn)
    }
}

pub(crate) fn builder() -> GraphBuilder {
    let mut builder = GraphBuilder::new();
    builder
        .interface(InterfaceCfg::new(LINE_PORT, InterfaceType::OpticalChannel))
        .logical_channel(client(100, 10))
        .logical_channel(client(101, 10))
        .logical_channel(line(20))
        .optical_channel(OpticalChannelCfg::new(OCH, LINE_PORT, 191_300_000));
    builder
}

fn assemble(
    builder: GraphBuilder,
) -> Result<ConfigurationGraph, AssemblyError> {
    builder.assemble(&OpenConfigCatalog, &AssemblyOptions::default())
}

#[test]
fn test_assemble_small_graph() {
    let graph = assemble(builder()).unwrap();
    assert_eq!(graph.interfaces().len(), 1);
    assert_eq!(graph.logical_channels().len(), 3);
    assert_eq!(graph.optical_channels().len(), 1);
    // 5 nodes plus 3 assignments.
    assert_eq!(graph.len(), 8);
    assert_eq!(
        graph.traversal(),
        &[
            NodeKey::Interface(LINE_PORT.to_owned()),
            NodeKey::LogicalChannel(100),
            NodeKey::Assignment(100, 1),
            NodeKey::LogicalChannel(101),
            NodeKey::Assignment(101, 1),
            NodeKey::LogicalChannel(200),
            NodeKey::Assignment(200, 1),
            NodeKey::OpticalChannel(OCH.to_owned()),
        ]
    );
    assert_eq!(graph.position(&NodeKey::LogicalChannel(200)), Some(5));
    assert_eq!(graph.position(&NodeKey::LogicalChannel(300)), None);
}

#[test]
fn test_assemble_links() {
    let graph = assemble(builder()).unwrap();
    let source = NodeKey::Assignment(200, 1);
    let links = graph.links_from(&source).collect::<Vec<_>>();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].target, NodeKey::OpticalChannel(OCH.to_owned()));

    let source = NodeKey::OpticalChannel(OCH.to_owned());
    let link = graph.links_from(&source).next().unwrap();
    assert_eq!(link.target, NodeKey::Interface(LINE_PORT.to_owned()));

    // Every link target can be looked up.
    for link in graph.links() {
        assert!(graph.node(&link.target).is_some());
        assert!(graph.node(&link.source).is_some());
    }
}

#[test]
fn test_assemble_deterministic() {
    let a = assemble(builder()).unwrap();
    let b = assemble(builder()).unwrap();
    assert_eq!(a.traversal(), b.traversal());
    assert_eq!(a.links(), b.links());
    assert_eq!(a.logical_channels(), b.logical_channels());
}

#[test]
fn test_assemble_incomplete_node() {
    let mut builder = builder();
    builder.logical_channel(LogicalChannelCfg::default());
    let error = assemble(builder).unwrap_err();
    assert_eq!(error.stage, Stage::LogicalChannels);
    assert!(matches!(
        error.error,
        Error::IncompleteNode(otd_model::Error::MissingField(
            NodeKind::LogicalChannel,
            _,
            "index"
        ))
    ));
}

#[test]
fn test_assemble_incomplete_assignment() {
    let mut builder = builder();
    let mut channel = client(102, 10);
    channel.assignments[0].allocation = None;
    builder.logical_channel(channel);
    let error = assemble(builder).unwrap_err();
    assert_eq!(error.stage, Stage::Assignments);
    assert!(matches!(
        error.error,
        Error::IncompleteNode(otd_model::Error::MissingField(
            NodeKind::Assignment,
            _,
            "allocation"
        ))
    ));
}

#[test]
fn test_assemble_duplicate_index() {
    let mut builder = builder();
    builder.logical_channel(client(100, 10));
    let error = assemble(builder).unwrap_err();
    assert_eq!(error.stage, Stage::LogicalChannels);
    assert_eq!(error.error, Error::IndexCollision(100));
}

#[test]
fn test_assemble_claims_allocated_index() {
    let mut builder = GraphBuilder::new();
    let indices = builder
        .allocate_indices(&StridePolicy::new(100, 10, 1, 2))
        .unwrap();
    assert_eq!(indices, vec![100, 101]);
    builder.reserve_index(200).unwrap();
    builder
        .interface(InterfaceCfg::new(LINE_PORT, InterfaceType::OpticalChannel))
        .logical_channel(client(100, 10))
        .logical_channel(client(101, 10))
        .logical_channel(line(20))
        .optical_channel(OpticalChannelCfg::new(OCH, LINE_PORT, 191_300_000));
    assert_eq!(builder.allocator().len(), 3);
    assert!(assemble(builder).is_ok());
}

#[test]
fn test_assemble_duplicate_interface() {
    let mut builder = builder();
    builder.interface(InterfaceCfg::new(
        LINE_PORT,
        InterfaceType::OpticalChannel,
    ));
    let error = assemble(builder).unwrap_err();
    assert_eq!(error.stage, Stage::Interfaces);
    assert_eq!(
        error.error,
        Error::DuplicateNode(NodeKey::Interface(LINE_PORT.to_owned()))
    );
}

#[test]
fn test_assemble_duplicate_assignment() {
    let mut builder = builder();
    let mut channel = client(102, 5);
    channel.assignments.push(AssignmentCfg::logical_channel(
        1,
        200,
        Decimal64::from_int(5),
    ));
    builder.logical_channel(channel);
    let error = assemble(builder).unwrap_err();
    assert_eq!(error.stage, Stage::Assignments);
    assert_eq!(
        error.error,
        Error::IncompleteNode(otd_model::Error::DuplicateKey(
            NodeKind::Assignment,
            "102/1".to_owned()
        ))
    );
}

#[test]
fn test_assemble_schema_violation() {
    let mut builder = builder();
    let mut channel = client(102, 10);
    channel.trib_protocol = Some(TribProtocol::Prot100Ge);
    builder.logical_channel(channel);
    let error = assemble(builder).unwrap_err();
    assert_eq!(error.stage, Stage::LogicalChannels);
    let Error::SchemaViolation(violation) = error.error else {
        panic!("unexpected error: {:?}", error.error);
    };
    assert_eq!(violation.node, NodeKey::LogicalChannel(102));
}

#[test]
fn test_assemble_permissive_catalog() {
    let mut builder = builder();
    let mut channel = client(102, 10);
    channel.trib_protocol = Some(TribProtocol::Prot100Ge);
    builder.logical_channel(channel);
    let graph = builder
        .assemble(&PermissiveCatalog, &AssemblyOptions::default())
        .unwrap();
    assert!(graph.logical_channel(102).is_some());
}

#[test]
fn test_assemble_error_display() {
    let mut builder = builder();
    builder.logical_channel(client(100, 10));
    let error = assemble(builder).unwrap_err();
    assert_eq!(
        error.to_string(),
        "graph assembly failed (logical channels)"
    );
    let source = std::error::Error::source(&error).unwrap();
    assert_eq!(
        source.to_string(),
        "logical channel index 100 already allocated"
    );
}
