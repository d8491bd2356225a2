//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::LazyLock as Lazy;

use maplit::btreemap;
use otd_builder::{Error, *};
use otd_model::*;

static GRAPH: Lazy<ConfigurationGraph> = Lazy::new(|| {
    Topology::default()
        .build_graph(&OpenConfigCatalog, &AssemblyOptions::default())
        .unwrap()
});

#[test]
fn test_default_topology_indices() {
    let indices = GRAPH
        .logical_channels()
        .iter()
        .map(|channel| channel.index)
        .collect::<Vec<_>>();
    let mut expected = vec![];
    for port in 0..5 {
        for lane in 0..4 {
            expected.push(100 + port * 10 + lane);
        }
    }
    expected.push(200);
    assert_eq!(indices, expected);
}

#[test]
fn test_default_topology_clients() {
    let transceivers = btreemap! {
        100 => ("0/0-Optics0/0/0/0", 1),
        103 => ("0/0-Optics0/0/0/0", 4),
        110 => ("0/0-Optics0/0/0/1", 1),
        142 => ("0/0-Optics0/0/0/4", 3),
    };
    for (index, (transceiver, lane)) in transceivers {
        let channel = GRAPH.logical_channel(index).unwrap();
        assert_eq!(channel.logical_channel_type, LogicalChannelType::Ethernet);
        assert_eq!(channel.rate_class, Some(RateClass::Trib10G));
        assert_eq!(channel.trib_protocol, Some(TribProtocol::Prot10GeLan));
        let ingress = channel.ingress.as_ref().unwrap();
        assert_eq!(ingress.transceiver, transceiver);
        assert_eq!(ingress.physical_channels, vec![lane]);
        let assignment = channel.assignment(1).unwrap();
        assert_eq!(assignment.allocation, Decimal64::from_int(10));
        assert_eq!(assignment.target, AssignmentTarget::LogicalChannel(200));
    }
}

#[test]
fn test_default_topology_line() {
    let line = GRAPH.logical_channel(200).unwrap();
    assert_eq!(line.logical_channel_type, LogicalChannelType::Otn);
    assert_eq!(line.admin_state, Some(AdminState::Enabled));
    assert_eq!(line.rate_class, None);
    let assignment = line.assignment(1).unwrap();
    assert_eq!(assignment.allocation, Decimal64::from_int(200));
    assert_eq!(
        assignment.target,
        AssignmentTarget::OpticalChannel("0/0-OpticalChannel0/0/0/6".to_owned())
    );

    let och = GRAPH.optical_channel("0/0-OpticalChannel0/0/0/6").unwrap();
    assert_eq!(och.line_port, "Optics0/0/0/6");
    assert_eq!(och.operational_mode, OperationalMode::Fec20);
    assert_eq!(och.target_output_power, Decimal64::ZERO);
    assert_eq!(och.frequency, 191_300_000);

    let iface = GRAPH.interface("Optics0/0/0/6").unwrap();
    assert_eq!(iface.if_type, InterfaceType::OpticalChannel);
    assert!(iface.enabled);
}

#[test]
fn test_default_topology_aggregate() {
    // The preset fills the line exactly.
    let topology = Topology::default();
    let options = AssemblyOptions {
        aggregate_capacity: true,
        ..Default::default()
    };
    assert!(topology.build_graph(&OpenConfigCatalog, &options).is_ok());
}

#[test]
fn test_2x100ge_topology() {
    let topology = Topology {
        mode: SliceMode::Slice2x100Ge,
        clients: vec![
            "0/0-Optics0/0/0/0".to_owned(),
            "0/0-Optics0/0/0/1".to_owned(),
        ],
        ..Default::default()
    };
    let graph = topology
        .build_graph(&OpenConfigCatalog, &AssemblyOptions::default())
        .unwrap();
    let indices = graph
        .logical_channels()
        .iter()
        .map(|channel| channel.index)
        .collect::<Vec<_>>();
    assert_eq!(indices, vec![100, 110, 200]);
    let client = graph.logical_channel(110).unwrap();
    assert_eq!(client.trib_protocol, Some(TribProtocol::Prot100Ge));
    let line = graph.logical_channel(200).unwrap();
    assert_eq!(line.assignments[0].allocation, Decimal64::from_int(200));
}

#[test]
fn test_custom_topology() {
    let topology = Topology {
        mode: SliceMode::Custom,
        clients: vec!["0/0-Optics0/0/0/0".to_owned()],
        lanes_per_port: Some(4),
        client_rate: Some(RateClass::Trib40G),
        client_protocol: Some(TribProtocol::Prot40Ge),
        base_index: 10,
        stride: 4,
        ..Default::default()
    };
    assert_eq!(
        topology.client_policy().unwrap(),
        StridePolicy::new(10, 4, 1, 4)
    );
    let graph = topology
        .build_graph(&OpenConfigCatalog, &AssemblyOptions::default())
        .unwrap();
    let line = graph.logical_channel(200).unwrap();
    assert_eq!(line.assignments[0].allocation, Decimal64::from_int(160));
}

#[test]
fn test_invalid_topology() {
    let topology = Topology {
        clients: vec!["0/0-Optics0/0/0/0".to_owned()],
        ..Default::default()
    };
    let error = topology
        .build_graph(&OpenConfigCatalog, &AssemblyOptions::default())
        .unwrap_err();
    assert_eq!(error.stage, Stage::Allocation);
    assert!(matches!(error.error, Error::InvalidTopology(_)));

    let topology = Topology {
        client_rate: Some(RateClass::Trib100G),
        ..Default::default()
    };
    assert!(topology.builder().is_err());

    let topology = Topology {
        mode: SliceMode::Custom,
        ..Default::default()
    };
    assert!(topology.builder().is_err());
}

#[test]
fn test_line_index_collision() {
    let topology = Topology {
        line_index: 110,
        ..Default::default()
    };
    let error = topology.builder().unwrap_err();
    assert_eq!(error.stage, Stage::Allocation);
    assert_eq!(error.error, Error::IndexCollision(110));
}

#[test]
fn test_slice_mode_parse() {
    assert_eq!(
        "20x10GE-1x200G".parse::<SliceMode>(),
        Ok(SliceMode::Slice20x10Ge)
    );
    assert_eq!(
        "2x100GE-1x200G".parse::<SliceMode>(),
        Ok(SliceMode::Slice2x100Ge)
    );
    assert_eq!("custom".parse::<SliceMode>(), Ok(SliceMode::Custom));
    assert!("4x100GE".parse::<SliceMode>().is_err());
    assert_eq!(SliceMode::Slice2x100Ge.to_string(), "2x100GE-1x200G");
}

#[test]
fn test_topology_from_toml() {
    let topology: Topology = toml::from_str(
        r#"
        name = "ne1"
        mode = "2x100GE-1x200G"
        clients = ["0/0-Optics0/0/0/0", "0/0-Optics0/0/0/1"]
        frequency = 193100000
        target-output-power = "-1.5"
        operational-mode = 1
        "#,
    )
    .unwrap();
    assert_eq!(topology.name, "ne1");
    assert_eq!(topology.mode, SliceMode::Slice2x100Ge);
    assert_eq!(topology.line_index, 200);
    assert_eq!(topology.operational_mode, OperationalMode::Fec7);
    assert_eq!(
        topology.target_output_power,
        "-1.5".parse::<Decimal64>().unwrap()
    );

    let error = toml::from_str::<Topology>("unknown = 1");
    assert!(error.is_err());
}
