//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_builder::*;
use otd_model::*;

use crate::assembler::client;

#[test]
fn test_consistent_client_channel() {
    let channel = client(100, 10).build().unwrap();
    assert!(
        OpenConfigCatalog
            .validate(NodeRef::LogicalChannel(&channel))
            .is_ok()
    );
    for assignment in &channel.assignments {
        assert!(
            OpenConfigCatalog
                .validate(NodeRef::Assignment(&channel, assignment))
                .is_ok()
        );
    }
}

#[test]
fn test_protocol_rate_mismatch() {
    let mut cfg = client(100, 10);
    cfg.rate_class = Some(RateClass::Trib100G);
    let channel = cfg.build().unwrap();
    let violation = OpenConfigCatalog
        .validate(NodeRef::LogicalChannel(&channel))
        .unwrap_err();
    assert_eq!(violation.node, NodeKey::LogicalChannel(100));
    assert!(violation.path.ends_with("/trib-protocol"));
}

#[test]
fn test_protocol_type_mismatch() {
    let mut cfg = client(100, 10);
    cfg.rate_class = None;
    cfg.trib_protocol = Some(TribProtocol::ProtOtu4);
    let channel = cfg.build().unwrap();
    let violation = OpenConfigCatalog
        .validate(NodeRef::LogicalChannel(&channel))
        .unwrap_err();
    assert!(violation.path.ends_with("/logical-channel-type"));
    assert_eq!(
        violation.to_string(),
        "logical channel 100 (/terminal-device/logical-channels/channel/config/logical-channel-type): PROT_OTU4 isn't a PROT_ETHERNET protocol"
    );
}

#[test]
fn test_allocation_fraction_digits() {
    let mut cfg = client(100, 10);
    cfg.assignments[0].allocation = Some("2.5".parse().unwrap());
    let channel = cfg.build().unwrap();
    assert!(
        OpenConfigCatalog
            .validate(NodeRef::Assignment(&channel, &channel.assignments[0]))
            .is_ok()
    );

    let mut cfg = client(100, 10);
    cfg.assignments[0].allocation = Some("2.0005".parse().unwrap());
    let channel = cfg.build().unwrap();
    let violation = OpenConfigCatalog
        .validate(NodeRef::Assignment(&channel, &channel.assignments[0]))
        .unwrap_err();
    assert_eq!(violation.node, NodeKey::Assignment(100, 1));
}

#[test]
fn test_power_fraction_digits() {
    let mut cfg =
        OpticalChannelCfg::new("0/0-OpticalChannel0/0/0/6", "Optics0/0/0/6", 1);
    cfg.target_output_power = Some("-1.25".parse().unwrap());
    let och = cfg.clone().build().unwrap();
    assert!(OpenConfigCatalog.validate(NodeRef::OpticalChannel(&och)).is_ok());

    // Trailing zeros don't count.
    cfg.target_output_power = Some("-1.2500".parse().unwrap());
    let och = cfg.clone().build().unwrap();
    assert!(OpenConfigCatalog.validate(NodeRef::OpticalChannel(&och)).is_ok());

    cfg.target_output_power = Some("-1.255".parse().unwrap());
    let och = cfg.build().unwrap();
    assert!(
        OpenConfigCatalog
            .validate(NodeRef::OpticalChannel(&och))
            .is_err()
    );
}

#[test]
fn test_interface_name() {
    let iface =
        InterfaceCfg::new("Optics 0/0/0/6", InterfaceType::OpticalChannel)
            .build()
            .unwrap();
    assert!(OpenConfigCatalog.validate(NodeRef::Interface(&iface)).is_err());
    assert!(PermissiveCatalog.validate(NodeRef::Interface(&iface)).is_ok());
}
