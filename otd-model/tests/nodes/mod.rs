//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_model::*;

fn client_channel(index: u32) -> LogicalChannelCfg {
    LogicalChannelCfg {
        rate_class: Some(RateClass::Trib10G),
        trib_protocol: Some(TribProtocol::Prot10GeLan),
        ingress: Some(IngressCfg::new("0/0-Optics0/0/0/0", vec![1])),
        assignments: vec![AssignmentCfg::logical_channel(
            1,
            200,
            Decimal64::from_int(10),
        )],
        ..LogicalChannelCfg::new(index, LogicalChannelType::Ethernet)
    }
}

#[test]
fn test_interface_defaults() {
    let iface =
        InterfaceCfg::new("Optics0/0/0/6", InterfaceType::OpticalChannel)
            .build()
            .unwrap();
    assert_eq!(iface.name, "Optics0/0/0/6");
    assert!(iface.enabled);
    assert_eq!(iface.description, None);
}

#[test]
fn test_interface_missing_fields() {
    let error = InterfaceCfg::default().build().unwrap_err();
    assert_eq!(
        error,
        Error::MissingField(NodeKind::Interface, "?".to_owned(), "name")
    );

    let cfg = InterfaceCfg {
        name: Some("Optics0/0/0/6".to_owned()),
        ..Default::default()
    };
    let error = cfg.build().unwrap_err();
    assert_eq!(error.node_key(), "Optics0/0/0/6");
    assert!(matches!(error, Error::MissingField(_, _, "type")));
}

#[test]
fn test_logical_channel_build() {
    let channel = client_channel(100).build().unwrap();
    assert_eq!(channel.index, 100);
    assert_eq!(channel.capacity(), Some(Decimal64::from_int(10)));
    assert_eq!(channel.allocated(), Some(Decimal64::from_int(10)));
    let assignment = channel.assignment(1).unwrap();
    assert_eq!(assignment.assignment_type(), AssignmentType::LogicalChannel);
    assert_eq!(assignment.target.as_logical_channel(), Some(&200));
}

#[test]
fn test_logical_channel_without_index() {
    let cfg = LogicalChannelCfg {
        index: None,
        ..client_channel(100)
    };
    let error = cfg.build().unwrap_err();
    assert_eq!(error.node_kind(), NodeKind::LogicalChannel);
    assert!(matches!(error, Error::MissingField(_, _, "index")));

    let cfg = LogicalChannelCfg {
        index: Some(0),
        ..client_channel(100)
    };
    assert!(matches!(
        cfg.build(),
        Err(Error::InvalidField(_, _, "index", _))
    ));
}

#[test]
fn test_ingress_lanes() {
    let error = IngressCfg::new("0/0-Optics0/0/0/0", vec![])
        .build(100)
        .unwrap_err();
    assert!(matches!(error, Error::MissingField(_, _, "physical-channel")));

    let error = IngressCfg::new("0/0-Optics0/0/0/0", vec![1, 0])
        .build(100)
        .unwrap_err();
    assert!(matches!(error, Error::InvalidField(_, _, "physical-channel", _)));

    let error = IngressCfg::new("0/0-Optics0/0/0/0", vec![2, 2])
        .build(100)
        .unwrap_err();
    assert_eq!(
        error,
        Error::DuplicateKey(NodeKind::Ingress, "100/2".to_owned())
    );
}

#[test]
fn test_assignment_allocation_must_be_positive() {
    for allocation in ["0", "-10"] {
        let cfg =
            AssignmentCfg::logical_channel(1, 200, allocation.parse().unwrap());
        let error = cfg.build(100).unwrap_err();
        assert_eq!(error.node_key(), "100/1");
        assert!(matches!(error, Error::InvalidField(_, _, "allocation", _)));
    }
}

#[test]
fn test_assignment_target_must_match_type() {
    let cfg = AssignmentCfg {
        assignment_type: Some(AssignmentType::OpticalChannel),
        ..AssignmentCfg::logical_channel(1, 200, Decimal64::from_int(10))
    };
    assert!(matches!(
        cfg.build(100),
        Err(Error::InvalidField(_, _, "logical-channel", _))
    ));

    let cfg = AssignmentCfg {
        optical_channel: None,
        ..AssignmentCfg::optical_channel(
            1,
            "0/0-OpticalChannel0/0/0/6",
            Decimal64::from_int(200),
        )
    };
    assert!(matches!(
        cfg.build(200),
        Err(Error::MissingField(_, _, "optical-channel"))
    ));
}

#[test]
fn test_duplicate_assignment_index() {
    let mut cfg = client_channel(100);
    cfg.assignments.push(AssignmentCfg::logical_channel(
        1,
        201,
        Decimal64::from_int(5),
    ));
    assert_eq!(
        cfg.build().unwrap_err(),
        Error::DuplicateKey(NodeKind::Assignment, "100/1".to_owned())
    );
}

#[test]
fn test_optical_channel_defaults() {
    let och = OpticalChannelCfg::new(
        "0/0-OpticalChannel0/0/0/6",
        "Optics0/0/0/6",
        191_300_000,
    )
    .build()
    .unwrap();
    assert_eq!(och.operational_mode, OperationalMode::Fec20);
    assert_eq!(och.target_output_power, Decimal64::ZERO);

    let cfg = OpticalChannelCfg {
        frequency: Some(0),
        ..och_cfg()
    };
    assert!(matches!(
        cfg.build(),
        Err(Error::InvalidField(_, _, "frequency", _))
    ));
}

fn och_cfg() -> OpticalChannelCfg {
    OpticalChannelCfg::new("0/0-OpticalChannel0/0/0/6", "Optics0/0/0/6", 1)
}

#[test]
fn test_identities() {
    assert_eq!(RateClass::Trib10G.to_yang(), "oc-opt-types:TRIB_RATE_10G");
    assert_eq!(
        RateClass::try_from_yang("oc-opt-types:TRIB_RATE_2.5G"),
        Some(RateClass::Trib2_5G)
    );
    assert_eq!(RateClass::Trib2_5G.capacity(), "2.5".parse().unwrap());
    assert_eq!(
        TribProtocol::Prot10GeLan.rate_class(),
        Some(RateClass::Trib10G)
    );
    assert!(TribProtocol::ProtOtu4.is_otn());
    assert_eq!(
        InterfaceType::OpticalChannel.to_yang(),
        "ianaift:opticalChannel"
    );
    assert_eq!(OperationalMode::try_from_yang("1"), Some(OperationalMode::Fec7));
    assert_eq!(OperationalMode::try_from_yang("3"), None);
    assert_eq!(
        otd_model::yang::identity_namespace("oc-opt-types:PROT_OTN"),
        Some(("oc-opt-types", otd_model::yang::NS_TRANSPORT_TYPES))
    );
}

#[test]
fn test_channel_declaration_from_toml() {
    let cfg: LogicalChannelCfg = toml::from_str(
        r#"
        index = 200
        admin-state = "ENABLED"
        logical-channel-type = "PROT_OTN"

        [[assignment]]
        index = 1
        allocation = 200
        assignment-type = "OPTICAL_CHANNEL"
        optical-channel = "0/0-OpticalChannel0/0/0/6"
        "#,
    )
    .unwrap();
    let channel = cfg.build().unwrap();
    assert_eq!(channel.admin_state, Some(AdminState::Enabled));
    assert_eq!(
        channel.assignments[0].target,
        AssignmentTarget::OpticalChannel("0/0-OpticalChannel0/0/0/6".to_owned())
    );
}
