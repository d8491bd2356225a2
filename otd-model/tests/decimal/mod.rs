//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_model::Decimal64;
use otd_model::decimal::DecimalError;

fn dec(s: &str) -> Decimal64 {
    s.parse().unwrap()
}

#[test]
fn test_parse_display() {
    for (input, output) in [
        ("10", "10"),
        ("0", "0"),
        ("-1.25", "-1.25"),
        ("+3.5", "3.5"),
        ("0.05", "0.05"),
        (".5", "0.5"),
        ("200.000", "200.000"),
    ] {
        assert_eq!(dec(input).to_string(), output);
    }
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<Decimal64>(), Err(DecimalError::Empty));
    assert_eq!("-.".parse::<Decimal64>(), Err(DecimalError::Empty));
    assert_eq!("1.2.3".parse::<Decimal64>(), Err(DecimalError::InvalidDigit));
    assert_eq!("1e3".parse::<Decimal64>(), Err(DecimalError::InvalidDigit));
    assert_eq!(
        "0.1234567890123456789".parse::<Decimal64>(),
        Err(DecimalError::FractionDigits)
    );
    assert_eq!(
        "99999999999999999999".parse::<Decimal64>(),
        Err(DecimalError::Overflow)
    );
}

#[test]
fn test_scale_independent_comparison() {
    assert_eq!(dec("10"), dec("10.00"));
    assert!(dec("10.01") > dec("10"));
    assert!(dec("-0.5") < Decimal64::ZERO);
    assert!(dec("2.5") < Decimal64::from_int(10));
    assert_eq!(dec("20").cmp(&dec("20.0")), std::cmp::Ordering::Equal);
}

#[test]
fn test_precision() {
    assert_eq!(dec("10.00").precision(), 0);
    assert_eq!(dec("-1.250").precision(), 2);
    assert_eq!(dec("0.001").precision(), 3);
}

#[test]
fn test_checked_add() {
    let sum = dec("2.5").checked_add(dec("7.25")).unwrap();
    assert_eq!(sum, dec("9.75"));
    assert_eq!(sum.fraction_digits(), 2);
    assert!(Decimal64::from_int(i64::MAX).checked_add(dec("1")).is_none());
}

#[test]
fn test_serde() {
    #[derive(serde::Deserialize)]
    struct Values {
        int: Decimal64,
        float: Decimal64,
        string: Decimal64,
    }

    let values: Values =
        toml::from_str("int = 200\nfloat = 0.25\nstring = \"-1.50\"").unwrap();
    assert_eq!(values.int, Decimal64::from_int(200));
    assert_eq!(values.float, dec("0.25"));
    assert_eq!(values.string, dec("-1.5"));

    let json = serde_json::to_string(&dec("-1.50")).unwrap();
    assert_eq!(json, "\"-1.50\"");
}
