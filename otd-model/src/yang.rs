//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock as Lazy;

use maplit::hashmap;

// YANG modules whose data nodes and identities appear in the configuration.
pub const NS_INTERFACES: &str = "http://openconfig.net/yang/interfaces";
pub const NS_TERMINAL_DEVICE: &str = "http://openconfig.net/yang/terminal-device";
pub const NS_PLATFORM: &str = "http://openconfig.net/yang/platform";
pub const NS_TRANSPORT_TYPES: &str = "http://openconfig.net/yang/transport-types";
pub const NS_IANA_IF_TYPE: &str = "urn:ietf:params:xml:ns:yang:iana-if-type";

// Identity prefixes mapped to the namespaces of their defining modules.
pub static YANG_PREFIXES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| {
        hashmap! {
            "oc-if" => NS_INTERFACES,
            "oc-opt-term" => NS_TERMINAL_DEVICE,
            "oc-platform" => NS_PLATFORM,
            "oc-opt-types" => NS_TRANSPORT_TYPES,
            "ianaift" => NS_IANA_IF_TYPE,
        }
    });

// YANG conversion traits.

pub trait ToYang {
    // Return YANG textual representation of the value.
    fn to_yang(&self) -> Cow<'static, str>;
}

pub trait TryFromYang: Sized {
    // Construct value from YANG identity or enum value.
    fn try_from_yang(identity: &str) -> Option<Self>;
}

// ===== global functions =====

/// Splits a qualified identity ("prefix:NAME") and returns the namespace of
/// its prefix along with the prefix itself.
pub fn identity_namespace(identity: &str) -> Option<(&str, &'static str)> {
    let (prefix, _) = identity.split_once(':')?;
    YANG_PREFIXES.get(prefix).map(|ns| (prefix, *ns))
}
