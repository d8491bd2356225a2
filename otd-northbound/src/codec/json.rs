//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde_json::json;

use crate::error::TransportError;
use crate::transport::Section;

pub(crate) fn encode(section: Section<'_>) -> Result<String, TransportError> {
    let document = match section {
        Section::Interfaces(interfaces) => json!({
            "openconfig-interfaces:interfaces": {
                "interface": interfaces,
            }
        }),
        Section::TerminalDevice(channels) => json!({
            "openconfig-terminal-device:terminal-device": {
                "logical-channels": {
                    "channel": channels,
                }
            }
        }),
        Section::Components(components) => json!({
            "openconfig-platform:components": {
                "component": components,
            }
        }),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}
