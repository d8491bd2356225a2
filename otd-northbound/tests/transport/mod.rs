//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use otd_northbound::*;

use crate::GRAPH;

// Transport that records every call and optionally fails one of them.
#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<String>,
    fail_on: Option<&'static str>,
    fail_unlock: bool,
}

impl Recorder {
    fn failing(call: &'static str) -> Recorder {
        Recorder {
            fail_on: Some(call),
            ..Default::default()
        }
    }

    fn record(&mut self, call: String) -> Result<(), TransportError> {
        let fail = self.fail_on.is_some_and(|fail_on| call == fail_on);
        self.calls.push(call);
        match fail {
            true => Err(TransportError::Device("rejected".to_owned())),
            false => Ok(()),
        }
    }
}

impl ConfigTransport for Recorder {
    fn lock(&mut self, datastore: Datastore) -> Result<(), TransportError> {
        self.record(format!("lock {datastore}"))
    }

    fn unlock(&mut self, datastore: Datastore) -> Result<(), TransportError> {
        self.calls.push(format!("unlock {datastore}"));
        match self.fail_unlock {
            true => Err(TransportError::Device("unlock".to_owned())),
            false => Ok(()),
        }
    }

    fn apply(
        &mut self,
        datastore: Datastore,
        section: Section<'_>,
    ) -> Result<(), TransportError> {
        self.record(format!("apply {datastore} {}", section.name()))
    }

    fn commit(&mut self) -> Result<(), TransportError> {
        self.record("commit".to_owned())
    }
}

#[test]
fn test_push_sequence() {
    let mut transport = Recorder::default();
    push(&GRAPH, &mut transport, &PushOptions::default()).unwrap();
    assert_eq!(
        transport.calls,
        vec![
            "apply candidate interfaces",
            "apply candidate terminal-device",
            "apply candidate components",
            "commit",
        ]
    );
}

#[test]
fn test_push_locked() {
    let mut transport = Recorder::default();
    let options = PushOptions {
        lock: true,
        ..Default::default()
    };
    push(&GRAPH, &mut transport, &options).unwrap();
    assert_eq!(transport.calls.first().unwrap(), "lock candidate");
    assert_eq!(transport.calls.last().unwrap(), "unlock candidate");
    assert_eq!(transport.calls.len(), 6);
}

#[test]
fn test_push_running() {
    let mut transport = Recorder::default();
    let options = PushOptions {
        datastore: Datastore::Running,
        ..Default::default()
    };
    push(&GRAPH, &mut transport, &options).unwrap();
    assert_eq!(transport.calls[0], "apply running interfaces");
}

#[test]
fn test_push_apply_failure() {
    let mut transport = Recorder::failing("apply candidate terminal-device");
    let error = push(&GRAPH, &mut transport, &PushOptions::default())
        .unwrap_err();
    assert!(matches!(
        error,
        TransportError::Device(ref reason) if reason == "rejected"
    ));
    // No further section and no commit.
    assert_eq!(
        transport.calls,
        vec![
            "apply candidate interfaces",
            "apply candidate terminal-device",
        ]
    );
}

#[test]
fn test_push_commit_failure_unlocks() {
    let mut transport = Recorder::failing("commit");
    transport.fail_unlock = true;
    let options = PushOptions {
        lock: true,
        ..Default::default()
    };
    let error = push(&GRAPH, &mut transport, &options).unwrap_err();
    // The apply error surfaces, not the unlock one.
    assert!(matches!(
        error,
        TransportError::Device(ref reason) if reason == "rejected"
    ));
    assert_eq!(transport.calls.last().unwrap(), "unlock candidate");
}

#[test]
fn test_push_unlock_failure() {
    let mut transport = Recorder {
        fail_unlock: true,
        ..Default::default()
    };
    let options = PushOptions {
        lock: true,
        ..Default::default()
    };
    let error = push(&GRAPH, &mut transport, &options).unwrap_err();
    assert!(matches!(
        error,
        TransportError::Device(ref reason) if reason == "unlock"
    ));
}

#[test]
fn test_push_lock_failure() {
    let mut transport = Recorder::failing("lock candidate");
    let options = PushOptions {
        lock: true,
        ..Default::default()
    };
    assert!(push(&GRAPH, &mut transport, &options).is_err());
    assert_eq!(transport.calls, vec!["lock candidate"]);
}

#[test]
fn test_push_options_from_toml() {
    let options: PushOptions =
        toml::from_str("datastore = \"running\"\nlock = true").unwrap();
    assert_eq!(options.datastore, Datastore::Running);
    assert!(options.lock);
}
