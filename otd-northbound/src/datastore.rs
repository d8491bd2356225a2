//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use derive_new::new;
use pickledb::{PickleDb, PickleDbDumpPolicy, SerializationMethod};
use serde::{Deserialize, Serialize};

use crate::codec::{self, DataFormat};
use crate::debug::Debug;
use crate::error::TransportError;
use crate::transport::{ConfigTransport, Datastore, Section};

const NEXT_ID_KEY: &str = "next_id";
const TRANSACTION_KEY_PREFIX: &str = "transaction";

// File-backed device stand-in with candidate and running datastores and a
// rollback log of all commits.
pub struct LocalDatastore {
    db: PickleDb,
    format: DataFormat,
    locked: bool,
    comment: String,
    // Candidate sections changed since the last commit.
    staged: BTreeSet<&'static str>,
    // Transaction recorded by the last commit, if any.
    committed: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Serialize, new)]
pub struct Transaction {
    // Unique identifier for the transaction.
    #[new(default)]
    pub id: u32,

    // Date and time for when the transaction occurred.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,

    // Optional comment for the transaction.
    pub comment: String,

    pub format: DataFormat,

    // Committed sections, by name.
    pub sections: BTreeMap<String, String>,
}

// ===== impl LocalDatastore =====

impl LocalDatastore {
    // Loads a datastore from a file, or initializes a new one if the file
    // doesn't exist.
    pub fn open<P: AsRef<Path>>(
        path: P,
        format: DataFormat,
    ) -> Result<LocalDatastore, TransportError> {
        let dump_policy = PickleDbDumpPolicy::AutoDump;
        let serialization_method = SerializationMethod::Json;
        let db = match path.as_ref().exists() {
            true => PickleDb::load(path, dump_policy, serialization_method)?,
            false => PickleDb::new(path, dump_policy, serialization_method),
        };
        Ok(LocalDatastore::with_db(db, format))
    }

    pub fn with_db(db: PickleDb, format: DataFormat) -> LocalDatastore {
        LocalDatastore {
            db,
            format,
            locked: false,
            comment: String::new(),
            staged: Default::default(),
            committed: None,
        }
    }

    // Sets the comment recorded with the next transactions.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // Returns the ID of the transaction recorded by the last commit, or
    // `None` if that commit had nothing to record.
    pub fn committed(&self) -> Option<u32> {
        self.committed
    }

    // Returns the stored content of a section.
    pub fn get(&self, datastore: Datastore, section: &str) -> Option<String> {
        self.db.get(&section_key(datastore, section))
    }

    // Retrieves a transaction from the rollback log, identified by its ID.
    pub fn transaction(&self, id: u32) -> Option<Transaction> {
        self.db.get(&format!("{TRANSACTION_KEY_PREFIX}{id}"))
    }

    // Retrieves all transactions from the rollback log, oldest first.
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut transactions = self
            .db
            .iter()
            .filter(|entry| entry.get_key().starts_with(TRANSACTION_KEY_PREFIX))
            .filter_map(|entry| entry.get_value::<Transaction>())
            .collect::<Vec<_>>();
        transactions.sort_by_key(|transaction| transaction.id);
        transactions
    }

    // Records a transaction in the rollback log.
    fn transaction_record(
        &mut self,
        transaction: &mut Transaction,
    ) -> Result<(), TransportError> {
        let next_id = self.db.get::<u32>(NEXT_ID_KEY).unwrap_or(0) + 1;
        self.db.set(NEXT_ID_KEY, &next_id)?;
        transaction.id = next_id;
        let key = format!("{TRANSACTION_KEY_PREFIX}{}", transaction.id);
        self.db.set(&key, transaction)?;

        Debug::TransactionRecorded(transaction.id).log();

        Ok(())
    }
}

impl ConfigTransport for LocalDatastore {
    fn lock(&mut self, _datastore: Datastore) -> Result<(), TransportError> {
        if self.locked {
            return Err(TransportError::Locked);
        }
        self.locked = true;
        Ok(())
    }

    fn unlock(&mut self, _datastore: Datastore) -> Result<(), TransportError> {
        self.locked = false;
        Ok(())
    }

    fn apply(
        &mut self,
        datastore: Datastore,
        section: Section<'_>,
    ) -> Result<(), TransportError> {
        let name = section.name();
        let content = codec::encode(section, self.format)?;
        self.db.set(&section_key(datastore, name), &content)?;
        if datastore == Datastore::Candidate {
            self.staged.insert(name);
        }

        Debug::SectionStaged(datastore, name, content.len()).log();

        Ok(())
    }

    fn commit(&mut self) -> Result<(), TransportError> {
        self.committed = None;
        if self.staged.is_empty() {
            Debug::NothingToCommit.log();
            return Ok(());
        }

        // Staged sections are kept until the transaction is recorded.
        let mut sections = BTreeMap::new();
        for name in &self.staged {
            let candidate = section_key(Datastore::Candidate, name);
            let Some(content) = self.db.get::<String>(&candidate) else {
                continue;
            };
            self.db.set(&section_key(Datastore::Running, name), &content)?;
            sections.insert((*name).to_owned(), content);
        }

        let mut transaction = Transaction::new(
            Utc::now(),
            self.comment.clone(),
            self.format,
            sections,
        );
        self.transaction_record(&mut transaction)?;
        self.staged.clear();
        self.committed = Some(transaction.id);

        Ok(())
    }
}

impl std::fmt::Debug for LocalDatastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalDatastore")
            .field("format", &self.format)
            .field("locked", &self.locked)
            .field("staged", &self.staged)
            .field("committed", &self.committed)
            .finish()
    }
}

// ===== helper functions =====

fn section_key(datastore: Datastore, section: &str) -> String {
    format!("{datastore}/{section}")
}
