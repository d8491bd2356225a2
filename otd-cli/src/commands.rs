//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeSet;
use std::sync::Arc;

use otd_builder::{ConfigurationGraph, OpenConfigCatalog, Topology};
use otd_northbound::codec::encode_graph;
use otd_northbound::{DataFormat, LocalDatastore, Transaction, push};
use prettytable::{Table, format, row};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Error;

// Topology read from a file, tagged with its path.
#[derive(Debug)]
pub struct TopologyFile {
    pub path: String,
    pub topology: Topology,
}

// ===== impl TopologyFile =====

impl TopologyFile {
    pub fn load(path: &str) -> Result<TopologyFile, Error> {
        let topology_str = std::fs::read_to_string(path)
            .map_err(|error| Error::ReadFile(path.to_owned(), error))?;
        let topology = toml::from_str(&topology_str)
            .map_err(|error| Error::ParseFile(path.to_owned(), error))?;
        Ok(TopologyFile {
            path: path.to_owned(),
            topology,
        })
    }

    pub fn build_graph(
        &self,
        config: &Config,
    ) -> Result<ConfigurationGraph, Error> {
        self.topology
            .build_graph(&OpenConfigCatalog, &config.assembly)
            .map_err(|error| Error::Assembly(self.path.clone(), error))
    }
}

// ===== "validate" =====

pub fn cmd_validate(
    config: &Config,
    path: &str,
) -> Result<ConfigurationGraph, Error> {
    let file = TopologyFile::load(path)?;
    let graph = file.build_graph(config)?;
    debug!(
        %path, nodes = graph.len(), links = graph.links().len(),
        "topology is valid"
    );
    Ok(graph)
}

// ===== "encode" =====

pub fn cmd_encode(
    config: &Config,
    path: &str,
    format: DataFormat,
    section: Option<&str>,
) -> Result<String, Error> {
    let file = TopologyFile::load(path)?;
    let graph = file.build_graph(config)?;
    let documents = encode_graph(&graph, format).map_err(|error| {
        Error::Transport(file.topology.name.clone(), error)
    })?;

    let output = documents
        .into_iter()
        .filter(|(name, _)| section.is_none_or(|section| section == *name))
        .map(|(_, document)| document)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(output)
}

// ===== "apply" =====

// Builds the topology and pushes it to the local datastore of its device.
// Returns the ID of the recorded transaction, if any.
pub fn cmd_apply(
    config: &Config,
    file: &TopologyFile,
    comment: Option<&str>,
) -> Result<Option<u32>, Error> {
    let device = &file.topology.name;
    let graph = file.build_graph(config)?;

    let path = config.datastore_path(device);
    let mut datastore = LocalDatastore::open(&path, config.format)
        .map_err(|error| Error::Transport(device.clone(), error))?;
    if let Some(comment) = comment {
        datastore.set_comment(comment);
    }
    push(&graph, &mut datastore, &config.push)
        .map_err(|error| Error::Transport(device.clone(), error))?;

    let id = datastore.committed();
    info!(%device, path = %path.display(), ?id, "configuration applied");
    Ok(id)
}

// Applies several topology files concurrently, one blocking task per file.
//
// Every file must describe a distinct device since each device owns its
// datastore file.
pub async fn cmd_apply_all(
    config: Arc<Config>,
    paths: Vec<String>,
    comment: Option<String>,
) -> Result<Vec<(String, Result<Option<u32>, Error>)>, Error> {
    let mut files = vec![];
    let mut devices = BTreeSet::new();
    for path in &paths {
        let file = TopologyFile::load(path)?;
        if !devices.insert(file.topology.name.clone()) {
            return Err(Error::DuplicateDevice(file.topology.name));
        }
        files.push(file);
    }

    let tasks = files
        .into_iter()
        .map(|file| {
            let config = config.clone();
            let comment = comment.clone();
            let path = file.path.clone();
            let task = tokio::task::spawn_blocking(move || {
                cmd_apply(&config, &file, comment.as_deref())
            });
            (path, task)
        })
        .collect::<Vec<_>>();

    let mut results = vec![];
    for (path, task) in tasks {
        let result = task.await.map_err(Error::Task)?;
        results.push((path, result));
    }
    Ok(results)
}

// ===== "transactions" =====

pub fn cmd_transactions(
    config: &Config,
    device: &str,
) -> Result<Vec<Transaction>, Error> {
    let datastore = open_datastore(config, device)?;
    Ok(datastore.transactions())
}

pub fn cmd_transaction(
    config: &Config,
    device: &str,
    id: u32,
) -> Result<Transaction, Error> {
    let datastore = open_datastore(config, device)?;
    datastore
        .transaction(id)
        .ok_or(Error::UnknownTransaction(id))
}

pub fn transactions_table(transactions: &[Transaction]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["ID", "Date", "Comment", "Sections"]);
    for transaction in transactions {
        let sections =
            transaction.sections.keys().cloned().collect::<Vec<_>>();
        table.add_row(row![
            transaction.id,
            transaction.date.format("%Y-%m-%d %H:%M:%S"),
            transaction.comment,
            sections.join(", ")
        ]);
    }
    table
}

// ===== helper functions =====

fn open_datastore(
    config: &Config,
    device: &str,
) -> Result<LocalDatastore, Error> {
    LocalDatastore::open(config.datastore_path(device), config.format)
        .map_err(|error| Error::Transport(device.to_owned(), error))
}
