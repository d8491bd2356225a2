//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::Arc;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use otd_cli::{Config, Error, commands, logging};
use otd_northbound::DataFormat;
use tracing::info;

fn run(config: Config, matches: &ArgMatches<'_>) -> Result<bool, Error> {
    match matches.subcommand() {
        ("validate", Some(args)) => {
            let mut success = true;
            for path in args.values_of("topology").into_iter().flatten() {
                match commands::cmd_validate(&config, path) {
                    Ok(graph) => println!(
                        "{path}: ok ({} nodes, {} links)",
                        graph.len(),
                        graph.links().len()
                    ),
                    Err(error) => {
                        error.log();
                        eprintln!("% {error}");
                        success = false;
                    }
                }
            }
            Ok(success)
        }
        ("encode", Some(args)) => {
            let format: DataFormat = match args.value_of("format") {
                Some(format) => format.parse().unwrap_or_default(),
                None => config.format,
            };
            let path = args.value_of("topology").unwrap_or_default();
            let section = args.value_of("section");
            let output = commands::cmd_encode(&config, path, format, section)?;
            println!("{output}");
            Ok(true)
        }
        ("apply", Some(args)) => {
            let paths = args
                .values_of("topology")
                .into_iter()
                .flatten()
                .map(str::to_owned)
                .collect::<Vec<_>>();
            let comment = args.value_of("comment").map(str::to_owned);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(Error::Runtime)?;
            let results = runtime.block_on(commands::cmd_apply_all(
                Arc::new(config),
                paths,
                comment,
            ))?;

            let mut success = true;
            for (path, result) in results {
                match result {
                    Ok(Some(id)) => {
                        println!("{path}: committed (transaction {id})")
                    }
                    Ok(None) => println!("{path}: nothing to commit"),
                    Err(error) => {
                        error.log();
                        eprintln!("% {error}");
                        success = false;
                    }
                }
            }
            Ok(success)
        }
        ("transactions", Some(args)) => {
            let device = args.value_of("device").unwrap_or_default();
            match args.value_of("id").and_then(|id| id.parse().ok()) {
                Some(id) => {
                    let transaction =
                        commands::cmd_transaction(&config, device, id)?;
                    for (name, document) in &transaction.sections {
                        println!("! {name}");
                        println!("{document}");
                    }
                }
                None => {
                    let transactions =
                        commands::cmd_transactions(&config, device)?;
                    println!();
                    commands::transactions_table(&transactions).printstd();
                    println!();
                }
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

// ===== main =====

fn main() {
    let topology_arg = Arg::with_name("topology")
        .value_name("file")
        .required(true)
        .help("Topology file");

    // Parse command-line parameters.
    let matches = App::new("Optical terminal device configuration tool")
        .version(clap::crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("file")
                .help("Specify an alternative configuration file."),
        )
        .subcommand(
            SubCommand::with_name("validate")
                .about("Build the configuration graph of topology files")
                .arg(topology_arg.clone().multiple(true)),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Print the configuration documents of a topology")
                .arg(
                    Arg::with_name("format")
                        .short("f")
                        .long("format")
                        .value_name("format")
                        .possible_values(&["xml", "json"])
                        .help("Output format"),
                )
                .arg(
                    Arg::with_name("section")
                        .short("s")
                        .long("section")
                        .value_name("section")
                        .possible_values(&[
                            "interfaces",
                            "terminal-device",
                            "components",
                        ])
                        .help("Print only one section"),
                )
                .arg(topology_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("apply")
                .about("Push topologies to their device datastores")
                .arg(
                    Arg::with_name("comment")
                        .short("m")
                        .long("comment")
                        .value_name("text")
                        .help("Comment recorded with the transactions"),
                )
                .arg(topology_arg.multiple(true)),
        )
        .subcommand(
            SubCommand::with_name("transactions")
                .about("Show the rollback log of a device")
                .arg(
                    Arg::with_name("device")
                        .value_name("device")
                        .required(true)
                        .help("Device name"),
                )
                .arg(
                    Arg::with_name("id")
                        .value_name("id")
                        .validator(|id| {
                            id.parse::<u32>()
                                .map(|_| ())
                                .map_err(|error| error.to_string())
                        })
                        .help("Show the configuration of one transaction"),
                ),
        )
        .get_matches();

    // Read configuration file.
    let config_file = matches.value_of("config");
    let config = match Config::load(config_file) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("% {error}");
            std::process::exit(1);
        }
    };

    // Initialize tracing.
    logging::init(&config.logging);
    info!("starting up");

    match run(config, &matches) {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(error) => {
            error.log();
            eprintln!("% {error}");
            std::process::exit(1);
        }
    }
}
