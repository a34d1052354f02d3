//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;

use std::str::FromStr;

use clap::{App, Arg};
use config::{Config, LoggingFileRotation, LoggingFmtStyle};
use pandev_tree::{ConfigTree, NodeIndex, RecordingClient};
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Operation {
    Show,
    Apply,
    Create,
    Delete,
}

// ===== impl Operation =====

impl FromStr for Operation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show" => Ok(Operation::Show),
            "apply" => Ok(Operation::Apply),
            "create" => Ok(Operation::Create),
            "delete" => Ok(Operation::Delete),
            _ => Err(()),
        }
    }
}

// ===== helper functions =====

fn init_tracing(config: &config::Logging) {
    // Enable logging to a file.
    let file = config.file.enabled.then(|| {
        let file_appender = match config.file.rotation {
            LoggingFileRotation::Never => {
                rolling::never(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Hourly => {
                rolling::hourly(&config.file.dir, &config.file.name)
            }
            LoggingFileRotation::Daily => {
                rolling::daily(&config.file.dir, &config.file.name)
            }
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(file_appender)
            .with_target(false)
            .with_thread_ids(config.file.fmt.show_thread_id)
            .with_file(config.file.fmt.show_source)
            .with_line_number(config.file.fmt.show_source)
            .with_ansi(config.file.fmt.colors);
        match config.file.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        }
    });

    // Enable logging to stderr. Stdout is reserved for the requests.
    let stderr = config.stderr.enabled.then(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(config.stderr.fmt.show_thread_id)
            .with_file(config.stderr.fmt.show_source)
            .with_line_number(config.stderr.fmt.show_source)
            .with_ansi(config.stderr.fmt.colors);
        match config.stderr.fmt.style {
            LoggingFmtStyle::Compact => layer.compact().boxed(),
            LoggingFmtStyle::Full => layer.boxed(),
            LoggingFmtStyle::Json => layer.json().boxed(),
            LoggingFmtStyle::Pretty => layer.pretty().boxed(),
        }
    });

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file)
        .with(stderr)
        .init();
}

// Depth-first lookup of the first node with the given name.
fn lookup(
    tree: &ConfigTree<RecordingClient>,
    node_idx: NodeIndex,
    name: &str,
) -> Option<NodeIndex> {
    let node = tree.get(node_idx)?;
    if node.name.as_deref() == Some(name) {
        return Some(node_idx);
    }
    node.children()
        .iter()
        .find_map(|child_idx| lookup(tree, *child_idx, name))
}

// Renders "XPATH ELEMENT" for the node and its subtree, in depth-first order.
fn show_lines(
    tree: &ConfigTree<RecordingClient>,
    node_idx: NodeIndex,
    lines: &mut Vec<String>,
) {
    if let (Ok(xpath), Ok(element)) =
        (tree.xpath(node_idx), tree.element(node_idx))
    {
        lines.push(format!("{xpath} {element}"));
    }
    for child_idx in tree.children(node_idx) {
        show_lines(tree, *child_idx, lines);
    }
}

// ===== main =====

fn main() {
    // Parse command-line parameters.
    let matches = App::new("pandev")
        .about("Dry run of configuration API requests for a device object tree")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Configuration file (default: /etc/pandev.toml)"),
        )
        .arg(
            Arg::with_name("OPERATION")
                .help("Operation to run")
                .possible_values(&["show", "apply", "create", "delete"])
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OBJECT")
                .help("Name of the target object")
                .required_ifs(&[
                    ("OPERATION", "apply"),
                    ("OPERATION", "create"),
                    ("OPERATION", "delete"),
                ])
                .index(2),
        )
        .get_matches();

    // Read configuration file.
    let config_file = matches.value_of("config");
    let config = match Config::load(config_file) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to parse configuration file: {err}");
            std::process::exit(1);
        }
    };

    // Initialize tracing.
    init_tracing(&config.logging);

    let (mut tree, device_idx) = match config.build_tree() {
        Ok(tree) => tree,
        Err(err) => {
            err.log();
            std::process::exit(1);
        }
    };
    info!(nodes = tree.len(), "object tree loaded");

    let operation = matches
        .value_of("OPERATION")
        .and_then(|value| Operation::from_str(value).ok());
    let Some(operation) = operation else {
        eprintln!("Unknown operation");
        std::process::exit(1);
    };
    if operation == Operation::Show {
        let mut lines = vec![];
        show_lines(&tree, device_idx, &mut lines);
        for line in lines {
            println!("{line}");
        }
        return;
    }

    let name = matches.value_of("OBJECT").unwrap_or_default();
    let Some(node_idx) = lookup(&tree, device_idx, name) else {
        error!(%name, "object not found");
        std::process::exit(1);
    };

    let result = match operation {
        Operation::Apply => tree.apply(node_idx),
        Operation::Create => tree.create(node_idx),
        Operation::Delete => tree.delete(node_idx),
        Operation::Show => unreachable!(),
    };
    if let Err(err) = result {
        err.log();
        std::process::exit(1);
    }

    // Print the requests that would have been sent to the device.
    let requests = match tree.client_mut(device_idx) {
        Ok(client) => client.take_requests(),
        Err(err) => {
            err.log();
            std::process::exit(1);
        }
    };
    for request in requests {
        match serde_json::to_string(&request) {
            Ok(line) => println!("{line}"),
            Err(err) => error!(%err, "failed to serialize request"),
        }
    }
}

// ===== unit tests =====
