//! Interactive shell for the dispatch engine.
use std::fmt::Write;
use std::path::PathBuf;

use dispatch_core::prelude::*;
use reedline_repl_rs::clap::{value_parser, Arg, ArgMatches, Command};
use reedline_repl_rs::{Repl, Result};

struct Context {
    dispatcher: Dispatcher,
    grid: Option<Grid>,
}

impl Context {
    fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            grid: None,
        }
    }
}

/// Load a terrain grid from a text file, one row per line
fn load(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let path = args.get_one::<String>("path").unwrap();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return Ok(Some(format!("Failed to read {}: {}", path, err))),
    };
    match Grid::parse(&text) {
        Ok(grid) => {
            let msg = format!("Loaded {}x{} grid", grid.width(), grid.height());
            context.grid = Some(grid);
            Ok(Some(msg))
        }
        Err(err) => Ok(Some(format!("{:#}", err))),
    }
}

/// Print the loaded grid
fn show_grid(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    match &context.grid {
        Some(grid) => Ok(Some(grid.to_string())),
        None => Ok(Some("No grid loaded, use `load <path>`".to_string())),
    }
}

/// Report a new incident
fn report(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let severity = *args.get_one::<i64>("severity").unwrap();
    let wait = *args.get_one::<i64>("wait").unwrap();
    let row = *args.get_one::<i32>("row").unwrap();
    let col = *args.get_one::<i32>("col").unwrap();

    let incident = context
        .dispatcher
        .report_incident(severity, wait, cell_id(row, col));
    Ok(Some(format!(
        "Call added: {} ({} pending)",
        incident,
        context.dispatcher.pending()
    )))
}

/// Dispatch to the most urgent incident
fn dispatch(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let row = *args.get_one::<i32>("row").unwrap();
    let col = *args.get_one::<i32>("col").unwrap();

    let Some(grid) = &context.grid else {
        return Ok(Some("No grid loaded, use `load <path>`".to_string()));
    };

    match context.dispatcher.dispatch_next(grid, cell_id(row, col)) {
        DispatchOutcome::QueueEmpty => Ok(Some("No calls in queue".to_string())),
        DispatchOutcome::Dispatched {
            incident, route, ..
        } => {
            let mut out = format!("Dispatched: {}\n", incident);
            if route.is_unreachable() {
                out.push_str("No path found");
            } else {
                let nodes: Vec<String> = route.nodes.iter().map(CellId::to_string).collect();
                write!(out, "Path: {}\nTotal cost: {}", nodes.join(" -> "), route.cost).unwrap();
            }
            Ok(Some(out))
        }
    }
}

/// List pending incidents by priority
fn queue(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let snapshot = context.dispatcher.queue_snapshot();
    if snapshot.is_empty() {
        return Ok(Some("Queue is empty".to_string()));
    }

    let mut out = String::new();
    for incident in snapshot {
        writeln!(out, "{}", incident).unwrap();
    }
    Ok(Some(out))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut repl = Repl::new(Context::new())
        .with_name("Dispatcher")
        .with_version("v0.1.0")
        .with_description("Simple REPL to drive the emergency dispatch engine")
        .with_banner("Welcome to Dispatcher")
        .with_history(PathBuf::from(r".\history"), 100)
        .with_command(
            Command::new("load")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .help("Path to a grid text file"),
                )
                .about("Load a terrain grid"),
            load,
        )
        .with_command(
            Command::new("grid").about("Print the loaded grid"),
            show_grid,
        )
        .with_command(
            Command::new("report")
                .arg(
                    Arg::new("severity")
                        .value_parser(value_parser!(i64))
                        .required(true)
                        .help("Severity of the incident"),
                )
                .arg(
                    Arg::new("wait")
                        .value_parser(value_parser!(i64))
                        .required(true)
                        .help("Minutes the incident has been waiting"),
                )
                .arg(
                    Arg::new("row")
                        .value_parser(value_parser!(i32))
                        .required(true)
                        .help("Incident row"),
                )
                .arg(
                    Arg::new("col")
                        .value_parser(value_parser!(i32))
                        .required(true)
                        .help("Incident column"),
                )
                .about("Report a new incident"),
            report,
        )
        .with_command(
            Command::new("dispatch")
                .arg(
                    Arg::new("row")
                        .value_parser(value_parser!(i32))
                        .required(true)
                        .help("Start row of the responder"),
                )
                .arg(
                    Arg::new("col")
                        .value_parser(value_parser!(i32))
                        .required(true)
                        .help("Start column of the responder"),
                )
                .about("Dispatch to the most urgent incident"),
            dispatch,
        )
        .with_command(
            Command::new("queue").about("List pending incidents by priority"),
            queue,
        );

    repl.run()
}
