mod cli;
mod config;
mod error;
mod logger;

use clap::Parser;
use cli::{Cli, Command, FlagArgs};
use config::Config;
use core_types::{Document, NodeType};
use dao::{Flags, Markup};
use dom::Dom;
use error::CliError;
use log::LevelFilter;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("daoml: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let level = match cli.verbose {
        0 => config.level()?.unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    logger::init(level);

    match cli.command {
        Command::Build { template, data } => {
            let html = build(&template, data.as_deref())?;
            println!("{html}");
        }
        Command::Parse {
            input,
            flags,
            compact,
        } => {
            let flags = merge_flags(config.parse, &flags);
            let tree = parse(&input, flags)?;
            let out = if compact {
                serde_json::to_string(&tree)
            } else {
                serde_json::to_string_pretty(&tree)
            }
            .map_err(CliError::Output)?;
            println!("{out}");
        }
    }
    Ok(())
}

fn merge_flags(base: Flags, args: &FlagArgs) -> Flags {
    Flags {
        strip_whitespace: base.strip_whitespace || args.strip_whitespace,
        trim: base.trim || args.trim,
        ..base
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    serde_json::from_str(&read(path)?).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn build(template: &Path, data: Option<&Path>) -> Result<String, CliError> {
    let mut markup = Markup::from_json(&read_json(template)?);
    let data = match data {
        Some(path) => read_json(path)?,
        None => Value::Object(Default::default()),
    };
    let mut dom = Dom::new();
    let node = markup.build(&data, &mut dom)?;
    log::debug!(target: "daoml", "built {} node(s)", dom.len());
    Ok(dom.to_html(node))
}

/// Every top-level element of the file; several are wrapped in a fragment.
fn parse(input: &Path, flags: Flags) -> Result<Value, CliError> {
    let dom = Dom::parse_document(&read(input)?).map_err(|source| CliError::Markup {
        path: input.to_path_buf(),
        source,
    })?;
    let parser = dao::Parser::new(flags);
    let mut trees: Vec<Markup> = dom
        .child_nodes(dom.root())
        .into_iter()
        .filter(|&node| dom.node_type(node) == Some(NodeType::Element))
        .filter_map(|node| parser.create_from_dom(&dom, node))
        .collect();
    match trees.len() {
        0 => Err(CliError::NoElement(PathBuf::from(input))),
        1 => Ok(trees.remove(0).to_json()),
        _ => {
            let mut fragment = Markup::fragment();
            for tree in trees {
                fragment.push(tree);
            }
            Ok(fragment.to_json())
        }
    }
}
