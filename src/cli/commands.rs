//! Command dispatch
//!
//! Every command writes its data to `out` so that callers decide where it
//! lands (stdout in the binary, a buffer in tests).

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{ForestStats, HierarchyService};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Forest, TraversalMode};
use crate::tree_traits::ForestConvert;

pub fn execute_command<W: Write>(cli: &Cli, settings: &Settings, out: &mut W) -> CliResult<()> {
    let service = HierarchyService::new();
    match &cli.command {
        Some(Commands::Tree { file }) => _tree(&service, settings, file, out),
        Some(Commands::Stats { file }) => _stats(&service, file, out),
        Some(Commands::Flatten { file, mode, from }) => {
            _flatten(&service, settings, file, mode.as_deref(), from.as_deref(), out)
        }
        Some(Commands::Level { file, value }) => _level(&service, file, value, out),
        Some(Commands::Ancestors { file, value }) => _ancestors(&service, file, value, out),
        Some(Commands::Leaves { file }) => _leaves(&service, file, out),
        Some(Commands::Remove {
            file,
            value,
            descendants,
        }) => _remove(&service, settings, file, value, *descendants, out),
        Some(Commands::Move {
            file,
            value,
            new_parent,
        }) => _move(&service, settings, file, value, new_parent, out),
        Some(Commands::Config { command }) => {
            _config(command, settings, cli.config_dir.as_deref(), out)
        }
        Some(Commands::Completion { shell }) => {
            clap_complete::generate(*shell, &mut Cli::command(), "forrest", out);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see 'forrest --help'".to_string(),
        )),
    }
}

/// Resolve the `--mode` argument, falling back to the configured default.
fn resolve_mode(mode: Option<&str>, settings: &Settings) -> CliResult<TraversalMode> {
    match mode {
        Some(raw) => Ok(raw.parse::<TraversalMode>()?),
        None => Ok(settings.default_mode),
    }
}

fn render<W: Write>(forest: &Forest<String>, settings: &Settings, out: &mut W) -> CliResult<()> {
    if forest.is_empty() {
        writeln!(out, "{}", settings.empty_label)?;
        return Ok(());
    }
    for tree in forest.to_tree_strings() {
        write!(out, "{}", tree)?;
    }
    Ok(())
}

fn write_lines<'a, W, I>(values: I, out: &mut W) -> CliResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a String>,
{
    for value in values {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

#[instrument(skip(service, settings, out))]
fn _tree<W: Write>(
    service: &HierarchyService,
    settings: &Settings,
    file: &Path,
    out: &mut W,
) -> CliResult<()> {
    let forest = service.build(file)?;
    render(&forest, settings, out)
}

#[instrument(skip(service, out))]
fn _stats<W: Write>(service: &HierarchyService, file: &Path, out: &mut W) -> CliResult<()> {
    let forest = service.build(file)?;
    let stats = ForestStats::of(&forest);
    writeln!(out, "roots: {}", stats.roots)?;
    writeln!(out, "nodes: {}", stats.nodes)?;
    match stats.depth {
        Some(depth) => writeln!(out, "depth: {}", depth)?,
        None => writeln!(out, "depth: -")?,
    }
    Ok(())
}

#[instrument(skip(service, settings, out))]
fn _flatten<W: Write>(
    service: &HierarchyService,
    settings: &Settings,
    file: &Path,
    mode: Option<&str>,
    from: Option<&str>,
    out: &mut W,
) -> CliResult<()> {
    let mode = resolve_mode(mode, settings)?;
    let forest = service.build(file)?;
    debug!("flatten: mode={}", mode);
    match from {
        Some(start) => write_lines(forest.flatten_from(&start.to_string(), mode)?, out),
        None => write_lines(forest.flatten(mode), out),
    }
}

#[instrument(skip(service, out))]
fn _level<W: Write>(
    service: &HierarchyService,
    file: &Path,
    value: &str,
    out: &mut W,
) -> CliResult<()> {
    let forest = service.build(file)?;
    let value = value.to_string();
    writeln!(out, "level: {}", forest.level_of(&value)?)?;
    writeln!(out, "depth: {}", forest.depth_of(&value)?)?;
    writeln!(out, "size: {}", forest.size_of(&value)?)?;
    Ok(())
}

#[instrument(skip(service, out))]
fn _ancestors<W: Write>(
    service: &HierarchyService,
    file: &Path,
    value: &str,
    out: &mut W,
) -> CliResult<()> {
    let forest = service.build(file)?;
    write_lines(forest.traverse_to_root(&value.to_string())?, out)
}

#[instrument(skip(service, out))]
fn _leaves<W: Write>(service: &HierarchyService, file: &Path, out: &mut W) -> CliResult<()> {
    let forest = service.build(file)?;
    write_lines(forest.leaves(), out)
}

#[instrument(skip(service, settings, out))]
fn _remove<W: Write>(
    service: &HierarchyService,
    settings: &Settings,
    file: &Path,
    value: &str,
    descendants: bool,
    out: &mut W,
) -> CliResult<()> {
    let mut forest = service.build(file)?;
    forest.remove(&value.to_string(), descendants)?;
    render(&forest, settings, out)
}

#[instrument(skip(service, settings, out))]
fn _move<W: Write>(
    service: &HierarchyService,
    settings: &Settings,
    file: &Path,
    value: &str,
    new_parent: &str,
    out: &mut W,
) -> CliResult<()> {
    let mut forest = service.build(file)?;
    forest.move_to(&value.to_string(), &new_parent.to_string())?;
    render(&forest, settings, out)
}

#[instrument(skip(settings, out))]
fn _config<W: Write>(
    command: &ConfigCommands,
    settings: &Settings,
    config_dir: Option<&Path>,
    out: &mut W,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => write!(out, "{}", settings.to_toml()?)?,
        ConfigCommands::Template => write!(out, "{}", Settings::template())?,
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string());
            let local_dir = config_dir
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            writeln!(out, "global: {}", global)?;
            writeln!(out, "local:  {}", local_config_path(&local_dir).display())?;
        }
    }
    Ok(())
}
