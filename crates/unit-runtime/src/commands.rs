//! Command handlers
//!
//! Each handler writes its result to the given writer; `main` passes
//! stdout, tests pass a buffer.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use unit_core::{sort_records, ScanOptions, SourceUnit, UnitRegistry, UnitsFile};

use crate::cli::Command;
use crate::startup::{scanners, Toolchain};

/// The four projections of a unit, plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitView {
    pub id: String,
    pub name: String,
    pub root_dir: String,
    pub paths: Vec<String>,
    pub kind: String,
}

impl UnitView {
    pub fn of(unit: &dyn SourceUnit) -> Self {
        Self {
            id: unit.id(),
            name: unit.name(),
            root_dir: unit.root_dir().to_string(),
            paths: unit.paths(),
            kind: unit.kind().to_string(),
        }
    }
}

/// Run `command` against `registry`.
pub fn dispatch<W: Write>(command: &Command, registry: &UnitRegistry, out: &mut W) -> Result<()> {
    match command {
        Command::Scan {
            dir,
            toolchain,
            pretty,
            ..
        } => {
            let opts = command.scan_options().unwrap_or_default();
            run_scan(dir, &opts, *toolchain, *pretty, out)
        }
        Command::Units { file, json } => run_units(registry, file, *json, out),
        Command::Kinds => run_kinds(registry, out),
    }
}

/// Scan `dir` and print every record as one JSON array sorted by name.
pub fn run_scan<W: Write>(
    dir: &Path,
    opts: &ScanOptions,
    toolchain: Toolchain,
    pretty: bool,
    out: &mut W,
) -> Result<()> {
    let mut records = Vec::new();
    for scanner in scanners(toolchain) {
        let found = scanner
            .scan(dir, opts)
            .with_context(|| format!("{} scan of {} failed", scanner.toolchain(), dir.display()))?;
        records.extend(found);
    }
    sort_records(&mut records);

    info!("Scanned {} source units", records.len());
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &records)?;
    } else {
        serde_json::to_writer(&mut *out, &records)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Resolve a units file and print each unit's projections.
pub fn run_units<W: Write>(
    registry: &UnitRegistry,
    file: &Path,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let units = UnitsFile::load(file)
        .and_then(|f| f.resolve(registry))
        .with_context(|| format!("Failed to load units from {}", file.display()))?;

    let views: Vec<_> = units.iter().map(|u| UnitView::of(u.as_ref())).collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &views)?;
        writeln!(out)?;
    } else {
        for view in &views {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                view.id,
                view.name,
                view.root_dir,
                view.paths.join(",")
            )?;
        }
    }
    Ok(())
}

/// Print registered kind keys, one per line.
pub fn run_kinds<W: Write>(registry: &UnitRegistry, out: &mut W) -> Result<()> {
    for kind in registry.kinds() {
        writeln!(out, "{}", kind)?;
    }
    Ok(())
}
