//! Layout diagnostic: read an IDF board file, report what the engine sees,
//! check the unedited round trip and optionally show the diff of a shift.
//!
//! Usage: idf_diag <board.idf> [config.json] [--shift DX DY]
//!
//! Set RUST_LOG=debug for reader and reconstruction traces.

use anyhow::{bail, Context, Result};
use idfrust::strings::reconstruct;
use idfrust::{
    diff, ComponentType, EditorConfiguration, IdfReader, IdfReaderConfiguration, IdfWriter,
    TranslateTarget,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

struct Args {
    path: String,
    config: Option<String>,
    shift: Option<(f64, f64)>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut path = None;
    let mut config = None;
    let mut shift = None;
    while let Some(arg) = args.next() {
        if arg == "--shift" {
            let dx: f64 = args.next().context("--shift needs DX")?.parse()?;
            let dy: f64 = args.next().context("--shift needs DY")?.parse()?;
            shift = Some((dx, dy));
        } else if path.is_none() {
            path = Some(arg);
        } else if config.is_none() {
            config = Some(arg);
        } else {
            bail!("unexpected argument '{}'", arg);
        }
    }
    let Some(path) = path else {
        bail!("usage: idf_diag <board.idf> [config.json] [--shift DX DY]");
    };
    Ok(Args {
        path,
        config,
        shift,
    })
}

fn main() -> Result<()> {
    init_logging();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading configuration {}", path))?;
            EditorConfiguration::from_json(&json)?
        }
        None => EditorConfiguration::default(),
    };

    let bytes = std::fs::read(&args.path).with_context(|| format!("reading {}", args.path))?;
    let mut doc = IdfReader::from_bytes(&bytes)
        .with_configuration(IdfReaderConfiguration {
            busbar: config.busbar.clone(),
            ..Default::default()
        })
        .read()
        .with_context(|| format!("parsing {}", args.path))?;

    println!("═══════════════════ {} ═══════════════════", args.path);
    println!(
        "Header: {} {} from '{}', board '{}', units {}",
        doc.header.file_type,
        doc.header.version,
        doc.header.source_system,
        doc.header.board_name,
        doc.header.units
    );
    match doc.board().and_then(|b| b.bounds()) {
        Some(bounds) => println!(
            "Board: {:.3} x {:.3} mm at ({:.3}, {:.3})",
            bounds.width(),
            bounds.height(),
            bounds.min.x,
            bounds.min.y
        ),
        None => println!("Board: none"),
    }
    println!(
        "Outlines: {} ({} busbars, {} strings), placements: {}",
        doc.outline_count(),
        doc.busbar_names().len(),
        doc.string_names().len(),
        doc.placement_count()
    );

    for outline in doc.outlines() {
        let ids = doc.placement_ids_of(&outline.name).join(", ");
        match outline.component_type {
            ComponentType::String => match reconstruct(outline, &config.cell_types) {
                Ok(meta) => println!(
                    "  string '{}': {} x {}, dist {} mm, +{} mm, -{} mm [{}]",
                    outline.name, meta.nr_cells, meta.cell_type, meta.dist, meta.plus, meta.minus, ids
                ),
                Err(e) => println!("  string '{}': {} [{}]", outline.name, e, ids),
            },
            ComponentType::Busbar => println!(
                "  busbar '{}': height {} mm{} [{}]",
                outline.name,
                outline.height,
                if doc.is_busbar_raised(&outline.name) == Some(true) {
                    " (raised)"
                } else {
                    ""
                },
                ids
            ),
            ComponentType::Other => println!("  other '{}' [{}]", outline.name, ids),
        }
    }

    if !doc.notifications.is_empty() {
        println!("Notifications:");
        for n in doc.notifications.iter() {
            println!("  {}", n);
        }
    }

    let written = IdfWriter::new(&doc).write_to_vec();
    if written == bytes {
        println!("Round trip: byte-identical ({} bytes)", bytes.len());
    } else {
        println!(
            "Round trip: DIFFERS ({} bytes in, {} bytes out)",
            bytes.len(),
            written.len()
        );
    }

    if let Some((dx, dy)) = args.shift {
        let before = IdfWriter::new(&doc).write_to_string();
        let moved = doc.translate(&TranslateTarget::All, dx, dy)?;
        let after = IdfWriter::new(&doc).write_to_string();
        println!("Shifted {} placements by ({}, {}):", moved, dx, dy);
        for line in diff(&before, &after, &args.path, &format!("{} (shifted)", args.path)) {
            println!("{}", line);
        }
    }

    Ok(())
}
