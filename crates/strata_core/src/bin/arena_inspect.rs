//! # Arena Inspector
//!
//! Builds both arena variants from a TOML file, runs the reference
//! allocate/free/defragment sequence against them and prints the resulting
//! directory and memory dumps.
//!
//! ```text
//! arena_inspect [CONFIG.toml]
//! ```
//!
//! ```toml
//! [fixed]
//! capacity = 64
//! dump_columns = 8
//!
//! [compacting]
//! capacity = 64
//! dump_columns = 8
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use serde::Deserialize;
use strata_core::{ArenaConfig, ArenaError, ArenaResult, CompactingArena, FixedArena};

/// Top-level config file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct InspectConfig {
    fixed: ArenaConfig,
    compacting: ArenaConfig,
}

fn load_config(path: Option<String>) -> ArenaResult<InspectConfig> {
    let Some(path) = path else {
        return Ok(InspectConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .map_err(|e| ArenaError::InvalidConfig(format!("{path}: {e}")))?;
    let config: InspectConfig =
        toml::from_str(&text).map_err(|e| ArenaError::InvalidConfig(e.to_string()))?;
    config.fixed.validate()?;
    config.compacting.validate()?;
    Ok(config)
}

fn inspect_fixed(
    config: &ArenaConfig,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut arena = FixedArena::from_config(config)?;

    let a = arena.alloc::<u8>(16)?;
    arena.bytes_mut(a)?.fill(0xA);
    let b = arena.alloc::<u8>(16)?;
    arena.bytes_mut(b)?.fill(0xB);
    arena.free(a)?;
    let c = arena.alloc::<u8>(8)?;
    arena.bytes_mut(c)?.fill(0xC);

    writeln!(out, "== fixed arena ({} bytes)", arena.capacity())?;
    for (addr, size) in arena.blocks() {
        writeln!(out, "  block @{:>6}  {size} bytes", addr.offset())?;
    }
    writeln!(out, "  used: {} bytes", arena.used_bytes())?;
    arena.dump(out)?;
    Ok(())
}

fn inspect_compacting(
    config: &ArenaConfig,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut arena = CompactingArena::from_config(config)?;

    let a = arena.alloc::<u8>(16)?;
    arena.bytes_mut(&a)?.fill(0xA);
    let mut b = arena.alloc::<u8>(16)?;
    arena.bytes_mut(&b)?.fill(0xB);
    arena.free(a)?;

    writeln!(out, "== compacting arena ({} bytes)", arena.capacity())?;
    writeln!(
        out,
        "  before defragment: fragmentation {:.2}, largest gap {}",
        arena.fragmentation(),
        arena.largest_gap()
    )?;

    let report = arena.defragment();
    tracing::info!(?report, "defragmented");
    b.reset(&arena)?;

    for (id, info) in arena.directory() {
        writeln!(
            out,
            "  block #{:<4} [{}, {})  {} bytes",
            id.as_u64(),
            info.start(),
            info.end(),
            info.size()
        )?;
    }
    writeln!(out, "  b still reads {:#x}", arena.read(&b)?)?;
    arena.dump(out)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(io::stderr)
        .init();

    let config = match load_config(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = inspect_fixed(&config.fixed, &mut out)
        .and_then(|()| inspect_compacting(&config.compacting, &mut out));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("inspection failed: {e}");
            ExitCode::FAILURE
        }
    }
}
