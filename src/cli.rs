use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{DumpBuilder, DumpConfig};
use crate::export::{write_csv, write_json, write_summary, write_text};
use crate::partition::{PartitionDecoder, PartitionDump};
use crate::util::read_image;

/// Exit code, когда в strict-режиме найдены аномалии.
pub const EXIT_ANOMALIES: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "nvsdump",
    version,
    about = "Decode NVS flash partition images",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Namespaces and keys as `key,type,encoding,value` rows; large blobs go to side files
    Csv {
        #[arg(long)]
        path: PathBuf,
        /// Directory for `<key>.bin` files (env NVS_BLOB_DIR)
        #[arg(long)]
        blob_dir: Option<PathBuf>,
        /// Single-chunk blobs shorter than this are printed inline as base64
        #[arg(long)]
        inline_max: Option<usize>,
        /// Exit with code 2 if anomalies were found
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Verbose per-page/per-entry dump (debugging aid, not a stable format)
    Text {
        #[arg(long)]
        path: PathBuf,
        /// Decode Erased slots too
        #[arg(long, default_value_t = false)]
        include_erased: bool,
    },
    /// Pages with decoded entries as JSON
    Json {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        include_erased: bool,
    },
    /// Page/record/anomaly counts
    ///
    /// Пример:
    ///   nvsdump summary --path ./nvs.bin --json
    Summary {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

fn decode_file(path: &Path, cfg: &DumpConfig) -> Result<PartitionDump> {
    let buf = read_image(path)?;
    info!("{}: {} bytes, {}", path.display(), buf.len(), cfg);
    PartitionDecoder::new()
        .include_erased(cfg.include_erased)
        .decode(&buf)
        .map_err(|e| anyhow!("{}: {}", path.display(), e))
}

/// Разобрать аргументы и выполнить команду. Возвращает exit code (0 или EXIT_ANOMALIES).
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    run_cmd(cli.cmd)
}

pub fn run_cmd(cmd: Cmd) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let (dump, cfg) = match cmd {
        Cmd::Csv { path, blob_dir, inline_max, strict } => {
            let cfg = DumpBuilder::new()
                .blob_dir(blob_dir)
                .inline_blob_max(inline_max)
                .strict(strict)
                .build();
            let dump = decode_file(&path, &cfg)?;
            let stats = write_csv(&dump, &cfg, &mut out)?;
            info!(
                "csv: {} namespace(s), {} row(s), {} blob file(s)",
                stats.namespaces,
                stats.rows,
                stats.files.len()
            );
            (dump, cfg)
        }
        Cmd::Text { path, include_erased } => {
            let cfg = DumpBuilder::new().include_erased(include_erased).build();
            let dump = decode_file(&path, &cfg)?;
            write_text(&dump, &mut out)?;
            (dump, cfg)
        }
        Cmd::Json { path, include_erased } => {
            let cfg = DumpBuilder::new().include_erased(include_erased).build();
            let dump = decode_file(&path, &cfg)?;
            write_json(&dump, &mut out)?;
            (dump, cfg)
        }
        Cmd::Summary { path, json, strict } => {
            let cfg = DumpBuilder::new().strict(strict).build();
            let dump = decode_file(&path, &cfg)?;
            write_summary(&dump, json, &mut out)?;
            (dump, cfg)
        }
    };
    out.flush()?;

    if dump.has_anomalies() {
        warn!("{} anomaly(ies) found", dump.anomalies.len());
        if cfg.strict {
            return Ok(EXIT_ANOMALIES);
        }
    }
    Ok(0)
}
