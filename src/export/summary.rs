//! export/summary - короткий отчёт по разделу (текст или JSON в одну строку).

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::page::PageState;
use crate::partition::PartitionDump;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageCounts {
    pub empty: usize,
    pub active: usize,
    pub full: usize,
    pub freeing: usize,
    pub corrupt: usize,
    pub unrecognized: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub pages_total: usize,
    pub pages: PageCounts,
    pub records: usize,
    pub written: usize,
    pub blobs: usize,
    pub namespaces: Vec<String>,
    pub anomalies: Vec<String>,
}

impl Summary {
    pub fn from_dump(dump: &PartitionDump) -> Self {
        let mut pages = PageCounts::default();
        for p in &dump.pages {
            match p.header.state {
                PageState::Empty => pages.empty += 1,
                PageState::Active => pages.active += 1,
                PageState::Full => pages.full += 1,
                PageState::Freeing => pages.freeing += 1,
                PageState::Corrupt => pages.corrupt += 1,
                PageState::Unrecognized(_) => pages.unrecognized += 1,
            }
        }
        Summary {
            pages_total: dump.pages.len(),
            pages,
            records: dump.records.len(),
            written: dump.written().count(),
            blobs: dump.blobs.len(),
            namespaces: dump.namespaces.iter().map(|(_, n)| n.to_string()).collect(),
            anomalies: dump.anomalies.iter().map(|a| a.to_string()).collect(),
        }
    }
}

pub fn write_summary<W: Write>(dump: &PartitionDump, json: bool, out: &mut W) -> Result<()> {
    let s = Summary::from_dump(dump);
    if json {
        let line = serde_json::to_string(&s).context("serialize summary")?;
        writeln!(out, "{}", line)?;
        return Ok(());
    }
    writeln!(out, "NVS partition summary:")?;
    writeln!(out, "  pages_total  = {}", s.pages_total)?;
    writeln!(
        out,
        "  pages        = empty:{} active:{} full:{} freeing:{} corrupt:{} unrecognized:{}",
        s.pages.empty,
        s.pages.active,
        s.pages.full,
        s.pages.freeing,
        s.pages.corrupt,
        s.pages.unrecognized
    )?;
    writeln!(out, "  records      = {} (written {})", s.records, s.written)?;
    writeln!(out, "  blobs        = {}", s.blobs)?;
    writeln!(out, "  namespaces   = {}", s.namespaces.join(", "))?;
    writeln!(out, "  anomalies    = {}", s.anomalies.len())?;
    for a in &s.anomalies {
        writeln!(out, "    {}", a)?;
    }
    Ok(())
}
