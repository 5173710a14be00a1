//! export/text - подробный диагностический дамп: страница за страницей, запись за записью.
//! Не является стабильным форматом.

use anyhow::Result;
use std::io::Write;

use crate::consts::PAGE_HDR_SIZE;
use crate::page::bitmap_digits;
use crate::partition::{PageInfo, PartitionDump};
use crate::record::{LogicalRecord, Value};
use crate::util::{hex_dump, hex_list};

const RULE: &str = "------------------------------------------------------------------------------";

pub fn write_text<W: Write>(dump: &PartitionDump, out: &mut W) -> Result<()> {
    for page in &dump.pages {
        write_page_header(page, out)?;

        writeln!(
            out,
            "\n  Read entries data ( offset = {:08x} ):",
            page.offset + PAGE_HDR_SIZE
        )?;
        for rec in dump.records_in_page(page.index) {
            write_entry(rec, out)?;
        }

        for a in dump.anomalies.iter().filter(|a| a.page == Some(page.index)) {
            writeln!(out, "  !! {}", a)?;
        }
        writeln!(out, "\n\n{}\n", RULE)?;
    }

    let global: Vec<_> = dump.anomalies.iter().filter(|a| a.page.is_none()).collect();
    if !global.is_empty() {
        writeln!(out, "Partition anomalies:")?;
        for a in global {
            writeln!(out, "  !! {}", a)?;
        }
    }
    Ok(())
}

fn write_page_header<W: Write>(page: &PageInfo, out: &mut W) -> Result<()> {
    let h = &page.header;
    writeln!(out, "Page {} ( offset={:08x} )", page.index, page.offset)?;
    writeln!(
        out,
        "  page state   : {} ({})",
        h.state.label(),
        hex_list(&h.raw_state.to_le_bytes())
    )?;
    writeln!(
        out,
        "  page seq no. : {} ({})",
        h.seq_no,
        hex_list(&h.seq_no.to_le_bytes())
    )?;
    writeln!(out, "  page version : {} ({})", h.version, hex_list(&[h.raw_version]))?;
    writeln!(out, "  crc32 : 0x{:08x}", h.crc32)?;
    writeln!(
        out,
        "  page entry state bitmap (decoded) : {}",
        bitmap_digits(&page.states)
    )?;
    Ok(())
}

fn write_entry<W: Write>(rec: &LogicalRecord, out: &mut W) -> Result<()> {
    writeln!(out, "  Entry {} (offset = {:08x})", rec.slot, rec.offset)?;
    writeln!(out, "  Bitmap State : {}", rec.state.label())?;
    writeln!(out, "    {} Entry {}", rec.state.label(), rec.slot)?;
    writeln!(out, "      NS Index : {}", rec.namespace_index)?;
    if let Some(ns) = &rec.namespace_name {
        writeln!(out, "          NS : {}", ns)?;
    }
    writeln!(out, "      Type : {}", rec.value_type)?;
    writeln!(out, "      Span : {}", rec.span)?;
    writeln!(out, "      ChunkIndex : {}", rec.chunk_index)?;
    writeln!(out, "      Key : {}", rec.key)?;

    match &rec.value {
        Value::U8(v) => writeln!(out, "      Data (U8) : 0x{:x}", v)?,
        Value::I8(v) => writeln!(out, "      Data (I8) : {}", v)?,
        Value::U16(v) => writeln!(out, "      Data (U16) : 0x{:02x}", v)?,
        Value::I16(v) => writeln!(out, "      Data (I16) : {}", v)?,
        Value::U32(v) => writeln!(out, "      Data (U32) : 0x{:04x}", v)?,
        Value::I32(v) => writeln!(out, "      Data (I32) : {}", v)?,
        Value::Str(s) => {
            writeln!(out, "      String :")?;
            writeln!(out, "        Size : {}", rec.data_size.unwrap_or(0))?;
            writeln!(out, "        Data : {}", s)?;
        }
        Value::Blob(b) | Value::BlobData(b) => {
            writeln!(out, "      Blob :")?;
            writeln!(out, "        Size : {}", rec.data_size.unwrap_or(0))?;
            writeln!(out, "        Data :")?;
            writeln!(out, "{}", hex_dump(b))?;
        }
        Value::BlobIndex {
            total_size,
            chunk_count,
            chunk_start,
        } => {
            writeln!(out, "      Blob IDX :")?;
            writeln!(out, "        Size        : {}", total_size)?;
            writeln!(out, "        Chunk Count : {}", chunk_count)?;
            writeln!(out, "        Chunk Start : {}", chunk_start)?;
        }
        Value::Raw(b) => writeln!(out, "      Data (raw) : {}", hex_list(b))?,
    }
    writeln!(out)?;
    Ok(())
}
