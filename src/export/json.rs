//! export/json - список страниц с записями (serde_json, pretty).
//!
//! Форма: `[{page_state, page_seq_no, page_version, page_crc_32,
//! page_entry_state_bitmap, entries: [...]}, ...]`. Байтовые payload - base64.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

use crate::page::bitmap_digits;
use crate::partition::PartitionDump;
use crate::record::{LogicalRecord, Value};
use crate::util::b64;

#[derive(Debug, Serialize)]
pub struct JsonPage<'a> {
    pub page_state: &'static str,
    pub page_seq_no: u32,
    pub page_version: u16,
    pub page_crc_32: u32,
    pub page_entry_state_bitmap: String,
    pub entries: Vec<JsonEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonEntry<'a> {
    pub entry_state: &'static str,
    pub entry_ns_index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_ns: Option<&'a str>,
    pub entry_type: String,
    pub entry_span: u8,
    pub entry_chunk_index: u8,
    pub entry_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_data_size: Option<u32>,
    pub entry_data: serde_json::Value,
}

fn data_json(v: &Value) -> serde_json::Value {
    match v {
        Value::U8(n) => json!(n),
        Value::I8(n) => json!(n),
        Value::U16(n) => json!(n),
        Value::I16(n) => json!(n),
        Value::U32(n) => json!(n),
        Value::I32(n) => json!(n),
        Value::Str(s) => json!(s),
        Value::Blob(b) | Value::BlobData(b) | Value::Raw(b) => json!(b64(b)),
        Value::BlobIndex {
            total_size,
            chunk_count,
            chunk_start,
        } => json!({
            "size": total_size,
            "chunk_count": chunk_count,
            "chunk_start": chunk_start,
        }),
    }
}

impl<'a> From<&'a LogicalRecord> for JsonEntry<'a> {
    fn from(r: &'a LogicalRecord) -> Self {
        JsonEntry {
            entry_state: r.state.label(),
            entry_ns_index: r.namespace_index,
            entry_ns: r.namespace_name.as_deref(),
            entry_type: r.value_type.to_string(),
            entry_span: r.span,
            entry_chunk_index: r.chunk_index,
            entry_key: &r.key,
            entry_data_size: r.data_size,
            entry_data: data_json(&r.value),
        }
    }
}

pub fn json_pages(dump: &PartitionDump) -> Vec<JsonPage<'_>> {
    dump.pages
        .iter()
        .map(|p| JsonPage {
            page_state: p.header.state.label(),
            page_seq_no: p.header.seq_no,
            page_version: p.header.version,
            page_crc_32: p.header.crc32,
            page_entry_state_bitmap: bitmap_digits(&p.states),
            entries: dump.records_in_page(p.index).map(JsonEntry::from).collect(),
        })
        .collect()
}

pub fn write_json<W: Write>(dump: &PartitionDump, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &json_pages(dump)).context("serialize pages json")?;
    writeln!(out)?;
    Ok(())
}
