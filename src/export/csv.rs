//! export/csv - построчная таблица `key,type,encoding,value`.
//!
//! Формат:
//! - `<name>,namespace,,` для каждого зарегистрированного namespace (в порядке регистрации);
//! - далее Written-записи этого namespace в порядке скана:
//!   * скаляры/строки: `<key>,data,<tag>,<value>`;
//!   * блоб из одного чанка короче inline_blob_max: `<key>,data,base64,<b64>`;
//!   * иначе: `<key>,file,binary,<path>`, байты пишутся в `<blob_dir>/<key>.bin`
//!     (`<key>.<ns>.bin`, если такой файл уже записан для другого namespace).
//! - STR с невалидным UTF-8 пропускается с warn!.
//! - BLOB_IDX не печатается: блоб выводится один раз, на месте первого его чанка.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::DumpConfig;
use crate::consts::NS_DEFINITIONS;
use crate::entry::ValueType;
use crate::partition::PartitionDump;
use crate::record::{LogicalRecord, Value};
use crate::util::{b64, blob_file_name, to_hex};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvStats {
    pub namespaces: usize,
    pub rows: usize,
    pub files: Vec<PathBuf>,
}

/// Текстовое представление скалярного значения (и строки).
pub fn scalar_text(v: &Value) -> String {
    match v {
        Value::Str(s) => s.clone(),
        Value::Raw(b) => to_hex(b),
        other => match other.as_i64() {
            Some(n) => n.to_string(),
            None => String::new(),
        },
    }
}

struct BlobSink<'c> {
    cfg: &'c DumpConfig,
    files: Vec<PathBuf>,
}

impl BlobSink<'_> {
    /// Путь side-файла; при совпадении имени с уже записанным (тот же ключ в другом
    /// namespace) имя дополняется индексом namespace: `<key>.<ns>.bin`.
    fn path_for(&self, ns: u8, key: &str) -> PathBuf {
        let path = self.cfg.blob_dir.join(blob_file_name(key));
        if !self.files.contains(&path) {
            return path;
        }
        let qualified = self.cfg.blob_dir.join(blob_file_name(&format!("{}.{}", key, ns)));
        warn!(
            "csv: blob '{}' in ns {} collides with {}, writing {}",
            key,
            ns,
            path.display(),
            qualified.display()
        );
        qualified
    }

    /// Строка для блоба: inline base64 или side-файл.
    fn row(&mut self, ns: u8, key: &str, chunks: usize, declared: u64, data: &[u8]) -> Result<String> {
        if chunks == 1 && (declared as usize) < self.cfg.inline_blob_max {
            return Ok(format!("{},data,base64,{}", key, b64(data)));
        }
        fs::create_dir_all(&self.cfg.blob_dir)
            .with_context(|| format!("create blob dir {}", self.cfg.blob_dir.display()))?;
        let path = self.path_for(ns, key);
        fs::write(&path, data).with_context(|| format!("write blob {}", path.display()))?;
        debug!("blob '{}' ({} B) -> {}", key, data.len(), path.display());
        let row = format!("{},file,binary,{}", key, path.display());
        self.files.push(path);
        Ok(row)
    }
}

/// Записать CSV в `out`; side-файлы блобов пишутся в cfg.blob_dir.
pub fn write_csv<W: Write>(dump: &PartitionDump, cfg: &DumpConfig, out: &mut W) -> Result<CsvStats> {
    let mut stats = CsvStats::default();
    let mut sink = BlobSink { cfg, files: Vec::new() };

    writeln!(out, "# NVS csv file")?;
    writeln!(out, "key,type,encoding,value")?;

    for (ns, name) in dump.namespaces.iter() {
        writeln!(out, "{},namespace,,", name)?;
        stats.namespaces += 1;

        let mut blobs_done: HashSet<&str> = HashSet::new();
        let members = dump
            .written()
            .filter(|r| r.namespace_index == ns && r.namespace_index != NS_DEFINITIONS);

        for rec in members {
            let row = match row_for(dump, rec, &mut blobs_done, &mut sink)? {
                Some(r) => r,
                None => continue,
            };
            writeln!(out, "{}", row)?;
            stats.rows += 1;
        }
    }

    stats.files = sink.files;
    Ok(stats)
}

fn row_for<'d>(
    dump: &'d PartitionDump,
    rec: &'d LogicalRecord,
    blobs_done: &mut HashSet<&'d str>,
    sink: &mut BlobSink<'_>,
) -> Result<Option<String>> {
    if rec.value_type == ValueType::Str {
        if let Value::Raw(_) = rec.value {
            warn!(
                "csv: skip '{}': string payload is not valid UTF-8 (page {}, slot {})",
                rec.key, rec.page, rec.slot
            );
            return Ok(None);
        }
    }
    if let Some(tag) = rec.value_type.csv_tag() {
        return Ok(Some(format!("{},data,{},{}", rec.key, tag, scalar_text(&rec.value))));
    }
    match rec.value_type {
        ValueType::BlobData => {
            if !blobs_done.insert(rec.key.as_str()) {
                return Ok(None);
            }
            match dump.blob(rec.namespace_index, &rec.key) {
                Some(b) => sink
                    .row(b.namespace_index, &b.key, b.chunk_indices.len(), b.declared_size, &b.data)
                    .map(Some),
                None => Ok(None),
            }
        }
        ValueType::Blob => match rec.value.bytes() {
            Some(bytes) => {
                let declared = rec.data_size.unwrap_or(bytes.len() as u32) as u64;
                sink.row(rec.namespace_index, &rec.key, 1, declared, bytes).map(Some)
            }
            None => Ok(None),
        },
        ValueType::BlobIdx => Ok(None),
        other => {
            warn!(
                "csv: skip '{}' with type {} (page {}, slot {})",
                rec.key, other, rec.page, rec.slot
            );
            Ok(None)
        }
    }
}
