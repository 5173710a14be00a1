//! blob - сборка разбитых блобов из BLOB_DATA-чанков.
//!
//! Группа = (namespace_index, key). Чанки склеиваются по возрастанию chunk_index,
//! независимо от порядка хранения; повтор индекса перезаписывает более ранний чанк.
//! BLOB_IDX - только метаданные: в байты не попадает, но его chunk_count сверяется
//! с числом найденных чанков (несовпадение -> BlobChunkMismatch, без прерывания).

use std::collections::{BTreeMap, HashMap};

use log::warn;

use crate::entry::ValueType;
use crate::error::{Anomaly, NvsError};
use crate::record::{LogicalRecord, Value};

/// Метаданные из BLOB_IDX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobIndexInfo {
    pub total_size: u32,
    pub chunk_count: u8,
    pub chunk_start: u8,
}

/// Собранный блоб.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledBlob {
    pub namespace_index: u8,
    pub namespace_name: Option<String>,
    pub key: String,
    /// Индексы найденных чанков по возрастанию.
    pub chunk_indices: Vec<u8>,
    /// Сумма объявленных размеров чанков.
    pub declared_size: u64,
    pub data: Vec<u8>,
    pub index: Option<BlobIndexInfo>,
}

#[derive(Debug)]
struct Group {
    ns: u8,
    name: Option<String>,
    key: String,
    chunks: BTreeMap<u8, (u32, Vec<u8>)>,
    index: Option<BlobIndexInfo>,
}

#[derive(Debug, Default)]
pub struct BlobAssembler {
    groups: Vec<Group>,
    by_key: HashMap<(u8, String), usize>,
}

impl BlobAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    fn group_mut(&mut self, rec: &LogicalRecord) -> &mut Group {
        let k = (rec.namespace_index, rec.key.clone());
        let idx = match self.by_key.get(&k) {
            Some(&i) => i,
            None => {
                self.groups.push(Group {
                    ns: rec.namespace_index,
                    name: None,
                    key: rec.key.clone(),
                    chunks: BTreeMap::new(),
                    index: None,
                });
                self.by_key.insert(k, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        let g = &mut self.groups[idx];
        if g.name.is_none() {
            g.name = rec.namespace_name.clone();
        }
        g
    }

    /// Учесть запись скана. Не-Written и не-блобовые записи игнорируются.
    pub fn observe(&mut self, rec: &LogicalRecord) {
        if !rec.is_written() {
            return;
        }
        match (&rec.value_type, &rec.value) {
            (ValueType::BlobData, Value::BlobData(bytes)) => {
                let declared = rec.data_size.unwrap_or(bytes.len() as u32);
                let chunk = rec.chunk_index;
                self.group_mut(rec)
                    .chunks
                    .insert(chunk, (declared, bytes.clone()));
            }
            (
                ValueType::BlobIdx,
                &Value::BlobIndex {
                    total_size,
                    chunk_count,
                    chunk_start,
                },
            ) => {
                self.group_mut(rec).index = Some(BlobIndexInfo {
                    total_size,
                    chunk_count,
                    chunk_start,
                });
            }
            _ => {}
        }
    }

    /// Собрать все группы (в порядке первого появления) и аномалии сверки.
    pub fn finish(self) -> (Vec<AssembledBlob>, Vec<Anomaly>) {
        let mut blobs = Vec::with_capacity(self.groups.len());
        let mut anomalies = Vec::new();

        for g in self.groups {
            if let Some(idx) = g.index {
                if idx.chunk_count as usize != g.chunks.len() {
                    let err = NvsError::BlobChunkMismatch {
                        ns: g.ns,
                        key: g.key.clone(),
                        declared: idx.chunk_count,
                        observed: g.chunks.len(),
                    };
                    warn!("{}", err);
                    anomalies.push(Anomaly::partition(err));
                }
            }

            let mut data = Vec::new();
            let mut declared_size = 0u64;
            for (declared, bytes) in g.chunks.values() {
                declared_size += *declared as u64;
                data.extend_from_slice(bytes);
            }

            blobs.push(AssembledBlob {
                namespace_index: g.ns,
                namespace_name: g.name,
                key: g.key,
                chunk_indices: g.chunks.keys().copied().collect(),
                declared_size,
                data,
                index: g.index,
            });
        }
        (blobs, anomalies)
    }
}
