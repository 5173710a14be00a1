//! partition - проход по всему разделу NVS.
//!
//! Порядок скана фиксирован: страницы по возрастанию смещения, внутри страницы
//! слоты по возрастанию индекса. Реестр namespace и сборщик блобов создаются на
//! каждый вызов decode и обновляются строго в этом порядке.
//!
//! Ошибкой (`Err`) считается только длина буфера, не кратная странице.
//! Всё остальное попадает в `PartitionDump::anomalies`, разбор продолжается.

use log::{debug, info, warn};

use crate::blob::{AssembledBlob, BlobAssembler};
use crate::consts::PAGE_SIZE;
use crate::entry::{EntryCursor, SlotOutcome};
use crate::error::{Anomaly, NvsError, NvsResult};
use crate::namespace::NamespaceRegistry;
use crate::page::{read_page, PageHeader, SlotState};
use crate::record::LogicalRecord;

/// Заголовок и состояния слотов одной страницы (для диагностических форматтеров).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub index: usize,
    pub offset: usize,
    pub header: PageHeader,
    pub states: Vec<SlotState>,
}

/// Результат разбора раздела.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionDump {
    pub pages: Vec<PageInfo>,
    /// Записи в порядке скана (включая отдельные BLOB_DATA-чанки).
    pub records: Vec<LogicalRecord>,
    /// Собранные блобы, в порядке первого появления группы.
    pub blobs: Vec<AssembledBlob>,
    /// Итоговый реестр namespace.
    pub namespaces: NamespaceRegistry,
    pub anomalies: Vec<Anomaly>,
}

impl PartitionDump {
    pub fn records_in_page(&self, page: usize) -> impl Iterator<Item = &LogicalRecord> {
        self.records.iter().filter(move |r| r.page == page)
    }

    pub fn written(&self) -> impl Iterator<Item = &LogicalRecord> {
        self.records.iter().filter(|r| r.is_written())
    }

    pub fn blob(&self, namespace_index: u8, key: &str) -> Option<&AssembledBlob> {
        self.blobs
            .iter()
            .find(|b| b.namespace_index == namespace_index && b.key == key)
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

/// Драйвер разбора раздела.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionDecoder {
    include_erased: bool,
}

impl PartitionDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Выдавать также записи из Erased-слотов (с state=Erased). На namespace,
    /// блобы и CSV они не влияют.
    pub fn include_erased(mut self, on: bool) -> Self {
        self.include_erased = on;
        self
    }

    pub fn decode(&self, buf: &[u8]) -> NvsResult<PartitionDump> {
        if buf.len() % PAGE_SIZE != 0 {
            return Err(NvsError::TruncatedPage {
                expected: (buf.len() / PAGE_SIZE + 1) * PAGE_SIZE,
                actual: buf.len(),
            });
        }

        let mut dump = PartitionDump::default();
        let mut registry = NamespaceRegistry::new();
        let mut assembler = BlobAssembler::new();

        for (index, chunk) in buf.chunks_exact(PAGE_SIZE).enumerate() {
            let offset = index * PAGE_SIZE;
            let page = match read_page(chunk, index, offset) {
                Ok(p) => p,
                Err(e) => {
                    warn!("page {}: {}", index, e);
                    dump.anomalies.push(Anomaly::page(index, e));
                    continue;
                }
            };
            debug!(
                "page {} (offset={:08x}): state={} seq={} version={}",
                index,
                offset,
                page.header.state.label(),
                page.header.seq_no,
                page.header.version
            );

            if !page.header.state.is_recognized() {
                let e = NvsError::UnrecognizedPageState {
                    raw: page.header.raw_state,
                };
                warn!("page {}: {}", index, e);
                dump.anomalies.push(Anomaly::page(index, e));
            }

            for (slot, st) in page.states.iter().enumerate() {
                if let SlotState::Unrecognized(raw) = *st {
                    let e = NvsError::UnrecognizedSlotState { slot, raw };
                    warn!("page {}: {}", index, e);
                    dump.anomalies.push(Anomaly::slot(index, slot, e));
                }
            }

            for step in EntryCursor::new(&page).include_erased(self.include_erased) {
                match step.outcome {
                    SlotOutcome::Skipped => {}
                    SlotOutcome::Record { mut record, anomaly } => {
                        registry.annotate(&mut record);
                        registry.observe(&record);
                        assembler.observe(&record);
                        if let Some(e) = anomaly {
                            warn!("page {} slot {}: {}", index, step.slot, e);
                            dump.anomalies.push(Anomaly::slot(index, step.slot, e));
                        }
                        dump.records.push(record);
                    }
                    SlotOutcome::Overflow(e) => {
                        warn!("page {} slot {}: {}", index, step.slot, e);
                        dump.anomalies.push(Anomaly::slot(index, step.slot, e));
                    }
                }
            }

            dump.pages.push(PageInfo {
                index,
                offset,
                header: page.header.clone(),
                states: page.states.to_vec(),
            });
        }

        let (blobs, blob_anomalies) = assembler.finish();
        dump.blobs = blobs;
        dump.anomalies.extend(blob_anomalies);
        dump.namespaces = registry;

        info!(
            "decoded {} page(s): {} record(s), {} blob(s), {} namespace(s), {} anomaly(ies)",
            dump.pages.len(),
            dump.records.len(),
            dump.blobs.len(),
            dump.namespaces.len(),
            dump.anomalies.len()
        );
        Ok(dump)
    }
}

/// Разобрать раздел с настройками по умолчанию.
pub fn decode_partition(buf: &[u8]) -> NvsResult<PartitionDump> {
    PartitionDecoder::new().decode(buf)
}
