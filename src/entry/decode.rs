//! entry/decode - курсор по таблице слотов одной страницы.
//!
//! Каждый шаг разбирает запись, начинающуюся в текущем слоте, и сдвигает курсор
//! ровно на число занятых ею слотов (`Step::consumed`):
//! - не Written / NONE / ANY / скалярные типы / BLOB_IDX / неизвестные коды: 1 слот;
//! - STR / BLOB / BLOB_DATA: `span` слотов (span=0 трактуется как 1);
//! - span, выходящий за слот 125: SpanOverflow, курсор уходит в конец страницы.

use byteorder::{ByteOrder, LittleEndian};

use crate::consts::SLOTS_PER_PAGE;
use crate::error::NvsError;
use crate::page::{PageView, SlotState};
use crate::record::{LogicalRecord, Value};

use super::slot::RawSlot;
use super::types::ValueType;

/// Результат одного шага курсора.
#[derive(Debug, Clone)]
pub enum SlotOutcome {
    /// Слот не порождает записи (не Written, NONE, ANY).
    Skipped,
    /// Запись разобрана; `anomaly` - некритичная проблема самой записи.
    Record {
        record: LogicalRecord,
        anomaly: Option<NvsError>,
    },
    /// Запись не помещается в страницу.
    Overflow(NvsError),
}

#[derive(Debug, Clone)]
pub struct Step {
    /// Слот, с которого начался шаг.
    pub slot: usize,
    /// Сколько слотов потреблено (>= 1).
    pub consumed: usize,
    pub outcome: SlotOutcome,
}

/// Курсор по слотам страницы в порядке возрастания индекса.
pub struct EntryCursor<'p, 'a> {
    page: &'p PageView<'a>,
    pos: usize,
    include_erased: bool,
}

impl<'p, 'a> EntryCursor<'p, 'a> {
    pub fn new(page: &'p PageView<'a>) -> Self {
        Self {
            page,
            pos: 0,
            include_erased: false,
        }
    }

    /// Разбирать также Erased-слоты (диагностика).
    pub fn include_erased(mut self, on: bool) -> Self {
        self.include_erased = on;
        self
    }

    /// Сдвинуть курсор на `consumed` слотов (не дальше конца страницы).
    fn consume(&mut self, consumed: usize) {
        self.pos = (self.pos + consumed.max(1)).min(SLOTS_PER_PAGE);
    }

    fn admitted(&self, state: SlotState) -> bool {
        match state {
            SlotState::Written => true,
            SlotState::Erased => self.include_erased,
            _ => false,
        }
    }

    fn decode_at(&self, i: usize) -> (usize, SlotOutcome) {
        let Some(raw) = RawSlot::new(self.page.slot(i)) else {
            return (1, SlotOutcome::Skipped);
        };
        let state = self.page.states[i];
        let vt = raw.value_type();
        if !self.admitted(state) || vt.is_vacant() {
            return (1, SlotOutcome::Skipped);
        }

        let key = raw.key();
        let mut anomaly = None;
        let mut data_size = None;

        let (consumed, value) = if vt.is_variable() {
            let span = raw.span();
            let need = (span as usize).max(1);
            if i + need > SLOTS_PER_PAGE {
                return (
                    SLOTS_PER_PAGE - i,
                    SlotOutcome::Overflow(NvsError::SpanOverflow { slot: i, span }),
                );
            }
            let payload = self.page.slot_run(i + 1, need - 1);
            let declared = raw.var_size() as usize;
            data_size = Some(declared as u32);

            let value = match vt {
                ValueType::Str => {
                    // declared включает завершающий NUL; хвостовые NUL-паддинги тоже срезаем
                    let take = declared.saturating_sub(1).min(payload.len());
                    match String::from_utf8(payload[..take].to_vec()) {
                        Ok(s) => Value::Str(s.trim_end_matches('\0').to_string()),
                        Err(e) => {
                            anomaly = Some(NvsError::InvalidStringEncoding { key: key.clone() });
                            Value::Raw(e.into_bytes())
                        }
                    }
                }
                ValueType::Blob => Value::Blob(payload[..declared.min(payload.len())].to_vec()),
                _ => Value::BlobData(payload[..declared.min(payload.len())].to_vec()),
            };
            (need, value)
        } else {
            let d = raw.data();
            let value = match vt {
                ValueType::U8 => Value::U8(d[0]),
                ValueType::I8 => Value::I8(d[0] as i8),
                ValueType::U16 => Value::U16(LittleEndian::read_u16(&d[0..2])),
                ValueType::I16 => Value::I16(LittleEndian::read_i16(&d[0..2])),
                ValueType::U32 => Value::U32(LittleEndian::read_u32(&d[0..4])),
                ValueType::I32 => Value::I32(LittleEndian::read_i32(&d[0..4])),
                ValueType::BlobIdx => {
                    let (total_size, chunk_count, chunk_start) = raw.blob_index();
                    data_size = Some(total_size);
                    Value::BlobIndex {
                        total_size,
                        chunk_count,
                        chunk_start,
                    }
                }
                // U64/I64 и неизвестные коды: сырые inline-байты
                _ => Value::Raw(d.to_vec()),
            };
            (1, value)
        };

        let record = LogicalRecord {
            page: self.page.index,
            slot: i,
            offset: self.page.slot_offset(i),
            state,
            namespace_index: raw.ns(),
            namespace_name: None,
            value_type: vt,
            span: raw.span(),
            chunk_index: raw.chunk_index(),
            key,
            data_size,
            value,
        };
        (consumed, SlotOutcome::Record { record, anomaly })
    }
}

impl<'p, 'a> Iterator for EntryCursor<'p, 'a> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.pos >= SLOTS_PER_PAGE {
            return None;
        }
        let slot = self.pos;
        let (consumed, outcome) = self.decode_at(slot);
        self.consume(consumed);
        Some(Step {
            slot,
            consumed,
            outcome,
        })
    }
}
