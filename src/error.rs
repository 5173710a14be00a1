//! error - таксономия ошибок/аномалий декодера NVS.
//!
//! Структурные ошибки (буфер не кратен странице) возвращаются как `Err`.
//! Всё остальное копится в `Anomaly` и не прерывает разбор раздела.

use serde::Serialize;
use thiserror::Error;

/// Result type for decoder operations.
pub type NvsResult<T> = Result<T, NvsError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NvsError {
    /// Буфер короче страницы или длина раздела не кратна 4096.
    #[error("truncated page: need {expected} bytes, got {actual}")]
    TruncatedPage { expected: usize, actual: usize },

    #[error("unrecognized page state 0x{raw:08x}")]
    UnrecognizedPageState { raw: u32 },

    #[error("unrecognized slot state {raw} at slot {slot}")]
    UnrecognizedSlotState { slot: usize, raw: u8 },

    #[error("entry at slot {slot} spans {span} slots, past the end of the page")]
    SpanOverflow { slot: usize, span: u8 },

    #[error("string entry '{key}' is not valid UTF-8")]
    InvalidStringEncoding { key: String },

    #[error("blob '{key}' (ns {ns}): index declares {declared} chunk(s), found {observed}")]
    BlobChunkMismatch {
        ns: u8,
        key: String,
        declared: u8,
        observed: usize,
    },
}

/// Аномалия, привязанная к месту в разделе.
/// `slot == None` - аномалия уровня страницы или всего раздела (блобы).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub page: Option<usize>,
    pub slot: Option<usize>,
    #[serde(serialize_with = "serialize_display")]
    pub error: NvsError,
}

impl Anomaly {
    pub fn page(page: usize, error: NvsError) -> Self {
        Self { page: Some(page), slot: None, error }
    }

    pub fn slot(page: usize, slot: usize, error: NvsError) -> Self {
        Self { page: Some(page), slot: Some(slot), error }
    }

    pub fn partition(error: NvsError) -> Self {
        Self { page: None, slot: None, error }
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.page, self.slot) {
            (Some(p), Some(s)) => write!(f, "page {} slot {}: {}", p, s, self.error),
            (Some(p), None) => write!(f, "page {}: {}", p, self.error),
            _ => write!(f, "{}", self.error),
        }
    }
}

fn serialize_display<S: serde::Serializer>(e: &NvsError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(e)
}
