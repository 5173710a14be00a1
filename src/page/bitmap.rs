//! page/bitmap - bitmap состояний слотов: 4 двухбитных поля на байт, старшая пара первой.

use serde::Serialize;

use crate::consts::{SLOTS_PER_PAGE, SLOT_STATE_EMPTY, SLOT_STATE_ERASED, SLOT_STATE_WRITTEN};
use crate::page::common::BITMAP_LEN;

/// Состояние одного слота.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotState {
    Empty,
    Written,
    Erased,
    /// Значение 1 ни одна известная страница не использует.
    Unrecognized(u8),
}

impl SlotState {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            SLOT_STATE_EMPTY => SlotState::Empty,
            SLOT_STATE_WRITTEN => SlotState::Written,
            SLOT_STATE_ERASED => SlotState::Erased,
            other => SlotState::Unrecognized(other),
        }
    }

    /// Исходные два бита.
    pub fn bits(self) -> u8 {
        match self {
            SlotState::Empty => SLOT_STATE_EMPTY,
            SlotState::Written => SLOT_STATE_WRITTEN,
            SlotState::Erased => SLOT_STATE_ERASED,
            SlotState::Unrecognized(b) => b,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotState::Empty => "Empty",
            SlotState::Written => "Written",
            SlotState::Erased => "Erased",
            SlotState::Unrecognized(_) => "Unrecognized",
        }
    }
}

/// Декодировать 32-байтовый bitmap в 126 состояний.
pub fn decode_bitmap(bitmap: &[u8; BITMAP_LEN]) -> [SlotState; SLOTS_PER_PAGE] {
    let mut out = [SlotState::Empty; SLOTS_PER_PAGE];
    for (n, st) in out.iter_mut().enumerate() {
        let bitnum = n * 2;
        let byte = bitmap[bitnum / 8];
        let shift = 6 - (bitnum % 8);
        *st = SlotState::from_bits(byte >> shift);
    }
    out
}

/// Строка из 126 цифр (по одной на слот), как в диагностическом дампе.
pub fn bitmap_digits(states: &[SlotState]) -> String {
    states
        .iter()
        .map(|s| char::from(b'0' + s.bits()))
        .collect()
}
