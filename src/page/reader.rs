//! page/reader - разбор одной 4096-байтовой страницы: заголовок + таблица из 126 слотов.
//!
//! Слоты не копируются: `PageView` заимствует буфер раздела.

use crate::consts::{PAGE_HDR_SIZE, PAGE_SIZE, SLOTS_PER_PAGE, SLOT_SIZE};
use crate::error::{NvsError, NvsResult};

use super::bitmap::{decode_bitmap, SlotState};
use super::header::{page_header_read, PageHeader};

#[derive(Debug, Clone)]
pub struct PageView<'a> {
    /// Порядковый номер страницы в разделе.
    pub index: usize,
    /// Смещение страницы от начала раздела.
    pub offset: usize,
    pub header: PageHeader,
    pub states: [SlotState; SLOTS_PER_PAGE],
    slots: &'a [u8],
}

impl<'a> PageView<'a> {
    /// Сырые 32 байта слота `n` (n < 126).
    #[inline]
    pub fn slot(&self, n: usize) -> &'a [u8] {
        &self.slots[n * SLOT_SIZE..(n + 1) * SLOT_SIZE]
    }

    /// `count` подряд идущих слотов начиная с `first` (payload continuation-слотов).
    /// Вызывающий код гарантирует first + count <= 126.
    #[inline]
    pub fn slot_run(&self, first: usize, count: usize) -> &'a [u8] {
        &self.slots[first * SLOT_SIZE..(first + count) * SLOT_SIZE]
    }

    /// Абсолютное смещение слота в разделе.
    #[inline]
    pub fn slot_offset(&self, n: usize) -> usize {
        self.offset + PAGE_HDR_SIZE + n * SLOT_SIZE
    }
}

/// Разобрать страницу. `page` должна содержать не меньше PAGE_SIZE байт;
/// лишнее игнорируется.
pub fn read_page(page: &[u8], index: usize, offset: usize) -> NvsResult<PageView<'_>> {
    if page.len() < PAGE_SIZE {
        return Err(NvsError::TruncatedPage {
            expected: PAGE_SIZE,
            actual: page.len(),
        });
    }
    let header = page_header_read(page)?;
    let states = decode_bitmap(&header.bitmap);
    Ok(PageView {
        index,
        offset,
        header,
        states,
        slots: &page[PAGE_HDR_SIZE..PAGE_SIZE],
    })
}
