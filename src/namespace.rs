//! namespace - реестр имён namespace, строится за один проход по разделу.
//!
//! Запись-определение: Written, ns=0, тип U8; значение - индекс, ключ - имя.
//! Регистрация происходит в момент скана определения, поэтому записи,
//! встреченные раньше определения, остаются без имени.

use log::debug;
use serde::Serialize;

use crate::consts::NS_DEFINITIONS;
use crate::entry::ValueType;
use crate::record::{LogicalRecord, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceRegistry {
    /// (index, name) в порядке первой регистрации.
    entries: Vec<(u8, String)>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Зарегистрировать имя; повторная регистрация индекса меняет имя на месте.
    pub fn register(&mut self, index: u8, name: &str) {
        match self.entries.iter_mut().find(|(i, _)| *i == index) {
            Some((_, n)) => *n = name.to_string(),
            None => self.entries.push((index, name.to_string())),
        }
    }

    pub fn resolve(&self, index: u8) -> Option<&str> {
        self.entries
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, n)| n.as_str())
    }

    /// Если запись определяет namespace, зарегистрировать её. Возвращает true при регистрации.
    pub fn observe(&mut self, rec: &LogicalRecord) -> bool {
        if !rec.is_written()
            || rec.namespace_index != NS_DEFINITIONS
            || rec.value_type != ValueType::U8
        {
            return false;
        }
        if let Value::U8(index) = rec.value {
            debug!("namespace {} -> '{}' (page {}, slot {})", index, rec.key, rec.page, rec.slot);
            self.register(index, &rec.key);
            return true;
        }
        false
    }

    /// Проставить имя namespace записи по текущему состоянию реестра.
    /// ns=0 (определения) не аннотируется.
    pub fn annotate(&self, rec: &mut LogicalRecord) {
        if rec.namespace_index != NS_DEFINITIONS {
            rec.namespace_name = self.resolve(rec.namespace_index).map(str::to_string);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.entries.iter().map(|(i, n)| (*i, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SlotState;

    fn rec(ns: u8, ty: ValueType, key: &str, value: Value) -> LogicalRecord {
        LogicalRecord {
            page: 0,
            slot: 0,
            offset: 64,
            state: SlotState::Written,
            namespace_index: ns,
            namespace_name: None,
            value_type: ty,
            span: 1,
            chunk_index: 0xFF,
            key: key.to_string(),
            data_size: None,
            value,
        }
    }

    #[test]
    fn order_dependent_resolution() {
        let mut reg = NamespaceRegistry::new();
        let mut early = rec(1, ValueType::U32, "ssid_len", Value::U32(4));
        reg.annotate(&mut early);
        assert_eq!(early.namespace_name, None);

        assert!(reg.observe(&rec(0, ValueType::U8, "wifi", Value::U8(1))));

        let mut late = rec(1, ValueType::U32, "ssid_len", Value::U32(4));
        reg.annotate(&mut late);
        assert_eq!(late.namespace_name.as_deref(), Some("wifi"));
    }

    #[test]
    fn only_written_u8_in_ns0_defines() {
        let mut reg = NamespaceRegistry::new();
        assert!(!reg.observe(&rec(0, ValueType::U16, "x", Value::U16(1))));
        assert!(!reg.observe(&rec(2, ValueType::U8, "y", Value::U8(1))));
        let mut erased = rec(0, ValueType::U8, "z", Value::U8(1));
        erased.state = SlotState::Erased;
        assert!(!reg.observe(&erased));
        assert!(reg.is_empty());
    }

    #[test]
    fn reregistration_keeps_position() {
        let mut reg = NamespaceRegistry::new();
        reg.register(1, "a");
        reg.register(2, "b");
        reg.register(1, "c");
        let all: Vec<_> = reg.iter().collect();
        assert_eq!(all, vec![(1, "c"), (2, "b")]);
    }
}
