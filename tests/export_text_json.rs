mod common;

use anyhow::Result;
use serde_json::Value as Json;

use common::*;
use NvsDump::decode_partition;
use NvsDump::export::{write_json, write_summary, write_text, Summary};

fn sample() -> Vec<u8> {
    let mut p0 = PageBuilder::new(ST_FULL, 7);
    p0.namespace("wifi", 1)
        .u16(1, "port", 443)
        .str(1, "ssid", "lab")
        .blob_data(1, "cert", 0, b"AB")
        .blob_idx(1, "cert", 2, 1, 0);
    p0.set_state(10, 0b01);
    let p1 = PageBuilder::active(8);
    image(&[&p0, &p1])
}

#[test]
fn json_pages_shape() -> Result<()> {
    let dump = decode_partition(&sample())?;
    let mut out = Vec::new();
    write_json(&dump, &mut out)?;
    let v: Json = serde_json::from_slice(&out)?;

    let pages = v.as_array().expect("array of pages");
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["page_state"], "FULL");
    assert_eq!(pages[0]["page_seq_no"], 7);
    assert_eq!(pages[0]["page_version"], 2);
    assert_eq!(pages[1]["page_state"], "ACTIVE");
    assert_eq!(pages[1]["entries"].as_array().map(|e| e.len()), Some(0));

    let entries = pages[0]["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 5);
    let port = &entries[1];
    assert_eq!(port["entry_key"], "port");
    assert_eq!(port["entry_type"], "U16");
    assert_eq!(port["entry_ns"], "wifi");
    assert_eq!(port["entry_state"], "Written");
    assert_eq!(port["entry_data"], 443);

    let ssid = &entries[2];
    assert_eq!(ssid["entry_data"], "lab");
    assert_eq!(ssid["entry_data_size"], 4);
    assert_eq!(ssid["entry_span"], 2);

    assert_eq!(entries[3]["entry_data"], "QUI="); // base64("AB")
    assert_eq!(entries[4]["entry_type"], "BLOB_IDX");
    assert_eq!(entries[4]["entry_data"]["chunk_count"], 1);
    assert_eq!(entries[4]["entry_data"]["size"], 2);

    // namespace-определения без entry_ns
    assert!(entries[0].get("entry_ns").is_none());
    Ok(())
}

#[test]
fn text_dump_lists_pages_entries_and_anomalies() -> Result<()> {
    let dump = decode_partition(&sample())?;
    let mut out = Vec::new();
    write_text(&dump, &mut out)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("Page 0 ( offset=00000000 )"), "{text}");
    assert!(text.contains("Page 1 ( offset=00001000 )"), "{text}");
    assert!(text.contains("page state   : FULL"), "{text}");
    assert!(text.contains("Key : port"), "{text}");
    assert!(text.contains("Key : ssid"), "{text}");
    assert!(text.contains("!! page 0 slot 10"), "{text}");
    Ok(())
}

#[test]
fn summary_counts() -> Result<()> {
    let dump = decode_partition(&sample())?;
    let s = Summary::from_dump(&dump);
    assert_eq!(s.pages_total, 2);
    assert_eq!(s.pages.full, 1);
    assert_eq!(s.pages.active, 1);
    assert_eq!(s.records, 5);
    assert_eq!(s.written, 5);
    assert_eq!(s.blobs, 1);
    assert_eq!(s.namespaces, vec!["wifi".to_string()]);
    assert_eq!(s.anomalies.len(), 1);

    let mut out = Vec::new();
    write_summary(&dump, true, &mut out)?;
    let v: Json = serde_json::from_slice(&out)?;
    assert_eq!(v["pages_total"], 2);
    assert_eq!(v["blobs"], 1);

    let mut out = Vec::new();
    write_summary(&dump, false, &mut out)?;
    let text = String::from_utf8(out)?;
    assert!(text.contains("pages_total  = 2"), "{text}");
    assert!(text.contains("namespaces   = wifi"), "{text}");
    Ok(())
}
