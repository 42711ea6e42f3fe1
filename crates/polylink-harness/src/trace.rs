#![forbid(unsafe_code)]

//! JSONL trace export and checksums.
//!
//! A trace is written one JSON object per step, each tagged by `action`:
//!
//! ```text
//! {"action":"start","commentary":"...","code":"ADD_SUB_START","line":1}
//! {"action":"highlight","p1":0,"p2":0,"commentary":"...","code":"ADD_SUB_LOOP","line":0}
//! ```
//!
//! Checksums are FNV-1a 64-bit over the JSONL text, so any change to a
//! step's kind, values, commentary, or pseudocode reference changes them.

use polylink_core::Step;

/// Checksum prefix naming the hash.
pub const CHECKSUM_PREFIX: &str = "fnv1a:";

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Serialize steps as JSON Lines (trailing newline after each step).
pub fn trace_to_jsonl(steps: &[Step]) -> serde_json::Result<String> {
    let mut out = String::new();
    for step in steps {
        out.push_str(&serde_json::to_string(step)?);
        out.push('\n');
    }
    Ok(out)
}

/// FNV-1a 64-bit hash of `bytes`.
#[must_use]
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// `fnv1a:<16 hex>` checksum of arbitrary text.
#[must_use]
pub fn text_checksum(text: &str) -> String {
    format!("{CHECKSUM_PREFIX}{:016x}", fnv1a64(text.as_bytes()))
}

/// Checksum of a trace's JSONL form.
pub fn trace_checksum(steps: &[Step]) -> serde_json::Result<String> {
    Ok(text_checksum(&trace_to_jsonl(steps)?))
}
