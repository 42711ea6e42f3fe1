#![forbid(unsafe_code)]

//! Test and inspection tooling for polylink traces.
//!
//! - [`RecordingRenderer`] captures every renderer call for equality checks.
//! - [`trace_to_jsonl`] / [`trace_checksum`] export a trace and fingerprint it.
//! - [`golden`] stores per-scenario checksums under `tests/golden/`.
//!
//! # Updating Golden Checksums
//!
//! ```sh
//! BLESS=1 cargo test -p polylink-harness golden_
//! ```

pub mod golden;
pub mod recording;
pub mod trace;

pub use golden::{GoldenOutcome, GoldenScenario, standard_scenarios};
pub use recording::{RecordingRenderer, RenderCall};
pub use trace::{CHECKSUM_PREFIX, fnv1a64, text_checksum, trace_checksum, trace_to_jsonl};
