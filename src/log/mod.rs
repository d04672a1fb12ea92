use anyhow::anyhow;
use serde_json::to_string_pretty;
use tracing::{debug, enabled, Level};
use tracing_subscriber::EnvFilter;

use crate::wire::Instruction;

const DEFAULT_FILTER: &str = "vibe_sitegen=info,tower_http=info";
const DEBUG_FILTER: &str = "vibe_sitegen=debug,tower_http=debug";

/// `RUST_LOG` wins when set; otherwise `--debug` picks the verbose default.
pub fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { DEBUG_FILTER } else { DEFAULT_FILTER }))
}

pub fn init(debug: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Dumps the instruction about to be sent, at debug level.
pub fn dump_instruction(stage: &str, ins: &Instruction) {
    if !enabled!(Level::DEBUG) {
        return;
    }
    let ins_json = to_string_pretty(ins).unwrap_or_else(|e| format!("<unserializable: {e}>"));
    debug!(stage, "instruction sent:\n{ins_json}");
}

/// Dumps the raw completion text, at debug level.
pub fn dump_reply(stage: &str, raw: &str) {
    debug!(stage, bytes = raw.len(), "raw completion:\n{raw}");
}
