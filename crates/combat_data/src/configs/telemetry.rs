//! Telemetry configuration loader (`data/config/telemetry.toml`).

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::{data_root, read_toml};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelemetryCfg {
    /// EnvFilter directive, e.g. "info" or "combat_core=debug".
    pub log_level: Option<String>,
    /// Emit JSON log lines (defaults to plain text when unset).
    pub json_logs: Option<bool>,
    /// Bind address for the optional Prometheus exporter.
    pub metrics_addr: Option<String>,
}

/// Load `data/config/telemetry.toml`; defaults apply when the file is absent.
pub fn load_telemetry() -> Result<TelemetryCfg> {
    let path = data_root().join("config/telemetry.toml");
    if !path.is_file() {
        return Ok(TelemetryCfg::default());
    }
    let txt = read_toml("config/telemetry.toml")?;
    let cfg: TelemetryCfg = toml::from_str(&txt).context("parse telemetry.toml")?;
    Ok(cfg)
}
