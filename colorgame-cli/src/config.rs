use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use colorgame_feed::feed::DEFAULT_ENDPOINT;
use colorgame_feed::history::DEFAULT_RETENTION;
use colorgame_predict::detectors::Roster;
use colorgame_predict::voting::DEFAULT_MIN_HISTORY;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Rafraîchissement forcé, indépendant du compte à rebours
    pub refresh_secs: u64,
    pub retention: usize,
    pub min_history: usize,
    pub roster: Roster,
    /// Fuseau du jeu (IST = +330)
    pub utc_offset_minutes: i32,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
            refresh_secs: 30,
            retention: DEFAULT_RETENTION,
            min_history: DEFAULT_MIN_HISTORY,
            roster: Roster::Full,
            utc_offset_minutes: 330,
        }
    }
}

impl WatchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .with_context(|| format!("Décalage horaire invalide : {} minutes", self.utc_offset_minutes))
    }
}

/// Fichier absent = configuration par défaut.
pub fn load_config(path: &Path) -> Result<WatchConfig> {
    if !path.exists() {
        return Ok(WatchConfig::default());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: WatchConfig = serde_json::from_str(&json)
        .with_context(|| format!("Configuration invalide dans {:?}", path))?;
    Ok(config)
}

pub fn save_config(config: &WatchConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}
