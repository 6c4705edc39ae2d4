use crate::{
    catalog::{builtin_items, Catalog, CatalogItem, DEFAULT_FEED_ITEM},
    types::{ItemId, Money},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    items: Vec<CatalogItem>,
}

/// Household tuning. Every field is optional in `tuning.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TuningConfig {
    /// Money in a brand-new household.
    pub starting_money:       Money,
    /// Period of the automatic tick timer.
    pub tick_interval_ms:     u64,
    /// Period of the autosave timer.
    pub autosave_interval_ms: u64,
    /// How long a notice stays up.
    pub notice_duration_ms:   u64,
    /// Item the feed action reaches for first.
    pub feed_item_id:         ItemId,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            starting_money:       100,
            tick_interval_ms:     5_000,
            autosave_interval_ms: 30_000,
            notice_duration_ms:   2_200,
            feed_item_id:         DEFAULT_FEED_ITEM.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub catalog: Vec<CatalogItem>,
    pub tuning:  TuningConfig,
}

impl SimConfig {
    /// Load from the data/ directory.
    /// In tests, use SimConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let catalog_path = format!("{data_dir}/catalog.json");
        let catalog_content = std::fs::read_to_string(&catalog_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {catalog_path}: {e}"))?;
        let catalog_file: CatalogFile = serde_json::from_str(&catalog_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {catalog_path}: {e}"))?;

        let tuning_path = format!("{data_dir}/tuning.json");
        let tuning_content = std::fs::read_to_string(&tuning_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {tuning_path}: {e}"))?;
        let tuning: TuningConfig = serde_json::from_str(&tuning_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {tuning_path}: {e}"))?;

        let config = Self {
            catalog: catalog_file.items,
            tuning,
        };
        // Surface duplicate ids now rather than at first purchase.
        config
            .build_catalog()
            .map_err(|e| anyhow::anyhow!("{catalog_path}: {e}"))?;
        Ok(config)
    }

    pub fn build_catalog(&self) -> crate::error::SimResult<Catalog> {
        Catalog::new(self.catalog.clone())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tuning.tick_interval_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.tuning.autosave_interval_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.tuning.notice_duration_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            catalog: builtin_items(),
            tuning:  TuningConfig::default(),
        }
    }
}
