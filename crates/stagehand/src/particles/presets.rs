use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::{ConfigError, EmitterConfig};
use super::emitter::Emitter;

/// Named emitter configurations, usually loaded from a JSON file:
/// `{ "sparks": { ...EmitterConfig... }, "smoke": { ... } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmitterPresets {
    presets: HashMap<String, EmitterConfig>,
}

impl EmitterPresets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, config: EmitterConfig) {
        self.presets.insert(name.into(), config);
    }

    pub fn get(&self, name: &str) -> Option<&EmitterConfig> {
        self.presets.get(name)
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Validate every preset, reporting the first bad one by name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in self.names() {
            if let Some(config) = self.presets.get(name) {
                config.validate().map_err(|e| ConfigError::InPreset {
                    name: name.to_string(),
                    source: Box::new(e),
                })?;
            }
        }
        Ok(())
    }

    /// Build an emitter from the named preset.
    pub fn emitter(&self, name: &str, position: Vec2) -> Result<Emitter, ConfigError> {
        let config = self
            .get(name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        Emitter::new(config.clone(), position)
    }

    /// Parse presets from a JSON string and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let presets: Self = serde_json::from_str(json)?;
        presets.validate()?;
        Ok(presets)
    }
}
