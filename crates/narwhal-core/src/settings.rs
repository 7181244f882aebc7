use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zoom multiplier applied after fitting content, leaving a margin around it.
pub const ZOOM_OUT_FACTOR: f64 = 0.8;

pub const DEFAULT_VISIBILITY_WARNING_THRESHOLD: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphSettings {
    /// Keep primary/secondary cameras locked to the super view.
    pub synchronized_views: bool,
    /// Revealing at least this many hidden edges asks for confirmation first.
    pub visibility_warning_threshold: usize,
    pub automatic_layouting: bool,
    pub zoom_out_factor: f64,
    pub proximity: ProximitySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProximitySettings {
    /// Live proximity browsing: only the neighbourhood of the focus is shown and markers are
    /// expanded on demand.
    pub enabled: bool,
    pub child_depth: usize,
    pub parent_depth: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            synchronized_views: true,
            visibility_warning_threshold: DEFAULT_VISIBILITY_WARNING_THRESHOLD,
            automatic_layouting: true,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            proximity: ProximitySettings::default(),
        }
    }
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            child_depth: 2,
            parent_depth: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    SynchronizedViews,
    VisibilityWarningThreshold,
    AutomaticLayouting,
    ZoomOutFactor,
    ProximityBrowsing,
    ProximityDepth,
}

impl GraphSettings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(Error::InvalidSettings {
                message: format!(
                    "zoomOutFactor must lie strictly between 0 and 1, got {}",
                    self.zoom_out_factor
                ),
            });
        }
        Ok(())
    }

    /// Deep-merges a partial JSON object into these settings.
    ///
    /// Nothing changes unless the merged result deserializes and validates. Returns the keys whose
    /// values changed.
    pub fn apply_overrides(&mut self, overrides: &Value) -> Result<Vec<SettingKey>> {
        let mut merged = self.to_value()?;
        deep_merge_value(&mut merged, overrides);
        let next: Self = serde_json::from_value(merged)?;
        next.validate()?;
        let changed = self.changed_keys(&next);
        *self = next;
        Ok(changed)
    }

    pub fn changed_keys(&self, other: &Self) -> Vec<SettingKey> {
        let mut out = Vec::new();
        if self.synchronized_views != other.synchronized_views {
            out.push(SettingKey::SynchronizedViews);
        }
        if self.visibility_warning_threshold != other.visibility_warning_threshold {
            out.push(SettingKey::VisibilityWarningThreshold);
        }
        if self.automatic_layouting != other.automatic_layouting {
            out.push(SettingKey::AutomaticLayouting);
        }
        if self.zoom_out_factor != other.zoom_out_factor {
            out.push(SettingKey::ZoomOutFactor);
        }
        if self.proximity.enabled != other.proximity.enabled {
            out.push(SettingKey::ProximityBrowsing);
        }
        if self.proximity.child_depth != other.proximity.child_depth
            || self.proximity.parent_depth != other.proximity.parent_depth
        {
            out.push(SettingKey::ProximityDepth);
        }
        out
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
