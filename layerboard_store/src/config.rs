// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store configuration.

use crate::error::StoreError;

/// Inclusive range of usable z positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerRange {
    /// Lowest usable z.
    pub min: i32,
    /// Highest usable z. Reaching it triggers the saturation shift on the next insert.
    pub max: i32,
}

impl Default for LayerRange {
    fn default() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
        }
    }
}

impl LayerRange {
    /// Whether `z` is a usable position.
    pub const fn contains(&self, z: i32) -> bool {
        self.min <= z && z <= self.max
    }
}

/// Configuration for a [`WidgetStore`](crate::WidgetStore).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StoreConfig {
    /// Usable z positions. Defaults to the whole `i32` range.
    pub layers: LayerRange,
}

impl StoreConfig {
    /// Check that the layer range is non-trivial and includes 0, the first foreground slot.
    pub fn validate(&self) -> Result<(), StoreError> {
        let LayerRange { min, max } = self.layers;
        if min >= max {
            return Err(StoreError::InvalidConfig(format!(
                "layer range [{min}, {max}] must hold at least two positions"
            )));
        }
        if !self.layers.contains(0) {
            return Err(StoreError::InvalidConfig(format!(
                "layer range [{min}, {max}] must include 0"
            )));
        }
        Ok(())
    }
}
