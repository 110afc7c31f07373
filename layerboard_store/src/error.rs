// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store errors.

use core::fmt;

/// Direction of a cascading z shift.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShiftDirection {
    /// Toward larger z (opening a slot for an explicit z).
    Up,
    /// Toward smaller z (freeing the top slot).
    Down,
}

impl fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// Errors returned by the widget store.
///
/// Unknown ids are not errors: lookups return `None` and deletes are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Malformed input: a non-positive id, a size below 1, or a z outside the layer range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The layer range is saturated in the direction a shift needs.
    ///
    /// The save that triggered the shift is not applied.
    #[error("layer range exhausted: cannot shift {direction} from z={z}")]
    Exhausted {
        /// Direction the cascade needed to move.
        direction: ShiftDirection,
        /// Slot the cascade started from.
        z: i32,
    },

    /// Every positive `i64` id has been handed out or claimed.
    #[error("widget id space exhausted")]
    IdsExhausted,

    /// The store's internal maps disagree. Only reported by consistency checks.
    #[error("store inconsistent: {0}")]
    Inconsistent(String),

    /// A [`StoreConfig`](crate::StoreConfig) failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let e = StoreError::Exhausted {
            direction: ShiftDirection::Down,
            z: i32::MAX,
        };
        assert_eq!(
            e.to_string(),
            "layer range exhausted: cannot shift down from z=2147483647"
        );
        let e = StoreError::InvalidArgument("width must be at least 1, got 0".into());
        assert_eq!(e.to_string(), "invalid argument: width must be at least 1, got 0");
    }
}
