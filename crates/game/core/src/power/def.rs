//! Static zir power definitions.

use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a zir power.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ZirPowerId(String);

impl ZirPowerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZirPowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZirPowerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Borrow<str> for ZirPowerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Gating model of a zir power.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZirPowerKind {
    /// Cooldown-gated; always activatable when the timer is clear.
    Active { cooldown: f32 },
    /// Gated by the external will gauge instead of a timer. Activation
    /// consumes `will_cost` through the host boundary.
    Ultimate { will_cost: u32 },
}

/// Immutable description of one character-bound zir power.
///
/// The host executes the actual effect, keyed by the power's id; the core
/// only tracks gating and emits the activation event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZirPowerDef {
    pub id: ZirPowerId,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub kind: ZirPowerKind,
}

impl ZirPowerDef {
    fn new(id: &str, name: &str, description: &str, kind: ZirPowerKind) -> Self {
        Self {
            id: ZirPowerId::from(id),
            name: name.to_owned(),
            description: description.to_owned(),
            icon: None,
            kind,
        }
    }

    /// Starts a cooldown-gated power definition.
    pub fn active(id: &str, name: &str, description: &str, cooldown: f32) -> Self {
        Self::new(id, name, description, ZirPowerKind::Active { cooldown })
    }

    /// Starts a will-gated power definition.
    pub fn ultimate(id: &str, name: &str, description: &str, will_cost: u32) -> Self {
        Self::new(id, name, description, ZirPowerKind::Ultimate { will_cost })
    }

    #[must_use]
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_owned());
        self
    }

    pub fn is_ultimate(&self) -> bool {
        matches!(self.kind, ZirPowerKind::Ultimate { .. })
    }
}
