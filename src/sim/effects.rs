//! Timed status effects
//!
//! Effects do not stack: activating one that is already running restarts its
//! timer. Expiry is checked against the simulation clock, never wall time.

use serde::{Deserialize, Serialize};

use crate::consts::EFFECT_DURATION_MS;

/// Every timed buff or debuff the player can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Levodopa afterglow (cosmetic, shown in the HUD)
    ResourceBoost,
    /// Deep brain stimulation: tremor cannot set in
    Cure,
    /// Hazards can't hurt the player
    Shield,
    /// Movement speed x1.5
    SpeedBoost,
    /// Controls are inverted
    Confusion,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::ResourceBoost => "Levodopa",
            EffectKind::Cure => "DBS",
            EffectKind::Shield => "Shield",
            EffectKind::SpeedBoost => "Super Speed",
            EffectKind::Confusion => "Confused",
        }
    }
}

/// A running effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub started_ms: u64,
    pub duration_ms: u64,
}

impl TimedEffect {
    #[inline]
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= self.duration_ms
    }

    #[inline]
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.duration_ms
            .saturating_sub(now_ms.saturating_sub(self.started_ms))
    }
}

/// The set of effects currently on the player (at most one per kind)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    effects: Vec<TimedEffect>,
}

impl ActiveEffects {
    /// Start `kind` at `now_ms`, or restart its timer if already running
    pub fn activate(&mut self, kind: EffectKind, now_ms: u64) {
        let effect = TimedEffect {
            kind,
            started_ms: now_ms,
            duration_ms: EFFECT_DURATION_MS,
        };
        match self.effects.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => *existing = effect,
            None => self.effects.push(effect),
        }
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn clear(&mut self, kind: EffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    pub fn clear_all(&mut self) {
        self.effects.clear();
    }

    /// Remove every effect whose duration has elapsed; returns what wore off
    pub fn expire(&mut self, now_ms: u64) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.expired(now_ms) {
                expired.push(e.kind);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Milliseconds left on `kind`, if it is running
    pub fn remaining_ms(&self, kind: EffectKind, now_ms: u64) -> Option<u64> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining_ms(now_ms))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
