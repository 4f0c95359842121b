//! Game settings
//!
//! In-memory only: every process starts from the hard-coded defaults. The
//! settings dialog hands over raw strings, which are coerced here before they
//! ever reach the simulation.

use serde::{Deserialize, Serialize};

/// Which ruleset the session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameVariant {
    /// Score-drain only, restart goes back through the intro screen
    Classic,
    /// Smash every trash can to win, restart jumps straight back in
    #[default]
    TrashCrash,
}

/// Where a restart from game over / win lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartFlow {
    /// Regenerate and resume play immediately
    Direct,
    /// Regenerate and wait on the intro screen
    ViaIntro,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Classic => "Classic",
            GameVariant::TrashCrash => "Trash Crash",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameVariant::Classic),
            "trash-crash" | "trashcrash" | "trash crash" => Some(GameVariant::TrashCrash),
            _ => None,
        }
    }

    /// Whether clearing the last trash can ends the game in a win
    pub fn has_win_condition(&self) -> bool {
        matches!(self, GameVariant::TrashCrash)
    }

    pub fn restart_flow(&self) -> RestartFlow {
        match self {
            GameVariant::Classic => RestartFlow::ViaIntro,
            GameVariant::TrashCrash => RestartFlow::Direct,
        }
    }
}

/// Game settings consumed at every world (re)generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: GameVariant,

    // === Driving ===
    /// Player speed factor (scaled by the movement constants)
    pub player_speed: f32,
    /// Yaw change per tick while steering (radians)
    pub turn_speed: f32,
    /// Base traffic speed factor
    pub traffic_speed: f32,

    // === World population ===
    pub traffic_count: u32,
    pub destructible_count: u32,
    pub house_count: u32,
    pub tree_count: u32,

    // === Scoring ===
    /// Points for smashing a trash can or mailbox
    pub hit_bonus: f32,
    /// Points for clipping a traffic car (negative)
    pub traffic_penalty: f32,
    /// Points per second spent off the road network (negative)
    pub offroad_penalty_per_sec: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: GameVariant::TrashCrash,

            player_speed: 0.3,
            turn_speed: 0.03,
            traffic_speed: 0.2,

            traffic_count: 60,
            destructible_count: 200,
            house_count: 400,
            tree_count: 1000,

            hit_bonus: 15.0,
            traffic_penalty: -20.0,
            offroad_penalty_per_sec: -10.0,
        }
    }
}

/// Lower bounds enforced on dialog input
const MIN_PLAYER_SPEED: f32 = 0.1;
const MIN_TURN_SPEED: f32 = 0.01;

impl Settings {
    /// Create settings for a variant with everything else at defaults
    pub fn for_variant(variant: GameVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::warn!("Ignoring settings override: {}", e);
                None
            }
        }
    }

    /// Build settings from the raw settings-dialog fields
    ///
    /// Non-numeric, non-finite or negative entries fall back to the default for
    /// that field; speeds are then floored at their minimums.
    pub fn from_form(form: &SettingsForm) -> Self {
        let defaults = Self::default();
        let settings = Self {
            variant: form.variant,
            player_speed: parse_speed("player speed", &form.player_speed, defaults.player_speed)
                .max(MIN_PLAYER_SPEED),
            turn_speed: parse_speed("turn speed", &form.turn_speed, defaults.turn_speed)
                .max(MIN_TURN_SPEED),
            traffic_speed: parse_speed("traffic speed", &form.traffic_speed, defaults.traffic_speed),
            traffic_count: parse_count("traffic", &form.traffic_count, defaults.traffic_count),
            destructible_count: parse_count(
                "destructibles",
                &form.destructible_count,
                defaults.destructible_count,
            ),
            house_count: parse_count("houses", &form.house_count, defaults.house_count),
            tree_count: parse_count("trees", &form.tree_count, defaults.tree_count),
            ..defaults
        };
        log::info!(
            "Settings applied: player {:.2}, turn {:.3}, traffic {:.2} x{}, {} destructibles, {} houses, {} trees",
            settings.player_speed,
            settings.turn_speed,
            settings.traffic_speed,
            settings.traffic_count,
            settings.destructible_count,
            settings.house_count,
            settings.tree_count
        );
        settings
    }

    /// Current values rendered back into dialog fields
    pub fn to_form(&self) -> SettingsForm {
        SettingsForm {
            variant: self.variant,
            player_speed: self.player_speed.to_string(),
            turn_speed: self.turn_speed.to_string(),
            traffic_speed: self.traffic_speed.to_string(),
            traffic_count: self.traffic_count.to_string(),
            destructible_count: self.destructible_count.to_string(),
            house_count: self.house_count.to_string(),
            tree_count: self.tree_count.to_string(),
        }
    }

    /// Replace out-of-range numeric values (e.g. from JSON) with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            self.player_speed = defaults.player_speed;
        }
        self.player_speed = self.player_speed.max(MIN_PLAYER_SPEED);
        if !self.turn_speed.is_finite() || self.turn_speed < 0.0 {
            self.turn_speed = defaults.turn_speed;
        }
        self.turn_speed = self.turn_speed.max(MIN_TURN_SPEED);
        if !self.traffic_speed.is_finite() || self.traffic_speed < 0.0 {
            self.traffic_speed = defaults.traffic_speed;
        }
        for (value, default) in [
            (&mut self.hit_bonus, defaults.hit_bonus),
            (&mut self.traffic_penalty, defaults.traffic_penalty),
            (&mut self.offroad_penalty_per_sec, defaults.offroad_penalty_per_sec),
        ] {
            if !value.is_finite() {
                *value = default;
            }
        }
        self
    }
}

/// Raw settings-dialog input, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub variant: GameVariant,
    pub player_speed: String,
    pub turn_speed: String,
    pub traffic_speed: String,
    pub traffic_count: String,
    pub destructible_count: String,
    pub house_count: String,
    pub tree_count: String,
}

fn parse_speed(field: &str, raw: &str, default: f32) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            log::warn!("Invalid {} '{}', using default {}", field, raw, default);
            default
        }
    }
}

fn parse_count(field: &str, raw: &str, default: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 0 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => {
            log::warn!("Invalid {} count '{}', using default {}", field, raw, default);
            default
        }
    }
}
