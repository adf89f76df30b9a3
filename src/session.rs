//! Squad registration session
//!
//! The site has no backend: a registered squad is one JSON blob in
//! LocalStorage, written by the registration wizard and read back by the
//! dashboard. Validation mirrors the wizard's per-field checks so the host
//! page can surface errors before anything is stored.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Players on a roster, excluding the leader and substitute
pub const SQUAD_SIZE: usize = 4;

/// Bounds on team names
pub const TEAM_NAME_MIN: usize = 3;
pub const TEAM_NAME_MAX: usize = 24;

/// Supported game titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameTitle {
    Bgmi,
    FreeFire,
}

impl GameTitle {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameTitle::Bgmi => "BGMI",
            GameTitle::FreeFire => "Free Fire",
        }
    }
}

/// One player's in-game identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// In-game name
    pub ign: String,
    /// Numeric in-game account id
    pub uid: String,
    pub email: String,
}

/// The registered squad, stored wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadSession {
    pub team_name: String,
    pub game: GameTitle,
    pub leader: PlayerEntry,
    pub leader_phone: String,
    /// Exactly [`SQUAD_SIZE`] players besides the leader
    pub players: Vec<PlayerEntry>,
    pub substitute: Option<PlayerEntry>,
    /// Unix timestamp (ms) when registered
    pub registered_at: f64,
}

/// A failed field check, addressed to the wizard input that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: &'static str,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: &'static str) -> Self {
        Self {
            field: field.into(),
            message,
        }
    }
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_valid_phone(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

fn check_player(prefix: &str, player: &PlayerEntry, issues: &mut Vec<FieldIssue>) {
    if player.ign.trim().is_empty() {
        issues.push(FieldIssue::new(format!("{prefix}.ign"), "IGN is required"));
    }
    if player.uid.is_empty() || !player.uid.bytes().all(|b| b.is_ascii_digit()) {
        issues.push(FieldIssue::new(
            format!("{prefix}.uid"),
            "UID must be numeric",
        ));
    }
    if !is_valid_email(&player.email) {
        issues.push(FieldIssue::new(
            format!("{prefix}.email"),
            "Enter a valid email address",
        ));
    }
}

impl SquadSession {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "drift_field_squad";

    /// Run every wizard field check. Empty result means the squad can be
    /// stored.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        let name_len = self.team_name.trim().chars().count();
        if !(TEAM_NAME_MIN..=TEAM_NAME_MAX).contains(&name_len) {
            issues.push(FieldIssue::new(
                "team_name",
                "Team name must be 3-24 characters",
            ));
        }

        check_player("leader", &self.leader, &mut issues);
        if !is_valid_phone(&self.leader_phone) {
            issues.push(FieldIssue::new(
                "leader_phone",
                "Phone number must be 10 digits",
            ));
        }

        if self.players.len() != SQUAD_SIZE {
            issues.push(FieldIssue::new("players", "A squad needs 4 players"));
        }
        for (i, player) in self.players.iter().enumerate() {
            check_player(&format!("players[{i}]"), player, &mut issues);
        }
        if let Some(sub) = &self.substitute {
            check_player("substitute", sub, &mut issues);
        }

        issues
    }

    /// Load the active squad from LocalStorage (WASM only). Corrupt or
    /// missing blobs read as "not registered".
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Self> {
        let storage = crate::platform::local_storage()?;
        let json = storage.get_item(Self::STORAGE_KEY).ok()??;
        match serde_json::from_str::<SquadSession>(&json) {
            Ok(session) => {
                log::info!("Loaded squad '{}'", session.team_name);
                Some(session)
            }
            Err(err) => {
                log::warn!("Discarding unreadable squad session: {err}");
                None
            }
        }
    }

    /// Save the squad to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Squad '{}' saved", self.team_name);
            }
        }
    }

    /// Remove the stored squad (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn clear() {
        if let Some(storage) = crate::platform::local_storage() {
            let _ = storage.remove_item(Self::STORAGE_KEY);
            log::info!("Squad session cleared");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Self> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear() {
        // No-op for native
    }
}

/// Validate and store a squad posted by the registration wizard. Returns the
/// field issues as JSON when validation fails.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn register_squad(json: &str) -> Result<(), JsValue> {
    let mut squad: SquadSession = serde_json::from_str(json)
        .map_err(|err| JsValue::from_str(&format!("malformed squad: {err}")))?;
    let issues = squad.validate();
    if !issues.is_empty() {
        let body = serde_json::to_string(&issues).unwrap_or_default();
        return Err(JsValue::from_str(&body));
    }
    squad.registered_at = crate::platform::now_ms();
    squad.save();
    Ok(())
}

/// The stored squad as JSON, if one is registered
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn active_squad() -> Option<String> {
    SquadSession::load().and_then(|s| serde_json::to_string(&s).ok())
}

/// Log out: drop the stored squad
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn clear_squad() {
    SquadSession::clear();
}
