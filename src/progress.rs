//! Persistent player progress
//!
//! High score, spendable points and cosmetics. Rounds feed in through
//! [`PersistentProgress::record_round`]; the shop spends from the same pool.

use serde::{Deserialize, Serialize};

use crate::error::ShopError;
use crate::shop::{self, DEFAULT_BACKGROUND, DEFAULT_SKIN};

/// Progress carried across sessions.
///
/// Field names match the browser save blob, and every field has a default so
/// partial or older saves still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistentProgress {
    pub high_score: u64,
    pub total_points: u64,
    #[serde(rename = "ownedBottles")]
    pub owned_skins: Vec<String>,
    #[serde(rename = "selectedBottle")]
    pub selected_skin: String,
    #[serde(rename = "selectedBg")]
    pub selected_background: String,
}

impl Default for PersistentProgress {
    fn default() -> Self {
        Self {
            high_score: 0,
            total_points: 0,
            owned_skins: vec![DEFAULT_SKIN.to_string()],
            selected_skin: DEFAULT_SKIN.to_string(),
            selected_background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl PersistentProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a finished round. Returns true on a new high score.
    pub fn record_round(&mut self, final_score: u64) -> bool {
        self.total_points = self.total_points.saturating_add(final_score);
        if final_score > self.high_score {
            self.high_score = final_score;
            true
        } else {
            false
        }
    }

    pub fn owns_skin(&self, id: &str) -> bool {
        self.owned_skins.iter().any(|s| s == id)
    }

    /// Whether `buy_skin(id)` would currently succeed
    pub fn can_buy(&self, id: &str) -> bool {
        shop::skin(id).is_some_and(|s| !self.owns_skin(id) && self.total_points >= s.price)
    }

    /// Spend points on a skin
    pub fn buy_skin(&mut self, id: &str) -> Result<(), ShopError> {
        let skin = shop::skin(id).ok_or_else(|| ShopError::UnknownSkin(id.to_string()))?;
        if self.owns_skin(id) {
            return Err(ShopError::AlreadyOwned(id.to_string()));
        }
        if self.total_points < skin.price {
            return Err(ShopError::InsufficientPoints {
                price: skin.price,
                available: self.total_points,
            });
        }

        self.total_points -= skin.price;
        self.owned_skins.push(id.to_string());
        log::info!("Bought skin {} for {} points", id, skin.price);
        Ok(())
    }

    /// Equip an owned skin
    pub fn select_skin(&mut self, id: &str) -> Result<(), ShopError> {
        if shop::skin(id).is_none() {
            return Err(ShopError::UnknownSkin(id.to_string()));
        }
        if !self.owns_skin(id) {
            return Err(ShopError::NotOwned(id.to_string()));
        }
        self.selected_skin = id.to_string();
        Ok(())
    }

    pub fn select_background(&mut self, id: &str) -> Result<(), ShopError> {
        if shop::background(id).is_none() {
            return Err(ShopError::UnknownBackground(id.to_string()));
        }
        self.selected_background = id.to_string();
        Ok(())
    }

    /// Repair state a hand-edited or stale save might carry
    pub fn sanitize(&mut self) {
        self.owned_skins.retain(|id| shop::skin(id).is_some());
        self.owned_skins.dedup();
        if !self.owns_skin(DEFAULT_SKIN) {
            self.owned_skins.insert(0, DEFAULT_SKIN.to_string());
        }
        if !self.owns_skin(&self.selected_skin) {
            self.selected_skin = DEFAULT_SKIN.to_string();
        }
        if shop::background(&self.selected_background).is_none() {
            self.selected_background = DEFAULT_BACKGROUND.to_string();
        }
    }
}
