//! Cosmetic catalogs
//!
//! Bottle skins are bought with accumulated points; backgrounds are free.
//! Colors are CSS values handed straight to the presentation layer.

/// A purchasable bottle skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub emoji: &'static str,
    pub color: &'static str,
}

/// A selectable backdrop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub id: &'static str,
    pub gradient: &'static str,
}

pub const DEFAULT_SKIN: &str = "classic";
pub const DEFAULT_BACKGROUND: &str = "sunset";

pub static SKINS: [Skin; 8] = [
    Skin {
        id: "classic",
        name: "Classic",
        price: 0,
        emoji: "💧",
        color: "#3b82f6",
    },
    Skin {
        id: "fire",
        name: "Fire",
        price: 100,
        emoji: "🔥",
        color: "#ef4444",
    },
    Skin {
        id: "neon",
        name: "Neon",
        price: 200,
        emoji: "⚡",
        color: "#06b6d4",
    },
    Skin {
        id: "gold",
        name: "Gold",
        price: 500,
        emoji: "✨",
        color: "#f59e0b",
    },
    Skin {
        id: "rainbow",
        name: "Rainbow",
        price: 1000,
        emoji: "🌈",
        color: "linear-gradient(45deg, #f87171, #fbbf24, #34d399, #60a5fa, #a78bfa)",
    },
    Skin {
        id: "cosmic",
        name: "Cosmic",
        price: 1500,
        emoji: "🌌",
        color: "#8b5cf6",
    },
    Skin {
        id: "ice",
        name: "Ice",
        price: 2000,
        emoji: "❄️",
        color: "#06b6d4",
    },
    Skin {
        id: "lava",
        name: "Lava",
        price: 3000,
        emoji: "🌋",
        color: "#dc2626",
    },
];

pub static BACKGROUNDS: [Background; 4] = [
    Background {
        id: "sunset",
        gradient: "linear-gradient(to bottom, #ff6b6b 0%, #feca57 50%, #48dbfb 100%)",
    },
    Background {
        id: "ocean",
        gradient: "linear-gradient(to bottom, #667eea 0%, #764ba2 100%)",
    },
    Background {
        id: "forest",
        gradient: "linear-gradient(to bottom, #134e5e 0%, #71b280 100%)",
    },
    Background {
        id: "space",
        gradient: "linear-gradient(to bottom, #000000 0%, #434343 100%)",
    },
];

pub fn skin(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.id == id)
}

pub fn background(id: &str) -> Option<&'static Background> {
    BACKGROUNDS.iter().find(|b| b.id == id)
}
