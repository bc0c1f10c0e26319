//! The portal's game listing and its search filter.

use serde::{Deserialize, Serialize};

use crate::core::config::GameKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    BoardGame,
    CrashGame,
    Runner,
    Prediction,
    Arcade,
    Strategy,
    Battle,
    Luck,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::BoardGame,
        Category::CrashGame,
        Category::Runner,
        Category::Prediction,
        Category::Arcade,
        Category::Strategy,
        Category::Battle,
        Category::Luck,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::BoardGame => "Board Game",
            Category::CrashGame => "Crash Game",
            Category::Runner => "Runner",
            Category::Prediction => "Prediction",
            Category::Arcade => "Arcade",
            Category::Strategy => "Strategy",
            Category::Battle => "Battle",
            Category::Luck => "Luck",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub kind: GameKind,
    pub name: &'static str,
    pub description: &'static str,
    pub players: &'static str,
    pub rating: f32,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Typical session length in minutes, `(min, max)`.
    pub play_minutes: (u32, u32),
}

const fn entry(
    kind: GameKind,
    name: &'static str,
    description: &'static str,
    players: &'static str,
    rating: f32,
    category: Category,
    difficulty: Difficulty,
    play_minutes: (u32, u32),
) -> CatalogEntry {
    CatalogEntry {
        kind,
        name,
        description,
        players,
        rating,
        category,
        difficulty,
        play_minutes,
    }
}

pub static CATALOG: [CatalogEntry; 11] = [
    entry(GameKind::Ludo, "Ludo", "Offline 4-player bot version classic board game", "1-4 Players", 4.8, Category::BoardGame, Difficulty::Easy, (15, 30)),
    entry(GameKind::Aviator, "Aviator", "Basic curve game animation with crash mechanics", "Solo", 4.9, Category::CrashGame, Difficulty::Medium, (2, 5)),
    entry(GameKind::ChickenRoad, "Chicken Road", "Mini-runner style game with obstacles", "Solo", 4.6, Category::Runner, Difficulty::Medium, (3, 8)),
    entry(GameKind::ColorPrediction, "Color Prediction", "2-color betting logic prediction game", "Solo", 4.7, Category::Prediction, Difficulty::Easy, (1, 2)),
    entry(GameKind::Plinko, "Plinko", "Ball drop with slot win mechanics", "Solo", 4.6, Category::Arcade, Difficulty::Easy, (3, 5)),
    entry(GameKind::Mines, "Mines", "Bomb-avoidance grid strategy game", "Solo", 4.8, Category::Strategy, Difficulty::Hard, (5, 10)),
    entry(GameKind::Balloons, "Balloons", "Tap to pop-style balloon game", "Solo", 4.5, Category::Arcade, Difficulty::Easy, (2, 4)),
    entry(GameKind::CockFight, "Cock Fight", "Auto-battle logic fighting game", "Solo", 4.4, Category::Battle, Difficulty::Medium, (3, 7)),
    entry(GameKind::Dice, "Dice", "Random roll with points scoring system", "Solo", 4.3, Category::Luck, Difficulty::Easy, (1, 2)),
    entry(GameKind::JetX, "Jet-X", "DEMO: Watch the jet soar and cash out before it crashes! Real-time multipliers up to 100x", "Solo", 4.9, Category::CrashGame, Difficulty::Medium, (1, 3)),
    entry(GameKind::Pushpa, "Pushpa", "Truck-themed crash game with multiplier betting", "Solo", 4.7, Category::CrashGame, Difficulty::Medium, (2, 5)),
];

/// Search criteria; an empty query and `None` fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub query: String,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
}

impl CatalogFilter {
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Case-insensitive substring match on name or description.
    #[must_use]
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let needle = self.query.to_lowercase();
        let text_ok = entry.name.to_lowercase().contains(&needle)
            || entry.description.to_lowercase().contains(&needle);
        text_ok
            && self.category.map_or(true, |c| c == entry.category)
            && self.difficulty.map_or(true, |d| d == entry.difficulty)
    }

    /// Entries passing the filter, in catalog order.
    pub fn apply(&self) -> impl Iterator<Item = &'static CatalogEntry> + '_ {
        CATALOG.iter().filter(move |e| self.matches(e))
    }
}

#[must_use]
pub fn find(kind: GameKind) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.kind == kind)
}
