//! The static card catalog.
//!
//! Every card type has exactly one catalog entry: its string id, cost and
//! kind. The table is read-only at runtime; the pipeline consults it for
//! affordability and to decide how a played card is installed.
//!
//! ## Kinds
//!
//! - **Targeted**: opens a `PendingEffect` that must be answered with a
//!   selection before the player may place or pass.
//! - **Armed**: waits for the owner's next placement and modifies it.
//! - **Immediate**: resolves the moment it is played.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Every card type in the game.
///
/// Serialized by its type name (`TIME_BOMB`, `CHAIN_WILL`, ...), which is
/// also what the replay format stores for `use_card` and card selections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    TreasureBox,
    FreePlacement,
    #[serde(rename = "PROTECTED_NEXT_STONE")]
    ProtectedNextStone,
    SwapWithEnemy,
    #[serde(rename = "SACRIFICE_WILL")]
    Sacrifice,
    #[serde(rename = "PERMA_PROTECT_NEXT_STONE")]
    PermaProtect,
    #[serde(rename = "STRONG_WIND_WILL")]
    StrongWind,
    #[serde(rename = "INHERIT_WILL")]
    Inherit,
    #[serde(rename = "TRAP_WILL")]
    Trap,
    #[serde(rename = "TEMPT_WILL")]
    Tempt,
    #[serde(rename = "CHAIN_WILL")]
    Chain,
    #[serde(rename = "REGEN_WILL")]
    Regen,
    #[serde(rename = "DESTROY_ONE_STONE")]
    Destroy,
    TimeBomb,
    #[serde(rename = "ULTIMATE_REVERSE_DRAGON")]
    Dragon,
    #[serde(rename = "BREEDING_WILL")]
    Breeding,
    CrossBomb,
    #[serde(rename = "HYPERACTIVE_WILL")]
    Hyperactive,
    #[serde(rename = "SELL_CARD_WILL")]
    Sell,
    #[serde(rename = "PLUNDER_WILL")]
    Plunder,
    #[serde(rename = "WORK_WILL")]
    Work,
    DoublePlace,
    HeavenBlessing,
    #[serde(rename = "CONDEMN_WILL")]
    Condemn,
    GoldStone,
    SilverStone,
    StealCard,
    #[serde(rename = "GUARD_WILL")]
    Guard,
    #[serde(rename = "ULTIMATE_DESTROY_GOD")]
    DestroyGod,
    #[serde(rename = "POSITION_SWAP_WILL")]
    PositionSwap,
}

/// How a played card takes effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Targeted,
    Armed,
    Immediate,
}

/// One catalog row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardDefinition {
    pub card: CardType,
    /// Catalog id, e.g. `bomb_01`.
    pub id: &'static str,
    /// Type name, e.g. `TIME_BOMB`.
    pub name: &'static str,
    pub cost: u32,
    pub kind: CardKind,
}

const fn def(card: CardType, id: &'static str, name: &'static str, cost: u32, kind: CardKind) -> CardDefinition {
    CardDefinition { card, id, name, cost, kind }
}

use CardKind::{Armed, Immediate, Targeted};

/// The catalog, in `CardType` declaration order.
pub static CARDS: [CardDefinition; 30] = [
    def(CardType::TreasureBox, "chest_01", "TREASURE_BOX", 0, Immediate),
    def(CardType::FreePlacement, "free_01", "FREE_PLACEMENT", 2, Armed),
    def(CardType::ProtectedNextStone, "hard_01", "PROTECTED_NEXT_STONE", 1, Armed),
    def(CardType::SwapWithEnemy, "swap_01", "SWAP_WITH_ENEMY", 5, Targeted),
    def(CardType::Sacrifice, "sacrifice_01", "SACRIFICE_WILL", 5, Targeted),
    def(CardType::PermaProtect, "perma_01", "PERMA_PROTECT_NEXT_STONE", 12, Armed),
    def(CardType::StrongWind, "strong_wind_01", "STRONG_WIND_WILL", 9, Targeted),
    def(CardType::Inherit, "inherit_01", "INHERIT_WILL", 12, Targeted),
    def(CardType::Trap, "trap_01", "TRAP_WILL", 14, Targeted),
    def(CardType::Tempt, "tempt_01", "TEMPT_WILL", 20, Targeted),
    def(CardType::Chain, "chain_01", "CHAIN_WILL", 22, Armed),
    def(CardType::Regen, "regen_01", "REGEN_WILL", 15, Armed),
    def(CardType::Destroy, "destroy_01", "DESTROY_ONE_STONE", 10, Targeted),
    def(CardType::TimeBomb, "bomb_01", "TIME_BOMB", 13, Targeted),
    def(CardType::Dragon, "udr_01", "ULTIMATE_REVERSE_DRAGON", 30, Armed),
    def(CardType::Breeding, "breeding_01", "BREEDING_WILL", 16, Armed),
    def(CardType::CrossBomb, "cross_bomb_01", "CROSS_BOMB", 18, Armed),
    def(CardType::Hyperactive, "hyperactive_01", "HYPERACTIVE_WILL", 8, Armed),
    def(CardType::Sell, "sell_01", "SELL_CARD_WILL", 8, Targeted),
    def(CardType::Plunder, "plunder_will", "PLUNDER_WILL", 4, Armed),
    def(CardType::Work, "work_01", "WORK_WILL", 11, Armed),
    def(CardType::DoublePlace, "double_01", "DOUBLE_PLACE", 24, Immediate),
    def(CardType::HeavenBlessing, "heaven_01", "HEAVEN_BLESSING", 3, Targeted),
    def(CardType::Condemn, "condemn_01", "CONDEMN_WILL", 6, Targeted),
    def(CardType::GoldStone, "gold_stone", "GOLD_STONE", 6, Armed),
    def(CardType::SilverStone, "silver_stone", "SILVER_STONE", 3, Armed),
    def(CardType::StealCard, "steal_card_01", "STEAL_CARD", 7, Armed),
    def(CardType::Guard, "guard_01", "GUARD_WILL", 7, Targeted),
    def(CardType::DestroyGod, "udg_01", "ULTIMATE_DESTROY_GOD", 25, Armed),
    def(CardType::PositionSwap, "position_swap_01", "POSITION_SWAP_WILL", 10, Targeted),
];

impl CardType {
    /// All card types in catalog order.
    pub fn all() -> impl Iterator<Item = CardType> {
        CARDS.iter().map(|d| d.card)
    }

    /// This card's catalog row.
    #[must_use]
    pub fn definition(self) -> &'static CardDefinition {
        &CARDS[self as usize]
    }

    #[must_use]
    pub fn cost(self) -> u32 {
        self.definition().cost
    }

    #[must_use]
    pub fn kind(self) -> CardKind {
        self.definition().kind
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.definition().name
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup by catalog id.
///
/// ## Example
///
/// ```
/// use will_reversi::cards::{CardCatalog, CardType};
///
/// let catalog = CardCatalog::standard();
/// assert_eq!(catalog.by_id("bomb_01"), Some(CardType::TimeBomb));
/// assert_eq!(catalog.by_id("missing"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    ids: FxHashMap<&'static str, CardType>,
}

impl CardCatalog {
    /// Index the built-in table.
    #[must_use]
    pub fn standard() -> Self {
        let ids = CARDS.iter().map(|d| (d.id, d.card)).collect();
        Self { ids }
    }

    /// Card type for a catalog id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<CardType> {
        self.ids.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
