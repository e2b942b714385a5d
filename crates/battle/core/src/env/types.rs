//! Elemental typing and the effectiveness matrix.

use std::collections::BTreeMap;

/// Elemental affinity of a species or an ability.
///
/// `Neutral` is neither strong nor weak against anything; the basic attack
/// and untyped abilities use it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Water,
    Earth,
    Air,
    Frost,
    Light,
    Shadow,
}

/// One cell of the effectiveness matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effectiveness {
    /// ×0
    Immune,
    /// ×½
    Resisted,
    /// ×1
    #[default]
    Neutral,
    /// ×2
    Super,
}

impl Effectiveness {
    /// Multiplier expressed in percent (integer math keeps rolls deterministic).
    pub const fn percent(self) -> u32 {
        match self {
            Self::Immune => 0,
            Self::Resisted => 50,
            Self::Neutral => 100,
            Self::Super => 200,
        }
    }
}

/// Oracle exposing the effectiveness matrix.
pub trait TypeChartOracle: Send + Sync {
    /// Effectiveness of an `attack` element against a single `defend` element.
    fn effectiveness(&self, attack: Element, defend: Element) -> Effectiveness;

    /// Combined multiplier (percent) against every element of the defender.
    ///
    /// Dual-typed defenders multiply both cells, so the result ranges over
    /// 0, 25, 50, 100, 200 and 400.
    fn multiplier_percent(&self, attack: Element, defender: &[Element]) -> u32 {
        defender.iter().fold(100, |acc, &defend| {
            acc * self.effectiveness(attack, defend).percent() / 100
        })
    }
}

/// Sparse effectiveness matrix: any pair not listed is `Neutral`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeChart {
    entries: BTreeMap<(Element, Element), Effectiveness>,
}

impl TypeChart {
    /// Creates an all-neutral chart.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Builds a chart from `(attack, defend, effectiveness)` rows.
    pub fn from_rows(rows: impl IntoIterator<Item = (Element, Element, Effectiveness)>) -> Self {
        let mut chart = Self::neutral();
        for (attack, defend, value) in rows {
            chart.set(attack, defend, value);
        }
        chart
    }

    /// Sets one cell. Writing `Neutral` clears the entry.
    pub fn set(&mut self, attack: Element, defend: Element, value: Effectiveness) {
        if value == Effectiveness::Neutral {
            self.entries.remove(&(attack, defend));
        } else {
            self.entries.insert((attack, defend), value);
        }
    }

    /// Number of non-neutral cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The matrix shipped with the game.
    pub fn standard() -> Self {
        use Effectiveness::*;
        use Element::*;

        Self::from_rows([
            (Fire, Frost, Super),
            (Fire, Air, Super),
            (Fire, Water, Resisted),
            (Fire, Earth, Resisted),
            (Fire, Fire, Resisted),
            (Water, Fire, Super),
            (Water, Earth, Super),
            (Water, Water, Resisted),
            (Water, Frost, Resisted),
            (Earth, Fire, Super),
            (Earth, Frost, Super),
            (Earth, Water, Resisted),
            (Earth, Air, Immune),
            (Air, Water, Super),
            (Air, Earth, Resisted),
            (Air, Frost, Resisted),
            (Frost, Air, Super),
            (Frost, Earth, Super),
            (Frost, Fire, Resisted),
            (Frost, Frost, Resisted),
            (Light, Shadow, Super),
            (Light, Light, Resisted),
            (Shadow, Light, Super),
            (Shadow, Shadow, Resisted),
        ])
    }
}

impl TypeChartOracle for TypeChart {
    fn effectiveness(&self, attack: Element, defend: Element) -> Effectiveness {
        self.entries
            .get(&(attack, defend))
            .copied()
            .unwrap_or(Effectiveness::Neutral)
    }
}
