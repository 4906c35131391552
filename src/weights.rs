//! Substitution weight tables.
//!
//! A table overrides the flat substitution cost for specific pairs of
//! comparison units. Pairs are stored in the direction they were inserted;
//! lookups consult both directions (see [`SubstitutionWeights::substitution_cost`]).

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use lazy_static::lazy_static;
use log::{debug, warn};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WeightTableError;
use crate::levenshtein::Cost;

/// The granularity at which two sequences are compared.
///
/// Implemented for `u8` (raw bytes, the historical behaviour of weighted
/// distances) and `char` (code points).
pub trait Unit: Copy + Eq + Hash + Ord + Debug {
    /// Splits `s` into its units.
    fn units_of(s: &str) -> Vec<Self>;

    /// Parses a string holding exactly one unit.
    fn parse_unit(s: &str) -> Option<Self>;

    /// Renders the unit as a string, if it can be represented on its own.
    fn write_unit(self) -> Option<String>;
}

impl Unit for u8 {
    fn units_of(s: &str) -> Vec<u8> {
        s.as_bytes().to_vec()
    }

    fn parse_unit(s: &str) -> Option<u8> {
        match s.as_bytes() {
            [byte] => Some(*byte),
            _ => None,
        }
    }

    // A lone non-ASCII byte is not valid UTF-8.
    fn write_unit(self) -> Option<String> {
        self.is_ascii().then(|| char::from(self).to_string())
    }
}

impl Unit for char {
    fn units_of(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn parse_unit(s: &str) -> Option<char> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn write_unit(self) -> Option<String> {
        Some(self.to_string())
    }
}

/// An ordered pair of units used as a table key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitPair<U> {
    pub first: U,
    pub second: U,
}

impl<U: Copy> UnitPair<U> {
    pub fn new(first: U, second: U) -> Self {
        UnitPair { first, second }
    }

    pub fn reversed(self) -> Self {
        UnitPair {
            first: self.second,
            second: self.first,
        }
    }
}

/// A sparse mapping from unit pairs to substitution costs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionWeights<U: Unit> {
    weights: HashMap<UnitPair<U>, Cost>,
}

impl<U: Unit> Default for SubstitutionWeights<U> {
    fn default() -> Self {
        SubstitutionWeights {
            weights: HashMap::new(),
        }
    }
}

impl<U: Unit> SubstitutionWeights<U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight for `first -> second`, returning the weight it replaced.
    pub fn insert(&mut self, first: U, second: U, weight: Cost) -> Option<Cost> {
        self.weights.insert(UnitPair::new(first, second), weight)
    }

    /// The weight stored for exactly this ordering of the pair.
    pub fn get(&self, first: U, second: U) -> Option<Cost> {
        self.weights.get(&UnitPair::new(first, second)).copied()
    }

    /// The smallest weight stored for the pair in either ordering.
    ///
    /// This only looks at the table. Distances use
    /// [`substitution_cost`](Self::substitution_cost), which agrees with
    /// `lookup` whenever an `(x, y)` entry exists.
    pub fn lookup(&self, x: U, y: U) -> Option<Cost> {
        match (self.get(x, y), self.get(y, x)) {
            (Some(forward), Some(backward)) => Some(forward.min(backward)),
            (forward, backward) => forward.or(backward),
        }
    }

    /// Effective cost of substituting `x` by `y`.
    ///
    /// An entry for `(x, y)` replaces `default` outright. An entry for
    /// `(y, x)` is taken only when it is cheaper than what the forward step
    /// produced, so a reverse-only entry above `default` is ignored.
    pub fn substitution_cost(&self, x: U, y: U, default: Cost) -> Cost {
        let cost = self.get(x, y).unwrap_or(default);
        match self.get(y, x) {
            Some(backward) if backward < cost => backward,
            _ => cost,
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitPair<U>, Cost)> + '_ {
        self.weights.iter().map(|(pair, weight)| (*pair, *weight))
    }

    /// Entries sorted by pair, for stable output.
    fn sorted_entries(&self) -> Vec<(UnitPair<U>, Cost)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable();
        entries
    }

    /// Parses a table from its JSON form:
    /// `[{"from": "O", "to": "0", "weight": 1}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, WeightTableError> {
        let entries: Vec<WeightEntry> = serde_json::from_str(json)?;
        Self::try_from_entries(entries)
    }

    pub fn to_json(&self) -> Result<String, WeightTableError> {
        Ok(serde_json::to_string(self)?)
    }

    fn try_from_entries(entries: Vec<WeightEntry>) -> Result<Self, WeightTableError> {
        let mut table = Self::new();
        for entry in entries {
            let first = parse(&entry.from)?;
            let second = parse(&entry.to)?;
            if let Some(previous) = table.insert(first, second, entry.weight) {
                warn!(
                    "duplicate weight for ({:?}, {:?}): {} replaced by {}",
                    first, second, previous, entry.weight
                );
            }
        }
        debug!("loaded substitution weight table with {} entries", table.len());
        Ok(table)
    }
}

fn parse<U: Unit>(s: &str) -> Result<U, WeightTableError> {
    U::parse_unit(s).ok_or_else(|| WeightTableError::InvalidUnit { unit: s.to_owned() })
}

impl<U: Unit> FromIterator<((U, U), Cost)> for SubstitutionWeights<U> {
    fn from_iter<I: IntoIterator<Item = ((U, U), Cost)>>(iter: I) -> Self {
        let mut table = Self::new();
        for ((first, second), weight) in iter {
            table.insert(first, second, weight);
        }
        table
    }
}

/// On-disk form of a single table entry.
#[derive(Serialize, Deserialize)]
struct WeightEntry {
    from: String,
    to: String,
    weight: Cost,
}

impl<U: Unit> Serialize for SubstitutionWeights<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self
            .sorted_entries()
            .into_iter()
            .map(|(pair, weight)| {
                let write = |unit: U| {
                    unit.write_unit().ok_or_else(|| {
                        <S::Error as ser::Error>::custom(format!(
                            "{:?} cannot be written as a string",
                            unit
                        ))
                    })
                };
                Ok(WeightEntry {
                    from: write(pair.first)?,
                    to: write(pair.second)?,
                    weight,
                })
            })
            .collect::<Result<Vec<_>, S::Error>>()?;
        serializer.collect_seq(entries)
    }
}

impl<'de, U: Unit> Deserialize<'de> for SubstitutionWeights<U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<WeightEntry>::deserialize(deserializer)?;
        Self::try_from_entries(entries).map_err(de::Error::custom)
    }
}

/// Common misidentifications of letters and digits, as ordered byte pairs.
///
/// Look-alike glyphs cost 1; digit pairs that are easy to misread cost 3.
pub const DEFAULT_SUBSTITUTION_WEIGHTS: &[((u8, u8), Cost)] = &[
    ((b'l', b'1'), 1),
    ((b'b', b'6'), 1),
    ((b'o', b'0'), 1),
    ((b'g', b'9'), 1),
    ((b'q', b'9'), 1),
    ((b'G', b'6'), 1),
    ((b'F', b'7'), 1),
    ((b'Z', b'2'), 1),
    ((b'Z', b'7'), 1),
    ((b'Q', b'2'), 1),
    ((b'O', b'0'), 1),
    ((b'B', b'8'), 1),
    ((b'D', b'0'), 1),
    ((b'S', b'5'), 1),
    ((b'S', b'8'), 1),
    ((b'Y', b'5'), 1),
    ((b'T', b'7'), 1),
    ((b'U', b'0'), 1),
    ((b'U', b'4'), 1),
    ((b'A', b'4'), 1),
    ((b'}', b'1'), 1),
    ((b'{', b'1'), 1),
    ((b'0', b'8'), 3),
    ((b'3', b'9'), 3),
    ((b'3', b'8'), 3),
    ((b'4', b'9'), 3),
    ((b'5', b'8'), 3),
    ((b'3', b'5'), 3),
    ((b'6', b'8'), 3),
    ((b'0', b'9'), 3),
    ((b'7', b'1'), 3),
    ((b'g', b'q'), 1),
    ((b'p', b'n'), 1),
    ((b'm', b'n'), 1),
    ((b'y', b'z'), 1),
    ((b'u', b'v'), 1),
    ((b'c', b'e'), 1),
    ((b'l', b'I'), 1),
    ((b'T', b'I'), 1),
    ((b'D', b'O'), 1),
    ((b'C', b'G'), 1),
    ((b'L', b'I'), 1),
    ((b'M', b'N'), 1),
    ((b'P', b'B'), 1),
    ((b'F', b'R'), 1),
    ((b'U', b'O'), 1),
    ((b'U', b'V'), 1),
    ((b'E', b'F'), 1),
    ((b'V', b'W'), 1),
    ((b'X', b'Y'), 1),
];

lazy_static! {
    static ref DEFAULT_WEIGHTS: SubstitutionWeights<u8> =
        DEFAULT_SUBSTITUTION_WEIGHTS.iter().copied().collect();
}

/// The default table, built once and shared read-only.
///
/// Clone it to derive a custom table.
pub fn default_weights() -> &'static SubstitutionWeights<u8> {
    &DEFAULT_WEIGHTS
}
