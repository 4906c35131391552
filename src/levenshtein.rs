// src/levenshtein.rs
//! Wagner–Fischer edit distance with configurable operation costs.
//!
//! Costs are signed and never validated. Negative costs give results that
//! follow the recurrence but are not a metric; keeping costs non-negative is
//! up to the caller. All accumulation saturates at `Cost::MIN`/`Cost::MAX`
//! instead of overflowing, in every build profile. Running time is O(m·n)
//! with no early exit, so callers should bound input lengths themselves.

use serde::{Deserialize, Serialize};

use crate::weights::{SubstitutionWeights, Unit};

pub type Cost = i64;

/// Insertion, deletion and substitution costs for one computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Costs {
    pub insert: Cost,
    pub delete: Cost,
    pub substitute: Cost,
}

impl Costs {
    /// Classic Levenshtein distance.
    pub const UNIT: Costs = Costs::new(1, 1, 1);

    pub const fn new(insert: Cost, delete: Cost, substitute: Cost) -> Self {
        Costs {
            insert,
            delete,
            substitute,
        }
    }
}

impl Default for Costs {
    fn default() -> Self {
        Costs::UNIT
    }
}

/// Picks the cheapest of the three edits.
///
/// Ties go to insertion, then deletion, then substitution. The order does not
/// change the returned cost, only which edit a traceback would follow.
#[inline]
fn cheapest(insertion: Cost, deletion: Cost, substitution: Cost) -> Cost {
    if insertion < deletion && insertion < substitution {
        insertion
    } else if deletion < substitution {
        deletion
    } else {
        substitution
    }
}

/// Rolling-row DP over `a` (rows) and `b` (columns).
///
/// `substitution` is only called for mismatched pairs; equal units are always
/// carried along the diagonal for free.
fn wagner_fischer<T, F>(a: &[T], b: &[T], costs: Costs, mut substitution: F) -> Cost
where
    T: PartialEq,
    F: FnMut(&T, &T) -> Cost,
{
    let mut previous_row: Vec<Cost> = (0..=b.len())
        .map(|j| (j as Cost).saturating_mul(costs.insert))
        .collect();
    let mut current_row: Vec<Cost> = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        current_row[0] = (i as Cost + 1).saturating_mul(costs.delete);
        for (j, y) in b.iter().enumerate() {
            current_row[j + 1] = if x == y {
                previous_row[j]
            } else {
                cheapest(
                    current_row[j].saturating_add(costs.insert),
                    previous_row[j + 1].saturating_add(costs.delete),
                    previous_row[j].saturating_add(substitution(x, y)),
                )
            };
        }
        std::mem::swap(&mut previous_row, &mut current_row);
    }
    // After the last swap the finished row is `previous_row`.
    previous_row[b.len()]
}

/// Edit distance between two strings, compared code point by code point.
pub fn distance(a: &str, b: &str, insert: Cost, delete: Cost, substitute: Cost) -> Cost {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    distance_with(&a, &b, Costs::new(insert, delete, substitute))
}

/// Edit distance over arbitrary comparable units with a flat substitution cost.
pub fn distance_with<T: PartialEq>(a: &[T], b: &[T], costs: Costs) -> Cost {
    wagner_fischer(a, b, costs, |_, _| costs.substitute)
}

/// Edit distance over raw bytes, with substitution costs taken from `weights`
/// where an entry exists.
///
/// Multi-byte characters are compared byte by byte and never match a table
/// entry. Use [`distance_weighted_chars`] for code-point keys.
pub fn distance_weighted(
    a: &[u8],
    b: &[u8],
    insert: Cost,
    delete: Cost,
    substitute: Cost,
    weights: &SubstitutionWeights<u8>,
) -> Cost {
    distance_weighted_with(a, b, Costs::new(insert, delete, substitute), weights)
}

/// Weighted edit distance between two strings, compared code point by code point.
pub fn distance_weighted_chars(
    a: &str,
    b: &str,
    insert: Cost,
    delete: Cost,
    substitute: Cost,
    weights: &SubstitutionWeights<char>,
) -> Cost {
    let a = char::units_of(a);
    let b = char::units_of(b);
    distance_weighted_with(&a, &b, Costs::new(insert, delete, substitute), weights)
}

pub fn distance_weighted_with<U: Unit>(
    a: &[U],
    b: &[U],
    costs: Costs,
    weights: &SubstitutionWeights<U>,
) -> Cost {
    wagner_fischer(a, b, costs, |&x, &y| {
        weights.substitution_cost(x, y, costs.substitute)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::default_weights;

    #[test]
    fn test_empty() {
        assert_eq!(distance("", "", 1, 1, 1), 0);
        assert_eq!(distance("", "abc", 2, 7, 11), 6);
        assert_eq!(distance("abc", "", 2, 7, 11), 21);
    }

    #[test]
    fn test_basic_cases() {
        assert_eq!(distance("kitten", "sitting", 1, 1, 1), 3);
        assert_eq!(distance("flaw", "lawn", 1, 1, 1), 2);
        assert_eq!(distance("sunday", "saturday", 1, 1, 1), 3);
        assert_eq!(distance("gumbo", "gambol", 1, 1, 1), 2);
    }

    #[test]
    fn test_equal_inputs_are_free() {
        assert_eq!(distance("same", "same", 5, 5, 5), 0);
        assert_eq!(distance("same", "same", -3, -3, -3), 0);
    }

    #[test]
    fn test_unicode() {
        assert_eq!(distance("日本語", "日本", 1, 1, 1), 1);
        assert_eq!(distance("café", "cafe", 1, 1, 1), 1);
    }

    #[test]
    fn test_asymmetric_costs() {
        // Expensive substitutions become a delete plus an insert.
        assert_eq!(distance("a", "b", 1, 1, 5), 2);
        assert_eq!(distance("ab", "b", 10, 1, 1), 1);
        assert_eq!(distance("ab", "b", 1, 10, 1), 10);
        assert_eq!(distance("b", "ab", 10, 1, 1), 10);
    }

    #[test]
    fn test_negative_costs_follow_recurrence() {
        assert_eq!(distance("", "abc", -1, 1, 1), -3);
        assert_eq!(distance("a", "b", -1, -1, 5), -2);
    }

    #[test]
    fn test_extreme_costs_saturate() {
        assert_eq!(distance("ab", "", 0, Cost::MAX, 0), Cost::MAX);
        assert_eq!(distance("", "ab", Cost::MAX, 0, 0), Cost::MAX);
        assert_eq!(distance("", "ab", Cost::MIN, 0, 0), Cost::MIN);
        assert_eq!(distance("a", "b", Cost::MAX, Cost::MAX, Cost::MAX), Cost::MAX);
        assert_eq!(distance("ab", "cd", Cost::MIN, Cost::MIN, 0), Cost::MIN);

        let mut table = SubstitutionWeights::new();
        table.insert(b'a', b'b', Cost::MAX);
        assert_eq!(
            distance_weighted(b"aa", b"bb", Cost::MAX, Cost::MAX, 1, &table),
            Cost::MAX
        );
    }

    #[test]
    fn test_cheapest_tie_break() {
        assert_eq!(cheapest(1, 2, 3), 1);
        assert_eq!(cheapest(2, 2, 3), 2);
        assert_eq!(cheapest(2, 1, 1), 1);
        assert_eq!(cheapest(1, 1, 1), 1);
    }

    #[test]
    fn test_weighted_default_table() {
        // Two O -> 0 substitutions at weight 1 each.
        assert_eq!(
            distance_weighted(b"O0O", b"000", 1, 1, 5, default_weights()),
            2
        );
        assert_eq!(distance("O0O", "000", 1, 1, 5), 4);
        // Reverse ordering of a table entry.
        assert_eq!(
            distance_weighted(b"000", b"O0O", 1, 1, 5, default_weights()),
            2
        );
        assert_eq!(
            distance_weighted(b"80", b"B0", 2, 2, 5, default_weights()),
            1
        );
    }

    #[test]
    fn test_weighted_reverse_entry_only() {
        let mut table = SubstitutionWeights::new();
        table.insert(b'1', b'l', 1);
        assert_eq!(distance_weighted(b"l", b"1", 1, 1, 5, &table), 1);
    }

    #[test]
    fn test_weighted_empty_table_is_flat() {
        let empty = SubstitutionWeights::new();
        assert_eq!(distance_weighted(b"kitten", b"sitting", 1, 1, 1, &empty), 3);
        assert_eq!(
            distance_weighted(b"kitten", b"sitting", 1, 1, 1, &empty),
            distance_with(b"kitten", b"sitting", Costs::UNIT)
        );
    }

    #[test]
    fn test_weighted_granularity() {
        let mut bytes = SubstitutionWeights::new();
        for (x, y) in "é".bytes().zip("è".bytes()) {
            bytes.insert(x, y, 1);
        }
        // "é" and "è" share their lead byte; only the trailing byte differs.
        assert_eq!(distance_weighted("é".as_bytes(), "è".as_bytes(), 1, 1, 5, &bytes), 1);

        let mut chars = SubstitutionWeights::new();
        chars.insert('é', 'e', 1);
        assert_eq!(distance_weighted_chars("café", "cafe", 1, 1, 5, &chars), 1);
        assert_eq!(distance_weighted_chars("cafe", "café", 1, 1, 5, &chars), 1);
        assert_eq!(distance("café", "cafe", 1, 1, 5), 2);
    }

    #[test]
    fn test_costs_serde() {
        let costs: Costs =
            serde_json::from_str(r#"{"insert": 1, "delete": 2, "substitute": 3}"#).unwrap();
        assert_eq!(costs, Costs::new(1, 2, 3));
        assert_eq!(Costs::default(), Costs::UNIT);
    }
}
