//! Edit distance with per-pair substitution weights for character-confusion
//! patterns such as `O` vs `0`.

mod error;
mod levenshtein;
mod weights;

use wasm_bindgen::prelude::*;

pub use error::WeightTableError;
pub use levenshtein::{
    distance, distance_weighted, distance_weighted_chars, distance_weighted_with, distance_with,
    Cost, Costs,
};
pub use weights::{
    default_weights, SubstitutionWeights, Unit, UnitPair, DEFAULT_SUBSTITUTION_WEIGHTS,
};

/// Costs are `i32` and the result an `f64`, which holds it exactly.
#[wasm_bindgen(js_name = distance)]
pub fn distance_js(
    a: &str,
    b: &str,
    insert_cost: i32,
    delete_cost: i32,
    substitute_cost: i32,
) -> f64 {
    levenshtein::distance(
        a,
        b,
        insert_cost.into(),
        delete_cost.into(),
        substitute_cost.into(),
    ) as f64
}

/// `weights_json` uses the `[{"from", "to", "weight"}]` form; without it the
/// default table applies.
#[wasm_bindgen(js_name = distanceWeighted)]
pub fn distance_weighted_js(
    a: &str,
    b: &str,
    insert_cost: i32,
    delete_cost: i32,
    substitute_cost: i32,
    weights_json: Option<String>,
) -> Result<f64, JsValue> {
    let custom = weights_json
        .map(|json| SubstitutionWeights::<u8>::from_json(&json))
        .transpose()
        .map_err(|e| JsValue::from_str(&format!("Weight table error: {}", e)))?;
    let weights = custom.as_ref().unwrap_or_else(|| default_weights());
    Ok(levenshtein::distance_weighted(
        a.as_bytes(),
        b.as_bytes(),
        insert_cost.into(),
        delete_cost.into(),
        substitute_cost.into(),
        weights,
    ) as f64)
}
