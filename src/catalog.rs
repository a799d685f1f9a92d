//! Food catalog
//!
//! Two-source lookup: a builtin catalog shipped with the engine plus
//! user-defined custom foods. Sources are merged by name with last-write-wins
//! semantics, so a custom food overrides a builtin food of the same name.

use crate::error::EngineError;
use crate::types::FoodDefinition;
use std::collections::HashMap;

/// Builtin food definitions shipped with the engine
const BUILTIN_FOODS_JSON: &str = include_str!("builtin_foods.json");

/// Merged food lookup keyed by name
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: HashMap<String, FoodDefinition>,
}

impl FoodCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog containing only the builtin foods
    pub fn builtin() -> Result<Self, EngineError> {
        Ok(Self::from_sources(Self::builtin_foods()?, Vec::new()))
    }

    /// Build a merged catalog: builtin entries first, custom entries overlaid.
    ///
    /// Merge is an explicit map construction, not concatenation order: a
    /// custom food with a builtin name replaces the builtin entry.
    pub fn from_sources(builtin: Vec<FoodDefinition>, custom: Vec<FoodDefinition>) -> Self {
        let mut foods = HashMap::with_capacity(builtin.len() + custom.len());
        for mut food in builtin {
            food.custom = false;
            foods.insert(food.name.clone(), food);
        }
        for mut food in custom {
            food.custom = true;
            foods.insert(food.name.clone(), food);
        }
        Self { foods }
    }

    /// Parse the embedded builtin food list
    pub fn builtin_foods() -> Result<Vec<FoodDefinition>, EngineError> {
        serde_json::from_str(BUILTIN_FOODS_JSON)
            .map_err(|e| EngineError::CatalogError(e.to_string()))
    }

    /// Parse a food list from JSON (same shape as the builtin file)
    pub fn foods_from_json(json: &str) -> Result<Vec<FoodDefinition>, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::CatalogError(e.to_string()))
    }

    /// Add or replace a user-defined food
    pub fn insert_custom(&mut self, mut food: FoodDefinition) {
        food.custom = true;
        self.foods.insert(food.name.clone(), food);
    }

    /// Look up a food by name
    pub fn lookup(&self, name: &str) -> Option<&FoodDefinition> {
        self.foods.get(name)
    }

    /// All foods sorted by name, for listings
    pub fn sorted_foods(&self) -> Vec<&FoodDefinition> {
        let mut foods: Vec<&FoodDefinition> = self.foods.values().collect();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FoodUnit, MacroRates};
    use pretty_assertions::assert_eq;

    fn make_custom(name: &str, calories: f64) -> FoodDefinition {
        FoodDefinition {
            name: name.to_string(),
            unit: FoodUnit::Gram,
            per_100g: Some(MacroRates {
                calories,
                protein: 0.0,
                carbs: 0.0,
                fats: 0.0,
            }),
            per_piece: None,
            unit_size_g: None,
            spoon_selectable: false,
            notes: None,
            custom: false,
        }
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = FoodCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());

        // Every storage basis is represented
        assert!(catalog.lookup("Chicken Breast").is_some());
        assert!(catalog.lookup("Egg").unwrap().per_piece.is_some());
        assert_eq!(catalog.lookup("Bread").unwrap().unit_size_g, Some(25.0));
        assert!(catalog.lookup("Cooking Oil").unwrap().spoon_selectable);
    }

    #[test]
    fn test_custom_overrides_builtin_by_name() {
        let catalog = FoodCatalog::from_sources(
            FoodCatalog::builtin_foods().unwrap(),
            vec![make_custom("Egg", 90.0)],
        );

        let egg = catalog.lookup("Egg").unwrap();
        assert!(egg.custom);
        assert_eq!(egg.per_100g.unwrap().calories, 90.0);
        assert!(egg.per_piece.is_none());
    }

    #[test]
    fn test_insert_custom_marks_and_replaces() {
        let mut catalog = FoodCatalog::builtin().unwrap();
        let before = catalog.len();

        catalog.insert_custom(make_custom("Protein Bar", 380.0));
        assert_eq!(catalog.len(), before + 1);
        assert!(catalog.lookup("Protein Bar").unwrap().custom);

        // Same name replaces, no duplicate
        catalog.insert_custom(make_custom("Protein Bar", 400.0));
        assert_eq!(catalog.len(), before + 1);
        assert_eq!(
            catalog.lookup("Protein Bar").unwrap().per_100g.unwrap().calories,
            400.0
        );
    }

    #[test]
    fn test_sorted_listing() {
        let mut catalog = FoodCatalog::new();
        catalog.insert_custom(make_custom("Zucchini", 17.0));
        catalog.insert_custom(make_custom("Apple", 52.0));

        let names: Vec<&str> = catalog.sorted_foods().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Zucchini"]);
    }
}
