//! Custom diet MCP Tools

use serde::Serialize;

use crate::models::{CustomDietBuilder, DietEntry, FoodItem, NutrientMap, SavedDiet};
use crate::nutrition::scale;
use crate::session::SessionState;

/// Response for start_custom_diet, add_to_custom_diet, and get_custom_diet
#[derive(Debug, Serialize)]
pub struct CustomDietResponse {
    pub name: Option<String>,
    pub composing: bool,
    pub entries: Vec<DietEntry>,
    pub total: NutrientMap,
}

/// Response for save_custom_diet
#[derive(Debug, Serialize)]
pub struct SaveDietResponse {
    pub diet: SavedDiet,
    pub replaced: bool,
}

/// Response for list_saved_diets
#[derive(Debug, Serialize)]
pub struct ListSavedDietsResponse {
    pub diets: Vec<SavedDiet>,
    pub total: usize,
}

fn snapshot(state: &SessionState) -> CustomDietResponse {
    let builder = &state.diet_builder;
    CustomDietResponse {
        name: builder.name().map(str::to_string),
        composing: builder.is_composing(),
        entries: builder.entries().to_vec(),
        total: builder.total(),
    }
}

/// Discard any diet in progress and start a new named one
pub fn start_custom_diet(state: &mut SessionState, name: &str) -> Result<CustomDietResponse, String> {
    let mut builder = CustomDietBuilder::new();
    builder.begin(name).map_err(|e| e.to_string())?;
    state.diet_builder = builder;

    tracing::info!(diet = %name.trim(), "Started custom diet");
    Ok(snapshot(state))
}

/// Add a portion of a food to the diet in progress
pub fn add_to_custom_diet(
    state: &mut SessionState,
    item: &FoodItem,
    grams: f64,
) -> Result<CustomDietResponse, String> {
    let nutrients = scale(item, grams).ok_or_else(|| "grams must be greater than 0".to_string())?;
    state
        .diet_builder
        .add(item.name.clone(), nutrients)
        .map_err(|e| e.to_string())?;
    Ok(snapshot(state))
}

pub fn get_custom_diet(state: &SessionState) -> CustomDietResponse {
    snapshot(state)
}

/// Materialize the diet in progress; a saved diet with the same name is replaced
pub fn save_custom_diet(state: &mut SessionState) -> Result<SaveDietResponse, String> {
    let name = state
        .diet_builder
        .name()
        .ok_or_else(|| "No custom diet in progress; start one first".to_string())?
        .to_string();

    let diet = SavedDiet {
        name,
        foods: state.diet_builder.materialize(),
    };

    let replaced = match state.saved_diets.iter_mut().find(|d| d.name == diet.name) {
        Some(existing) => {
            *existing = diet.clone();
            true
        }
        None => {
            state.saved_diets.push(diet.clone());
            false
        }
    };

    tracing::info!(diet = %diet.name, foods = diet.foods.len(), replaced, "Saved custom diet");
    Ok(SaveDietResponse { diet, replaced })
}

pub fn list_saved_diets(state: &SessionState) -> ListSavedDietsResponse {
    ListSavedDietsResponse {
        diets: state.saved_diets.clone(),
        total: state.saved_diets.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NutrientLabel, Nutrition};

    fn food(name: &str, calories: f64) -> FoodItem {
        FoodItem::new(name, Nutrition { calories, ..Nutrition::zero() })
    }

    #[test]
    fn test_compose_and_save() {
        let mut state = SessionState::new();
        start_custom_diet(&mut state, "아침식단").unwrap();
        add_to_custom_diet(&mut state, &food("쌀밥", 150.0), 200.0).unwrap();
        let current = add_to_custom_diet(&mut state, &food("김치", 20.0), 100.0).unwrap();

        assert_eq!(current.entries.len(), 2);
        assert_eq!(current.total.get(NutrientLabel::Calories), 320.0);

        let saved = save_custom_diet(&mut state).unwrap();
        assert!(!saved.replaced);
        assert_eq!(saved.diet.foods[0].nutrition.calories, 300.0);
        assert_eq!(saved.diet.foods[1].name, "김치");
        assert_eq!(list_saved_diets(&state).total, 1);
    }

    #[test]
    fn test_add_without_name_is_rejected() {
        let mut state = SessionState::new();
        assert!(add_to_custom_diet(&mut state, &food("쌀밥", 150.0), 100.0).is_err());
        assert!(save_custom_diet(&mut state).is_err());
        assert!(!get_custom_diet(&state).composing);
    }

    #[test]
    fn test_resave_replaces_same_name() {
        let mut state = SessionState::new();
        start_custom_diet(&mut state, "저녁").unwrap();
        add_to_custom_diet(&mut state, &food("두부", 80.0), 100.0).unwrap();
        save_custom_diet(&mut state).unwrap();

        start_custom_diet(&mut state, "저녁").unwrap();
        assert!(get_custom_diet(&state).entries.is_empty());
        add_to_custom_diet(&mut state, &food("김치", 20.0), 100.0).unwrap();
        let saved = save_custom_diet(&mut state).unwrap();

        assert!(saved.replaced);
        let listed = list_saved_diets(&state);
        assert_eq!(listed.total, 1);
        assert_eq!(listed.diets[0].foods[0].name, "김치");
    }

    #[test]
    fn test_start_requires_name() {
        let mut state = SessionState::new();
        assert!(start_custom_diet(&mut state, "  ").is_err());
    }
}
