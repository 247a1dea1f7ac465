//! FitMeal MCP Server Implementation
//!
//! Implements the MCP server with all FitMeal tools.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::catalog::{FoodSearchCache, DEFAULT_CATEGORY};
use crate::nutrition::parse_weight_input;
use crate::session::{self, SessionState};
use crate::tools::status::StatusTracker;
use crate::tools::{custom_diets, foods, meals, profile};

/// FitMeal MCP Service
#[derive(Clone)]
pub struct FitMealService {
    status_tracker: Arc<StatusTracker>,
    cache: Arc<FoodSearchCache>,
    /// Never held across an await
    state: Arc<Mutex<SessionState>>,
    tool_router: ToolRouter<FitMealService>,
}

impl FitMealService {
    pub fn new(cache: Arc<FoodSearchCache>, state: SessionState) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new()),
            cache,
            state: Arc::new(Mutex::new(state)),
            tool_router: Self::tool_router(),
        }
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn tool_error(message: String) -> McpError {
    McpError::internal_error(message, None)
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// Portion weight in grams, as a number or as text typed into a weight field
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum WeightInput {
    Grams(f64),
    Text(String),
}

impl WeightInput {
    /// Positive grams, or an error naming the rejected input
    pub fn grams(&self) -> Result<f64, String> {
        let grams = match self {
            WeightInput::Grams(g) if g.is_finite() && *g > 0.0 => Some(*g),
            WeightInput::Grams(_) => None,
            WeightInput::Text(text) => parse_weight_input(text),
        };
        grams.ok_or_else(|| format!("Invalid weight '{}': enter grams greater than 0", self))
    }
}

impl std::fmt::Display for WeightInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightInput::Grams(g) => write!(f, "{}", g),
            WeightInput::Text(text) => write!(f, "{}", text),
        }
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    /// Two-digit category code (default "01", 밥류)
    #[serde(default = "default_category")]
    pub category: String,
    /// Case-insensitive substring of the food name; empty lists the category
    #[serde(default)]
    pub query: String,
    /// List favorites before other foods (default true)
    #[serde(default = "default_true")]
    pub favorites_first: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodRefParams {
    #[serde(default = "default_category")]
    pub category: String,
    /// Exact food name as returned by search_foods
    pub food_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PortionParams {
    #[serde(default = "default_category")]
    pub category: String,
    pub food_name: String,
    /// Portion weight in grams
    pub grams: WeightInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleFavoriteParams {
    pub food_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    #[serde(default = "default_category")]
    pub category: String,
    pub food_name: String,
    /// Portion weight in grams
    pub grams: WeightInput,
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
    /// 아침/점심/저녁 or breakfast/lunch/dinner; defaults by the current hour
    pub meal_slot: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetMealParams {
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
    /// 아침/점심/저녁 or breakfast/lunch/dinner; defaults by the current hour
    pub meal_slot: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartCustomDietParams {
    /// Name of the diet; fixed once composing starts
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalorieTargetParams {
    /// Height in cm
    pub height_cm: String,
    /// Weight in kg
    pub weight_kg: String,
    /// Age in whole years
    pub age: String,
    /// Use the result as this session's daily calorie target (default false)
    #[serde(default)]
    pub apply: bool,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FitMealService {
    // --- Status ---

    #[tool(description = "Get the current status of the FitMeal service including build info, cached categories, session counts, and process information")]
    async fn fitmeal_status(&self) -> Result<CallToolResult, McpError> {
        let status = {
            let state = self.session();
            self.status_tracker.get_status(&self.cache, &state)
        };
        to_json(&status)
    }

    #[tool(description = "Get step-by-step instructions for searching foods and logging meals. Call this when starting a new food logging session or when unsure how to use the meal tracking tools.")]
    fn meal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::MEAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(MEAL_INSTRUCTIONS)]))
    }

    // --- Foods ---

    #[tool(description = "List the food catalog categories with their two-digit codes")]
    fn list_categories(&self) -> Result<CallToolResult, McpError> {
        to_json(&foods::list_categories(&self.cache))
    }

    #[tool(description = "Search a food category by name. The first search in a category downloads it from the public nutrition catalog; later searches use the cached list.")]
    async fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        // Snapshot favorites so the session lock is not held during the fetch
        let favorites = self.session().favorites.clone();
        let result = foods::search_foods(&self.cache, &favorites, &p.category, &p.query, p.favorites_first)
            .await
            .map_err(tool_error)?;
        to_json(&result)
    }

    #[tool(description = "Get a food's per-100g nutrients with each nutrient's share of the daily target (uncapped)")]
    async fn get_food_detail(&self, Parameters(p): Parameters<FoodRefParams>) -> Result<CallToolResult, McpError> {
        let intake = self.session().intake.clone();
        let result = foods::get_food_detail(&self.cache, &intake, &p.category, &p.food_name)
            .await
            .map_err(tool_error)?;
        to_json(&result)
    }

    #[tool(description = "Mark or unmark a food as a favorite. Favorites are listed first in search results.")]
    fn toggle_favorite(&self, Parameters(p): Parameters<ToggleFavoriteParams>) -> Result<CallToolResult, McpError> {
        let result = foods::toggle_favorite(&mut self.session(), &p.food_name).map_err(tool_error)?;
        to_json(&result)
    }

    #[tool(description = "List favorite food names")]
    fn list_favorites(&self) -> Result<CallToolResult, McpError> {
        to_json(&foods::list_favorites(&self.session()))
    }

    #[tool(description = "Show the nutrients of a portion without logging it")]
    async fn preview_nutrients(&self, Parameters(p): Parameters<PortionParams>) -> Result<CallToolResult, McpError> {
        let grams = p.grams.grams().map_err(tool_error)?;
        let result = foods::preview_nutrients(&self.cache, &p.category, &p.food_name, grams)
            .await
            .map_err(tool_error)?;
        to_json(&result)
    }

    // --- Meals ---

    #[tool(description = "Log a portion of a catalog food to a day's breakfast, lunch, or dinner. Logging the same food twice records it twice.")]
    async fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let grams = p.grams.grams().map_err(tool_error)?;
        let date = session::resolve_date(p.date.as_deref()).map_err(tool_error)?;
        let slot = session::resolve_slot(p.meal_slot.as_deref()).map_err(tool_error)?;

        let item = foods::find_food(&self.cache, &p.category, &p.food_name)
            .await
            .map_err(tool_error)?;
        let result = meals::log_meal(&mut self.session(), date, slot, &item, grams).map_err(tool_error)?;
        to_json(&result)
    }

    #[tool(description = "Get the entries, totals, and daily-target progress of one meal")]
    fn get_meal(&self, Parameters(p): Parameters<GetMealParams>) -> Result<CallToolResult, McpError> {
        let date = session::resolve_date(p.date.as_deref()).map_err(tool_error)?;
        let slot = session::resolve_slot(p.meal_slot.as_deref()).map_err(tool_error)?;
        to_json(&meals::get_meal(&self.session(), date, slot))
    }

    #[tool(description = "Get all meals of a day with per-meal totals, day totals, and daily-target progress")]
    fn get_day(&self, Parameters(p): Parameters<GetDayParams>) -> Result<CallToolResult, McpError> {
        let date = session::resolve_date(p.date.as_deref()).map_err(tool_error)?;
        to_json(&meals::get_day(&self.session(), date))
    }

    #[tool(description = "List every day with at least one logged meal")]
    fn list_logged_days(&self) -> Result<CallToolResult, McpError> {
        to_json(&meals::list_logged_days(&self.session()))
    }

    // --- Custom Diets ---

    #[tool(description = "Start composing a named custom diet. Discards any diet in progress.")]
    fn start_custom_diet(&self, Parameters(p): Parameters<StartCustomDietParams>) -> Result<CallToolResult, McpError> {
        let result = custom_diets::start_custom_diet(&mut self.session(), &p.name).map_err(tool_error)?;
        to_json(&result)
    }

    #[tool(description = "Add a portion of a catalog food to the custom diet in progress")]
    async fn add_to_custom_diet(&self, Parameters(p): Parameters<PortionParams>) -> Result<CallToolResult, McpError> {
        let grams = p.grams.grams().map_err(tool_error)?;
        let item = foods::find_food(&self.cache, &p.category, &p.food_name)
            .await
            .map_err(tool_error)?;
        let result = custom_diets::add_to_custom_diet(&mut self.session(), &item, grams).map_err(tool_error)?;
        to_json(&result)
    }

    #[tool(description = "Show the custom diet in progress with its running total")]
    fn get_custom_diet(&self) -> Result<CallToolResult, McpError> {
        to_json(&custom_diets::get_custom_diet(&self.session()))
    }

    #[tool(description = "Save the custom diet in progress. A saved diet with the same name is replaced.")]
    fn save_custom_diet(&self) -> Result<CallToolResult, McpError> {
        let result = custom_diets::save_custom_diet(&mut self.session()).map_err(tool_error)?;
        to_json(&result)
    }

    #[tool(description = "List saved custom diets")]
    fn list_saved_diets(&self) -> Result<CallToolResult, McpError> {
        to_json(&custom_diets::list_saved_diets(&self.session()))
    }

    // --- Profile ---

    #[tool(description = "Estimate a daily calorie target from height (cm), weight (kg), and age. Optionally apply it to this session.")]
    fn calorie_target(&self, Parameters(p): Parameters<CalorieTargetParams>) -> Result<CallToolResult, McpError> {
        let result = profile::calorie_target(&mut self.session(), &p.height_cm, &p.weight_kg, &p.age, p.apply);
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FitMealService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fitmeal".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FitMeal".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FitMeal - Food search, meal logging, and nutrient intake tracking over the Korean public food nutrition catalog. \
                 IMPORTANT: Call meal_instructions before logging food. \
                 Foods: list_categories, search_foods, get_food_detail, preview_nutrients, toggle_favorite, list_favorites. \
                 Meals: log_meal, get_meal, get_day, list_logged_days. \
                 Custom diets: start_custom_diet, add_to_custom_diet, get_custom_diet, save_custom_diet, list_saved_diets. \
                 Profile: calorie_target. Status: fitmeal_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_input_number_and_text() {
        assert_eq!(WeightInput::Grams(150.0).grams(), Ok(150.0));
        assert_eq!(WeightInput::Text("12.5".into()).grams(), Ok(12.5));
        assert!(WeightInput::Grams(0.0).grams().is_err());
        assert!(WeightInput::Grams(-5.0).grams().is_err());
        assert!(WeightInput::Text("1.2.3".into()).grams().is_err());
        assert!(WeightInput::Text("".into()).grams().is_err());
    }

    #[test]
    fn test_weight_input_deserializes_either_form() {
        let number: WeightInput = serde_json::from_str("150").unwrap();
        assert_eq!(number.grams(), Ok(150.0));
        let text: WeightInput = serde_json::from_str("\"150\"").unwrap();
        assert_eq!(text.grams(), Ok(150.0));
    }

    #[test]
    fn test_search_params_defaults() {
        let p: SearchFoodsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p.category, "01");
        assert_eq!(p.query, "");
        assert!(p.favorites_first);
    }
}
