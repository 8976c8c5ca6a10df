//! World and level definitions.
//!
//! Edit here to change levels server-side; the client only mirrors what
//! these configs say. Star thresholds and entry costs are never accepted
//! from the client.

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

/// Required ingredient and preparation state for a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct IngredientReq {
    #[serde(rename = "type")]
    pub kind: String,
    pub state: String,
}

/// One dish the level can order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct RecipeDef {
    pub name: String,
    pub points: u32,
    pub time: u32,
    pub difficulty: u32,
    pub ingredients: Vec<IngredientReq>,
}

/// Full server-side definition of a playable level.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct LevelConfig {
    pub name: String,
    pub time: u32,
    pub order_interval: u32,
    pub max_orders: u32,
    pub initial_orders: u32,
    pub star1: u32,
    pub star2: u32,
    pub star3: u32,
    pub unlimited_plates: bool,
    pub auto_remove_plates: bool,
    pub requires_sink: bool,
    pub plate_count: u32,
    pub entry_cost: u64,
    pub free_hero_reward_id: String,
    pub recipes: Vec<RecipeDef>,
    /// Explicit score ceiling; derived from recipes/time when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u32>,
}

/// A world and its numbered levels.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct WorldConfig {
    pub world_id: u32,
    pub world_name: String,
    pub levels: BTreeMap<u32, LevelConfig>,
}

fn req(kind: &str, state: &str) -> IngredientReq {
    IngredientReq {
        kind: kind.to_string(),
        state: state.to_string(),
    }
}

fn recipe(name: &str, points: u32, time: u32, difficulty: u32, ingredients: Vec<IngredientReq>) -> RecipeDef {
    RecipeDef {
        name: name.to_string(),
        points,
        time,
        difficulty,
        ingredients,
    }
}

#[allow(clippy::too_many_arguments)]
fn level(
    name: &str,
    time: u32,
    order_interval: u32,
    max_orders: u32,
    initial_orders: u32,
    stars: (u32, u32, u32),
    plates: (bool, bool, bool, u32),
    entry_cost: u64,
    recipes: Vec<RecipeDef>,
) -> LevelConfig {
    let (unlimited_plates, auto_remove_plates, requires_sink, plate_count) = plates;
    LevelConfig {
        name: name.to_string(),
        time,
        order_interval,
        max_orders,
        initial_orders,
        star1: stars.0,
        star2: stars.1,
        star3: stars.2,
        unlimited_plates,
        auto_remove_plates,
        requires_sink,
        plate_count,
        entry_cost,
        free_hero_reward_id: String::new(),
        recipes,
        max_score: None,
    }
}

/// World 1, "THE KITCHEN": the ten launch levels.
pub fn standard_worlds() -> Vec<WorldConfig> {
    let mut levels = BTreeMap::new();
    levels.insert(
        1,
        level(
            "Lettuce Salad",
            120,
            50,
            2,
            1,
            (400, 700, 1100),
            (true, true, false, 0),
            0,
            vec![recipe("Lettuce Salad", 60, 120, 1, vec![req("Lettuce", "Chopped")])],
        ),
    );
    levels.insert(
        2,
        level(
            "Two Salads",
            150,
            45,
            2,
            2,
            (500, 900, 1400),
            (true, true, false, 0),
            25,
            vec![
                recipe("Lettuce Salad", 60, 90, 1, vec![req("Lettuce", "Chopped")]),
                recipe("Tomato Salad", 60, 90, 1, vec![req("Tomato", "Chopped")]),
            ],
        ),
    );
    levels.insert(
        3,
        level(
            "First Cooking",
            150,
            40,
            3,
            2,
            (600, 1100, 1700),
            (true, true, false, 0),
            50,
            vec![
                recipe("Lettuce Salad", 60, 80, 1, vec![req("Lettuce", "Chopped")]),
                recipe("Tomato Soup", 100, 80, 1, vec![req("Tomato", "Cooked")]),
            ],
        ),
    );
    levels.insert(
        4,
        level(
            "Meat Kitchen",
            180,
            40,
            3,
            2,
            (700, 1300, 2000),
            (true, true, false, 0),
            75,
            vec![
                recipe("Lettuce Salad", 60, 70, 1, vec![req("Lettuce", "Chopped")]),
                recipe("Tomato Soup", 100, 70, 1, vec![req("Tomato", "Cooked")]),
                recipe("Cooked Meat", 120, 75, 1, vec![req("Meat", "Cooked")]),
            ],
        ),
    );
    levels.insert(
        5,
        level(
            "Combo Plates",
            180,
            35,
            3,
            3,
            (800, 1500, 2400),
            (true, true, false, 0),
            100,
            vec![
                recipe(
                    "Chopped Salad",
                    150,
                    80,
                    2,
                    vec![req("Lettuce", "Chopped"), req("Tomato", "Chopped")],
                ),
                recipe("Cooked Meat", 120, 70, 1, vec![req("Meat", "Cooked")]),
                recipe("Tomato Soup", 100, 65, 1, vec![req("Tomato", "Cooked")]),
            ],
        ),
    );
    levels.insert(
        6,
        level(
            "Dirty Dishes",
            180,
            35,
            3,
            3,
            (900, 1700, 2700),
            (false, false, true, 8),
            125,
            vec![
                recipe(
                    "Chopped Salad",
                    150,
                    75,
                    2,
                    vec![req("Lettuce", "Chopped"), req("Tomato", "Chopped")],
                ),
                recipe(
                    "Steak Plate",
                    180,
                    80,
                    2,
                    vec![req("Meat", "Cooked"), req("Lettuce", "Chopped")],
                ),
                recipe("Tomato Soup", 100, 60, 1, vec![req("Tomato", "Cooked")]),
            ],
        ),
    );
    levels.insert(
        7,
        level(
            "Rush Hour",
            180,
            30,
            4,
            3,
            (1000, 1900, 3000),
            (false, false, true, 8),
            150,
            vec![
                recipe(
                    "Steak Plate",
                    180,
                    70,
                    2,
                    vec![req("Meat", "Cooked"), req("Lettuce", "Chopped")],
                ),
                recipe(
                    "Steak & Tomato",
                    180,
                    70,
                    2,
                    vec![req("Meat", "Cooked"), req("Tomato", "Chopped")],
                ),
                recipe(
                    "Chopped Salad",
                    150,
                    65,
                    2,
                    vec![req("Lettuce", "Chopped"), req("Tomato", "Chopped")],
                ),
                recipe("Lettuce Salad", 60, 50, 1, vec![req("Lettuce", "Chopped")]),
            ],
        ),
    );
    levels.insert(
        8,
        level(
            "Plate Crunch",
            200,
            30,
            4,
            3,
            (1100, 2100, 3400),
            (false, false, true, 6),
            175,
            vec![
                recipe(
                    "Chopped Salad",
                    150,
                    55,
                    2,
                    vec![req("Lettuce", "Chopped"), req("Tomato", "Chopped")],
                ),
                recipe(
                    "Steak Plate",
                    200,
                    60,
                    2,
                    vec![req("Meat", "Cooked"), req("Lettuce", "Chopped")],
                ),
                recipe(
                    "Steak & Tomato",
                    200,
                    60,
                    2,
                    vec![req("Meat", "Cooked"), req("Tomato", "Chopped")],
                ),
                recipe("Cooked Meat", 120, 50, 1, vec![req("Meat", "Cooked")]),
            ],
        ),
    );
    levels.insert(
        9,
        level(
            "Deluxe Kitchen",
            200,
            25,
            4,
            3,
            (1200, 2400, 3800),
            (false, false, true, 5),
            200,
            vec![
                recipe(
                    "Deluxe Salad",
                    250,
                    75,
                    3,
                    vec![
                        req("Lettuce", "Chopped"),
                        req("Tomato", "Chopped"),
                        req("Meat", "Cooked"),
                    ],
                ),
                recipe(
                    "Steak Plate",
                    200,
                    55,
                    2,
                    vec![req("Meat", "Cooked"), req("Lettuce", "Chopped")],
                ),
                recipe(
                    "Chopped Salad",
                    150,
                    50,
                    2,
                    vec![req("Lettuce", "Chopped"), req("Tomato", "Chopped")],
                ),
            ],
        ),
    );
    levels.insert(
        10,
        level(
            "Grand Kitchen",
            210,
            22,
            4,
            4,
            (1400, 2700, 4200),
            (false, false, true, 5),
            225,
            vec![
                recipe(
                    "Deluxe Salad",
                    280,
                    65,
                    3,
                    vec![
                        req("Lettuce", "Chopped"),
                        req("Tomato", "Chopped"),
                        req("Meat", "Cooked"),
                    ],
                ),
                recipe(
                    "Steak & Tomato",
                    200,
                    50,
                    2,
                    vec![req("Meat", "Cooked"), req("Tomato", "Chopped")],
                ),
                recipe(
                    "Steak Plate",
                    200,
                    50,
                    2,
                    vec![req("Meat", "Cooked"), req("Lettuce", "Chopped")],
                ),
                recipe("Lettuce Salad", 60, 40, 1, vec![req("Lettuce", "Chopped")]),
                recipe("Tomato Soup", 100, 40, 1, vec![req("Tomato", "Cooked")]),
            ],
        ),
    );

    vec![WorldConfig {
        world_id: 1,
        world_name: "THE KITCHEN".to_string(),
        levels,
    }]
}
