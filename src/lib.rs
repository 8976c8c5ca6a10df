//! # IOChef Server
//!
//! Server-authoritative economy and progression engine for a cooperative
//! cooking game.
//!
//! ## Overview
//!
//! Every balance-affecting decision — currency, chest rolls, level rewards,
//! battle pass tiers, daily resets, shop purchases — is made here from
//! server-held state and server-held configuration. The client reports what
//! happened and asks; it never dictates prices, rewards or thresholds.
//!
//! ## Architecture
//!
//! A Rocket web service with OpenAPI documentation. The immutable catalog is
//! shared as `Arc<Catalog>` managed state; per-player state lives behind one
//! async mutex per player in the [`account::PlayerRegistry`], so concurrent
//! requests for the same player serialize instead of interleaving.

#![allow(clippy::module_name_repetitions)]
#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

pub mod account;
pub mod battle_pass;
pub mod catalog;
pub mod daily;
pub mod economy;
pub mod gacha;
pub mod progression;
pub mod shop;
pub mod status_messages;

use account::PlayerRegistry;
use catalog::Catalog;

/// Initializes and configures the Rocket web server with all routes and
/// OpenAPI documentation.
///
/// # Returns
///
/// A configured Rocket instance ready to be launched.
///
/// # Example
///
/// ```no_run
/// use iochef_server::rocket_initialize;
///
/// #[rocket::main]
/// async fn main() {
///     rocket_initialize().launch().await.expect("Failed to launch rocket");
/// }
/// ```
pub fn rocket_initialize() -> rocket::Rocket<rocket::Build> {
    use crate::battle_pass::{
        add_battle_pass_xp, claim_bp_reward, get_battle_pass_config, purchase_battle_pass,
        okapi_add_operation_for_add_battle_pass_xp_, okapi_add_operation_for_claim_bp_reward_,
        okapi_add_operation_for_get_battle_pass_config_,
        okapi_add_operation_for_purchase_battle_pass_,
    };
    use crate::daily::{
        check_daily_quests, claim_daily_login, claim_quest_reward, update_quest_progress,
        okapi_add_operation_for_check_daily_quests_, okapi_add_operation_for_claim_daily_login_,
        okapi_add_operation_for_claim_quest_reward_,
        okapi_add_operation_for_update_quest_progress_,
    };
    use crate::economy::{
        convert_gems_to_coins, init_new_player, ping, purchase_ingredient, sync_ingredient_stock,
        wallet, okapi_add_operation_for_convert_gems_to_coins_,
        okapi_add_operation_for_init_new_player_, okapi_add_operation_for_ping_,
        okapi_add_operation_for_purchase_ingredient_,
        okapi_add_operation_for_sync_ingredient_stock_, okapi_add_operation_for_wallet_,
    };
    use crate::gacha::{
        chest_cooldown, open_chest, open_chest_multi, okapi_add_operation_for_chest_cooldown_,
        okapi_add_operation_for_open_chest_, okapi_add_operation_for_open_chest_multi_,
    };
    use crate::progression::{
        add_player_xp, complete_level, get_hero_catalog, get_world_configs, start_level,
        upgrade_hero, okapi_add_operation_for_add_player_xp_,
        okapi_add_operation_for_complete_level_, okapi_add_operation_for_get_hero_catalog_,
        okapi_add_operation_for_get_world_configs_, okapi_add_operation_for_start_level_,
        okapi_add_operation_for_upgrade_hero_,
    };
    use crate::shop::{
        equip_cosmetic, equip_skin, get_shop_data, purchase_bundle, purchase_cosmetic,
        purchase_daily_deal, purchase_skin, okapi_add_operation_for_equip_cosmetic_,
        okapi_add_operation_for_equip_skin_, okapi_add_operation_for_get_shop_data_,
        okapi_add_operation_for_purchase_bundle_, okapi_add_operation_for_purchase_cosmetic_,
        okapi_add_operation_for_purchase_daily_deal_, okapi_add_operation_for_purchase_skin_,
    };

    let _ = env_logger::try_init();

    rocket::build()
        .mount(
            "/",
            openapi_get_routes![
                ping,
                init_new_player,
                wallet,
                convert_gems_to_coins,
                purchase_ingredient,
                sync_ingredient_stock,
                open_chest,
                open_chest_multi,
                chest_cooldown,
                start_level,
                complete_level,
                add_player_xp,
                upgrade_hero,
                get_hero_catalog,
                get_world_configs,
                claim_daily_login,
                check_daily_quests,
                update_quest_progress,
                claim_quest_reward,
                add_battle_pass_xp,
                claim_bp_reward,
                purchase_battle_pass,
                get_battle_pass_config,
                get_shop_data,
                purchase_bundle,
                purchase_daily_deal,
                purchase_cosmetic,
                equip_cosmetic,
                purchase_skin,
                equip_skin
            ],
        )
        .mount("/swagger", make_swagger_ui(&get_docs()))
        .manage(Arc::new(Catalog::standard()))
        .manage(PlayerRegistry::new())
}

fn get_docs() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}
