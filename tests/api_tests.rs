use iochef_server::account::ledger::Currency;
use iochef_server::account::PlayerRegistry;
use iochef_server::rocket_initialize;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use serde_json::Value;

fn json(response: LocalResponse) -> Value {
    let body = response.into_string().expect("response body");
    serde_json::from_str(&body).expect("valid json body")
}

fn grant(client: &Client, player: &str, currency: Currency, amount: u64) {
    let registry = client
        .rocket()
        .state::<PlayerRegistry>()
        .expect("registry managed");
    rocket::futures::executor::block_on(async {
        let account = registry.account(player).await;
        let mut account = account.lock().await;
        account.ledger.deposit(currency, amount);
    });
}

#[test]
fn test_ping_reports_server_time() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = client.get("/ping").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = json(response);
    assert_eq!(body["ok"], true);
    assert!(body["serverTimeUtc"].as_str().unwrap().contains('T'));
}

#[test]
fn test_init_grants_starters_exactly_once() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    let first = json(client.post("/players/p1/init").dispatch());
    assert_eq!(first["success"], true);

    let wallet = json(client.get("/players/p1/wallet").dispatch());
    assert_eq!(wallet["coins"], 500);
    assert_eq!(wallet["gems"], 50);
    assert_eq!(wallet["heroTokens"], 0);

    let second = json(client.post("/players/p1/init").dispatch());
    assert_eq!(second["success"], false);
    assert_eq!(second["reason"], "Already initialized");

    // Balances untouched by the rejected repeat.
    let wallet = json(client.get("/players/p1/wallet").dispatch());
    assert_eq!(wallet["coins"], 500);
    assert_eq!(wallet["gems"], 50);
}

#[test]
fn test_players_are_isolated() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    client.post("/players/alice/init").dispatch();

    let bob = json(client.get("/players/bob/wallet").dispatch());
    assert_eq!(bob["coins"], 0);
    assert_eq!(bob["gems"], 0);
}

#[test]
fn test_gem_conversion_is_all_or_nothing() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    client.post("/players/p1/init").dispatch();

    let ok = json(
        client
            .post("/players/p1/currency/convert")
            .header(ContentType::JSON)
            .body(r#"{"gemAmount": 10}"#)
            .dispatch(),
    );
    assert_eq!(ok["coinsAdded"], 1000);
    assert_eq!(ok["coins"], 1500);
    assert_eq!(ok["gems"], 40);

    let short = client
        .post("/players/p1/currency/convert")
        .header(ContentType::JSON)
        .body(r#"{"gemAmount": 9999}"#)
        .dispatch();
    assert_eq!(short.status(), Status::BadRequest);
    let body = json(short);
    assert_eq!(body["needed"], 9999);
    assert_eq!(body["have"], 40);

    let zero = client
        .post("/players/p1/currency/convert")
        .header(ContentType::JSON)
        .body(r#"{"gemAmount": 0}"#)
        .dispatch();
    assert_eq!(zero.status(), Status::BadRequest);
}

#[test]
fn test_ingredient_stock_respects_the_cap() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    client.post("/players/p1/init").dispatch();

    // Starter stock is 100; four full batches reach the 500 cap.
    for expected in [200, 300, 400, 500] {
        let body = json(
            client
                .post("/players/p1/ingredients/purchase")
                .header(ContentType::JSON)
                .body(r#"{"type": "Lettuce", "batchSize": 100}"#)
                .dispatch(),
        );
        assert_eq!(body["newStock"], expected);
    }

    let full = client
        .post("/players/p1/ingredients/purchase")
        .header(ContentType::JSON)
        .body(r#"{"type": "Lettuce", "batchSize": 100}"#)
        .dispatch();
    assert_eq!(full.status(), Status::BadRequest);
    assert_eq!(json(full)["error"], "Stock is full");
}

#[test]
fn test_partial_batch_near_the_cap() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    client.post("/players/p1/init").dispatch();
    grant(&client, "p1", Currency::Coins, 1000);

    for _ in 0..3 {
        client
            .post("/players/p1/ingredients/purchase")
            .header(ContentType::JSON)
            .body(r#"{"type": "Tomato", "batchSize": 100}"#)
            .dispatch();
    }
    // 400 held after three batches; the final full batch clamps to the cap.
    let body = json(
        client
            .post("/players/p1/ingredients/purchase")
            .header(ContentType::JSON)
            .body(r#"{"type": "Tomato", "batchSize": 30}"#)
            .dispatch(),
    );
    assert_eq!(body["newStock"], 430);
    let body = json(
        client
            .post("/players/p1/ingredients/purchase")
            .header(ContentType::JSON)
            .body(r#"{"type": "Tomato", "batchSize": 100}"#)
            .dispatch(),
    );
    assert_eq!(body["newStock"], 500);
}

#[test]
fn test_sync_clamps_consumption_at_zero() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    client.post("/players/p1/init").dispatch();

    let body = json(
        client
            .post("/players/p1/ingredients/sync")
            .header(ContentType::JSON)
            .body(r#"{"consumed": {"Lettuce": 30, "Meat": 9999}}"#)
            .dispatch(),
    );
    assert_eq!(body["success"], true);
    assert_eq!(body["stock"]["Lettuce"], 70);
    assert_eq!(body["stock"]["Meat"], 0);
}

#[test]
fn test_start_level_charges_catalog_entry_cost() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    client.post("/players/p1/init").dispatch();

    // Level 1 is free.
    let body = json(
        client
            .post("/players/p1/levels/start")
            .header(ContentType::JSON)
            .body(r#"{"levelId": 1}"#)
            .dispatch(),
    );
    assert_eq!(body["entryCost"], 0);
    assert_eq!(body["coins"], 500);

    // Level 5 is locked for a fresh player.
    let locked = client
        .post("/players/p1/levels/start")
        .header(ContentType::JSON)
        .body(r#"{"levelId": 5}"#)
        .dispatch();
    assert_eq!(locked.status(), Status::BadRequest);
}

#[test]
fn test_add_player_xp_iterates_thresholds() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    let body = json(
        client
            .post("/players/p1/xp")
            .header(ContentType::JSON)
            .body(r#"{"amount": 250}"#)
            .dispatch(),
    );
    assert_eq!(body["level"], 2);
    assert_eq!(body["xp"], 150);
    assert_eq!(body["xpToNext"], 200);
    assert_eq!(body["levelsGained"], 1);

    for bad in [r#"{"amount": 0}"#, r#"{"amount": 10001}"#] {
        let response = client
            .post("/players/p1/xp")
            .header(ContentType::JSON)
            .body(bad)
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);
    }
}

#[test]
fn test_upgrade_unowned_hero_is_not_found() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let response = client
        .post("/players/p1/heroes/upgrade")
        .header(ContentType::JSON)
        .body(r#"{"heroId": "hero_noir"}"#)
        .dispatch();
    assert_eq!(response.status(), Status::NotFound);
}

#[test]
fn test_catalog_endpoints_expose_server_config() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    let heroes = json(client.get("/heroes").dispatch());
    assert_eq!(heroes.as_array().unwrap().len(), 8);

    let worlds = json(client.get("/worlds").dispatch());
    let world = &worlds.as_array().unwrap()[0];
    assert_eq!(world["worldName"], "THE KITCHEN");
    assert_eq!(world["levels"].as_object().unwrap().len(), 10);
    // Star thresholds ship to the client but are still re-checked on report.
    assert_eq!(world["levels"]["1"]["star1"], 400);
}

#[test]
fn test_chest_cooldown_starts_open() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    let body = json(client.get("/players/p1/chest/cooldown").dispatch());
    assert_eq!(body["bronzeCooldownRemaining"], 0);
    assert_eq!(body["canOpenBronze"], true);
}

#[test]
fn test_bronze_chest_arms_its_cooldown() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    let first = client
        .post("/players/p1/chest/open")
        .header(ContentType::JSON)
        .body(r#"{"chest": "Bronze"}"#)
        .dispatch();
    assert_eq!(first.status(), Status::Ok);

    let second = client
        .post("/players/p1/chest/open")
        .header(ContentType::JSON)
        .body(r#"{"chest": "Bronze"}"#)
        .dispatch();
    assert_eq!(second.status(), Status::BadRequest);
    let body = json(second);
    assert!(body["cooldownRemaining"].as_i64().unwrap() > 0);

    let status = json(client.get("/players/p1/chest/cooldown").dispatch());
    assert_eq!(status["canOpenBronze"], false);
}

#[test]
fn test_paid_chests_charge_gems() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");

    // Broke player is rejected before any roll.
    let broke = client
        .post("/players/p1/chest/open")
        .header(ContentType::JSON)
        .body(r#"{"chest": "Gold"}"#)
        .dispatch();
    assert_eq!(broke.status(), Status::BadRequest);

    grant(&client, "p1", Currency::Gems, 200);
    let body = json(
        client
            .post("/players/p1/chest/open")
            .header(ContentType::JSON)
            .body(r#"{"chest": "Gold"}"#)
            .dispatch(),
    );
    assert_eq!(body["gems"], 50);
    assert!(body["result"]["heroId"].as_str().unwrap().starts_with("hero_"));
}

#[test]
fn test_multi_pull_rules() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    grant(&client, "p1", Currency::Gems, 10_000);

    let bronze = client
        .post("/players/p1/chest/open-multi")
        .header(ContentType::JSON)
        .body(r#"{"chest": "Bronze", "count": 5}"#)
        .dispatch();
    assert_eq!(bronze.status(), Status::BadRequest);

    // Count above the cap clamps to ten pulls at ten-pull cost.
    let body = json(
        client
            .post("/players/p1/chest/open-multi")
            .header(ContentType::JSON)
            .body(r#"{"chest": "Silver", "count": 99}"#)
            .dispatch(),
    );
    assert_eq!(body["results"].as_array().unwrap().len(), 10);
    assert_eq!(body["gems"], 10_000 - 10 * 50);
}

#[test]
fn test_duplicates_eventually_pay_tokens() {
    let client = Client::tracked(rocket_initialize()).expect("valid rocket instance");
    grant(&client, "p1", Currency::Gems, 50_000);

    // Only seven non-starter heroes exist, so 30 gold pulls must hit dups.
    for _ in 0..3 {
        client
            .post("/players/p1/chest/open-multi")
            .header(ContentType::JSON)
            .body(r#"{"chest": "Gold", "count": 10}"#)
            .dispatch();
    }
    let wallet = json(client.get("/players/p1/wallet").dispatch());
    assert!(wallet["heroTokens"].as_u64().unwrap() >= 5);
}
