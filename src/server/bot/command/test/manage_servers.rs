use super::*;

fn manage(registry: &ServerRegistry, guild_id: Option<u64>, subcommand: &str, options: OptionMap) -> Invocation {
    Invocation {
        subcommand: Some(subcommand.to_string()),
        options,
        ..invocation(registry, guild_id, true)
    }
}

fn add_options(id: &str) -> OptionMap {
    OptionMap::new()
        .with("server-id", string(id))
        .with("name", string("Frankfurt"))
        .with("host", string("https://fra.example.com/"))
        .with("username", string("admin"))
        .with("password", string("secret"))
}

/// Tests adding a server from a guild.
///
/// Expected: the invoking guild owns the panel, default port applied, host trimmed
#[tokio::test]
async fn add_assigns_invoking_guild() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);

    let embed = run(
        &CommandTable::new(),
        "manage-servers",
        &manage(&registry, Some(GUILD), "add", add_options("fra")),
    )
    .await;

    let stored = registry.get_server("fra").await.unwrap();
    assert_eq!(stored.owner_guild_id, Some(GUILD));
    assert_eq!(stored.port, 2053);
    assert_eq!(stored.host, "https://fra.example.com");
    assert_eq!(field(&embed, "Discord Server").unwrap(), GUILD.to_string());
}

/// Tests managing servers from a DM.
///
/// Expected: Err(BadRequest) and nothing stored
#[tokio::test]
async fn requires_guild() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);

    let err = CommandTable::new()
        .dispatch("manage-servers", &manage(&registry, None, "add", add_options("fra")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(registry.get_server("fra").await.is_none());
}

/// Tests editing a panel owned by another guild.
///
/// Expected: Err(NotFound) and the panel unchanged
#[tokio::test]
async fn edit_rejects_foreign_panel() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);

    run(
        &CommandTable::new(),
        "manage-servers",
        &manage(&registry, Some(OTHER_GUILD), "add", add_options("fra")),
    )
    .await;

    let err = CommandTable::new()
        .dispatch(
            "manage-servers",
            &manage(
                &registry,
                Some(GUILD),
                "edit",
                OptionMap::new()
                    .with("server-id", string("fra"))
                    .with("name", string("Stolen")),
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(registry.get_server("fra").await.unwrap().name, "Frankfurt");
}

/// Tests toggling a panel off and on again after a refresh dropped it.
///
/// Expected: inactive panel dropped by refresh, then re-activated through the store
#[tokio::test]
async fn toggles_panel_across_refresh() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);
    let table = CommandTable::new();

    run(&table, "manage-servers", &manage(&registry, Some(GUILD), "add", add_options("fra"))).await;

    let off = OptionMap::new()
        .with("server-id", string("fra"))
        .with("active", OptionValue::Boolean(false));
    run(&table, "manage-servers", &manage(&registry, Some(GUILD), "toggle", off)).await;

    let refreshed = run(
        &table,
        "manage-servers",
        &manage(&registry, Some(GUILD), "refresh", OptionMap::new()),
    )
    .await;
    assert_eq!(refreshed["description"], "Loaded 0 active server(s)");
    assert!(registry.get_server("fra").await.is_none());

    let on = OptionMap::new()
        .with("server-id", string("fra"))
        .with("active", OptionValue::Boolean(true));
    let embed = run(&table, "manage-servers", &manage(&registry, Some(GUILD), "toggle", on)).await;

    assert_eq!(embed["title"], "✅ Server Activated");
    assert!(registry.get_client("fra").await.is_ok());
}

/// Tests the connection check of every guild panel.
///
/// Expected: warning with one failed and one successful entry
#[tokio::test]
async fn test_reports_each_panel() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);

    let (panel, cookie) = logged_in_panel("test").await;
    panel.mock_list_inbounds(&cookie, json!([inbound_json(1, "vless")])).await;
    registry.add_server(mock_config(&panel, "up", Some(GUILD))).await.unwrap();
    registry
        .add_server(PanelConfig {
            port: 1,
            ..mock_config(&panel, "down", Some(GUILD))
        })
        .await
        .unwrap();

    let embed = run(
        &CommandTable::new(),
        "manage-servers",
        &manage(&registry, Some(GUILD), "test", OptionMap::new()),
    )
    .await;

    assert_eq!(embed["title"], "⚠️ 1 of 2 Connections Failed");
    assert_eq!(field(&embed, "Panel up (`up`)").unwrap(), "✅ 1 inbound(s)");
    assert!(field(&embed, "Panel down (`down`)").unwrap().starts_with("❌"));
}

/// Tests the refresh listing of a guild with many long-named panels.
///
/// Expected: the field stays within Discord's 1024 character limit and names the rest
#[tokio::test]
async fn refresh_listing_fits_one_field() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);
    let table = CommandTable::new();

    for index in 0..40 {
        let config = PanelConfig {
            id: format!("panel-{:02}", index),
            name: format!("Frankfurt edge node number {:02} behind the load balancer", index),
            host: "https://fra.example.com".to_string(),
            port: 2053,
            web_base_path: String::new(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            is_active: true,
            owner_guild_id: Some(GUILD),
            default_inbound_id: None,
        };
        registry.add_server(config).await.unwrap();
    }

    let embed = run(
        &table,
        "manage-servers",
        &manage(&registry, Some(GUILD), "refresh", OptionMap::new()),
    )
    .await;
    let listing = field(&embed, "Servers").unwrap();

    assert_eq!(embed["description"], "Loaded 40 active server(s)");
    assert!(listing.chars().count() <= 1024);
    assert!(listing.starts_with("• **Frankfurt edge node number 00"));
    assert!(listing.ends_with("more"));
}
