use super::*;

/// Tests the registered command set.
///
/// Expected: every command name present once, sorted
#[test]
fn defines_every_command() {
    let names: Vec<String> = CommandTable::new()
        .definitions()
        .into_iter()
        .map(|definition| serde_json::to_value(definition).unwrap()["name"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "add-client",
            "delete-client",
            "get-traffic",
            "list-inbounds",
            "list-servers",
            "manage-servers",
            "reset-traffic",
            "update-client",
        ]
    );
}

/// Tests dispatching an unknown name.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_unknown_command() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);

    let err = CommandTable::new()
        .dispatch("nope", &invocation(&registry, Some(GUILD), true))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
}

/// Tests an admin command run by a regular member.
///
/// Expected: Err(BadRequest) before the panel is contacted
#[tokio::test]
async fn rejects_admin_command_for_members() {
    let test = TestBuilder::new().with_panel_server_table().build().await.unwrap();
    let registry = ServerRegistry::new(test.db.clone().unwrap(), reqwest::Client::new(), None);

    let (panel, _) = logged_in_panel("member").await;
    registry.add_server(mock_config(&panel, "p1", Some(GUILD))).await.unwrap();

    let mut member = invocation(&registry, Some(GUILD), false);
    member.options = OptionMap::new()
        .with("server", string("p1"))
        .with("inbound-id", OptionValue::Integer(1))
        .with("email", string("bob"));

    let err = CommandTable::new()
        .dispatch("add-client", &member)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert!(!registry.get_client("p1").await.unwrap().is_authenticated().await);
}
