use super::*;

/// Tests applying a partial update.
///
/// Verifies that only the provided fields change and `updated_at` is bumped.
///
/// Expected: Ok(Model) with merged fields
#[tokio::test]
async fn updates_provided_fields_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PanelServerRepository::new(db);
    let created = repo.create(&panel_config("p1", Some(1))).await?;

    let updated = repo
        .update(
            "p1",
            &UpdatePanelConfigParam {
                password: Some("rotated".to_string()),
                port: Some(8443),
                owner_guild_id: Some(None),
                default_inbound_id: Some(None),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.password, "rotated");
    assert_eq!(updated.port, 8443);
    assert_eq!(updated.owner_guild_id, None);
    assert_eq!(updated.default_inbound_id, None);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.host, created.host);
    assert!(updated.updated_at >= created.updated_at);

    Ok(())
}

/// Tests updating a nonexistent row.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PanelServerRepository::new(db);
    let result = repo
        .update("missing", &UpdatePanelConfigParam::default())
        .await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}
