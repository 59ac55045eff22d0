use super::*;

/// Tests creating a panel server row.
///
/// Verifies that every config field is persisted and the guild id is stored as text.
///
/// Expected: Ok(Model) readable back by id
#[tokio::test]
async fn creates_panel_server() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PanelServerRepository::new(db);
    let config = panel_config("p1", Some(1111));
    let created = repo.create(&config).await?;

    assert_eq!(created.id, "p1");
    assert_eq!(created.port, 2053);
    assert_eq!(created.owner_guild_id.as_deref(), Some("1111"));
    assert_eq!(created.created_at, created.updated_at);

    let stored = repo.get_by_id("p1").await?.unwrap();
    assert_eq!(PanelConfig::from_entity(stored).unwrap(), config);

    Ok(())
}

/// Tests that a second row with the same id is rejected.
///
/// Expected: Err(DbErr) on primary key conflict
#[tokio::test]
async fn rejects_duplicate_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PanelServerRepository::new(db);
    repo.create(&panel_config("p1", None)).await?;

    let result = repo.create(&panel_config("p1", Some(2222))).await;
    assert!(result.is_err());

    Ok(())
}

/// Tests that create fails when the table does not exist.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn fails_without_table() -> Result<(), DbErr> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PanelServerRepository::new(db);
    let result = repo.create(&panel_config("p1", None)).await;

    assert!(result.is_err());

    Ok(())
}
