use super::*;

/// Tests toggling the active flag.
///
/// Expected: flag persisted, row still listed by get_all but not get_active
#[tokio::test]
async fn toggles_active_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let server = factory::create_panel_server(db).await?;
    let repo = PanelServerRepository::new(db);

    let deactivated = repo.set_active(&server.id, false).await?;
    assert!(!deactivated.is_active);
    assert!(repo.get_active().await?.is_empty());
    assert_eq!(repo.get_all().await?.len(), 1);

    let reactivated = repo.set_active(&server.id, true).await?;
    assert!(reactivated.is_active);
    assert_eq!(repo.get_active().await?.len(), 1);

    Ok(())
}

/// Tests toggling a nonexistent row.
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
    let result = repo.set_active("missing", true).await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}
