use super::*;

/// Tests picking up out-of-band store edits.
///
/// Expected: new rows loaded, deactivated rows dropped
#[tokio::test]
async fn reloads_from_store() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let kept = factory::create_panel_server(db).await?;
    let dropped = factory::create_panel_server(db).await?;

    let registry = registry(db, None);
    registry.initialize().await;

    let repo = crate::server::data::panel_server::PanelServerRepository::new(db);
    repo.set_active(&dropped.id, false).await?;
    let added = factory::create_guild_panel_server(db, 3).await?;

    let count = registry.refresh().await.unwrap();

    assert_eq!(count, 2);
    assert!(registry.get_client(&kept.id).await.is_ok());
    assert!(registry.get_server(&dropped.id).await.is_none());
    assert!(registry.get_client(&added.id).await.is_ok());

    Ok(())
}

/// Tests refreshing a single guild.
///
/// Expected: only the guild's partition reloaded
#[tokio::test]
async fn reloads_only_guild_partition() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let other = factory::create_guild_panel_server(db, 2).await?;
    let global = factory::create_panel_server(db).await?;

    let registry = registry(db, None);
    registry.initialize().await;

    let repo = crate::server::data::panel_server::PanelServerRepository::new(db);
    repo.set_active(&other.id, false).await?;
    repo.set_active(&global.id, false).await?;
    let added = factory::create_guild_panel_server(db, 1).await?;

    let count = registry.refresh_for_guild(1).await.unwrap();

    assert_eq!(count, 1);
    assert!(registry.get_client(&added.id).await.is_ok());
    // untouched partitions keep their stale entries until refreshed
    assert!(registry.get_client(&other.id).await.is_ok());
    assert!(registry.get_client(&global.id).await.is_ok());

    Ok(())
}

/// Tests that a failed reload keeps the cache.
///
/// Expected: Err(Store) and the fallback still cached
#[tokio::test]
async fn store_failure_keeps_cache() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, Some(panel_config("default", None)));
    registry.initialize().await;

    let err = registry.refresh().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(registry.get_client("default").await.is_ok());
}
