use super::*;

/// Tests that an added panel reads back unchanged.
///
/// Expected: get_server returns a config equal to the one added
#[tokio::test]
async fn round_trips_config() {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    let config = PanelConfig {
        web_base_path: "/panel".to_string(),
        default_inbound_id: Some(4),
        ..panel_config("p1", Some(1111))
    };

    let stored = registry.add_server(config.clone()).await.unwrap();

    assert_eq!(stored, config);
    assert_eq!(registry.get_server("p1").await, Some(config));
    assert!(registry.get_client("p1").await.is_ok());
}

/// Tests adding an inactive panel.
///
/// Expected: cached without a client
#[tokio::test]
async fn caches_inactive_panel_without_client() {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    let config = PanelConfig {
        is_active: false,
        ..panel_config("p1", None)
    };
    registry.add_server(config).await.unwrap();

    assert!(registry.get_server("p1").await.is_some());
    let Err(err) = registry.get_client("p1").await else {
        panic!("expected no client for an inactive panel");
    };
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Tests that ids are unique across guilds.
///
/// Expected: Err(DuplicateServerId) for the same id under another guild
#[tokio::test]
async fn rejects_duplicate_id_across_guilds() {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    registry.add_server(panel_config("p1", Some(1))).await.unwrap();

    let result = registry.add_server(panel_config("p1", Some(2))).await;

    assert!(matches!(
        result,
        Err(crate::server::error::AppError::ConfigErr(
            ConfigError::DuplicateServerId(_)
        ))
    ));
    assert_eq!(registry.get_server("p1").await.unwrap().owner_guild_id, Some(1));
}

/// Tests two concurrent adds of the same id.
///
/// Expected: one Ok, the other Err(DuplicateServerId) whichever check catches it
#[tokio::test]
async fn concurrent_duplicate_add_reports_duplicate_id() {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    registry.initialize().await;

    let (first, second) = tokio::join!(
        registry.add_server(panel_config("dup", Some(1))),
        registry.add_server(panel_config("dup", Some(2))),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    let err = results
        .into_iter()
        .find_map(Result::err)
        .expect("expected one rejected add");
    assert!(matches!(
        err,
        crate::server::error::AppError::ConfigErr(ConfigError::DuplicateServerId(ref id)) if id == "dup"
    ));
    assert_eq!(registry.get_servers().await.len(), 1);
}

/// Tests that ids only present in the store are rejected too.
///
/// Expected: Err(DuplicateServerId) for an inactive stored panel
#[tokio::test]
async fn rejects_id_of_uncached_stored_panel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::panel_server::PanelServerFactory::new(db)
        .id("p1")
        .active(false)
        .build()
        .await?;

    let registry = registry(db, None);
    let result = registry.add_server(panel_config("p1", None)).await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Config);

    Ok(())
}

/// Tests validation before persisting.
///
/// Expected: Err(Config) and nothing stored for a host without scheme
#[tokio::test]
async fn rejects_invalid_host_without_persisting() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    let config = PanelConfig {
        host: "10.0.0.1".to_string(),
        ..panel_config("p1", None)
    };

    let err = registry.add_server(config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(err.server_id(), Some("p1"));
    assert!(crate::server::data::panel_server::PanelServerRepository::new(db)
        .get_by_id("p1")
        .await?
        .is_none());

    Ok(())
}

/// Tests that a failed store write leaves the cache untouched.
///
/// Expected: Err(Store) and no cached panel
#[tokio::test]
async fn store_failure_leaves_cache_unchanged() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    let err = registry
        .add_server(panel_config("p1", None))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(registry.get_server("p1").await.is_none());
    assert!(registry.get_servers().await.is_empty());
}
