use super::*;

/// Tests deleting a panel.
///
/// Expected: config and client gone, proxy calls fail with NotFound
#[tokio::test]
async fn removes_config_and_client() {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    registry.add_server(panel_config("p1", None)).await.unwrap();

    registry.delete_server("p1").await.unwrap();

    assert!(registry.get_server("p1").await.is_none());
    let err = registry.get_inbounds("p1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Tests deleting an unknown panel.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_unknown_id() {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, None);
    let err = registry.delete_server("missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Tests that a failed delete keeps the cached panel.
///
/// Expected: Err(Store) and the fallback panel still cached
#[tokio::test]
async fn store_failure_keeps_panel() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let registry = registry(db, Some(panel_config("default", None)));
    let err = registry.delete_server("default").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(registry.get_client("default").await.is_ok());
}
