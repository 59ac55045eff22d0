use super::*;

/// Tests deleting a panel server.
///
/// Expected: Ok(true) then the row is gone
#[tokio::test]
async fn deletes_panel_server() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let server = factory::create_panel_server(db).await?;
    let repo = PanelServerRepository::new(db);

    assert!(repo.delete(&server.id).await?);
    assert!(repo.get_by_id(&server.id).await?.is_none());

    Ok(())
}

/// Tests deleting a nonexistent row.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PanelServerRepository::new(db);
    assert!(!repo.delete("missing").await?);

    Ok(())
}
