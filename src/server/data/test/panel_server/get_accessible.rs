use super::*;

/// Tests the accessible-from-guild query.
///
/// Verifies that a guild gets its own active panels plus active global panels and
/// never another guild's panels.
///
/// Expected: Ok(owned + global), inactive and foreign excluded
#[tokio::test]
async fn returns_owned_and_global() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let global = factory::create_panel_server(db).await?;
    let owned = factory::create_guild_panel_server(db, 42).await?;
    factory::create_guild_panel_server(db, 43).await?;
    factory::panel_server::PanelServerFactory::new(db)
        .active(false)
        .build()
        .await?;

    let repo = PanelServerRepository::new(db);
    let mut ids: Vec<String> = repo
        .get_accessible(42)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    ids.sort();

    let mut expected = vec![global.id, owned.id];
    expected.sort();
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests the accessible query for a guild owning nothing.
///
/// Expected: Ok(empty) when there are no global panels either
#[tokio::test]
async fn returns_empty_for_foreign_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild_panel_server(db, 42).await?;

    let repo = PanelServerRepository::new(db);
    assert!(repo.get_accessible(99).await?.is_empty());

    Ok(())
}
