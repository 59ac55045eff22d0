use super::*;

/// Tests that only active rows are returned.
///
/// Expected: inactive panel excluded, listing ordered by creation
#[tokio::test]
async fn returns_only_active() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_panel_server(db).await?;
    factory::panel_server::PanelServerFactory::new(db)
        .active(false)
        .build()
        .await?;
    let third = factory::create_guild_panel_server(db, 42).await?;

    let repo = PanelServerRepository::new(db);
    let active = repo.get_active().await?;
    let ids: Vec<&str> = active.iter().map(|s| s.id.as_str()).collect();

    assert_eq!(ids, vec![first.id.as_str(), third.id.as_str()]);
    assert_eq!(repo.get_all().await?.len(), 3);

    Ok(())
}

/// Tests filtering active rows by owning guild.
///
/// Expected: only the guild's own active panels, no global ones
#[tokio::test]
async fn filters_active_by_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_panel_server_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_panel_server(db).await?;
    let owned = factory::create_guild_panel_server(db, 42).await?;
    factory::create_guild_panel_server(db, 43).await?;
    factory::panel_server::PanelServerFactory::new(db)
        .owner_guild_id(42)
        .active(false)
        .build()
        .await?;

    let repo = PanelServerRepository::new(db);
    let result = repo.get_active_by_guild(42).await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, owned.id);

    Ok(())
}
