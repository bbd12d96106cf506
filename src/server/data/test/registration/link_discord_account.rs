use super::*;

/// Tests linking an unlinked registration.
///
/// Expected: Discord ID, username and verification timestamp stored
#[tokio::test]
async fn links_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let row = factory::create_registration(db).await?;

    let repo = RegistrationRepository::new(db);
    repo.link_discord_account(&row.email, 555, Some("ada"))
        .await?;

    let registration = repo.find_by_discord_id(555).await?.unwrap();
    assert_eq!(registration.email, row.email);
    assert_eq!(registration.discord_username.as_deref(), Some("ada"));
    assert!(registration.discord_verified_at.is_some());

    Ok(())
}

/// Tests that the unique constraint on the Discord ID maps to a registration error.
///
/// Expected: Err(RegistrationError::DiscordAlreadyLinked)
#[tokio::test]
async fn maps_unique_violation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_linked_registration(db, "555").await?;
    let other = factory::create_registration(db).await?;

    let repo = RegistrationRepository::new(db);
    let result = repo.link_discord_account(&other.email, 555, None).await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(
            RegistrationError::DiscordAlreadyLinked(555)
        ))
    ));

    Ok(())
}
