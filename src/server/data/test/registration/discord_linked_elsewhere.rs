use super::*;

/// Tests detection of a Discord ID linked to a different registration.
///
/// Expected: Ok(true)
#[tokio::test]
async fn detects_link_on_other_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_linked_registration(db, "42").await?;
    let target = factory::create_registration(db).await?;

    let repo = RegistrationRepository::new(db);

    assert!(repo.discord_linked_elsewhere(42, &target.email).await?);

    Ok(())
}

/// Tests that a link on the same registration does not count.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_link_on_same_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let registration = factory::create_linked_registration(db, "42").await?;

    let repo = RegistrationRepository::new(db);

    assert!(!repo.discord_linked_elsewhere(42, &registration.email).await?);
    assert!(!repo.discord_linked_elsewhere(7, &registration.email).await?);

    Ok(())
}
