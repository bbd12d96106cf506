use super::*;

/// Tests the teammate candidate pool query.
///
/// Verifies that unlinked registrations and the requester are excluded.
///
/// Expected: Ok(Vec) containing only the other linked registrations
#[tokio::test]
async fn returns_other_linked_registrations() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_linked_registration(db, "1").await?;
    factory::create_linked_registration(db, "2").await?;
    factory::create_linked_registration(db, "3").await?;
    factory::create_registration(db).await?;

    let repo = RegistrationRepository::new(db);
    let mut ids: Vec<u64> = repo
        .get_linked_registrations(2)
        .await?
        .into_iter()
        .filter_map(|registration| registration.discord_user_id)
        .collect();
    ids.sort();

    assert_eq!(ids, vec![1, 3]);

    Ok(())
}

/// Tests the candidate pool when nobody else has linked.
///
/// Expected: Ok(empty Vec)
#[tokio::test]
async fn returns_empty_without_other_links() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_linked_registration(db, "1").await?;

    let repo = RegistrationRepository::new(db);

    assert!(repo.get_linked_registrations(1).await?.is_empty());

    Ok(())
}
