use super::*;

/// Tests finding a registration linked to a Discord user.
///
/// Verifies that list columns stored in different JSON shapes come back parsed.
///
/// Expected: Ok(Some(Registration)) with parsed interests and fields
#[tokio::test]
async fn finds_linked_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    RegistrationFactory::new(db)
        .name("Ada", "Lovelace")
        .discord_user_id("123456789")
        .interests(serde_json::json!(["AI", "Robotics"]))
        .fields_of_study(serde_json::json!("Physics, Mathematics"))
        .build()
        .await?;

    let repo = RegistrationRepository::new(db);
    let registration = repo.find_by_discord_id(123456789).await?.unwrap();

    assert_eq!(registration.display_name(), "Ada Lovelace");
    assert_eq!(registration.discord_user_id, Some(123456789));
    assert_eq!(
        registration.role_fields.interests,
        Some(vec!["AI".to_string(), "Robotics".to_string()])
    );
    assert_eq!(
        registration.role_fields.fields_of_study,
        Some(vec!["Physics".to_string(), "Mathematics".to_string()])
    );

    Ok(())
}

/// Tests querying for a Discord user with no linked registration.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unlinked_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_registration(db).await?;

    let repo = RegistrationRepository::new(db);
    let result = repo.find_by_discord_id(999999999).await?;

    assert!(result.is_none());

    Ok(())
}
