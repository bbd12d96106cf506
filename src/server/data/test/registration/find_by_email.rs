use super::*;

/// Tests that email lookup ignores the stored email's case.
///
/// Expected: Ok(Some(Registration)) keeping the stored casing
#[tokio::test]
async fn matches_email_case_insensitively() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    RegistrationFactory::new(db)
        .email("Ada.Lovelace@Example.com")
        .build()
        .await?;

    let repo = RegistrationRepository::new(db);
    let registration = repo.find_by_email("ada.lovelace@example.com").await?.unwrap();

    assert_eq!(registration.email, "Ada.Lovelace@Example.com");

    Ok(())
}

/// Tests lookup of an email with no registration.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_registration(db).await?;

    let repo = RegistrationRepository::new(db);
    let result = repo.find_by_email("nobody@example.com").await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that two rows differing only by email case are reported as ambiguous.
///
/// Expected: Err(RegistrationError::AmbiguousEmail)
#[tokio::test]
async fn rejects_ambiguous_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_registration_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    RegistrationFactory::new(db)
        .email("dup@example.com")
        .build()
        .await?;
    RegistrationFactory::new(db)
        .email("DUP@example.com")
        .build()
        .await?;

    let repo = RegistrationRepository::new(db);
    let result = repo.find_by_email("dup@example.com").await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(RegistrationError::AmbiguousEmail(_)))
    ));

    Ok(())
}
