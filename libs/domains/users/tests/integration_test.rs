//! PostgreSQL-backed tests for `PgUserRepository`
//!
//! Need Docker; run with `cargo test -p domain_users -- --ignored`.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_user_crud() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_user_crud");

    let ann = service
        .create_user(CreateUser {
            name: "Ann".into(),
            email: builder.email("ann"),
        })
        .await
        .unwrap();
    assert!(ann.id > 0);

    let fetched = service.get_user(ann.id).await.unwrap();
    assert_eq!(fetched, ann);

    let updated = service
        .update_user(
            ann.id,
            UpdateUser {
                name: Some("Anna".into()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Anna");

    service.delete_user(ann.id).await.unwrap();
    assert!(matches!(
        service.get_user(ann.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_duplicate_email_ignores_case() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PgUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_duplicate_email");

    let email = builder.email("ann");
    service
        .create_user(CreateUser {
            name: "Ann".into(),
            email: email.clone(),
        })
        .await
        .unwrap();

    let err = service
        .create_user(CreateUser {
            name: "Ann again".into(),
            email: email.to_uppercase(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::DuplicateEmail(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_email_index_ignores_case() {
    let db = TestDatabase::new().await;
    let repository = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_email_index");

    let email = builder.email("ann");
    let ann = repository
        .create(CreateUser {
            name: "Ann".into(),
            email: email.clone(),
        })
        .await
        .unwrap();

    let err = repository
        .create(CreateUser {
            name: "Ann again".into(),
            email: email.to_uppercase(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::DuplicateEmail(_)));

    let bob = repository
        .create(CreateUser {
            name: "Bob".into(),
            email: builder.email("bob"),
        })
        .await
        .unwrap();
    let err = repository
        .update(
            bob.id,
            UpdateUser {
                name: None,
                email: Some(ann.email.to_uppercase()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::DuplicateEmail(_)));
}
