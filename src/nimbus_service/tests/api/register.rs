use crate::helpers::{PASSWORD, location, random_email, spawn_app};

#[tokio::test]
async fn register_stores_a_hashed_unverified_account_and_mails_a_link() {
    let app = spawn_app().await;
    let email = random_email();

    let response = app.register("Alice", &email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/login?success=registered");

    let (hash, verified, token): (String, i64, Option<String>) = sqlx::query_as(
        "SELECT password_hash, email_verified, email_verification_token FROM accounts WHERE email = ?",
    )
    .bind(&email)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_ne!(hash, PASSWORD);
    assert!(hash.starts_with("$argon2id$"));
    assert_eq!(verified, 0);
    let token = token.expect("verification token missing");

    let mail = app.email_client.last_sent_to(&email).unwrap();
    assert_eq!(mail.subject, "Verify your email - Weather App");
    let path = format!("/verify-email/{token}");
    assert!(mail.html_body.contains(&path));
    assert!(mail.text_body.contains(&path));
    assert!(!mail.text_body.contains('<'));
}

#[tokio::test]
async fn same_password_hashes_differently_for_two_accounts() {
    let app = spawn_app().await;
    let (first, second) = (random_email(), format!("other.{}", random_email()));
    app.register("Alice", &first, PASSWORD).await;
    app.register("Bob", &second, PASSWORD).await;

    let hashes: Vec<String> = sqlx::query_scalar("SELECT password_hash FROM accounts")
        .fetch_all(&app.pool)
        .await
        .unwrap();

    assert_eq!(hashes.len(), 2);
    assert_ne!(hashes[0], hashes[1]);
}

#[tokio::test]
async fn registering_the_same_email_twice_is_rejected() {
    let app = spawn_app().await;
    let email = random_email();
    app.register("Alice", &email, PASSWORD).await;

    let response = app.register("Alice again", &email, "another1").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("already exists"));
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = ?")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn incomplete_registration_rerenders_the_form() {
    let app = spawn_app().await;
    let cases = [
        vec![("name", "Alice"), ("email", "alice@example.com")],
        vec![("name", ""), ("email", "alice@example.com"), ("password", PASSWORD)],
        vec![("name", "Alice"), ("email", "not-an-email"), ("password", PASSWORD)],
    ];

    for form in cases {
        let response = app.post_form("/register", &form).await;

        assert_eq!(response.status().as_u16(), 200, "form {form:?}");
        assert!(response.text().await.unwrap().contains("class=\"notice error\""));
    }
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn verification_link_marks_the_email_verified_once() {
    let app = spawn_app().await;
    let email = random_email();
    app.register("Alice", &email, PASSWORD).await;

    let wrong = app.get("/verify-email/not-the-token").await;
    assert_eq!(location(&wrong), "/login?error=invalid-token");
    let verified: i64 = sqlx::query_scalar("SELECT email_verified FROM accounts WHERE email = ?")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(verified, 0);

    let link = app.mailed_path(&email);
    let response = app.get(&link).await;
    assert_eq!(location(&response), "/login?success=email-verified");

    let (verified, token): (i64, Option<String>) = sqlx::query_as(
        "SELECT email_verified, email_verification_token FROM accounts WHERE email = ?",
    )
    .bind(&email)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(verified, 1);
    assert!(token.is_none());

    let again = app.get(&link).await;
    assert_eq!(location(&again), "/login?error=invalid-token");
}
