use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::account::Account;

/// Validated signup input.
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl NewAccount {
    pub fn parse(name: &str, email: &str, password: &str) -> Result<Self, AppError> {
        let name = name.trim();
        let email = normalize_email(email);

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Name, email and password are all required.".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::InvalidInput(
                "Please enter a valid email address.".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            email,
            password: password.to_string(),
        })
    }
}

/// Creates an account. A duplicate email yields `AppError::EmailTaken`.
pub async fn create_account(pool: &PgPool, new: NewAccount) -> Result<Uuid, AppError> {
    let NewAccount {
        name,
        email,
        password,
    } = new;

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {e}")))??;

    let id = Uuid::new_v4();
    let result = sqlx::query(
        "INSERT INTO accounts (id, name, email, password_hash) VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!("Created account {id}");
            Ok(id)
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AppError::EmailTaken),
        Err(e) => Err(e.into()),
    }
}

/// Returns the account whose email and password match, or `AppError::Authentication`.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<Account, AppError> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Authentication)?;

    let password = password.to_string();
    let stored_hash = account.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Verification task failed: {e}")))?;

    if verified {
        Ok(account)
    } else {
        Err(AppError::Authentication)
    }
}
