//! Storefront client registration and lookup.
//!
//! Email is the natural dedup key: registering with a known email resolves
//! to the existing client instead of creating a duplicate, which is also the
//! extent of storefront "login". Anything beyond that lookup is out of
//! scope.

use crate::{
    core::ids,
    entities::{Client, client},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Fields submitted by a storefront registration form.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Finds a client by email, returning None if unknown.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_client_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<client::Model>> {
    Client::find()
        .filter(client::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a storefront client, deduplicating on email.
///
/// A registration with a known email returns the existing row untouched;
/// otherwise a globally scoped id is allocated and the client is inserted
/// against the given branch.
///
/// # Errors
/// Returns `InvalidInput` for an empty name or email, or a database error.
pub async fn register_client(
    db: &DatabaseConnection,
    new_client: NewClient,
    branch_id: i64,
) -> Result<client::Model> {
    if new_client.name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Client name cannot be empty".to_string(),
        });
    }
    let email = new_client.email.trim().to_string();
    if email.is_empty() {
        return Err(Error::InvalidInput {
            message: "Client email cannot be empty".to_string(),
        });
    }

    if let Some(existing) = find_client_by_email(db, &email).await? {
        return Ok(existing);
    }

    let client_id = ids::next_client_id(db).await;
    let row = client::ActiveModel {
        id: Set(client_id),
        name: Set(new_client.name.trim().to_string()),
        address: Set(Some(new_client.address)),
        phone: Set(Some(new_client.phone)),
        email: Set(email),
        branch_id: Set(branch_id),
    };
    row.insert(db).await.map_err(Into::into)
}
