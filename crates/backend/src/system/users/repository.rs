use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::{AuthProvider, UserInfo, UserRole};
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, Statement};

/// Row of `sys_users`
#[derive(Debug, Clone, FromQueryResult)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub provider: String,
    pub google_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserRecord {
    pub fn role(&self) -> UserRole {
        UserRole::parse(Some(&self.role)).unwrap_or_default()
    }

    pub fn provider(&self) -> AuthProvider {
        AuthProvider::from_db(&self.provider)
    }

    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role(),
        }
    }
}

/// Values of a user about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub google_id: Option<String>,
}

const SELECT_USER: &str = "SELECT id, name, email, password_hash, role, provider, google_id, created_at, updated_at FROM sys_users";

/// Insert a user, returning its id
pub async fn create<C: ConnectionTrait>(db: &C, user: &NewUser) -> Result<i64> {
    let now = Utc::now().to_rfc3339();
    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_users (name, email, password_hash, role, provider, google_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            [
                user.name.clone().into(),
                user.email.clone().into(),
                user.password_hash.clone().into(),
                user.role.as_str().into(),
                user.provider.as_str().into(),
                user.google_id.clone().into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await
        .context("Failed to insert user")?;

    Ok(result.last_insert_id() as i64)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<UserRecord>> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        format!("{SELECT_USER} WHERE id = ?"),
        [id.into()],
    );
    Ok(UserRecord::find_by_statement(stmt).one(db).await?)
}

/// Emails are compared case-insensitively
pub async fn get_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<UserRecord>> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        format!("{SELECT_USER} WHERE lower(email) = lower(?)"),
        [email.trim().into()],
    );
    Ok(UserRecord::find_by_statement(stmt).one(db).await?)
}

pub async fn get_by_google_id<C: ConnectionTrait>(db: &C, google_id: &str) -> Result<Option<UserRecord>> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        format!("{SELECT_USER} WHERE google_id = ?"),
        [google_id.into()],
    );
    Ok(UserRecord::find_by_statement(stmt).one(db).await?)
}

/// Store the Google link and display name of an existing account
pub async fn update_google_link<C: ConnectionTrait>(
    db: &C,
    id: i64,
    name: &str,
    google_id: Option<&str>,
) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users
         SET provider = ?, google_id = COALESCE(?, google_id), name = ?, updated_at = ?
         WHERE id = ?",
        [
            AuthProvider::Google.as_str().into(),
            google_id.map(str::to_string).into(),
            name.into(),
            Utc::now().to_rfc3339().into(),
            id.into(),
        ],
    ))
    .await
    .context("Failed to update user")?;
    Ok(())
}

pub async fn count_users<C: ConnectionTrait>(db: &C) -> Result<i64> {
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS count FROM sys_users".to_string(),
        ))
        .await?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "count")?),
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::memory_connection;

    fn ann() -> NewUser {
        NewUser {
            name: "Ann".into(),
            email: "Ann@Example.com".into(),
            password_hash: Some("hash".into()),
            role: UserRole::Admin,
            provider: AuthProvider::Local,
            google_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = memory_connection().await;
        let id = create(&db, &ann()).await.unwrap();
        assert_eq!(count_users(&db).await.unwrap(), 1);

        let by_id = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(by_id.role(), UserRole::Admin);
        assert_eq!(by_id.provider(), AuthProvider::Local);

        let by_email = get_by_email(&db, "ann@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, id);
        assert!(get_by_id(&db, id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_google_link() {
        let db = memory_connection().await;
        let id = create(&db, &ann()).await.unwrap();
        update_google_link(&db, id, "Ann G", Some("g-1")).await.unwrap();

        let user = get_by_google_id(&db, "g-1").await.unwrap().unwrap();
        assert_eq!(user.name, "Ann G");
        assert_eq!(user.provider(), AuthProvider::Google);
        // password survives the link
        assert_eq!(user.password_hash.as_deref(), Some("hash"));

        update_google_link(&db, id, "Ann G", None).await.unwrap();
        let user = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(user.google_id.as_deref(), Some("g-1"));
    }

    #[tokio::test]
    async fn test_email_is_unique() {
        let db = memory_connection().await;
        create(&db, &ann()).await.unwrap();
        assert!(create(&db, &ann()).await.is_err());
    }
}
