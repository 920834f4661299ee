//! SQLite-Implementierung des UserStore

use async_trait::async_trait;
use chrono::Utc;
use pforte_core::UserId;

use crate::error::{ist_eindeutigkeitsverletzung, DbError, DbResult};
use crate::models::{email_normalisieren, User, UserDraft};
use crate::repository::UserStore;
use crate::sqlite::pool::SqliteDb;

const USER_SPALTEN: &str =
    "id, first_name, last_name, email, password_hash, created_at, updated_at";

#[async_trait]
impl UserStore for SqliteDb {
    async fn create(&self, entwurf: UserDraft) -> DbResult<User> {
        let id = UserId::new();
        let now = Utc::now();
        let now_str = now.to_rfc3339();
        let email = email_normalisieren(&entwurf.email);

        // Ein einziges INSERT; die UNIQUE-Constraint entscheidet Rennen
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&entwurf.first_name)
        .bind(&entwurf.last_name)
        .bind(&email)
        .bind(&entwurf.password_hash)
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if ist_eindeutigkeitsverletzung(&e) {
                DbError::EmailVergeben(email.clone())
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(User {
            id,
            first_name: entwurf.first_name,
            last_name: entwurf.last_name,
            email,
            password_hash: entwurf.password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: UserId) -> DbResult<User> {
        let sql = format!("SELECT {USER_SPALTEN} FROM users WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => row_to_user(&r),
            None => Err(DbError::nicht_gefunden(format!("User {id}"))),
        }
    }

    async fn find_by_email(&self, email: &str) -> DbResult<User> {
        let email = email_normalisieren(email);
        let sql = format!("SELECT {USER_SPALTEN} FROM users WHERE email = ?");
        let row = sqlx::query(&sql)
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => row_to_user(&r),
            None => Err(DbError::nicht_gefunden(format!("User mit E-Mail {email}"))),
        }
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> DbResult<User> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = id_str
        .parse::<UserId>()
        .map_err(|e| DbError::intern(e.to_string()))?;

    Ok(User {
        id,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: zeitstempel_lesen(row, "created_at")?,
        updated_at: zeitstempel_lesen(row, "updated_at")?,
    })
}

fn zeitstempel_lesen(
    row: &sqlx::sqlite::SqliteRow,
    spalte: &str,
) -> DbResult<chrono::DateTime<Utc>> {
    use sqlx::Row as _;

    let wert: String = row.try_get(spalte)?;
    chrono::DateTime::parse_from_rfc3339(&wert)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::intern(format!("Ungueltige {spalte} '{wert}': {e}")))
}
