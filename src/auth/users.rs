//! Admin user store
//!
//! SQLite-backed users table with soft delete.

use super::password::{hash_password, verify_password};
use crate::error::{SukhanError, SukhanResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at TEXT NOT NULL,
    deleted_at TEXT
)";

/// Back-office role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SukhanError;

    fn from_str(s: &str) -> SukhanResult<Self> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            other => Err(SukhanError::BadRequest(format!("unknown role '{}'", other))),
        }
    }
}

/// A stored user, without the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<(Self, String)> {
        let role: String = row.get("role")?;
        let created_at: String = row.get("created_at")?;
        let user = User {
            id: row.get("id")?,
            username: row.get("username")?,
            role: role.parse().map_err(|e| conversion_error(ROLE_COLUMN, e))?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| conversion_error(CREATED_AT_COLUMN, e))?,
        };
        Ok((user, row.get("password_hash")?))
    }
}

/// Column positions in `SELECT_USER`
const ROLE_COLUMN: usize = 3;
const CREATED_AT_COLUMN: usize = 4;

const SELECT_USER: &str = "SELECT id, username, password_hash, role, created_at FROM users";

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// SQLite user store
pub struct UserStore {
    conn: Connection,
}

impl UserStore {
    /// Open (or create) a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> SukhanResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SukhanError::Internal(format!("create {:?}: {}", parent, e)))?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> SukhanResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Create a user; usernames are trimmed and must be unique among all rows
    pub fn create_user(&self, username: &str, password: &str, role: Role) -> SukhanResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SukhanError::BadRequest("username must not be empty".to_string()));
        }

        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)",
            params![username],
            |row| row.get(0),
        )?;
        if exists {
            return Err(SukhanError::Conflict(format!("user '{}' already exists", username)));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role,
            created_at: Utc::now(),
        };
        let password_hash = hash_password(password)?;

        self.conn.execute(
            "INSERT INTO users (id, username, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
            params![
                user.id,
                user.username,
                password_hash,
                user.role.as_str(),
                user.created_at.to_rfc3339()
            ],
        )?;

        tracing::info!("Created {} user '{}'", user.role, user.username);
        Ok(user)
    }

    fn find(&self, username: &str) -> SukhanResult<Option<(User, String)>> {
        let found = self
            .conn
            .query_row(
                &format!("{} WHERE username = ? AND deleted_at IS NULL", SELECT_USER),
                params![username.trim()],
                User::from_row,
            )
            .optional()?;
        Ok(found)
    }

    /// Look up an active user
    pub fn get(&self, username: &str) -> SukhanResult<User> {
        self.find(username)?
            .map(|(user, _)| user)
            .ok_or_else(|| SukhanError::NotFound(format!("user '{}'", username.trim())))
    }

    /// Check credentials; unknown users and wrong passwords are indistinguishable
    pub fn authenticate(&self, username: &str, password: &str) -> SukhanResult<User> {
        match self.find(username)? {
            Some((user, hash)) if verify_password(password, &hash) => Ok(user),
            _ => {
                tracing::warn!("Failed login for '{}'", username.trim());
                Err(SukhanError::Unauthorized)
            }
        }
    }

    /// Active users ordered by username
    pub fn list(&self) -> SukhanResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE deleted_at IS NULL ORDER BY username",
            SELECT_USER
        ))?;
        let users = stmt
            .query_map([], User::from_row)?
            .map(|r| r.map(|(user, _)| user))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Mark a user deleted
    pub fn soft_delete(&self, username: &str) -> SukhanResult<()> {
        let updated = self.conn.execute(
            "UPDATE users SET deleted_at = ? WHERE username = ? AND deleted_at IS NULL",
            params![Utc::now().to_rfc3339(), username.trim()],
        )?;
        if updated == 0 {
            return Err(SukhanError::NotFound(format!("user '{}'", username.trim())));
        }
        tracing::info!("Soft-deleted user '{}'", username.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let store = UserStore::in_memory().unwrap();
        let created = store.create_user(" ayaz ", "pw", Role::Admin).unwrap();
        assert_eq!(created.username, "ayaz");

        let fetched = store.get("ayaz").unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.role, Role::Admin);
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let store = UserStore::in_memory().unwrap();
        store.create_user("ayaz", "pw", Role::Editor).unwrap();
        let err = store.create_user("ayaz", "other", Role::Editor).unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_authenticate() {
        let store = UserStore::in_memory().unwrap();
        store.create_user("ayaz", "pw", Role::Editor).unwrap();

        assert!(store.authenticate("ayaz", "pw").is_ok());
        assert_eq!(store.authenticate("ayaz", "nope").unwrap_err().status_code(), 401);
        assert_eq!(store.authenticate("ghost", "pw").unwrap_err().status_code(), 401);
    }

    #[test]
    fn test_soft_delete_hides_user() {
        let store = UserStore::in_memory().unwrap();
        store.create_user("ayaz", "pw", Role::Editor).unwrap();
        store.soft_delete("ayaz").unwrap();

        assert_eq!(store.get("ayaz").unwrap_err().status_code(), 404);
        assert_eq!(store.authenticate("ayaz", "pw").unwrap_err().status_code(), 401);
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.soft_delete("ayaz").unwrap_err().status_code(), 404);
    }

    #[test]
    fn test_list_sorted() {
        let store = UserStore::in_memory().unwrap();
        store.create_user("sachal", "pw", Role::Editor).unwrap();
        store.create_user("latif", "pw", Role::Admin).unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["latif", "sachal"]);
    }

    #[test]
    fn test_corrupt_rows_surface_as_errors() {
        let store = UserStore::in_memory().unwrap();
        store.create_user("ayaz", "pw", Role::Editor).unwrap();
        store.create_user("latif", "pw", Role::Editor).unwrap();
        store
            .conn
            .execute("UPDATE users SET role = 'root' WHERE username = 'ayaz'", [])
            .unwrap();
        store
            .conn
            .execute("UPDATE users SET created_at = 'yesterday' WHERE username = 'latif'", [])
            .unwrap();

        assert_eq!(store.get("ayaz").unwrap_err().status_code(), 500);
        assert_eq!(store.get("latif").unwrap_err().status_code(), 500);
        assert_eq!(store.list().unwrap_err().status_code(), 500);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("root".parse::<Role>().unwrap_err().status_code(), 400);
    }
}
