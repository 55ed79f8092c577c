// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Accounts and credential checks.
//!
//! Passwords are stored as salted Argon2id PHC strings.

use crate::error::{FinanceError, FinanceResult};
use crate::models::User;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

pub fn hash_password(password: &str) -> FinanceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| FinanceError::Credentials(e.to_string()))
}

/// `false` for a wrong password and for a stored hash that cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

fn row_to_user(r: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let created: Option<String> = r.get(3)?;
    Ok(User {
        id: r.get(0)?,
        username: r.get(1)?,
        password_hash: r.get(2)?,
        created_at: created
            .and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok()),
    })
}

fn check_credentials_input(username: &str, password: &str) -> FinanceResult<()> {
    if username.trim().is_empty() {
        return Err(FinanceError::invalid("Username must not be empty"));
    }
    if password.is_empty() {
        return Err(FinanceError::invalid("Password must not be empty"));
    }
    Ok(())
}

pub fn username_exists(conn: &Connection, username: &str) -> FinanceResult<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE username=?1",
        params![username.trim()],
        |r| r.get(0),
    )?;
    Ok(n > 0)
}

pub fn register(conn: &Connection, username: &str, password: &str) -> FinanceResult<User> {
    check_credentials_input(username, password)?;
    let username = username.trim();
    if username_exists(conn, username)? {
        return Err(FinanceError::UsernameTaken(username.to_string()));
    }
    let hash = hash_password(password)?;
    conn.execute(
        "INSERT INTO users(username, password_hash) VALUES (?1, ?2)",
        params![username, hash],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id = id, username, "user registered");
    find_by_id(conn, id)?
        .ok_or_else(|| FinanceError::CorruptRecord(format!("user {} vanished after insert", id)))
}

/// Returns the user when `password` matches; `None` for an unknown user or a
/// wrong password, without telling the two apart.
pub fn authenticate(
    conn: &Connection,
    username: &str,
    password: &str,
) -> FinanceResult<Option<User>> {
    check_credentials_input(username, password)?;
    let user = conn
        .query_row(
            "SELECT user_id, username, password_hash, created_at FROM users WHERE username=?1",
            params![username.trim()],
            row_to_user,
        )
        .optional()?;
    match user {
        Some(u) if verify_password(password, &u.password_hash) => Ok(Some(u)),
        Some(_) => {
            tracing::warn!(username, "password mismatch");
            Ok(None)
        }
        None => Ok(None),
    }
}

pub fn change_password(conn: &Connection, user_id: i64, new_password: &str) -> FinanceResult<bool> {
    if new_password.is_empty() {
        return Err(FinanceError::invalid("Password must not be empty"));
    }
    let hash = hash_password(new_password)?;
    let changed = conn.execute(
        "UPDATE users SET password_hash=?1 WHERE user_id=?2",
        params![hash, user_id],
    )?;
    Ok(changed > 0)
}

pub fn find_by_id(conn: &Connection, user_id: i64) -> FinanceResult<Option<User>> {
    Ok(conn
        .query_row(
            "SELECT user_id, username, password_hash, created_at FROM users WHERE user_id=?1",
            params![user_id],
            row_to_user,
        )
        .optional()?)
}

pub fn list_users(conn: &Connection) -> FinanceResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, username, password_hash, created_at FROM users \
         ORDER BY created_at DESC, user_id DESC",
    )?;
    let rows = stmt.query_map([], row_to_user)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}
