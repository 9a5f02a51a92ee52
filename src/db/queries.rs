use crate::db::Database;
use crate::error::Result;
use crate::models::User;
use rusqlite::{params, Row};

impl Database {
    pub fn fetch_all_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, phone_number, district, state, crop, language
                 FROM users ORDER BY id",
            )?;
            let users = stmt
                .query_map([], row_to_user)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(users)
        })
    }

    pub fn users_in_district(&self, district: &str) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, email, phone_number, district, state, crop, language
                 FROM users WHERE district IS NOT NULL AND LOWER(district) = LOWER(?1)
                 ORDER BY id",
            )?;
            let users = stmt
                .query_map(params![district], row_to_user)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(users)
        })
    }

    /// Distinct districts with at least one registered user, lowercased
    pub fn unique_districts(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT LOWER(district) FROM users
                 WHERE district IS NOT NULL AND district != ''
                 ORDER BY 1",
            )?;
            let districts = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(districts)
        })
    }

    pub fn insert_user(&self, user: &User) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO users
                    (id, name, email, phone_number, district, state, crop, language)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    user.id,
                    user.name,
                    user.email,
                    user.phone_number,
                    user.district,
                    user.state,
                    user.crop,
                    user.language,
                ],
            )?;
            Ok(())
        })
    }
}

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone_number: row.get(3)?,
        district: row.get(4)?,
        state: row.get(5)?,
        crop: row.get(6)?,
        language: row.get(7)?,
    })
}
