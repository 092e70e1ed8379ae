//! Lost & found item storage

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Db;
use crate::error::{Error, Result};

/// A listed item
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: String,
    pub email: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
}

/// Fields supplied when submitting an item; id and date are generated
#[derive(Debug)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: String,
    pub email: String,
    pub location: Option<String>,
}

fn item_from_row(row: &tokio_postgres::Row) -> Item {
    Item {
        id: row.get(0),
        name: row.get(1),
        description: row.get(2),
        image: row.get(3),
        status: row.get(4),
        email: row.get(5),
        date: row.get(6),
        location: row.get(7),
    }
}

const ITEM_COLUMNS: &str = "id, name, description, image, status, email, date, location";

/// Insert an item, stamping the submission date server-side
pub async fn insert(db: &Db, item: NewItem) -> Result<Item> {
    let row = db
        .client()
        .query_one(
            format!(
                "INSERT INTO items (name, description, image, status, email, date, location)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING {ITEM_COLUMNS}"
            )
            .as_str(),
            &[
                &item.name,
                &item.description,
                &item.image,
                &item.status,
                &item.email,
                &Utc::now(),
                &item.location,
            ],
        )
        .await?;

    Ok(item_from_row(&row))
}

/// List all items, newest first
pub async fn list(db: &Db) -> Result<Vec<Item>> {
    let rows = db
        .client()
        .query(
            format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY date DESC").as_str(),
            &[],
        )
        .await?;

    Ok(rows.iter().map(item_from_row).collect())
}

/// Fetch a single item
pub async fn find_by_id(db: &Db, id: i64) -> Result<Option<Item>> {
    let row = db
        .client()
        .query_opt(
            format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1").as_str(),
            &[&id],
        )
        .await?;

    Ok(row.as_ref().map(item_from_row))
}

/// Delete an item, failing with `ItemNotFound` if no row was removed
pub async fn delete(db: &Db, id: i64) -> Result<()> {
    let affected = db
        .client()
        .execute("DELETE FROM items WHERE id = $1", &[&id])
        .await?;

    confirm_deleted(id, affected)
}

/// Zero rows removed means the item vanished between lookup and delete
fn confirm_deleted(id: i64, affected: u64) -> Result<()> {
    if affected > 0 {
        Ok(())
    } else {
        Err(Error::ItemNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_deleted_requires_removed_row() {
        assert!(confirm_deleted(1, 1).is_ok());
        assert!(matches!(confirm_deleted(7, 0), Err(Error::ItemNotFound(7))));
    }
}
