//! Lead store queries
//!
//! Leads are written once by the batch processor; the sync task owns the
//! only update path (the synced/synced_at pair).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use leadflow_common::db::models::{Lead, LeadDraft, LeadStatus};
use leadflow_common::{Error, Result};

/// Counts reported by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCounts {
    pub total: i64,
    pub verified: i64,
    pub to_check: i64,
    pub synced: i64,
}

fn lead_from_row(row: &SqliteRow) -> Result<Lead> {
    let status: String = row.try_get("status")?;
    let status = LeadStatus::parse(&status)
        .ok_or_else(|| Error::Internal(format!("unknown lead status in store: {status}")))?;

    Ok(Lead {
        guid: row.try_get("guid")?,
        name: row.try_get("name")?,
        most_likely_country: row.try_get("most_likely_country")?,
        country_code: row.try_get("country_code")?,
        probability: row.try_get("probability")?,
        status,
        synced: row.try_get::<i64, _>("synced")? != 0,
        synced_at: row.try_get("synced_at")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Bulk-insert enrichment drafts inside one transaction, so a batch is
/// all-or-nothing. Returns the stored records in input order.
pub async fn insert_leads(pool: &SqlitePool, drafts: &[LeadDraft]) -> Result<Vec<Lead>> {
    let mut tx = pool.begin().await?;
    let mut saved = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let lead = Lead {
            guid: Uuid::new_v4().to_string(),
            name: draft.name.clone(),
            most_likely_country: draft.most_likely_country.clone(),
            country_code: draft.country_code.clone(),
            probability: draft.probability,
            status: draft.status,
            synced: false,
            synced_at: None,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO leads (guid, name, most_likely_country, country_code, probability, status, synced, synced_at, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, 0, NULL, ?)",
        )
        .bind(&lead.guid)
        .bind(&lead.name)
        .bind(&lead.most_likely_country)
        .bind(&lead.country_code)
        .bind(lead.probability)
        .bind(lead.status.as_str())
        .bind(lead.created_at)
        .execute(&mut *tx)
        .await?;

        saved.push(lead);
    }

    tx.commit().await?;
    Ok(saved)
}

/// List leads, optionally filtered by status, newest first.
pub async fn list_leads(pool: &SqlitePool, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
    let rows = match status {
        Some(status) => {
            sqlx::query("SELECT * FROM leads WHERE status = ? ORDER BY created_at DESC")
                .bind(status.as_str())
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query("SELECT * FROM leads ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        }
    };

    rows.iter().map(lead_from_row).collect()
}

/// Four independent counts over the full collection.
pub async fn lead_stats(pool: &SqlitePool) -> Result<LeadCounts> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads")
        .fetch_one(pool)
        .await?;

    let verified: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE status = ?")
        .bind(LeadStatus::Verified.as_str())
        .fetch_one(pool)
        .await?;

    let to_check: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE status = ?")
        .bind(LeadStatus::ToCheck.as_str())
        .fetch_one(pool)
        .await?;

    let synced: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE synced = 1")
        .fetch_one(pool)
        .await?;

    Ok(LeadCounts {
        total,
        verified,
        to_check,
        synced,
    })
}

/// Verified leads the sync task has not yet forwarded, oldest first.
pub async fn find_unsynced_verified(pool: &SqlitePool) -> Result<Vec<Lead>> {
    let rows = sqlx::query(
        "SELECT * FROM leads WHERE status = ? AND synced = 0 ORDER BY created_at",
    )
    .bind(LeadStatus::Verified.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(lead_from_row).collect()
}

/// Flip a single lead to synced. The flag and timestamp move together in
/// one UPDATE.
pub async fn mark_synced(pool: &SqlitePool, guid: &str, synced_at: DateTime<Utc>) -> Result<()> {
    sqlx::query("UPDATE leads SET synced = 1, synced_at = ? WHERE guid = ?")
        .bind(synced_at)
        .bind(guid)
        .execute(pool)
        .await?;

    Ok(())
}
