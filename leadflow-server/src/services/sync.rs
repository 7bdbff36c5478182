//! Periodic CRM sync of verified leads

use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, info};

use leadflow_common::Result;

use super::crm::CrmSink;
use crate::db;

/// Wall-clock spacing between sync runs.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(300);

/// Outcome of one sync run
#[derive(Debug, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
}

/// One sync run: push every unsynced verified lead to the CRM, marking
/// each record synced before moving to the next.
///
/// A push or save failure aborts the remainder of the run; whatever is
/// still unsynced is picked up again on the next tick.
pub async fn sync_verified_leads(pool: &SqlitePool, crm: &CrmSink) -> Result<SyncReport> {
    let leads = db::find_unsynced_verified(pool).await?;

    if leads.is_empty() {
        info!("no verified leads to sync");
        return Ok(SyncReport { synced: 0 });
    }

    info!(count = leads.len(), "found verified leads to sync");

    for lead in &leads {
        crm.push(lead).await?;
        db::mark_synced(pool, &lead.guid, Utc::now()).await?;
    }

    Ok(SyncReport {
        synced: leads.len(),
    })
}

/// Spawn the timer-driven sync loop.
///
/// The interval's immediate first tick is consumed, so the first run
/// happens one full interval after startup.
pub fn spawn_sync_task(pool: SqlitePool, crm: CrmSink) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = interval(SYNC_INTERVAL);
        tick.tick().await;

        loop {
            tick.tick().await;
            match sync_verified_leads(&pool, &crm).await {
                Ok(report) => info!(synced = report.synced, "scheduled CRM sync completed"),
                Err(err) => error!(error = %err, "scheduled CRM sync failed"),
            }
        }
    })
}
