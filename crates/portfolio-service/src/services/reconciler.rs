//! Periodic aggregate reconciliation
//!
//! A crash between the event insert and the increment leaves an aggregate
//! one short. This task rebuilds every aggregate from the ledger on a timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use super::context::ServiceContext;
use super::reaction::ReactionService;

/// Spawn the reconciliation loop. The first pass runs immediately.
pub fn spawn_reconciler(ctx: Arc<ServiceContext>, every: Duration) -> JoinHandle<()> {
    info!(interval_secs = every.as_secs(), "Starting reaction reconciler");

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match ReactionService::new(&ctx).reconcile(None).await {
                Ok(0) => {}
                Ok(corrected) => warn!(corrected, "Reconciler repaired drifted aggregates"),
                Err(e) => warn!(error = %e, "Reconciliation pass failed"),
            }
        }
    })
}
