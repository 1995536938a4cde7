//! Periodic simulation ticks, one task per crop.
//!
//! Each task calls [`Dashboard::tick`] on a fixed interval. The first tick
//! fires one full period after start so the seeded state is visible before
//! it begins to drift.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::dashboard::Dashboard;

/// Run the tick loop for one crop until `cancel` is triggered.
///
/// A tick that is still waiting on the advisor when the next period
/// elapses makes the following tick a no-op (the session refuses
/// overlapping ticks), and missed periods are skipped rather than
/// replayed.
pub async fn run(
    dashboard: Arc<Dashboard>,
    crop_id: String,
    period: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        crop_id = %crop_id,
        interval_ms = period.as_millis() as u64,
        "Simulation task started"
    );

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(crop_id = %crop_id, "Simulation task stopping");
                break;
            }
            _ = interval.tick() => {
                match dashboard.tick(&crop_id).await {
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        tracing::debug!(crop_id = %crop_id, "Tick skipped or discarded");
                    }
                    Err(e) => {
                        tracing::error!(crop_id = %crop_id, error = %e, "Tick failed");
                    }
                }
            }
        }
    }
}

/// Spawn one [`run`] task per crop on the dashboard.
pub fn spawn_all(
    dashboard: &Arc<Dashboard>,
    period: Duration,
    cancel: &CancellationToken,
) -> Vec<JoinHandle<()>> {
    dashboard
        .crop_ids()
        .map(|crop_id| {
            tokio::spawn(run(
                Arc::clone(dashboard),
                crop_id.to_string(),
                period,
                cancel.clone(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use campo_advisor::Unconfigured;
    use campo_core::seed;
    use campo_core::simulation::{Simulator, ZeroDelta};

    use super::*;
    use crate::config::SimulationSettings;

    fn dashboard() -> Arc<Dashboard> {
        let settings = SimulationSettings::default();
        let simulator = Arc::new(Simulator::default());
        let seeds = seed::crops(&simulator, &mut ZeroDelta, settings.history_capacity);
        Arc::new(Dashboard::new(
            seeds,
            seed::properties(),
            &settings,
            simulator,
            Arc::new(Unconfigured),
            Arc::new(Unconfigured),
            || Box::new(ZeroDelta),
        ))
    }

    #[tokio::test]
    async fn tasks_publish_ticks_until_cancelled() {
        let dashboard = dashboard();
        let mut rx = dashboard.subscribe();
        let cancel = CancellationToken::new();

        let handles = spawn_all(&dashboard, Duration::from_millis(20), &cancel);
        assert_eq!(handles.len(), 3);

        let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("a tick within the timeout")
            .expect("channel open");
        assert!(dashboard.monitor(&update.crop_id).is_ok());

        cancel.cancel();
        for handle in handles {
            tokio::time::timeout(Duration::from_secs(5), handle)
                .await
                .expect("task stops after cancel")
                .expect("task did not panic");
        }
    }

    #[tokio::test]
    async fn cancelled_before_first_period_never_ticks() {
        let dashboard = dashboard();
        let cancel = CancellationToken::new();
        cancel.cancel();

        run(
            Arc::clone(&dashboard),
            "soy-1".into(),
            Duration::from_secs(60),
            cancel,
        )
        .await;

        let session = dashboard.monitor("soy-1").unwrap().session().read().await;
        assert_eq!(session.history().len(), SimulationSettings::default().history_capacity);
    }
}
