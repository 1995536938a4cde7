//! Async driver for one crop's tick loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::advisory::{advise_with_fallback, AlertAdvisor};
use crate::session::{DashboardSession, TickPlan, TickUpdate};
use crate::simulation::{RandomSource, Simulator};

/// Runs ticks against a shared [`DashboardSession`].
///
/// The session lock is never held across the advisor call, so readers
/// (HTTP handlers) are not blocked while the service is slow.
pub struct CropMonitor {
    session: Arc<RwLock<DashboardSession>>,
    simulator: Arc<Simulator>,
    rng: Mutex<Box<dyn RandomSource + Send>>,
    advisor: Arc<dyn AlertAdvisor>,
    advisor_timeout: Duration,
}

impl CropMonitor {
    pub fn new(
        session: DashboardSession,
        simulator: Arc<Simulator>,
        rng: Box<dyn RandomSource + Send>,
        advisor: Arc<dyn AlertAdvisor>,
        advisor_timeout: Duration,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            simulator,
            rng: Mutex::new(rng),
            advisor,
            advisor_timeout,
        }
    }

    pub fn session(&self) -> &Arc<RwLock<DashboardSession>> {
        &self.session
    }

    /// Run one tick to completion.
    ///
    /// Returns `None` when the tick was skipped (one already in flight) or
    /// its result was discarded because the session was reset meanwhile.
    pub async fn tick(&self) -> Option<TickUpdate> {
        let plan = {
            let mut session = self.session.write().await;
            let mut rng = self.rng.lock().await;
            session.begin_tick(&self.simulator, rng.as_mut())
        }?;

        let (ticket, advisory) = match plan {
            TickPlan::Local {
                ticket,
                advisory,
                violations,
            } => {
                tracing::info!(
                    violations = violations.len(),
                    message = %advisory.message,
                    "Threshold violated, skipping advisor"
                );
                (ticket, advisory)
            }
            TickPlan::Delegate { ticket, request } => {
                let advisory =
                    advise_with_fallback(self.advisor.as_ref(), &request, self.advisor_timeout)
                        .await;
                (ticket, advisory)
            }
        };

        self.session.write().await.complete_tick(ticket, advisory)
    }

    /// Restore the seed state. Any tick in flight is discarded on
    /// completion.
    pub async fn reset(&self) -> u64 {
        self.session.write().await.reset()
    }
}
