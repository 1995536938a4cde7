//! In-memory registry of crop monitors and the live update channel.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use campo_core::advisory::{image_with_fallback, AlertAdvisor, FieldImageGenerator};
use campo_core::alert::AlertEntry;
use campo_core::crop::{CropPresentation, CropProfile};
use campo_core::error::CoreError;
use campo_core::monitor::CropMonitor;
use campo_core::reading::SensorReading;
use campo_core::seed::{self, PropertySummary};
use campo_core::session::{DashboardSession, SessionSeed, TickUpdate};
use campo_core::simulation::{GrowthStage, RandomSource, RngSource, Simulator};
use campo_core::thresholds::ThresholdMap;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::config::SimulationSettings;

/// Capacity of the live update channel. Slow subscribers lag and skip.
const LIVE_CHANNEL_CAPACITY: usize = 256;

/// Every displayed crop, its owning properties, and the live feed.
pub struct Dashboard {
    monitors: BTreeMap<String, Arc<CropMonitor>>,
    properties: Vec<PropertySummary>,
    images: Arc<dyn FieldImageGenerator>,
    image_timeout: Duration,
    updates: broadcast::Sender<TickUpdate>,
}

impl Dashboard {
    /// Build from explicit seeds. `rng` is called once per crop.
    pub fn new(
        seeds: Vec<SessionSeed>,
        properties: Vec<PropertySummary>,
        settings: &SimulationSettings,
        simulator: Arc<Simulator>,
        advisor: Arc<dyn AlertAdvisor>,
        images: Arc<dyn FieldImageGenerator>,
        mut rng: impl FnMut() -> Box<dyn RandomSource + Send>,
    ) -> Self {
        let monitors = seeds
            .into_iter()
            .map(|seed| {
                let id = seed.profile.id.clone();
                let session = DashboardSession::new(
                    seed,
                    settings.history_capacity,
                    settings.alert_log_capacity,
                );
                let monitor = CropMonitor::new(
                    session,
                    Arc::clone(&simulator),
                    rng(),
                    Arc::clone(&advisor),
                    settings.advisor_timeout,
                );
                (id, Arc::new(monitor))
            })
            .collect();

        let (updates, _) = broadcast::channel(LIVE_CHANNEL_CAPACITY);

        Self {
            monitors,
            properties,
            images,
            image_timeout: settings.advisor_timeout,
            updates,
        }
    }

    /// Build with the demo seed data and OS-seeded randomness.
    pub fn seeded(
        settings: &SimulationSettings,
        advisor: Arc<dyn AlertAdvisor>,
        images: Arc<dyn FieldImageGenerator>,
    ) -> Self {
        let simulator = Arc::new(Simulator::default());
        let mut seed_rng = RngSource::from_os();
        let seeds = seed::crops(&simulator, &mut seed_rng, settings.history_capacity);

        Self::new(
            seeds,
            seed::properties(),
            settings,
            simulator,
            advisor,
            images,
            || Box::new(RngSource::from_os()),
        )
    }

    pub fn crop_ids(&self) -> impl Iterator<Item = &str> {
        self.monitors.keys().map(String::as_str)
    }

    pub fn monitors(&self) -> impl Iterator<Item = &Arc<CropMonitor>> {
        self.monitors.values()
    }

    pub fn monitor(&self, crop_id: &str) -> Result<&Arc<CropMonitor>, CoreError> {
        self.monitors
            .get(crop_id)
            .ok_or_else(|| CoreError::not_found("Crop", crop_id))
    }

    pub fn properties(&self) -> &[PropertySummary] {
        &self.properties
    }

    pub fn property(&self, property_id: &str) -> Result<&PropertySummary, CoreError> {
        self.properties
            .iter()
            .find(|p| p.id == property_id)
            .ok_or_else(|| CoreError::not_found("Property", property_id))
    }

    /// Subscribe to completed ticks of every crop.
    pub fn subscribe(&self) -> broadcast::Receiver<TickUpdate> {
        self.updates.subscribe()
    }

    /// Run one tick for `crop_id` and publish the result.
    pub async fn tick(&self, crop_id: &str) -> Result<Option<TickUpdate>, CoreError> {
        let monitor = self.monitor(crop_id)?;
        let update = monitor.tick().await;
        if let Some(update) = &update {
            // No subscribers is fine.
            let receivers = self.updates.send(update.clone()).unwrap_or(0);
            tracing::debug!(
                crop_id,
                severity = ?update.alert.severity,
                receivers,
                "Tick published"
            );
        }
        Ok(update)
    }

    /// The cached field image, generating one on first request.
    ///
    /// A placeholder is returned when generation fails and is not cached,
    /// so the next request tries again.
    pub async fn field_image(&self, crop_id: &str) -> Result<FieldImage, CoreError> {
        let monitor = self.monitor(crop_id)?;

        let (description, placeholder) = {
            let session = monitor.session().read().await;
            if let Some(url) = session.field_image() {
                return Ok(FieldImage {
                    image_url: url.to_string(),
                    generated: true,
                });
            }
            (
                field_description(&session),
                session.profile().kind.placeholder_image_url(),
            )
        };

        let url = image_with_fallback(
            self.images.as_ref(),
            &description,
            self.image_timeout,
            &placeholder,
        )
        .await;

        let generated = url != placeholder;
        if generated {
            monitor.session().write().await.set_field_image(url.clone());
        }
        Ok(FieldImage {
            image_url: url,
            generated,
        })
    }
}

/// Free-text description of a field used as the image prompt.
pub fn field_description(session: &DashboardSession) -> String {
    let profile = session.profile();
    let r = session.reading();
    format!(
        "{} field \"{}\" in the {} stage; air temperature {:.1}°C, air humidity {:.0}%, \
         soil moisture {:.0}%, wind {:.1} km/h from {}",
        profile.kind,
        profile.field_name,
        session.stage(),
        r.air_temperature,
        r.air_humidity,
        r.soil_moisture,
        r.wind_speed,
        r.wind_direction,
    )
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Current state of one crop.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSnapshot {
    #[serde(flatten)]
    pub profile: CropProfile,
    pub presentation: CropPresentation,
    pub growth_stage: GrowthStage,
    pub reading: SensorReading,
    pub thresholds: ThresholdMap,
    pub latest_alert: Option<AlertEntry>,
    pub generation: u64,
}

impl CropSnapshot {
    pub fn of(session: &DashboardSession) -> Self {
        let profile = session.profile().clone();
        Self {
            presentation: profile.kind.presentation(),
            profile,
            growth_stage: session.stage(),
            reading: session.reading().clone(),
            thresholds: session.thresholds().clone(),
            latest_alert: session.alerts().latest().cloned(),
            generation: session.generation(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldImage {
    pub image_url: String,
    /// `false` when the placeholder was substituted.
    pub generated: bool,
}

#[cfg(test)]
mod tests {
    use campo_advisor::Unconfigured;
    use campo_core::simulation::ZeroDelta;

    use super::*;

    fn dashboard() -> Dashboard {
        let settings = SimulationSettings::default();
        let simulator = Arc::new(Simulator::default());
        let seeds = seed::crops(&simulator, &mut ZeroDelta, settings.history_capacity);
        Dashboard::new(
            seeds,
            seed::properties(),
            &settings,
            simulator,
            Arc::new(Unconfigured),
            Arc::new(Unconfigured),
            || Box::new(ZeroDelta),
        )
    }

    #[test]
    fn lookup_by_id() {
        let dashboard = dashboard();
        assert_eq!(dashboard.crop_ids().collect::<Vec<_>>(), ["corn-1", "soy-1", "wheat-1"]);
        assert!(dashboard.monitor("soy-1").is_ok());
        assert!(dashboard.monitor("rice-1").is_err());
        assert_eq!(dashboard.property("prop-2").unwrap().name, "Sítio Belo Campo");
    }

    #[tokio::test]
    async fn failed_image_is_placeholder_and_not_cached() {
        let dashboard = dashboard();
        let image = dashboard.field_image("wheat-1").await.unwrap();
        assert!(!image.generated);
        assert_eq!(
            image.image_url,
            "https://placehold.co/500x500/D2B48C/FFFFFF?text=Wheat"
        );
        let session = dashboard.monitor("wheat-1").unwrap().session().read().await;
        assert!(session.field_image().is_none());
    }

    #[tokio::test]
    async fn tick_is_published_to_subscribers() {
        let dashboard = dashboard();
        let mut rx = dashboard.subscribe();

        let update = dashboard.tick("corn-1").await.unwrap().expect("applied");
        let received = rx.recv().await.unwrap();

        assert_eq!(received.crop_id, "corn-1");
        assert_eq!(received.alert, update.alert);
        // Unconfigured advisor always falls back.
        assert_eq!(received.alert.message, "AI recommendation unavailable");
    }

    #[tokio::test]
    async fn description_mentions_crop_and_stage() {
        let dashboard = dashboard();
        let session = dashboard.monitor("soy-1").unwrap().session().read().await;
        let text = field_description(&session);
        assert!(text.starts_with("Soy field \"Campo Norte 7\" in the Vegetative stage"));
        assert!(text.contains("from NE"));
    }
}
