//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async `list`, `save`
//! and `delete` methods that accept `&PgPool` as the first argument.
//! `save` inserts when the DTO carries no id and otherwise updates,
//! returning `None` when the row to update does not exist.

pub mod alert_criterion_repo;
pub mod crop_repo;
pub mod property_repo;
pub mod quantity_repo;
pub mod sensor_repo;
pub mod station_repo;

pub use alert_criterion_repo::AlertCriterionRepo;
pub use crop_repo::CropRepo;
pub use property_repo::PropertyRepo;
pub use quantity_repo::QuantityRepo;
pub use sensor_repo::SensorRepo;
pub use station_repo::StationRepo;
