// ABOUTME: Shared types and configuration for medidor.
// ABOUTME: Defines measurement sets, projects, the opening catalog, config and the local store.

pub mod catalog;
pub mod config;
pub mod measurement;
pub mod store;

pub use catalog::{OpeningType, UnknownOpeningType};
pub use config::{Config, ConfigError};
pub use measurement::{Measurement, MeasurementSet, Module, Project, Side, Trim, PLACEHOLDER_CODE};
pub use store::{ProjectInfo, ProjectStore, StoreError};
