//! Infrastructure adapters for KITGRID: configuration file, dataset
//! backends and logging setup.

pub mod config_service;
pub mod http_api_client;
pub mod json_dataset_repository;
pub mod logging;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_api_client::HttpApiClient;
pub use crate::json_dataset_repository::JsonDatasetRepository;
