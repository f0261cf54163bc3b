pub mod cluster;
pub mod configuration;
pub mod error;
pub mod grouping;
pub mod manifest;
pub mod merge;
pub mod naming;
pub mod quantity;
pub mod service;
pub mod validation;

pub use cluster::{ClusterParameters, IngressOptions};
pub use configuration::{ClusterConfig, KubescribeConfig, OutputConfig};
pub use error::AppError;
pub use manifest::ManifestDocument;
pub use quantity::{CpuQuantity, MemoryQuantity, StorageQuantity};
pub use service::Service;
