//! Validated resource quantities.
//!
//! Each quantity keeps the textual form the user supplied (`128Mi`, `0.5`)
//! so generated manifests echo exactly what was asked for.

use crate::domain::validation::{validate_byte_quantity, validate_cpu_quantity};
use crate::impl_validated_quantity;

/// Memory amount in bytes with an optional binary or decimal suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryQuantity(String);

impl_validated_quantity!(
    MemoryQuantity,
    validate_byte_quantity,
    "a byte count with an optional suffix (e.g. 128Mi, 1G)"
);

/// CPU amount in cores; fractional values and millicores are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CpuQuantity(String);

impl_validated_quantity!(
    CpuQuantity,
    validate_cpu_quantity,
    "a non-negative number of cpu units (e.g. 0.1, 2, 100m)"
);

/// Persistent storage request in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageQuantity(String);

impl_validated_quantity!(
    StorageQuantity,
    validate_byte_quantity,
    "an amount of storage in bytes (e.g. 8G, 0.5Ti)"
);
