/// Domain layer - CBOM normalization and comparison
///
/// Pure business logic: no file system, network or console access.
pub mod domain;
pub mod services;
