/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports describe everything the application core needs
/// from the outside world: CBOM files, metrics, repository sizes, report
/// storage, formatting and progress output.
pub mod outbound;
