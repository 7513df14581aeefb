mod aggregator;
mod chart_math;
mod normalizer;
mod statistics_calculator;

pub use aggregator::{AnalysisSet, ComparisonAggregator, RepositorySizes};
pub use chart_math::{quantile, BoxPlotSummary, LinearFit};
pub use normalizer::{CbomNormalizer, UNKNOWN_TYPE};
pub use statistics_calculator::{mean, sample_std_dev, StatisticsCalculator};
