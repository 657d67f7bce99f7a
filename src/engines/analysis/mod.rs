pub mod sampler;
pub mod summary;

pub use sampler::{AnalysisResult, BoolHistogram, DistributionSampler, FloatHistogram};
pub use summary::{Classification, ContinuousSummary, DiscreteSummary, Summary, SummarySet};
