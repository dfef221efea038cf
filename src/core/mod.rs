pub mod classifier;
pub mod engine;
pub mod features;
pub mod labels;
pub mod model;
pub mod ranking;
pub mod stats;
pub mod store;
pub mod trainer;

pub use crate::domain::model::{
    CompanyRecord, EngineStatus, FeatureVector, LeadRanking, LeadRecord, MatchRow,
    TrainingOutcome, TrainingSample,
};
pub use crate::domain::ports::{ConfigProvider, MatchSink, Storage};
pub use crate::utils::error::Result;
