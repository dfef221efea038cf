use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Qualified,
    Disqualified,
    Converted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Web,
    Event,
    Referral,
    List,
}

/// A lead whose free-text fields were already canonicalized upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub interest_area: Option<String>,
    #[serde(default)]
    pub budget_normalized_euro: Option<f64>,
    #[serde(default)]
    pub first_contacted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub consent_given: Option<bool>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub typical_project_budget_euro: Option<f64>,
    #[serde(default)]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Lead,
    Company,
}

pub const FEATURE_LEN: usize = 4;

/// `[lead_budget, company_budget, region_match, industry_match]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_LEN]);

impl FeatureVector {
    pub const LEN: usize = FEATURE_LEN;

    pub fn lead_budget(&self) -> f64 {
        self.0[0]
    }

    pub fn company_budget(&self) -> f64 {
        self.0[1]
    }

    pub fn region_match(&self) -> f64 {
        self.0[2]
    }

    pub fn industry_match(&self) -> f64 {
        self.0[3]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    pub features: FeatureVector,
    pub label: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingOutcome {
    pub trained: bool,
    pub n_samples: usize,
    pub accuracy: Option<f64>,
}

impl TrainingOutcome {
    pub fn skipped() -> Self {
        Self {
            trained: false,
            n_samples: 0,
            accuracy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyScore {
    pub company_id: Option<i64>,
    pub company_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRanking {
    pub lead_id: Option<i64>,
    pub scores: Vec<CompanyScore>,
}

/// Flat row handed to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRow {
    pub lead_id: i64,
    pub company_id: i64,
    pub compatibility_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub lead_count: usize,
    pub company_count: usize,
    pub model_ready: bool,
}
