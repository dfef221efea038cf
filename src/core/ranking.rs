use crate::core::features::encode;
use crate::core::model::ScoringModel;
use crate::core::store::RecordStore;
use crate::domain::model::{CompanyScore, LeadRanking, LeadRecord, MatchRow};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScoringError};

pub const SCORE_DECIMALS: i32 = 3;

pub fn round_score(probability: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (probability * factor).round() / factor
}

/// Scores leads against every company currently in the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingService;

impl RankingService {
    pub fn new() -> Self {
        Self
    }

    /// Each lead's companies come back best first. Equal scores keep the store order,
    /// and leads keep their input order.
    pub fn score<S: Storage>(
        &self,
        leads: &[LeadRecord],
        store: &RecordStore,
        model: &ScoringModel<S>,
    ) -> Result<Vec<LeadRanking>> {
        if !model.is_trained() {
            return Err(ScoringError::ModelNotTrained);
        }
        if leads.is_empty() {
            return Err(ScoringError::missing_data("no leads provided for scoring"));
        }
        let companies = store.companies();
        if companies.is_empty() {
            return Err(ScoringError::missing_data("no companies ingested"));
        }

        let mut rankings = Vec::with_capacity(leads.len());
        for lead in leads {
            let features: Vec<_> = companies.iter().map(|c| encode(lead, c)).collect();
            let probabilities = model.predict(&features)?;

            let mut scores: Vec<CompanyScore> = companies
                .iter()
                .zip(probabilities)
                .map(|(company, p)| CompanyScore {
                    company_id: company.id,
                    company_name: company.name.clone(),
                    score: round_score(p),
                })
                .collect();
            // stable: ties keep snapshot order
            scores.sort_by(|a, b| b.score.total_cmp(&a.score));

            rankings.push(LeadRanking {
                lead_id: lead.id,
                scores,
            });
        }

        tracing::debug!(
            "Scored {} leads against {} companies",
            leads.len(),
            companies.len()
        );
        Ok(rankings)
    }
}

/// Flattens rankings into persistence rows, skipping pairs without both ids.
pub fn to_match_rows(rankings: &[LeadRanking]) -> Vec<MatchRow> {
    let mut skipped = 0usize;
    let mut rows = Vec::new();

    for ranking in rankings {
        for score in &ranking.scores {
            match (ranking.lead_id, score.company_id) {
                (Some(lead_id), Some(company_id)) => rows.push(MatchRow {
                    lead_id,
                    company_id,
                    compatibility_score: score.score,
                }),
                _ => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} scored pairs without lead or company id", skipped);
    }
    rows
}
