use crate::domain::model::{LeadRanking, LeadRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub mean: f64,
    pub p90: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub value: String,
    pub count: usize,
}

/// Aggregates handed to the reporting layer instead of raw records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub count: usize,
    pub score: Option<ScoreSummary>,
    pub top_industries: Vec<TokenCount>,
    pub top_regions: Vec<TokenCount>,
}

impl MatchStats {
    /// `leads` and `rankings` are expected in the same order, as returned by scoring.
    pub fn compute(leads: &[LeadRecord], rankings: &[LeadRanking]) -> Self {
        let mut scores: Vec<f64> = rankings
            .iter()
            .flat_map(|r| r.scores.iter().map(|s| s.score))
            .collect();
        scores.sort_by(f64::total_cmp);

        let scored_leads = &leads[..leads.len().min(rankings.len())];

        Self {
            count: scores.len(),
            score: summarize(&scores),
            top_industries: top_tokens(scored_leads.iter().map(|l| l.industry.as_deref())),
            top_regions: top_tokens(scored_leads.iter().map(|l| l.region.as_deref())),
        }
    }
}

fn summarize(sorted: &[f64]) -> Option<ScoreSummary> {
    let max = *sorted.last()?;
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    // nearest-rank percentile
    let rank = ((sorted.len() as f64) * 0.9).ceil() as usize;
    let p90 = sorted[rank.clamp(1, sorted.len()) - 1];
    Some(ScoreSummary { mean, p90, max })
}

fn top_tokens<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<TokenCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values.flatten() {
        let token = value.trim().to_lowercase();
        if !token.is_empty() {
            *counts.entry(token).or_default() += 1;
        }
    }

    let mut ranked: Vec<TokenCount> = counts
        .into_iter()
        .map(|(value, count)| TokenCount { value, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    ranked.truncate(TOP_N);
    ranked
}
