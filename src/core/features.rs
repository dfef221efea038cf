use crate::domain::model::{CompanyRecord, FeatureVector, LeadRecord};

/// Encodes a (lead, company) pair. Budgets pass through unscaled and missing budgets
/// become `0.0`.
pub fn encode(lead: &LeadRecord, company: &CompanyRecord) -> FeatureVector {
    FeatureVector([
        lead.budget_normalized_euro.unwrap_or(0.0),
        company.typical_project_budget_euro.unwrap_or(0.0),
        match_flag(lead.region.as_deref(), company.region.as_deref()),
        match_flag(lead.industry.as_deref(), company.industry.as_deref()),
    ])
}

/// `1.0` when both tokens are present, non-empty and equal ignoring case.
pub fn match_flag(left: Option<&str>, right: Option<&str>) -> f64 {
    match (left, right) {
        (Some(l), Some(r)) if !l.is_empty() && l.to_lowercase() == r.to_lowercase() => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(region: &str, budget: f64) -> CompanyRecord {
        CompanyRecord {
            name: region.to_uppercase(),
            region: Some(region.to_string()),
            typical_project_budget_euro: Some(budget),
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_scenario() {
        let c1 = company("dach", 10000.0);
        let c2 = company("uki", 5000.0);
        let l1 = LeadRecord {
            id: Some(1),
            region: Some("dach".to_string()),
            budget_normalized_euro: Some(12000.0),
            ..Default::default()
        };

        assert_eq!(encode(&l1, &c1), FeatureVector([12000.0, 10000.0, 1.0, 0.0]));
        assert_eq!(encode(&l1, &c2), FeatureVector([12000.0, 5000.0, 0.0, 0.0]));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let lead = LeadRecord {
            region: Some("DACH".to_string()),
            industry: Some("SaaS".to_string()),
            ..Default::default()
        };
        let company = CompanyRecord {
            name: "Acme".to_string(),
            region: Some("dach".to_string()),
            industry: Some("saas".to_string()),
            ..Default::default()
        };

        let features = encode(&lead, &company);
        assert_eq!(features.region_match(), 1.0);
        assert_eq!(features.industry_match(), 1.0);
    }

    #[test]
    fn test_missing_or_empty_tokens_never_match() {
        assert_eq!(match_flag(None, None), 0.0);
        assert_eq!(match_flag(Some(""), Some("")), 0.0);
        assert_eq!(match_flag(Some("dach"), None), 0.0);
        assert_eq!(match_flag(None, Some("dach")), 0.0);
        assert_eq!(match_flag(Some("dach"), Some("uki")), 0.0);
    }

    #[test]
    fn test_missing_budgets_become_zero() {
        let features = encode(
            &LeadRecord::default(),
            &CompanyRecord {
                name: "Acme".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(features, FeatureVector([0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let lead = LeadRecord {
            region: Some("emea".to_string()),
            industry: Some("fintech".to_string()),
            budget_normalized_euro: Some(7321.5),
            ..Default::default()
        };
        let company = company("EMEA", 8000.0);

        let first = encode(&lead, &company);
        for _ in 0..100 {
            assert_eq!(encode(&lead, &company), first);
        }
    }
}
