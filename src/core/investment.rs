use crate::core::scoring::round2;
use crate::models::{GrantAward, InvestmentAnalysis, InvestmentRules, RenovationEstimate};

/// Calculates the financial viability of a renovation project:
/// labour cost, grant eligibility, net cost, and potential ROI.
#[derive(Debug, Clone)]
pub struct InvestmentCalculator {
    rules: InvestmentRules,
}

impl InvestmentCalculator {
    pub fn new(rules: InvestmentRules) -> Self {
        Self { rules }
    }

    /// Perform the full investment analysis for one property
    ///
    /// `market_average_price` is treated as the after-repair value.
    /// Monetary outputs are rounded to 2 decimal places here, at the
    /// boundary; intermediate arithmetic keeps full precision.
    pub fn calculate(
        &self,
        listed_price: f64,
        renovation: &RenovationEstimate,
        market_average_price: f64,
    ) -> InvestmentAnalysis {
        let materials_cost = renovation.total_cost;
        let labour_cost = materials_cost * self.rules.labour_cost_percentage;

        let grants = self.identify_grants(renovation);
        let total_grant_amount: f64 = grants.iter().map(|grant| grant.amount).sum();

        let total_project_cost = listed_price + materials_cost + labour_cost;
        let net_project_cost = total_project_cost - total_grant_amount;

        let after_repair_value = market_average_price;
        let potential_profit = after_repair_value - net_project_cost;

        // A non-positive denominator yields a defined 0, not a signal of
        // a good (or any) return
        let roi_percent = if net_project_cost > 0.0 {
            potential_profit / net_project_cost * 100.0
        } else {
            0.0
        };

        InvestmentAnalysis {
            labour_cost: round2(labour_cost),
            total_project_cost: round2(total_project_cost),
            grants,
            total_grant_amount: round2(total_grant_amount),
            net_project_cost: round2(net_project_cost),
            after_repair_value: round2(after_repair_value),
            potential_profit: round2(potential_profit),
            roi_percent: round2(roi_percent),
        }
    }

    /// Identify grants the project qualifies for, in deterministic order
    ///
    /// The two refurbishment grants are always awarded: every property
    /// the tool scores is a vacancy candidate by construction. Keyword
    /// grants match against the concatenated item + reason text, each
    /// keyword at most once per property.
    fn identify_grants(&self, renovation: &RenovationEstimate) -> Vec<GrantAward> {
        let mut grants = vec![
            GrantAward {
                name: "Vacant Property Refurbishment Grant".to_string(),
                amount: self.rules.vacant_property_grant,
                reason: "Assumed eligibility as a vacant home.".to_string(),
            },
            GrantAward {
                name: "Derelict Property Top-up".to_string(),
                amount: self.rules.derelict_top_up_grant,
                reason: "Potential top-up grant for derelict properties.".to_string(),
            },
        ];

        let renovation_text = renovation
            .items
            .iter()
            .map(|item| format!("{} {}", item.item.to_lowercase(), item.reason.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" ");

        for entry in &self.rules.grant_keywords {
            // The scanned text is lowercased, so the keyword must be too
            let keyword = entry.keyword.to_lowercase();
            if renovation_text.contains(&keyword) {
                grants.push(GrantAward {
                    name: format!("SEAI Grant - {}", capitalize(&keyword)),
                    amount: entry.amount,
                    reason: format!("Keyword '{}' found in renovation items.", keyword),
                });
            }
        }

        grants
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
