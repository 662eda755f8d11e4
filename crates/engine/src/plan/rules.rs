//! Deterministic keyword rules and the default plan.

use super::IssuePlan;

struct RulePlan {
    activity_type: &'static str,
    est_hours: u32,
    count: u32,
    skills: &'static [&'static str],
}

impl RulePlan {
    fn to_plan(&self) -> IssuePlan {
        IssuePlan {
            activity_type: self.activity_type.to_string(),
            est_hours: self.est_hours,
            count: self.count,
            skills: self.skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const CLEAN_UP: RulePlan = RulePlan {
    activity_type: "Clean-up Drive",
    est_hours: 4,
    count: 10,
    skills: &["physical_labor", "logistics"],
};

const MEDICAL: RulePlan = RulePlan {
    activity_type: "Medical Camp",
    est_hours: 6,
    count: 5,
    skills: &["medical", "management"],
};

const TEACHING: RulePlan = RulePlan {
    activity_type: "Teaching Session",
    est_hours: 2,
    count: 3,
    skills: &["teaching", "art"],
};

const GENERAL: RulePlan = RulePlan {
    activity_type: "General Awareness",
    est_hours: 3,
    count: 5,
    skills: &["management"],
};

/// Keyword table, checked in order.
const ISSUE_RULES: &[(&str, RulePlan)] = &[
    ("garbage", CLEAN_UP),
    ("waste", CLEAN_UP),
    ("health", MEDICAL),
    ("sick", MEDICAL),
    ("school", TEACHING),
    ("education", TEACHING),
];

/// First rule whose keyword appears in the description, case-insensitively.
///
/// Returns the matching keyword alongside its plan.
pub fn match_rule(description: &str) -> Option<(&'static str, IssuePlan)> {
    let lowered = description.to_lowercase();
    ISSUE_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(keyword, rule)| (*keyword, rule.to_plan()))
}

/// Plan used when nothing else applies.
pub fn default_plan() -> IssuePlan {
    GENERAL.to_plan()
}
