//! Recommendation engine: maps a finished answer set to action plans.
//!
//! Rules are evaluated in a fixed order and fire independently; each
//! appends at most one recommendation. If none fire, the general volunteer
//! plan is returned on its own, so the output is never empty.

use serde::{Deserialize, Serialize};

use crate::quiz::answers::AnswerSet;
use crate::quiz::questions::ids;

/// Symbolic accent for a card. The front-end owns the actual colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Navy,
    Gold,
}

/// Which rule produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ShortCommitment,
    FoodDistribution,
    GrassrootsLeadership,
    DigitalInfrastructure,
    GeneralVolunteer,
}

impl RecommendationKind {
    /// Specific rules in evaluation order. The fallback is not listed.
    pub const RULES: [RecommendationKind; 4] = [
        Self::ShortCommitment,
        Self::FoodDistribution,
        Self::GrassrootsLeadership,
        Self::DigitalInfrastructure,
    ];

    /// Whether this rule fires for `answers`. The fallback never matches
    /// on its own; it is chosen only when nothing else fires.
    pub fn matches(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::ShortCommitment => {
                answers.includes(ids::AVAILABILITY, ids::SHORTEST_AVAILABILITY)
            }
            Self::FoodDistribution => answers.includes(ids::CAUSES, ids::FOOD_SECURITY),
            Self::GrassrootsLeadership => {
                answers.includes(ids::CAUSES, ids::COMMUNITY_ORGANIZING)
            }
            Self::DigitalInfrastructure => answers.includes(ids::SKILLS, ids::TECH_SKILLS),
            Self::GeneralVolunteer => false,
        }
    }

    /// Build the fixed card for this rule.
    pub fn recommendation(self) -> Recommendation {
        let (label, summary, accent, steps): (&str, &str, Accent, [&str; 3]) = match self {
            Self::ShortCommitment => (
                "Micro-volunteering",
                "Perfect for your schedule! Help with quick tasks like meal prep, delivery runs, or digital support.",
                Accent::Navy,
                [
                    "Sign up for our weekly meal prep sessions",
                    "Join the delivery coordination team",
                    "Offer social media support remotely",
                ],
            ),
            Self::FoodDistribution => (
                "Food Distribution Network",
                "Your passion for food security can help hundreds of families. Join our community kitchen and distribution teams.",
                Accent::Gold,
                [
                    "Volunteer at community food pantries",
                    "Coordinate neighborhood food shares",
                    "Help organize community gardens",
                ],
            ),
            Self::GrassrootsLeadership => (
                "Grassroots Leadership",
                "Your organizing skills are needed! Help build campaigns and mobilize community action.",
                Accent::Navy,
                [
                    "Join our monthly organizing meetings",
                    "Lead a neighborhood outreach team",
                    "Help plan community events",
                ],
            ),
            Self::DigitalInfrastructure => (
                "Digital Infrastructure",
                "Use your tech skills to amplify our impact! Build tools, manage platforms, and improve communication.",
                Accent::Gold,
                [
                    "Help maintain our community platform",
                    "Create digital resources and guides",
                    "Support social media campaigns",
                ],
            ),
            Self::GeneralVolunteer => (
                "General Volunteer",
                "There are many ways to contribute! Explore opportunities across all our programs.",
                Accent::Navy,
                [
                    "Attend our volunteer orientation",
                    "Try different roles to find your fit",
                    "Connect with experienced volunteers",
                ],
            ),
        };
        Recommendation {
            kind: self,
            label: label.to_string(),
            summary: summary.to_string(),
            accent,
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A recommendation card. Derived on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub label: String,
    pub summary: String,
    pub accent: Accent,
    pub steps: Vec<String>,
}

/// Evaluate the rule table against `answers`.
pub fn recommend(answers: &AnswerSet) -> Vec<Recommendation> {
    let mut recs: Vec<Recommendation> = RecommendationKind::RULES
        .iter()
        .filter(|rule| rule.matches(answers))
        .map(|rule| rule.recommendation())
        .collect();

    if recs.is_empty() {
        recs.push(RecommendationKind::GeneralVolunteer.recommendation());
    }
    recs
}
