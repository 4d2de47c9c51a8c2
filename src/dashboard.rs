//! Impact dashboard: hard-coded community impact figures.

use axum::extract::Query;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::recommendations::Accent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactStat {
    pub label: String,
    pub value: String,
    pub change: String,
    pub accent: Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeStatus {
    Active,
    Completed,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Initiative {
    pub title: String,
    pub description: String,
    pub participants: u32,
    pub impact: String,
    pub status: InitiativeStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessStory {
    pub title: String,
    pub description: String,
    /// Relative date as displayed, e.g. "2 weeks ago".
    pub date: String,
    pub emoji: String,
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub stats: Vec<ImpactStat>,
    pub initiatives: Vec<Initiative>,
    pub stories: Vec<SuccessStory>,
}

impl Dashboard {
    pub fn builtin() -> Self {
        let stat = |label: &str, value: &str, change: &str, accent| ImpactStat {
            label: label.to_string(),
            value: value.to_string(),
            change: change.to_string(),
            accent,
        };
        let initiative =
            |title: &str, description: &str, participants, impact: &str, status| Initiative {
                title: title.to_string(),
                description: description.to_string(),
                participants,
                impact: impact.to_string(),
                status,
            };
        let story = |title: &str, description: &str, date: &str, emoji: &str| SuccessStory {
            title: title.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            emoji: emoji.to_string(),
        };

        Self {
            stats: vec![
                stat("Active Volunteers", "10,247", "+12% this month", Accent::Navy),
                stat("Meals Shared", "45,892", "+24% this month", Accent::Gold),
                stat("Resources Distributed", "$2.4M", "+18% this month", Accent::Navy),
                stat("Families Housed", "1,523", "+8% this month", Accent::Gold),
            ],
            initiatives: vec![
                initiative(
                    "Community Food Pantry Network",
                    "Coordinating 15 neighborhood food pantries to serve 500+ families weekly.",
                    234,
                    "2,000+ meals/week",
                    InitiativeStatus::Active,
                ),
                initiative(
                    "Emergency Housing Response",
                    "Rapid response team providing temporary shelter and housing assistance.",
                    89,
                    "150 families housed",
                    InitiativeStatus::Active,
                ),
                initiative(
                    "Youth Mentorship Program",
                    "Connecting young people with mentors for education and career support.",
                    156,
                    "300+ youth served",
                    InitiativeStatus::Active,
                ),
                initiative(
                    "Community Garden Initiative",
                    "Building 10 new community gardens in underserved neighborhoods.",
                    312,
                    "50 tons of produce",
                    InitiativeStatus::Upcoming,
                ),
                initiative(
                    "Winter Warmth Campaign",
                    "Distributed coats, blankets, and heaters to those in need.",
                    445,
                    "1,200 families helped",
                    InitiativeStatus::Completed,
                ),
            ],
            stories: vec![
                story(
                    "Neighborhood Food Hub Thrives",
                    "What started as a small food share now serves 200 families weekly.",
                    "2 weeks ago",
                    "🌻",
                ),
                story(
                    "Emergency Housing Success",
                    "45 families found permanent housing through our rapid response team.",
                    "1 month ago",
                    "🏠",
                ),
                story(
                    "Youth Program Milestone",
                    "100% of mentored students graduated high school this year.",
                    "2 months ago",
                    "🎓",
                ),
            ],
        }
    }

    /// Keep only initiatives with `status`.
    pub fn with_status(mut self, status: InitiativeStatus) -> Self {
        self.initiatives.retain(|i| i.status == status);
        self
    }

    pub fn total_participants(&self) -> u32 {
        self.initiatives.iter().map(|i| i.participants).sum()
    }
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    status: Option<InitiativeStatus>,
}

#[derive(Serialize)]
struct DashboardView {
    #[serde(flatten)]
    dashboard: Dashboard,
    /// Participants across the listed initiatives.
    total_participants: u32,
}

/// GET /api/dashboard
async fn get_dashboard(Query(query): Query<DashboardQuery>) -> impl IntoResponse {
    let dashboard = match query.status {
        Some(status) => Dashboard::builtin().with_status(status),
        None => Dashboard::builtin(),
    };
    Json(DashboardView {
        total_participants: dashboard.total_participants(),
        dashboard,
    })
}

pub fn dashboard_routes() -> Router {
    Router::new().route("/api/dashboard", get(get_dashboard))
}
