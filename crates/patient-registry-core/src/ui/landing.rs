//! Landing page.

use super::Route;

/// One feature card on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
}

/// Static start page; holds no state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LandingPage;

impl LandingPage {
    pub const TITLE: &'static str = "Clinic Management System";
    pub const SUBTITLE: &'static str =
        "Manage patients, addresses and medical information simply and efficiently";

    pub const FEATURES: [FeatureCard; 4] = [
        FeatureCard {
            title: "Patients",
            description: "Register and manage complete patient information",
        },
        FeatureCard {
            title: "Addresses",
            description: "Keep address data organized and up to date",
        },
        FeatureCard {
            title: "Appointments",
            description: "Schedule and follow up medical appointments",
        },
        FeatureCard {
            title: "Reports",
            description: "View statistics and generate detailed reports",
        },
    ];

    /// Label and target of the main call to action.
    pub fn primary_action(&self) -> (&'static str, Route) {
        ("Manage Patients", Route::PatientList)
    }
}
