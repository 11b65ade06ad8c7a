use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Raw rows mirror the CSV headers exactly. Empty cells deserialize to `None`,
// so derivations never see "".

/// One row of `events_info.csv`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawEventRow {
    pub event_logo_url: Option<String>,
    pub event_name: Option<String>,
    pub event_start_date: Option<String>,
    pub event_end_date: Option<String>,
    pub event_venue: Option<String>,
    pub event_country: Option<String>,
    pub event_description: Option<String>,
    pub event_url: Option<String>,
}

/// One row of `company_info.csv`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawCompanyRow {
    pub company_name: Option<String>,
    pub company_phone: Option<String>,
    pub company_address: Option<String>,
    pub company_industry: Option<String>,
    pub company_overview: Option<String>,
    pub homepage_url: Option<String>,
    pub linkedin_company_url: Option<String>,
    pub homepage_base_url: Option<String>,
    pub company_logo_url_on_event_page: Option<String>,
    pub company_logo_url: Option<String>,
    pub company_logo_match_flag: Option<String>,
    pub company_logo_text: Option<String>,
    pub relation_to_event: Option<String>,
    pub company_revenue: Option<String>,
    pub n_employees: Option<String>,
    pub company_founding_year: Option<String>,
    pub event_url: Option<String>,
}

/// One row of `people_info.csv`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RawPersonRow {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub person_city: Option<String>,
    pub person_state: Option<String>,
    pub person_country: Option<String>,
    pub email_pattern: Option<String>,
    pub homepage_base_url: Option<String>,
    pub duration_in_current_job: Option<String>,
    pub duration_in_current_company: Option<String>,
}

/// Event ready for the `Events` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub event_logo_url: Option<String>,
    pub event_name: Option<String>,
    pub event_start_date: Option<NaiveDate>,
    pub event_end_date: Option<NaiveDate>,
    pub event_venue: Option<String>,
    pub event_country: Option<String>,
    pub event_description: Option<String>,
    pub event_url: Option<String>,
    /// Comma-separated industry tags
    pub event_industry: Option<String>,
}

/// Company ready for the `Companies` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    pub company_name: Option<String>,
    pub company_phone: Option<String>,
    pub company_address: Option<String>,
    pub company_industry: Option<String>,
    pub company_overview: Option<String>,
    pub homepage_url: Option<String>,
    pub linkedin_company_url: Option<String>,
    pub homepage_base_url: Option<String>,
    pub company_logo_url_on_event_page: Option<String>,
    pub company_logo_url: Option<String>,
    pub company_logo_match_flag: Option<String>,
    pub company_logo_text: Option<String>,
    pub relation_to_event: Option<String>,
    /// Absolute currency units
    pub company_revenue: Option<f64>,
    pub min_employees: Option<i32>,
    /// `None` with `min_employees` set means open-ended
    pub max_employees: Option<i32>,
    pub company_founding_year: Option<i32>,
    /// References `Events.event_url`
    pub event_url: Option<String>,
}

/// Person ready for the `People` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub person_city: Option<String>,
    pub person_state: Option<String>,
    pub person_country: Option<String>,
    pub email_pattern: Option<String>,
    pub email: Option<String>,
    pub homepage_base_url: Option<String>,
    pub duration_in_current_job: Option<String>,
    pub duration_in_current_company: Option<String>,
}

/// Target table names, in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Events,
    Companies,
    People,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Events => "Events",
            Table::Companies => "Companies",
            Table::People => "People",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
