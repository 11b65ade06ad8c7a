//! Target table definitions and the column order used for inserts.

use crate::types::Table;

pub const CREATE_EVENTS: &str = "
CREATE TABLE IF NOT EXISTS Events (
    event_id SERIAL PRIMARY KEY,
    event_logo_url TEXT,
    event_name TEXT,
    event_start_date DATE,
    event_end_date DATE,
    event_venue TEXT,
    event_country TEXT,
    event_description TEXT,
    event_url TEXT UNIQUE,
    event_industry TEXT
)";

pub const CREATE_COMPANIES: &str = "
CREATE TABLE IF NOT EXISTS Companies (
    company_id SERIAL PRIMARY KEY,
    company_name TEXT,
    company_phone TEXT,
    company_address TEXT,
    company_industry TEXT,
    company_overview TEXT,
    homepage_url TEXT,
    linkedin_company_url TEXT,
    homepage_base_url TEXT,
    company_logo_url_on_event_page TEXT,
    company_logo_url TEXT,
    company_logo_match_flag TEXT,
    company_logo_text TEXT,
    relation_to_event TEXT,
    company_revenue FLOAT,
    min_employees INT,
    max_employees INT,
    company_founding_year INT,
    event_url TEXT,
    FOREIGN KEY(event_url) REFERENCES Events(event_url)
)";

pub const CREATE_PEOPLE: &str = "
CREATE TABLE IF NOT EXISTS People (
    person_id SERIAL PRIMARY KEY,
    first_name TEXT,
    middle_name TEXT,
    last_name TEXT,
    job_title TEXT,
    person_city TEXT,
    person_state TEXT,
    person_country TEXT,
    email_pattern TEXT,
    email TEXT,
    homepage_base_url TEXT,
    duration_in_current_job TEXT,
    duration_in_current_company TEXT
)";

/// DDL in dependency order: Companies references Events.
pub const CREATE_ALL: [&str; 3] = [CREATE_EVENTS, CREATE_COMPANIES, CREATE_PEOPLE];

pub const EVENT_COLUMNS: [&str; 9] = [
    "event_logo_url",
    "event_name",
    "event_start_date",
    "event_end_date",
    "event_venue",
    "event_country",
    "event_description",
    "event_url",
    "event_industry",
];

pub const COMPANY_COLUMNS: [&str; 18] = [
    "company_name",
    "company_phone",
    "company_address",
    "company_industry",
    "company_overview",
    "homepage_url",
    "linkedin_company_url",
    "homepage_base_url",
    "company_logo_url_on_event_page",
    "company_logo_url",
    "company_logo_match_flag",
    "company_logo_text",
    "relation_to_event",
    "company_revenue",
    "min_employees",
    "max_employees",
    "company_founding_year",
    "event_url",
];

pub const PERSON_COLUMNS: [&str; 12] = [
    "first_name",
    "middle_name",
    "last_name",
    "job_title",
    "person_city",
    "person_state",
    "person_country",
    "email_pattern",
    "email",
    "homepage_base_url",
    "duration_in_current_job",
    "duration_in_current_company",
];

fn id_column(table: Table) -> &'static str {
    match table {
        Table::Events => "event_id",
        Table::Companies => "company_id",
        Table::People => "person_id",
    }
}

/// `INSERT ... RETURNING <id>` with `$n` placeholders in column order.
pub fn insert_sql(table: Table, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table.name(),
        columns.join(", "),
        placeholders,
        id_column(table)
    )
}
