use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::Result;
use crate::input::{InputSet, InputTable};
use crate::normalize::{parse_date, parse_employee_range, parse_integer, parse_revenue, synthesize_email};
use crate::storage::Storage;
use crate::tagger::IndustryTagger;
use crate::types::{Company, Event, Person, RawCompanyRow, RawEventRow, RawPersonRow, Table};

/// A row the store refused
#[derive(Debug, Clone)]
pub struct RowFailure {
    /// 1-based position among the de-duplicated rows
    pub row: usize,
    pub error: String,
}

/// Outcome of loading one table
#[derive(Debug, Clone)]
pub struct TableReport {
    pub table: Table,
    pub read: usize,
    pub duplicates_dropped: usize,
    pub inserted: usize,
    pub failed: Vec<RowFailure>,
}

impl TableReport {
    fn new<T>(table: Table, input: &InputTable<T>) -> Self {
        Self {
            table,
            read: input.read,
            duplicates_dropped: input.duplicates_dropped,
            inserted: 0,
            failed: Vec::new(),
        }
    }

    fn record(&mut self, row: usize, result: Result<i64>) {
        match result {
            Ok(_) => {
                self.inserted += 1;
            }
            Err(e) => {
                error!(table = %self.table, row, error = %e, "Error inserting row");
                self.failed.push(RowFailure {
                    row,
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Result of a complete load run
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Events, Companies, People, in insertion order
    pub tables: Vec<TableReport>,
    pub tagging_failures: usize,
    pub revenue_failures: usize,
}

impl LoadReport {
    pub fn table(&self, table: Table) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == table)
    }

    pub fn total_failed(&self) -> usize {
        self.tables.iter().map(|t| t.failed.len()).sum()
    }
}

/// One-shot batch loader: transform every row, then insert Events, Companies
/// and People in that order.
pub struct Loader {
    storage: Arc<dyn Storage>,
    tagger: Arc<dyn IndustryTagger>,
}

impl Loader {
    pub fn new(storage: Arc<dyn Storage>, tagger: Arc<dyn IndustryTagger>) -> Self {
        Self { storage, tagger }
    }

    /// Read the three CSV files from `data_dir` and load them.
    pub async fn run_dir(&self, data_dir: &Path) -> Result<LoadReport> {
        let inputs = InputSet::read_dir(data_dir)?;
        Ok(self.run(inputs).await)
    }

    /// Load already-read inputs. Row failures are recorded, never returned.
    #[instrument(skip_all)]
    pub async fn run(&self, inputs: InputSet) -> LoadReport {
        info!("🔧 Normalizing rows...");

        let mut tagging_failures = 0;
        let mut events = Vec::with_capacity(inputs.events.rows.len());
        for raw in &inputs.events.rows {
            let (event, tagged) = self.normalize_event(raw).await;
            if !tagged {
                tagging_failures += 1;
            }
            events.push(event);
        }

        let mut revenue_failures = 0;
        let companies: Vec<Company> = inputs
            .companies
            .rows
            .iter()
            .map(|raw| {
                let (company, revenue_ok) = normalize_company(raw);
                if !revenue_ok {
                    revenue_failures += 1;
                }
                company
            })
            .collect();

        let people: Vec<Person> = inputs.people.rows.iter().map(normalize_person).collect();

        info!("💾 Inserting rows...");

        let mut events_report = TableReport::new(Table::Events, &inputs.events);
        for (i, event) in events.iter().enumerate() {
            events_report.record(i + 1, self.storage.insert_event(event).await);
        }

        let mut companies_report = TableReport::new(Table::Companies, &inputs.companies);
        for (i, company) in companies.iter().enumerate() {
            companies_report.record(i + 1, self.storage.insert_company(company).await);
        }

        let mut people_report = TableReport::new(Table::People, &inputs.people);
        for (i, person) in people.iter().enumerate() {
            people_report.record(i + 1, self.storage.insert_person(person).await);
        }

        let report = LoadReport {
            tables: vec![events_report, companies_report, people_report],
            tagging_failures,
            revenue_failures,
        };

        for t in &report.tables {
            info!(
                table = %t.table,
                read = t.read,
                duplicates_dropped = t.duplicates_dropped,
                inserted = t.inserted,
                failed = t.failed.len(),
                "Table loaded"
            );
        }
        if report.total_failed() > 0 {
            warn!("{} rows failed to insert", report.total_failed());
        }

        report
    }

    /// Normalize an event and tag it. The flag is false when tagging failed;
    /// the event is still returned, untagged.
    async fn normalize_event(&self, raw: &RawEventRow) -> (Event, bool) {
        let tagged = self
            .tagger
            .tag_event(raw.event_name.as_deref(), raw.event_description.as_deref())
            .await;

        let (event_industry, ok) = match tagged {
            Ok(tags) => (tags, true),
            Err(e) => {
                warn!(event = ?raw.event_name, error = %e, "Industry tagging failed; storing no tags");
                (None, false)
            }
        };

        let event = Event {
            event_logo_url: raw.event_logo_url.clone(),
            event_name: raw.event_name.clone(),
            event_start_date: parse_date(raw.event_start_date.as_deref()),
            event_end_date: parse_date(raw.event_end_date.as_deref()),
            event_venue: raw.event_venue.clone(),
            event_country: raw.event_country.clone(),
            event_description: raw.event_description.clone(),
            event_url: raw.event_url.clone(),
            event_industry,
        };
        (event, ok)
    }
}

/// Normalize a company row. The flag is false when revenue text was present
/// but unparseable; the revenue is then stored as no value.
pub fn normalize_company(raw: &RawCompanyRow) -> (Company, bool) {
    let (company_revenue, revenue_ok) = match parse_revenue(raw.company_revenue.as_deref()) {
        Ok(revenue) => (revenue, true),
        Err(e) => {
            warn!(company = ?raw.company_name, error = %e, "Unparseable revenue; storing no value");
            (None, false)
        }
    };

    let employees = parse_employee_range(raw.n_employees.as_deref());

    let company = Company {
        company_name: raw.company_name.clone(),
        company_phone: raw.company_phone.clone(),
        company_address: raw.company_address.clone(),
        company_industry: raw.company_industry.clone(),
        company_overview: raw.company_overview.clone(),
        homepage_url: raw.homepage_url.clone(),
        linkedin_company_url: raw.linkedin_company_url.clone(),
        homepage_base_url: raw.homepage_base_url.clone(),
        company_logo_url_on_event_page: raw.company_logo_url_on_event_page.clone(),
        company_logo_url: raw.company_logo_url.clone(),
        company_logo_match_flag: raw.company_logo_match_flag.clone(),
        company_logo_text: raw.company_logo_text.clone(),
        relation_to_event: raw.relation_to_event.clone(),
        company_revenue,
        min_employees: int_column("min_employees", employees.min),
        max_employees: int_column("max_employees", employees.max),
        company_founding_year: parse_integer("company_founding_year", raw.company_founding_year.as_deref()),
        event_url: raw.event_url.clone(),
    };
    (company, revenue_ok)
}

pub fn normalize_person(raw: &RawPersonRow) -> Person {
    let email = synthesize_email(
        raw.email_pattern.as_deref(),
        raw.first_name.as_deref(),
        raw.last_name.as_deref(),
        raw.homepage_base_url.as_deref(),
    );

    Person {
        first_name: raw.first_name.clone(),
        middle_name: raw.middle_name.clone(),
        last_name: raw.last_name.clone(),
        job_title: raw.job_title.clone(),
        person_city: raw.person_city.clone(),
        person_state: raw.person_state.clone(),
        person_country: raw.person_country.clone(),
        email_pattern: raw.email_pattern.clone(),
        email,
        homepage_base_url: raw.homepage_base_url.clone(),
        duration_in_current_job: raw.duration_in_current_job.clone(),
        duration_in_current_company: raw.duration_in_current_company.clone(),
    }
}

/// Narrow to the INT column width; out-of-range counts become no value.
fn int_column(field: &'static str, value: Option<i64>) -> Option<i32> {
    let value = value?;
    match i32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(field, value, "Value exceeds INT column range; storing no value");
            None
        }
    }
}
