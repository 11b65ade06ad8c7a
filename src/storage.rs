#[cfg(feature = "db")]
pub mod postgres;
pub mod schema;

#[cfg(feature = "db")]
pub use postgres::PgStorage;

use crate::error::{LoaderError, Result};
use crate::types::{Company, Event, Person, Table};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Storage trait for persisting normalized rows. Each insert stands alone:
/// a failed row leaves earlier and later rows untouched.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create the three tables if they do not exist
    async fn create_schema(&self) -> Result<()>;

    // Insert operations return the generated row id
    async fn insert_event(&self, event: &Event) -> Result<i64>;
    async fn insert_company(&self, company: &Company) -> Result<i64>;
    async fn insert_person(&self, person: &Person) -> Result<i64>;

    /// Release the underlying connection
    async fn close(&self);
}

/// In-memory storage implementation for development/testing.
///
/// Enforces the same unique `event_url` and Companies → Events reference the
/// Postgres schema declares. NULL urls are exempt from both, as in SQL.
#[derive(Default)]
pub struct InMemoryStorage {
    events: Arc<Mutex<Vec<Event>>>,
    companies: Arc<Mutex<Vec<Company>>>,
    people: Arc<Mutex<Vec<Person>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn companies(&self) -> Vec<Company> {
        self.companies.lock().unwrap().clone()
    }

    pub fn people(&self) -> Vec<Person> {
        self.people.lock().unwrap().clone()
    }

    fn has_event_url(events: &[Event], url: &str) -> bool {
        events.iter().any(|e| e.event_url.as_deref() == Some(url))
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_schema(&self) -> Result<()> {
        debug!("In-memory storage needs no schema");
        Ok(())
    }

    async fn insert_event(&self, event: &Event) -> Result<i64> {
        let mut events = self.events.lock().unwrap();
        if let Some(url) = event.event_url.as_deref() {
            if Self::has_event_url(&events, url) {
                return Err(LoaderError::Constraint {
                    table: Table::Events.name(),
                    message: format!("duplicate key value violates unique constraint: event_url={url}"),
                });
            }
        }
        events.push(event.clone());
        debug!("Created event: {:?} with id {}", event.event_name, events.len());
        Ok(events.len() as i64)
    }

    async fn insert_company(&self, company: &Company) -> Result<i64> {
        if let Some(url) = company.event_url.as_deref() {
            let events = self.events.lock().unwrap();
            if !Self::has_event_url(&events, url) {
                return Err(LoaderError::Constraint {
                    table: Table::Companies.name(),
                    message: format!("foreign key violation: event_url={url} is not present in Events"),
                });
            }
        }
        let mut companies = self.companies.lock().unwrap();
        companies.push(company.clone());
        debug!("Created company: {:?} with id {}", company.company_name, companies.len());
        Ok(companies.len() as i64)
    }

    async fn insert_person(&self, person: &Person) -> Result<i64> {
        let mut people = self.people.lock().unwrap();
        people.push(person.clone());
        Ok(people.len() as i64)
    }

    async fn close(&self) {
        debug!("In-memory storage closed");
    }
}
