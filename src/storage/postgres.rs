use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info};

use super::schema::{self, COMPANY_COLUMNS, EVENT_COLUMNS, PERSON_COLUMNS};
use super::Storage;
use crate::config::DatabaseConfig;
use crate::error::{LoaderError, Result};
use crate::types::{Company, Event, Person, Table};

/// Postgres store holding a single connection for the life of the run
pub struct PgStorage {
    pool: PgPool,
    insert_event_sql: String,
    insert_company_sql: String,
    insert_person_sql: String,
}

impl PgStorage {
    /// Connect to Postgres. Failure here is fatal to the run.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!(host = %config.host, database = %config.name, "Connecting to Postgres");

        let options = PgConnectOptions::new()
            .host(&config.host)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| LoaderError::Database {
                message: format!("Failed to connect to database: {e}"),
            })?;

        Ok(Self {
            pool,
            insert_event_sql: schema::insert_sql(Table::Events, &EVENT_COLUMNS),
            insert_company_sql: schema::insert_sql(Table::Companies, &COMPANY_COLUMNS),
            insert_person_sql: schema::insert_sql(Table::People, &PERSON_COLUMNS),
        })
    }
}

/// Map a driver error, keeping constraint violations distinguishable.
fn insert_error(table: Table, err: sqlx::Error) -> LoaderError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(
            db_err.kind(),
            ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
        ) {
            return LoaderError::Constraint {
                table: table.name(),
                message: db_err.message().to_string(),
            };
        }
    }
    LoaderError::Database {
        message: format!("Failed to insert into {table}: {err}"),
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn create_schema(&self) -> Result<()> {
        info!("Creating tables if missing...");
        for ddl in schema::CREATE_ALL {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| LoaderError::Database {
                    message: format!("Failed to create table: {e}"),
                })?;
        }
        info!("Tables ready");
        Ok(())
    }

    async fn insert_event(&self, event: &Event) -> Result<i64> {
        let id: i32 = sqlx::query_scalar(&self.insert_event_sql)
            .bind(&event.event_logo_url)
            .bind(&event.event_name)
            .bind(event.event_start_date)
            .bind(event.event_end_date)
            .bind(&event.event_venue)
            .bind(&event.event_country)
            .bind(&event.event_description)
            .bind(&event.event_url)
            .bind(&event.event_industry)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(Table::Events, e))?;
        debug!(id, "Inserted event");
        Ok(i64::from(id))
    }

    async fn insert_company(&self, company: &Company) -> Result<i64> {
        let id: i32 = sqlx::query_scalar(&self.insert_company_sql)
            .bind(&company.company_name)
            .bind(&company.company_phone)
            .bind(&company.company_address)
            .bind(&company.company_industry)
            .bind(&company.company_overview)
            .bind(&company.homepage_url)
            .bind(&company.linkedin_company_url)
            .bind(&company.homepage_base_url)
            .bind(&company.company_logo_url_on_event_page)
            .bind(&company.company_logo_url)
            .bind(&company.company_logo_match_flag)
            .bind(&company.company_logo_text)
            .bind(&company.relation_to_event)
            .bind(company.company_revenue)
            .bind(company.min_employees)
            .bind(company.max_employees)
            .bind(company.company_founding_year)
            .bind(&company.event_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(Table::Companies, e))?;
        debug!(id, "Inserted company");
        Ok(i64::from(id))
    }

    async fn insert_person(&self, person: &Person) -> Result<i64> {
        let id: i32 = sqlx::query_scalar(&self.insert_person_sql)
            .bind(&person.first_name)
            .bind(&person.middle_name)
            .bind(&person.last_name)
            .bind(&person.job_title)
            .bind(&person.person_city)
            .bind(&person.person_state)
            .bind(&person.person_country)
            .bind(&person.email_pattern)
            .bind(&person.email)
            .bind(&person.homepage_base_url)
            .bind(&person.duration_in_current_job)
            .bind(&person.duration_in_current_company)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(Table::People, e))?;
        debug!(id, "Inserted person");
        Ok(i64::from(id))
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database connection closed");
    }
}
