/// Input file names, looked up under the data directory
pub const EVENTS_FILE: &str = "events_info.csv";
pub const COMPANIES_FILE: &str = "company_info.csv";
pub const PEOPLE_FILE: &str = "people_info.csv";

pub const DEFAULT_DATA_DIR: &str = "./data";

// Environment variables recognized by the loader
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Suggested labels for event tagging. The tagger may answer with others.
pub const CANDIDATE_INDUSTRIES: [&str; 12] = [
    "Oil & Gas",
    "Technology",
    "Finance",
    "Pharmaceuticals",
    "Retail",
    "Automotive",
    "Healthcare",
    "Education",
    "Manufacturing",
    "Real Estate",
    "Energy",
    "Telecommunications",
];

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const TAGGER_MODEL: &str = "gpt-3.5-turbo";
pub const TAGGER_TIMEOUT_SECS: u64 = 30;
