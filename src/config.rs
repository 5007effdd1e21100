use std::{env, str::FromStr, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl Environment {
    /// Schema creation and seeding only run outside production.
    pub fn manages_schema(&self) -> bool {
        !matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "testing" | "test" => Ok(Self::Testing),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown APP_ENV '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub route_prefix: String,
    pub environment: Environment,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub request_timeout: Duration,
    pub json_logs: bool,
}

impl Config {
    pub fn init() -> Config {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let environment = match env::var("APP_ENV") {
            Ok(value) => value
                .parse()
                .unwrap_or_else(|err: String| panic!("{err}")),
            Err(_) => Environment::Development,
        };

        Config {
            database_url,
            port: parse_or("PORT", 8080),
            route_prefix: normalize_prefix(
                &env::var("ROUTE_PREFIX").unwrap_or_else(|_| "/posts/v1".to_string()),
            ),
            environment,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            db_acquire_timeout: Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 5)),
            request_timeout: Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 30)),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Route prefixes always start with `/` and never end with one.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        return "/posts/v1".to_string();
    }
    format!("/{trimmed}")
}
