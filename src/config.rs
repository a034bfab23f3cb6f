use crate::utils::error::{AppError, AppResult};
use std::env;

const DEFAULT_CLUSTER: &str = "cluster0.rvrwrto.mongodb.net";
const DEFAULT_DB_NAME: &str = "researchDB";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_expires_in_hours: i64,
    /// Reject unauthenticated requests with 200 instead of 401.
    pub auth_legacy_status: bool,
}

impl Settings {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", p)))?,
            None => 5000,
        };

        let database_url = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => url,
            None => {
                let user = required("DB_USER")?;
                let pass = required("DB_PASS")?;
                let cluster = lookup("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
                format!(
                    "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                    user, pass, cluster
                )
            }
        };
        let database_name = lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let jwt_secret = required("ACCESS_TOKEN_SECRET")?;
        let jwt_expires_in_hours = match lookup("JWT_EXPIRES_IN_HOURS") {
            Some(h) => h.parse().map_err(|_| {
                AppError::Config(format!("JWT_EXPIRES_IN_HOURS is not a number: {}", h))
            })?,
            None => 1,
        };
        let auth_legacy_status = lookup("AUTH_LEGACY_STATUS")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url,
            database_name,
            jwt_secret,
            jwt_expires_in_hours,
            auth_legacy_status,
        })
    }

    /// Connection string with the password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        match (self.database_url.find("://"), self.database_url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &self.database_url[scheme_end + 3..at];
                let user = credentials.split(':').next().unwrap_or_default();
                format!(
                    "{}{}:****{}",
                    &self.database_url[..scheme_end + 3],
                    user,
                    &self.database_url[at..]
                )
            }
            _ => self.database_url.clone(),
        }
    }
}
