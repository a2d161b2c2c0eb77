//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the CorteYa API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: SQLite connection string of the local store (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `DIRECTORY_BASE_URL`: Base URL of the remote barbershop document store
//! - `BARBERSHOPS_FILE`: JSON file with the barbershops, used when no base URL is set
//! - `SLOT_MINUTES`: Booking slot step in minutes (default: 30)
//! - `TAKEN_SLOT_SCOPE`: `barbershop` or `global` (default: "barbershop")
//! - `TIMEZONE`: IANA time zone of the barbershops (default: "America/Argentina/Buenos_Aires")
//! - `LOYALTY_POLICY_FILE`: JSON loyalty policy replacing the built-in one

use std::{env, path::PathBuf};

use chrono_tz::Tz;
use corteya_core::{
    loyalty::LoyaltyPolicy,
    slots::{TakenScope, DEFAULT_SLOT_MINUTES},
};
use eyre::{eyre, Result, WrapErr};
use tracing::Level;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;

/// Where barbershop records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySource {
    /// Remote document store; must end with `/`.
    Remote(String),
    /// Local JSON document with the same shape as the remote `barbershops` node.
    File(PathBuf),
}

/// Configuration for the CorteYa API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// SQLite connection string of the local key-value store
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Barbershop directory backend
    pub directory: DirectorySource,

    /// Step between bookable slots
    pub slot_minutes: u32,

    /// Which reservations block a slot
    pub taken_scope: TakenScope,

    /// Zone used for "today" and for calendar links
    pub timezone: Tz,

    /// Optional loyalty policy document
    pub loyalty_policy_file: Option<PathBuf>,
}

/// Booking rules shared by the request handlers.
#[derive(Debug, Clone)]
pub struct BookingSettings {
    pub slot_minutes: u32,
    pub taken_scope: TakenScope,
    pub timezone: Tz,
    pub loyalty_policy: LoyaltyPolicy,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_SLOT_MINUTES,
            taken_scope: TakenScope::default(),
            timezone: DEFAULT_TIMEZONE,
            loyalty_policy: LoyaltyPolicy::default(),
        }
    }
}

fn parse_log_level(raw: &str) -> Level {
    match raw {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - Neither DIRECTORY_BASE_URL nor BARBERSHOPS_FILE is set
    /// - API_PORT, SLOT_MINUTES, TAKEN_SLOT_SCOPE or TIMEZONE is invalid
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = parse_log_level(&lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()));

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        // Directory settings
        let directory = match (lookup("DIRECTORY_BASE_URL"), lookup("BARBERSHOPS_FILE")) {
            (Some(url), _) if url.ends_with('/') => DirectorySource::Remote(url),
            (Some(url), _) => DirectorySource::Remote(format!("{}/", url)),
            (None, Some(path)) => DirectorySource::File(PathBuf::from(path)),
            (None, None) => {
                return Err(eyre!(
                    "Either DIRECTORY_BASE_URL or BARBERSHOPS_FILE must be set"
                ));
            }
        };

        // Booking settings
        let slot_minutes = match lookup("SLOT_MINUTES") {
            Some(raw) => raw.parse::<u32>().wrap_err("Invalid SLOT_MINUTES value")?,
            None => DEFAULT_SLOT_MINUTES,
        };
        if slot_minutes == 0 {
            return Err(eyre!("SLOT_MINUTES must be positive"));
        }

        let taken_scope = match lookup("TAKEN_SLOT_SCOPE") {
            Some(raw) => TakenScope::parse(&raw)
                .ok_or_else(|| eyre!("Invalid TAKEN_SLOT_SCOPE value: {}", raw))?,
            None => TakenScope::default(),
        };

        let timezone = match lookup("TIMEZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|e| eyre!("Invalid TIMEZONE value {}: {}", raw, e))?,
            None => DEFAULT_TIMEZONE,
        };

        let loyalty_policy_file = lookup("LOYALTY_POLICY_FILE").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            directory,
            slot_minutes,
            taken_scope,
            timezone,
            loyalty_policy_file,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the booking rules, reading the loyalty policy file if one is set.
    pub fn booking_settings(&self) -> Result<BookingSettings> {
        let loyalty_policy = match &self.loyalty_policy_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("Failed to read loyalty policy {}", path.display()))?;
                LoyaltyPolicy::from_json(&json)
                    .wrap_err_with(|| format!("Invalid loyalty policy {}", path.display()))?
            }
            None => LoyaltyPolicy::default(),
        };

        Ok(BookingSettings {
            slot_minutes: self.slot_minutes,
            taken_scope: self.taken_scope,
            timezone: self.timezone,
            loyalty_policy,
        })
    }
}
