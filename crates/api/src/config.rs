//! # API Configuration Module
//!
//! Loads all process configuration from environment variables, with defaults
//! where sensible.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: bind address (default "0.0.0.0")
//! - `API_PORT`: listen port (default 3000)
//! - `LOG_LEVEL`: trace | debug | info | warn | error (default "info")
//! - `VERIFY_TOKEN`: webhook verification token (required)
//! - `GOOGLE_CALENDAR_ID`: calendar to read and book against (required)
//! - `GOOGLE_ACCESS_TOKEN`: bearer token for the Calendar API (required)
//! - `WHATSAPP_PHONE_NUMBER_ID`: sending phone number id (required)
//! - `WHATSAPP_TOKEN`: bearer token for the WhatsApp Cloud API (required)
//! - `OPENAI_API_KEY`: enables natural-language phrasing when set
//! - `BOOKING_TIMEZONE`: slot-grid timezone (default "Europe/Zurich")
//! - `WORKING_HOURS_START` / `WORKING_HOURS_END`: local hours (default 9 / 18)
//! - `SLOT_INTERVAL_MINUTES`: grid step (default 30)
//! - `API_REQUEST_TIMEOUT_SECONDS`: request timeout (default 30)

use std::env;

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// Configuration for the booksync webhook server and its providers.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub log_level: Level,

    /// Token echoed back during the Meta webhook handshake.
    pub verify_token: String,

    pub google_calendar_id: String,
    pub google_access_token: String,
    pub whatsapp_phone_number_id: String,
    pub whatsapp_token: String,
    /// Optional: without it, replies use the scripted wording only.
    pub openai_api_key: Option<String>,

    /// Timezone the slot grid's wall-clock times are interpreted in.
    pub timezone: Tz,
    pub working_hours_start: u32,
    pub working_hours_end: u32,
    pub slot_interval_minutes: i64,

    /// Request timeout in seconds.
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Creates an ApiConfig from environment variables.
    pub fn from_env() -> Result<Self> {
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let verify_token = env::var("VERIFY_TOKEN")
            .map_err(|_| eyre!("VERIFY_TOKEN environment variable not set"))?;
        let google_calendar_id = env::var("GOOGLE_CALENDAR_ID")
            .map_err(|_| eyre!("GOOGLE_CALENDAR_ID environment variable not set"))?;
        let google_access_token = env::var("GOOGLE_ACCESS_TOKEN")
            .map_err(|_| eyre!("GOOGLE_ACCESS_TOKEN environment variable not set"))?;
        let whatsapp_phone_number_id = env::var("WHATSAPP_PHONE_NUMBER_ID")
            .map_err(|_| eyre!("WHATSAPP_PHONE_NUMBER_ID environment variable not set"))?;
        let whatsapp_token = env::var("WHATSAPP_TOKEN")
            .map_err(|_| eyre!("WHATSAPP_TOKEN environment variable not set"))?;
        let openai_api_key = env::var("OPENAI_API_KEY").ok();

        let timezone: Tz = env::var("BOOKING_TIMEZONE")
            .unwrap_or_else(|_| "Europe/Zurich".to_string())
            .parse()
            .map_err(|e| eyre!("Invalid BOOKING_TIMEZONE: {e}"))?;
        let working_hours_start = env::var("WORKING_HOURS_START")
            .unwrap_or_else(|_| "9".to_string())
            .parse()
            .wrap_err("Invalid WORKING_HOURS_START value")?;
        let working_hours_end = env::var("WORKING_HOURS_END")
            .unwrap_or_else(|_| "18".to_string())
            .parse()
            .wrap_err("Invalid WORKING_HOURS_END value")?;
        let slot_interval_minutes = env::var("SLOT_INTERVAL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .wrap_err("Invalid SLOT_INTERVAL_MINUTES value")?;

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            log_level,
            verify_token,
            google_calendar_id,
            google_access_token,
            whatsapp_phone_number_id,
            whatsapp_token,
            openai_api_key,
            timezone,
            working_hours_start,
            working_hours_end,
            slot_interval_minutes,
            request_timeout,
        })
    }

    /// Returns the server bind address, e.g. "0.0.0.0:3000".
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
