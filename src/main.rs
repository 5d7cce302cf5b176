use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;

use booksync_api::config::ApiConfig;
use booksync_availability::{AvailabilityConfig, WorkingHours};
use booksync_providers::{GoogleCalendar, OpenAiGenerator, WhatsAppSender};
use booksync_session::{Coordinator, CoordinatorConfig, InMemorySessionStore, LinearScript};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Wire the external collaborators
    let calendar = Arc::new(GoogleCalendar::new(
        config.google_calendar_id.clone(),
        config.google_access_token.clone(),
    ));
    let sender = Arc::new(WhatsAppSender::new(
        config.whatsapp_phone_number_id.clone(),
        config.whatsapp_token.clone(),
    ));

    // Assemble the session coordinator
    let coordinator_config = CoordinatorConfig {
        availability: AvailabilityConfig {
            working_hours: WorkingHours {
                start: config.working_hours_start,
                end: config.working_hours_end,
            },
            slot_interval_minutes: config.slot_interval_minutes,
            timezone: config.timezone,
        },
        ..CoordinatorConfig::default()
    };
    let mut coordinator = Coordinator::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(LinearScript),
        calendar,
        sender,
        coordinator_config,
    );
    if let Some(api_key) = &config.openai_api_key {
        coordinator = coordinator.with_generator(Arc::new(OpenAiGenerator::new(api_key.clone())));
    }

    // Start the webhook server
    booksync_api::start_server(config, Arc::new(coordinator)).await?;

    Ok(())
}
