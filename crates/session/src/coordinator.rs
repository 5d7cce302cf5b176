use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use booksync_availability::{AvailabilityConfig, available_slots, render_slots_by_day};
use booksync_core::collaborators::{CalendarClient, MessageSender, ReplyGenerator};
use booksync_core::errors::{BookingError, BookingResult};
use booksync_core::models::{AvailableSlot, InboundMessage, Session, TurnRole};

use crate::dedup::{DedupConfig, DedupGate};
use crate::script::{ReplyAction, ScriptPolicy};
use crate::store::SessionStore;

const APOLOGY: &str = "Sorry, something went wrong on our side. Please try again in a moment.";
const ACKNOWLEDGMENT: &str = "Thank you! We look forward to seeing you.";
const FAREWELL: &str = "Goodbye! Message me any time to book a new appointment.";
const NO_AVAILABILITY: &str =
    "I'm sorry, there are no open slots in the coming days. Please check back soon.";
const RESTART: &str =
    "Sorry, I lost track of the slot we discussed. Let's start over: when would you like to come in?";

/// Tunables for message handling.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub availability: AvailabilityConfig,
    pub dedup: DedupConfig,
    /// How far ahead slot proposals look.
    pub window_days: i64,
    /// Timeout applied to every external collaborator call. A hung calendar
    /// or messaging call must not stall the gate for other correspondents.
    pub call_timeout: Duration,
    /// Event title used when booking.
    pub booking_title: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            availability: AvailabilityConfig::default(),
            dedup: DedupConfig::default(),
            window_days: 7,
            call_timeout: Duration::from_secs(15),
            booking_title: "Beauty Salon Appointment".to_string(),
        }
    }
}

/// What an action produced, and how the session moves afterwards.
struct Outcome {
    reply: String,
    /// Whether the script advances to the transition's next step.
    advance: bool,
    /// Whether the session is discarded so the next message starts fresh.
    reset: bool,
}

impl Outcome {
    fn advance(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            advance: true,
            reset: false,
        }
    }

    fn stay(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            advance: false,
            reset: false,
        }
    }
}

/// Drives one correspondent's conversation from admission to reply.
///
/// Processing is serialized per correspondent through a keyed mutex, so
/// exactly one transition is ever active for a given correspondent; messages
/// from different correspondents run in parallel.
pub struct Coordinator {
    store: Arc<dyn SessionStore>,
    script: Arc<dyn ScriptPolicy>,
    calendar: Arc<dyn CalendarClient>,
    sender: Arc<dyn MessageSender>,
    generator: Option<Arc<dyn ReplyGenerator>>,
    dedup: DedupGate,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    config: CoordinatorConfig,
}

impl Coordinator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        script: Arc<dyn ScriptPolicy>,
        calendar: Arc<dyn CalendarClient>,
        sender: Arc<dyn MessageSender>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            store,
            script,
            calendar,
            sender,
            generator: None,
            dedup: DedupGate::new(config.dedup.clone()),
            locks: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Attaches a text generator used to phrase slot proposals naturally.
    /// Without one (or when it fails) the scripted wording is used.
    pub fn with_generator(mut self, generator: Arc<dyn ReplyGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Handles one inbound message end to end: admission, script advance,
    /// side effects, and the outgoing reply.
    ///
    /// Returns `Ok(None)` when the message was rejected at admission (stale
    /// or duplicate); those produce no reply by design.
    pub async fn handle_message(&self, message: &InboundMessage) -> BookingResult<Option<String>> {
        // The key is recorded before any reply work, so a failure below
        // cannot let a redelivery of the same message through.
        if let Err(err) = self
            .dedup
            .admit(&message.correspondent_id, &message.text, message.timestamp)
            .await
        {
            if err.is_admission_rejection() {
                debug!(
                    correspondent_id = %message.correspondent_id,
                    reason = %err,
                    "message not admitted"
                );
                return Ok(None);
            }
            return Err(err);
        }

        let lock = self.correspondent_lock(&message.correspondent_id).await;
        let _guard = lock.lock().await;

        let mut session = self
            .store
            .get(&message.correspondent_id)
            .await
            .unwrap_or_default();
        session.push_turn(TurnRole::User, &message.text);

        let transition = self.script.decide(session.step, &message.text);
        let outcome = match self.perform(transition.action, &mut session).await {
            Ok(outcome) => outcome,
            Err(BookingError::Upstream(report)) => {
                // Logged and answered with a generic apology; the step does
                // not advance and the core never retries on its own.
                warn!(
                    correspondent_id = %message.correspondent_id,
                    error = %report,
                    "collaborator call failed"
                );
                Outcome::stay(APOLOGY)
            }
            Err(other) => return Err(other),
        };

        session.push_turn(TurnRole::Assistant, &outcome.reply);
        if outcome.advance {
            session.step = transition.next;
        }
        if outcome.reset {
            self.store.delete(&message.correspondent_id).await;
        } else {
            self.store.put(&message.correspondent_id, session).await;
        }

        // Fire-and-forget: a send failure is logged, never retried here.
        if let Err(err) = self
            .with_timeout(
                self.sender
                    .send_reply(&message.correspondent_id, &outcome.reply),
            )
            .await
        {
            warn!(
                correspondent_id = %message.correspondent_id,
                error = %err,
                "failed to send reply"
            );
        }

        Ok(Some(outcome.reply))
    }

    async fn perform(&self, action: ReplyAction, session: &mut Session) -> BookingResult<Outcome> {
        match action {
            ReplyAction::ProposeSlot => self.propose_slot(session).await,
            ReplyAction::ConfirmBooking => self.confirm_booking(session).await,
            ReplyAction::Acknowledge => Ok(Outcome::advance(ACKNOWLEDGMENT)),
            ReplyAction::Farewell => Ok(Outcome {
                reply: FAREWELL.to_string(),
                advance: true,
                reset: true,
            }),
        }
    }

    /// Queries availability over the proposal window and offers the earliest
    /// open slot, pinning it on the session so confirmation books exactly
    /// the instants that were proposed.
    async fn propose_slot(&self, session: &mut Session) -> BookingResult<Outcome> {
        let now = Utc::now();
        let tz = self.config.availability.timezone;
        let window_start = now.with_timezone(&tz).date_naive();
        let window_end = (now + ChronoDuration::days(self.config.window_days))
            .with_timezone(&tz)
            .date_naive();

        // The grid runs through the whole last local day, which can end
        // after `now + window_days` in absolute time; the busy query must
        // reach at least that far. When a transition swallows midnight the
        // fallback over-fetches, which only removes more slots.
        let horizon = window_end
            .succ_opt()
            .and_then(|day| day.and_time(NaiveTime::MIN).and_local_timezone(tz).earliest())
            .map(|midnight| midnight.with_timezone(&Utc))
            .unwrap_or_else(|| now + ChronoDuration::days(self.config.window_days + 2));

        let busy = self
            .with_timeout(self.calendar.busy_intervals(now, horizon))
            .await?;
        let slots = available_slots(&busy, window_start, window_end, &self.config.availability)?;

        // The grid covers whole days; slots earlier than "now" on the first
        // day are not offerable.
        let upcoming: Vec<AvailableSlot> =
            slots.into_iter().filter(|slot| slot.start > now).collect();

        let Some(slot) = upcoming.first().cloned() else {
            // Nothing to offer: stay at the greeting so a later message
            // queries availability again.
            return Ok(Outcome::stay(NO_AVAILABILITY));
        };

        let scripted = format!(
            "Hi! The earliest open slot is {} at {}. Shall I book it for you?",
            slot.date, slot.local_time
        );
        let reply = match &self.generator {
            Some(generator) => {
                let prompt = format!(
                    "You are a friendly beauty salon booking assistant.\n\
                     {}\n\
                     Offer the customer exactly one slot: {} at {}. \
                     Ask them to confirm it.",
                    render_slots_by_day(&upcoming),
                    slot.date,
                    slot.local_time
                );
                match self.with_timeout(generator.generate(&prompt)).await {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(error = %err, "text generation failed, using scripted proposal");
                        scripted
                    }
                }
            }
            None => scripted,
        };

        session.proposed_slot = Some(slot);
        Ok(Outcome::advance(reply))
    }

    /// Books the slot pinned at the greeting step and confirms it.
    async fn confirm_booking(&self, session: &mut Session) -> BookingResult<Outcome> {
        let Some(slot) = session.proposed_slot.clone() else {
            // No pinned slot to book; discard the session so the next
            // message starts a fresh cycle.
            return Ok(Outcome {
                reply: RESTART.to_string(),
                advance: false,
                reset: true,
            });
        };

        self.with_timeout(self.calendar.book_slot(
            &self.config.booking_title,
            slot.start,
            slot.end,
        ))
        .await?;

        info!(date = %slot.date, time = %slot.local_time, "appointment booked");
        Ok(Outcome::advance(format!(
            "✅ Your appointment is booked for {} at {}.",
            slot.date, slot.local_time
        )))
    }

    /// Number of correspondents with a lock entry still keyed.
    pub async fn active_locks(&self) -> usize {
        self.locks.lock().await.len()
    }

    async fn correspondent_lock(&self, correspondent_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        // An entry whose only holder is this map belongs to a finished
        // handler; sweeping here keeps the map bounded by the number of
        // correspondents currently in flight.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(correspondent_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn with_timeout<T>(
        &self,
        call: impl Future<Output = BookingResult<T>> + Send,
    ) -> BookingResult<T> {
        match tokio::time::timeout(self.config.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(BookingError::upstream(eyre::eyre!(
                "external call timed out after {:?}",
                self.config.call_timeout
            ))),
        }
    }
}
