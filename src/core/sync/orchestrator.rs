//! Sync orchestrator - fetch, map, resolve, upsert
//!
//! One run pulls the batch from the appointment source and walks it strictly
//! in order. A failed fetch aborts the run; a failure on one appointment is
//! counted and the run moves on.

use super::summary::SyncResult;
use crate::adapters::google::{CalendarGateway, GoogleCalendarClient};
use crate::adapters::source::{AppointmentSource, HttpAppointmentSource};
use crate::config::{BridgeConfig, ExistingEventPolicy};
use crate::core::mapper::map_appointment;
use crate::core::resolver::DuplicateResolver;
use crate::core::writer::{CalendarWriter, UpsertOutcome};
use crate::domain::{Result, SourceAppointment};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

/// Sync orchestrator
pub struct SyncOrchestrator {
    source: Arc<dyn AppointmentSource>,
    resolver: DuplicateResolver,
    writer: CalendarWriter,
    // Runs are serialized so two triggers cannot both create the same event
    run_lock: Mutex<()>,
}

impl SyncOrchestrator {
    /// Create an orchestrator over explicit adapters
    pub fn new(
        source: Arc<dyn AppointmentSource>,
        calendar: Arc<dyn CalendarGateway>,
        policy: ExistingEventPolicy,
        dry_run: bool,
    ) -> Self {
        Self {
            source,
            resolver: DuplicateResolver::new(calendar.clone()),
            writer: CalendarWriter::new(calendar, policy).with_dry_run(dry_run),
            run_lock: Mutex::new(()),
        }
    }

    /// Create an orchestrator with the production HTTP adapters
    ///
    /// # Errors
    ///
    /// Fails if either client cannot be built or the Google credentials
    /// cannot be loaded.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        let source = Arc::new(HttpAppointmentSource::new(&config.source)?);
        let calendar = Arc::new(GoogleCalendarClient::from_config(&config.calendar)?);

        tracing::debug!(
            source_url = %source.base_url(),
            calendar_id = %calendar.calendar_id(),
            policy = %config.calendar.existing_event_policy,
            dry_run = config.sync.dry_run,
            "Sync orchestrator configured"
        );

        Ok(Self::new(
            source,
            calendar,
            config.calendar.existing_event_policy,
            config.sync.dry_run,
        ))
    }

    /// Execute one sync run
    ///
    /// Waits for any run already in progress on this orchestrator.
    ///
    /// # Errors
    ///
    /// Returns the fetch error
    /// ([`SourceUnavailable`](crate::domain::BridgeError::SourceUnavailable) or
    /// [`MalformedResponse`](crate::domain::BridgeError::MalformedResponse))
    /// when the batch cannot be fetched. Per-appointment failures never
    /// surface here; they are counted in the returned [`SyncResult`].
    pub async fn run_sync(&self, updated_since: Option<DateTime<Utc>>) -> Result<SyncResult> {
        let span = tracing::info_span!("sync_run", run_id = %Uuid::new_v4());
        self.run_locked(updated_since).instrument(span).await
    }

    async fn run_locked(&self, updated_since: Option<DateTime<Utc>>) -> Result<SyncResult> {
        let _guard = self.run_lock.lock().await;
        let start_time = Instant::now();

        tracing::info!(
            updated_since = ?updated_since,
            "Starting sync run"
        );

        let appointments = match self.source.fetch(updated_since).await {
            Ok(appointments) => appointments,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch appointments, aborting sync");
                return Err(e);
            }
        };

        let mut result = SyncResult::new(appointments.len());

        for appointment in &appointments {
            self.sync_one(appointment, &mut result).await;
        }

        let result = result.with_duration(start_time.elapsed());
        result.log_summary();

        Ok(result)
    }

    /// Map, resolve and upsert a single appointment
    async fn process(&self, appointment: &SourceAppointment) -> Result<UpsertOutcome> {
        let event = map_appointment(appointment)?;
        let existing = self.resolver.find_existing(&appointment.id).await?;
        self.writer.upsert(&event, existing.as_ref()).await
    }

    async fn sync_one(&self, appointment: &SourceAppointment, result: &mut SyncResult) {
        match self.process(appointment).await {
            Ok(outcome) => {
                tracing::debug!(
                    appointment_id = %appointment.id,
                    outcome = %outcome,
                    "Appointment synced"
                );
                result.record_outcome(outcome);
            }
            Err(e) => {
                tracing::warn!(
                    appointment_id = %appointment.id,
                    error = %e,
                    "Failed to sync appointment"
                );
                result.record_failure(&appointment.id, &e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AppointmentId, BridgeError, CalendarEvent, EventId, ExistingEvent,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, FixedOffset};
    use std::sync::Mutex as StdMutex;

    enum SourceBehavior {
        Batch(Vec<SourceAppointment>),
        Down,
    }

    struct FakeSource(SourceBehavior);

    #[async_trait]
    impl AppointmentSource for FakeSource {
        async fn fetch(&self, _: Option<DateTime<Utc>>) -> Result<Vec<SourceAppointment>> {
            match &self.0 {
                SourceBehavior::Batch(items) => Ok(items.clone()),
                SourceBehavior::Down => Err(BridgeError::SourceUnavailable(
                    "Appointment source returned HTTP 500".to_string(),
                )),
            }
        }

        fn base_url(&self) -> &str {
            "http://fake"
        }
    }

    /// In-memory calendar keyed by event id
    #[derive(Default)]
    struct MemoryCalendar {
        events: StdMutex<Vec<(EventId, CalendarEvent)>>,
        failing_ids: Vec<&'static str>,
        next_id: StdMutex<usize>,
    }

    impl MemoryCalendar {
        fn event_count(&self) -> usize {
            self.events.lock().unwrap().len()
        }

        fn check(&self, source_id: &str) -> Result<()> {
            if self.failing_ids.iter().any(|id| *id == source_id) {
                return Err(BridgeError::CalendarUnavailable(format!(
                    "simulated outage for {source_id}"
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CalendarGateway for MemoryCalendar {
        async fn find_by_source_id(&self, source_id: &AppointmentId) -> Result<Vec<ExistingEvent>> {
            self.check(source_id.as_str())?;
            let events = self.events.lock().unwrap();
            Ok(events
                .iter()
                .filter(|(_, e)| e.source_appointment_id() == source_id.as_str())
                .map(|(id, e)| {
                    serde_json::from_value(serde_json::json!({
                        "id": id,
                        "summary": e.summary,
                        "description": e.description,
                        "start": e.start,
                        "end": e.end,
                    }))
                    .unwrap()
                })
                .collect())
        }

        async fn insert_event(&self, event: &CalendarEvent) -> Result<EventId> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let id = EventId::new(format!("evt_{next}")).unwrap();
            self.events
                .lock()
                .unwrap()
                .push((id.clone(), event.clone()));
            Ok(id)
        }

        async fn update_event(&self, event_id: &EventId, event: &CalendarEvent) -> Result<EventId> {
            let mut events = self.events.lock().unwrap();
            if let Some(slot) = events.iter_mut().find(|(id, _)| id == event_id) {
                slot.1 = event.clone();
            }
            Ok(event_id.clone())
        }

        fn calendar_id(&self) -> &str {
            "memory"
        }
    }

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn appt(id: &str, start: &str, end: &str) -> SourceAppointment {
        SourceAppointment::new(AppointmentId::new(id).unwrap(), "Checkup", ts(start), ts(end))
    }

    fn orchestrator(
        source: SourceBehavior,
        calendar: Arc<MemoryCalendar>,
        policy: ExistingEventPolicy,
    ) -> SyncOrchestrator {
        SyncOrchestrator::new(Arc::new(FakeSource(source)), calendar, policy, false)
    }

    fn batch() -> Vec<SourceAppointment> {
        vec![
            appt("apt_1", "2026-02-20T10:00:00+00:00", "2026-02-20T10:30:00+00:00"),
            appt("apt_2", "2026-02-21T09:00:00+01:00", "2026-02-21T10:00:00+01:00"),
        ]
    }

    #[tokio::test]
    async fn test_first_run_creates_second_run_updates() {
        let calendar = Arc::new(MemoryCalendar::default());
        let sync = orchestrator(
            SourceBehavior::Batch(batch()),
            calendar.clone(),
            ExistingEventPolicy::Update,
        );

        let first = sync.run_sync(None).await.unwrap();
        assert_eq!((first.fetched, first.created, first.updated), (2, 2, 0));

        let second = sync.run_sync(None).await.unwrap();
        assert_eq!((second.fetched, second.created, second.updated), (2, 0, 2));
        assert_eq!(second.skipped, 0);
        assert_eq!(calendar.event_count(), 2);
    }

    #[tokio::test]
    async fn test_update_if_changed_skips_on_rerun() {
        let calendar = Arc::new(MemoryCalendar::default());
        let sync = orchestrator(
            SourceBehavior::Batch(batch()),
            calendar.clone(),
            ExistingEventPolicy::UpdateIfChanged,
        );

        sync.run_sync(None).await.unwrap();
        let second = sync.run_sync(None).await.unwrap();

        assert_eq!(second.skipped, 2);
        assert_eq!(second.processed(), second.fetched);
    }

    #[tokio::test]
    async fn test_invalid_appointment_counted_and_batch_continues() {
        let mut items = batch();
        items.insert(
            1,
            appt("apt_bad", "2026-02-20T11:00:00+00:00", "2026-02-20T10:00:00+00:00"),
        );

        let calendar = Arc::new(MemoryCalendar::default());
        let sync = orchestrator(
            SourceBehavior::Batch(items),
            calendar.clone(),
            ExistingEventPolicy::Update,
        );

        let result = sync.run_sync(None).await.unwrap();

        assert_eq!(result.fetched, 3);
        assert_eq!(result.created, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("apt_bad: "));
        assert_eq!(result.processed(), result.fetched);
    }

    #[tokio::test]
    async fn test_calendar_failure_is_per_record() {
        let calendar = Arc::new(MemoryCalendar {
            failing_ids: vec!["apt_1"],
            ..Default::default()
        });
        let sync = orchestrator(
            SourceBehavior::Batch(batch()),
            calendar.clone(),
            ExistingEventPolicy::Update,
        );

        let result = sync.run_sync(None).await.unwrap();

        assert_eq!(result.failed, 1);
        assert_eq!(result.created, 1);
        assert!(result.errors[0].contains("simulated outage"));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts() {
        let calendar = Arc::new(MemoryCalendar::default());
        let sync = orchestrator(
            SourceBehavior::Down,
            calendar.clone(),
            ExistingEventPolicy::Update,
        );

        let err = sync.run_sync(None).await.unwrap_err();
        assert!(matches!(err, BridgeError::SourceUnavailable(_)));
        assert_eq!(calendar.event_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let calendar = Arc::new(MemoryCalendar::default());
        let sync = orchestrator(
            SourceBehavior::Batch(vec![]),
            calendar,
            ExistingEventPolicy::Update,
        );

        let result = sync.run_sync(None).await.unwrap();
        assert_eq!(result, SyncResult::new(0).with_duration(result.duration));
    }

    #[tokio::test]
    async fn test_dry_run_reports_without_writing() {
        let calendar = Arc::new(MemoryCalendar::default());
        let sync = SyncOrchestrator::new(
            Arc::new(FakeSource(SourceBehavior::Batch(batch()))),
            calendar.clone(),
            ExistingEventPolicy::Update,
            true,
        );

        let result = sync.run_sync(None).await.unwrap();
        assert_eq!(result.created, 2);
        assert_eq!(calendar.event_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_runs_do_not_duplicate() {
        let calendar = Arc::new(MemoryCalendar::default());
        let sync = Arc::new(orchestrator(
            SourceBehavior::Batch(batch()),
            calendar.clone(),
            ExistingEventPolicy::Update,
        ));

        let a = tokio::spawn({
            let sync = sync.clone();
            async move { sync.run_sync(None).await }
        });
        let b = tokio::spawn({
            let sync = sync.clone();
            async move { sync.run_sync(None).await }
        });

        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());

        // One run creates both events, the other finds and updates them
        assert_eq!(a.created + b.created, 2);
        assert_eq!(a.updated + b.updated, 2);
        assert_eq!(calendar.event_count(), 2);
    }
}
