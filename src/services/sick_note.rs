//! Sick note lifecycle interactions.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{info, warn};

use crate::error::{LeaveError, LeaveResult};
use crate::models::{Application, ApplicationStatus, Person, SickNote};
use crate::store::{ApplicationStore, SickNoteStore};

/// Changes to sick notes initiated by a person (usually the office).
#[cfg_attr(test, mockall::automock)]
pub trait SickNoteInteractionService: Send + Sync {
    /// Records a new sick note.
    fn create(&self, sick_note: SickNote, creator: &Person) -> LeaveResult<SickNote>;

    /// Saves changes to an active sick note.
    fn update(&self, sick_note: SickNote, editor: &Person) -> LeaveResult<SickNote>;

    /// Turns an active sick note into an allowed application for leave.
    ///
    /// The application takes over the sick note's person, period and day
    /// length. The sick note becomes inactive and points at the application.
    /// Either both records are changed or neither is.
    fn convert(
        &self,
        sick_note: SickNote,
        application: Application,
        converter: &Person,
    ) -> LeaveResult<SickNote>;

    /// Deactivates an active sick note.
    fn cancel(&self, sick_note: SickNote, canceller: &Person) -> LeaveResult<SickNote>;
}

/// [`SickNoteInteractionService`] backed by the sick note and application
/// stores.
pub struct DefaultSickNoteInteractionService {
    sick_notes: Arc<dyn SickNoteStore>,
    applications: Arc<dyn ApplicationStore>,
    clock: Arc<dyn Clock>,
}

impl DefaultSickNoteInteractionService {
    /// Creates the service.
    pub fn new(
        sick_notes: Arc<dyn SickNoteStore>,
        applications: Arc<dyn ApplicationStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sick_notes,
            applications,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    fn checked(&self, sick_note: &SickNote, action: &str) -> LeaveResult<()> {
        let result = sick_note
            .ensure_active(action)
            .and_then(|()| sick_note.ensure_valid_period());
        if let Err(e) = &result {
            warn!(sick_note_id = %sick_note.id, action, error = %e, "Refused sick note change");
        }
        result
    }

    /// Loads the stored version of `sick_note` and refuses the change if that
    /// version is no longer active.
    fn load_active(&self, sick_note: &SickNote, action: &str) -> LeaveResult<SickNote> {
        let stored = self
            .sick_notes
            .find_one(sick_note.id)?
            .ok_or(LeaveError::SickNoteNotFound { id: sick_note.id })?;
        self.checked(&stored, action)?;
        Ok(stored)
    }
}

impl SickNoteInteractionService for DefaultSickNoteInteractionService {
    fn create(&self, mut sick_note: SickNote, creator: &Person) -> LeaveResult<SickNote> {
        self.checked(&sick_note, "create")?;

        sick_note.last_edited = Some(self.today());
        let saved = self.sick_notes.save(sick_note)?;

        info!(
            sick_note_id = %saved.id,
            person = %saved.person.login,
            creator = %creator.login,
            "Created sick note"
        );
        Ok(saved)
    }

    fn update(&self, mut sick_note: SickNote, editor: &Person) -> LeaveResult<SickNote> {
        let stored = self.load_active(&sick_note, "update")?;
        sick_note.active = stored.active;
        sick_note.converted_application = stored.converted_application;
        self.checked(&sick_note, "update")?;

        sick_note.last_edited = Some(self.today());
        let saved = self.sick_notes.save(sick_note)?;

        info!(
            sick_note_id = %saved.id,
            person = %saved.person.login,
            editor = %editor.login,
            "Updated sick note"
        );
        Ok(saved)
    }

    /// The sick note is saved first, already linked to the application's id.
    /// If saving the application then fails, the stored sick note is put back
    /// and the application error is returned.
    fn convert(
        &self,
        sick_note: SickNote,
        mut application: Application,
        converter: &Person,
    ) -> LeaveResult<SickNote> {
        let stored = self.load_active(&sick_note, "convert")?;
        let today = self.today();

        application.person = stored.person.clone();
        application.start_date = stored.start_date;
        application.end_date = stored.end_date;
        application.day_length = stored.day_length;
        application.status = ApplicationStatus::Allowed;
        application.applier = Some(converter.clone());
        application.boss = Some(converter.clone());
        application.application_date = Some(today);
        application.edited_date = Some(today);
        application.ensure_reason()?;

        let mut converted = stored.clone();
        converted.active = false;
        converted.converted_application = Some(application.id);
        converted.last_edited = Some(today);
        let saved = self.sick_notes.save(converted)?;

        let application = match self.applications.save(application) {
            Ok(application) => application,
            Err(e) => {
                warn!(sick_note_id = %saved.id, error = %e, "Saving converted application failed, restoring sick note");
                if let Err(restore) = self.sick_notes.save(stored) {
                    warn!(sick_note_id = %saved.id, error = %restore, "Restoring sick note failed");
                }
                return Err(e.into());
            }
        };

        info!(
            sick_note_id = %saved.id,
            application_id = %application.id,
            person = %saved.person.login,
            converter = %converter.login,
            "Converted sick note to application for leave"
        );
        Ok(saved)
    }

    fn cancel(&self, sick_note: SickNote, canceller: &Person) -> LeaveResult<SickNote> {
        let mut stored = self.load_active(&sick_note, "cancel")?;

        stored.active = false;
        stored.last_edited = Some(self.today());
        let saved = self.sick_notes.save(stored)?;

        info!(
            sick_note_id = %saved.id,
            person = %saved.person.login,
            canceller = %canceller.login,
            "Cancelled sick note"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayLength, VacationType};
    use crate::store::{
        InMemoryApplicationStore, InMemorySickNoteStore, MockApplicationStore, MockSickNoteStore,
        StoreError,
    };
    use crate::test_support::{fixture_clock, make_date, person};
    use mockall::predicate::eq;

    fn in_memory_service() -> (
        DefaultSickNoteInteractionService,
        Arc<InMemorySickNoteStore>,
        Arc<InMemoryApplicationStore>,
    ) {
        let sick_notes = Arc::new(InMemorySickNoteStore::new());
        let applications = Arc::new(InMemoryApplicationStore::new());
        let service = DefaultSickNoteInteractionService::new(
            sick_notes.clone(),
            applications.clone(),
            fixture_clock("2026-10-16"),
        );
        (service, sick_notes, applications)
    }

    fn create_sick_note() -> SickNote {
        SickNote::new(
            person("murygina"),
            make_date("2026-10-12"),
            make_date("2026-10-14"),
        )
    }

    #[test]
    fn test_create_stamps_last_edited_and_persists() {
        let (service, store, _) = in_memory_service();

        let saved = service.create(create_sick_note(), &person("office")).unwrap();

        assert_eq!(saved.last_edited, Some(make_date("2026-10-16")));
        assert!(saved.active);
        assert_eq!(store.find_one(saved.id).unwrap(), Some(saved));
    }

    #[test]
    fn test_create_reversed_period_is_not_saved() {
        let service = DefaultSickNoteInteractionService::new(
            Arc::new(MockSickNoteStore::new()),
            Arc::new(MockApplicationStore::new()),
            fixture_clock("2026-10-16"),
        );
        let mut sick_note = create_sick_note();
        sick_note.end_date = make_date("2026-10-01");

        let result = service.create(sick_note, &person("office"));

        assert!(matches!(result, Err(LeaveError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_update_changes_period() {
        let (service, _, _) = in_memory_service();
        let office = person("office");
        let mut saved = service.create(create_sick_note(), &office).unwrap();
        saved.end_date = make_date("2026-10-16");

        let updated = service.update(saved, &office).unwrap();

        assert_eq!(updated.end_date, make_date("2026-10-16"));
    }

    #[test]
    fn test_convert_creates_allowed_application() {
        let (service, _, applications) = in_memory_service();
        let office = person("office");
        let sick_note = service.create(create_sick_note(), &office).unwrap();
        let mut shell = Application::new(
            person("placeholder"),
            make_date("2026-01-01"),
            make_date("2026-01-01"),
            VacationType::Holiday,
            DayLength::Noon,
        );
        shell.reason = Some("child was ill".to_string());

        let converted = service.convert(sick_note.clone(), shell, &office).unwrap();

        assert!(!converted.active);
        let application_id = converted.converted_application.unwrap();
        let application = applications.find_one(application_id).unwrap().unwrap();
        assert!(application.has_status(ApplicationStatus::Allowed));
        assert_eq!(application.person, sick_note.person);
        assert_eq!(application.start_date, sick_note.start_date);
        assert_eq!(application.end_date, sick_note.end_date);
        assert_eq!(application.day_length, DayLength::Full);
        assert_eq!(application.applier, Some(office.clone()));
        assert_eq!(application.boss, Some(office));
    }

    #[test]
    fn test_cancel_deactivates() {
        let (service, _, _) = in_memory_service();
        let office = person("office");
        let sick_note = service.create(create_sick_note(), &office).unwrap();

        let cancelled = service.cancel(sick_note, &office).unwrap();

        assert!(!cancelled.active);
        assert!(cancelled.converted_application.is_none());
    }

    #[test]
    fn test_inactive_sick_note_refuses_every_change() {
        let (service, _, _) = in_memory_service();
        let office = person("office");
        let sick_note = service.create(create_sick_note(), &office).unwrap();
        let cancelled = service.cancel(sick_note, &office).unwrap();

        let shell = Application::new(
            office.clone(),
            make_date("2026-10-12"),
            make_date("2026-10-14"),
            VacationType::Holiday,
            DayLength::Full,
        );

        assert!(matches!(
            service.update(cancelled.clone(), &office),
            Err(LeaveError::InvalidStatusTransition { .. })
        ));
        assert!(matches!(
            service.convert(cancelled.clone(), shell, &office),
            Err(LeaveError::InvalidStatusTransition { .. })
        ));
        assert!(matches!(
            service.cancel(cancelled, &office),
            Err(LeaveError::InvalidStatusTransition { .. })
        ));
    }

    fn holiday_shell() -> Application {
        Application::new(
            person("placeholder"),
            make_date("2026-01-01"),
            make_date("2026-01-01"),
            VacationType::Holiday,
            DayLength::Full,
        )
    }

    #[test]
    fn test_stale_copy_of_converted_sick_note_is_refused() {
        let (service, store, applications) = in_memory_service();
        let office = person("office");
        let sick_note = service.create(create_sick_note(), &office).unwrap();
        let stale = sick_note.clone();
        service.convert(sick_note, holiday_shell(), &office).unwrap();

        assert!(matches!(
            service.convert(stale.clone(), holiday_shell(), &office),
            Err(LeaveError::InvalidStatusTransition { .. })
        ));
        assert!(matches!(
            service.update(stale.clone(), &office),
            Err(LeaveError::InvalidStatusTransition { .. })
        ));
        assert!(matches!(
            service.cancel(stale.clone(), &office),
            Err(LeaveError::InvalidStatusTransition { .. })
        ));

        let allowed = applications
            .find_for_period_and_status(
                make_date("2026-10-01"),
                make_date("2026-10-31"),
                ApplicationStatus::Allowed,
            )
            .unwrap();
        assert_eq!(allowed.len(), 1);
        assert!(!store.find_one(stale.id).unwrap().unwrap().active);
    }

    #[test]
    fn test_update_keeps_stored_lifecycle_fields() {
        let (service, _, _) = in_memory_service();
        let office = person("office");
        let mut sick_note = service.create(create_sick_note(), &office).unwrap();
        sick_note.converted_application = Some(uuid::Uuid::new_v4());

        let updated = service.update(sick_note, &office).unwrap();

        assert!(updated.active);
        assert!(updated.converted_application.is_none());
    }

    #[test]
    fn test_unknown_sick_note_is_not_found() {
        let (service, _, _) = in_memory_service();
        let office = person("office");
        let unknown = create_sick_note();

        assert!(matches!(
            service.update(unknown.clone(), &office),
            Err(LeaveError::SickNoteNotFound { id }) if id == unknown.id
        ));
        assert!(matches!(
            service.convert(unknown.clone(), holiday_shell(), &office),
            Err(LeaveError::SickNoteNotFound { .. })
        ));
        assert!(matches!(
            service.cancel(unknown, &office),
            Err(LeaveError::SickNoteNotFound { .. })
        ));
    }

    #[test]
    fn test_convert_with_failing_sick_note_store_saves_no_application() {
        let sick_note = create_sick_note();
        let stored = sick_note.clone();
        let mut sick_notes = MockSickNoteStore::new();
        sick_notes
            .expect_find_one()
            .with(eq(sick_note.id))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        sick_notes
            .expect_save()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));
        let applications = Arc::new(InMemoryApplicationStore::new());
        let service = DefaultSickNoteInteractionService::new(
            Arc::new(sick_notes),
            applications.clone(),
            fixture_clock("2026-10-16"),
        );

        let result = service.convert(sick_note, holiday_shell(), &person("office"));

        assert!(matches!(result, Err(LeaveError::Store(StoreError::Unavailable(_)))));
        let persisted = applications
            .find_for_period_and_status(
                make_date("2026-10-01"),
                make_date("2026-10-31"),
                ApplicationStatus::Allowed,
            )
            .unwrap();
        assert!(persisted.is_empty());
    }

    #[test]
    fn test_convert_with_failing_application_store_restores_sick_note() {
        let office = person("office");
        let sick_notes = Arc::new(InMemorySickNoteStore::new());
        let sick_note = sick_notes.save(create_sick_note()).unwrap();
        let mut applications = MockApplicationStore::new();
        applications
            .expect_save()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));
        let service = DefaultSickNoteInteractionService::new(
            sick_notes.clone(),
            Arc::new(applications),
            fixture_clock("2026-10-16"),
        );

        let result = service.convert(sick_note.clone(), holiday_shell(), &office);

        assert!(matches!(result, Err(LeaveError::Store(StoreError::Unavailable(_)))));
        let restored = sick_notes.find_one(sick_note.id).unwrap().unwrap();
        assert!(restored.active);
        assert!(restored.converted_application.is_none());
    }

    #[test]
    fn test_convert_non_holiday_without_reason_is_refused() {
        let (service, store, _) = in_memory_service();
        let office = person("office");
        let sick_note = service.create(create_sick_note(), &office).unwrap();
        let mut shell = holiday_shell();
        shell.vacation_type = VacationType::UnpaidLeave;

        let result = service.convert(sick_note.clone(), shell, &office);

        assert!(matches!(result, Err(LeaveError::InvalidForm { .. })));
        assert!(store.find_one(sick_note.id).unwrap().unwrap().active);
    }
}
