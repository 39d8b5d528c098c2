//! Application for leave lookups and lifecycle interactions.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{Allowance, VacationDaysResult, remaining_vacation_days};
use crate::config::ReminderPolicy;
use crate::error::{LeaveError, LeaveResult};
use crate::models::{Application, ApplicationStatus, Period, Person, PublicHoliday, Signature};
use crate::store::ApplicationStore;

/// Reads and changes applications for leave.
///
/// Every mutation loads the current record, applies the lifecycle step and
/// saves the result. "Today" is the UTC date of the injected clock.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use leave_engine::config::ReminderPolicy;
/// use leave_engine::models::{Application, ApplicationStatus, DayLength, Person, VacationType};
/// use leave_engine::services::ApplicationService;
/// use leave_engine::store::InMemoryApplicationStore;
/// use chrono::NaiveDate;
/// use mockable::DefaultClock;
///
/// let service = ApplicationService::new(
///     Arc::new(InMemoryApplicationStore::new()),
///     Arc::new(DefaultClock),
///     ReminderPolicy::default(),
/// );
/// let person = Person::new("murygina");
/// let application = Application::new(
///     person.clone(),
///     NaiveDate::from_ymd_opt(2099, 8, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2099, 8, 7).unwrap(),
///     VacationType::Holiday,
///     DayLength::Full,
/// );
///
/// let applied = service.apply(application, &person).unwrap();
/// assert!(applied.has_status(ApplicationStatus::Waiting));
/// ```
pub struct ApplicationService {
    store: Arc<dyn ApplicationStore>,
    clock: Arc<dyn Clock>,
    reminder: ReminderPolicy,
}

impl ApplicationService {
    /// Creates the service.
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        clock: Arc<dyn Clock>,
        reminder: ReminderPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            reminder,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Fetches an application by id.
    pub fn get_application_by_id(&self, id: Uuid) -> LeaveResult<Option<Application>> {
        Ok(self.store.find_one(id)?)
    }

    /// Applications of `person` touching any day of `[from, to]`.
    pub fn get_applications_for_period_and_person(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        person: &Person,
    ) -> LeaveResult<Vec<Application>> {
        Ok(self.store.find_for_period_and_person(from, to, person)?)
    }

    /// Applications in `status` touching any day of `[from, to]`.
    pub fn get_applications_for_period_and_status(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: ApplicationStatus,
    ) -> LeaveResult<Vec<Application>> {
        Ok(self.store.find_for_period_and_status(from, to, status)?)
    }

    /// Submits a new application on behalf of its owner.
    ///
    /// The stored application is `Waiting`, carries `applier` and has today
    /// as its application date.
    pub fn apply(&self, mut application: Application, applier: &Person) -> LeaveResult<Application> {
        application.ensure_valid_period()?;
        application.ensure_reason()?;

        application.status = ApplicationStatus::Waiting;
        application.applier = Some(applier.clone());
        application.application_date = Some(self.today());

        let saved = self.store.save(application)?;

        info!(
            application_id = %saved.id,
            person = %saved.person.login,
            applier = %applier.login,
            status = %saved.status,
            "Applied for leave"
        );

        Ok(saved)
    }

    /// Allows a waiting application.
    pub fn allow(
        &self,
        id: Uuid,
        boss: &Person,
        signature: Option<Signature>,
    ) -> LeaveResult<Application> {
        let today = self.today();
        self.transition(id, |a| a.allow(boss.clone(), today, signature))
    }

    /// Rejects a waiting application.
    pub fn reject(&self, id: Uuid, boss: &Person) -> LeaveResult<Application> {
        let today = self.today();
        self.transition(id, |a| a.reject(boss.clone(), today, None))
    }

    /// Cancels a waiting or allowed application.
    pub fn cancel(&self, id: Uuid, canceller: &Person) -> LeaveResult<Application> {
        let today = self.today();
        self.transition(id, |a| a.cancel(canceller.clone(), today))
    }

    fn transition(
        &self,
        id: Uuid,
        step: impl FnOnce(&mut Application) -> LeaveResult<()>,
    ) -> LeaveResult<Application> {
        let mut application = self.load(id)?;

        if let Err(e) = step(&mut application) {
            warn!(application_id = %id, status = %application.status, error = %e, "Refused status transition");
            return Err(e);
        }

        let saved = self.store.save(application)?;

        info!(
            application_id = %saved.id,
            person = %saved.person.login,
            status = %saved.status,
            "Changed application status"
        );

        Ok(saved)
    }

    /// Records that the owner reminded the deciders about a waiting
    /// application.
    ///
    /// # Errors
    ///
    /// - [`LeaveError::ImpatientAboutApplicationForLeaveProcess`] if no
    ///   reminder was sent yet and the application is younger than the
    ///   configured waiting time.
    /// - [`LeaveError::RemindAlreadySent`] if a reminder was sent today.
    /// - [`LeaveError::InvalidStatusTransition`] if the application is no
    ///   longer waiting.
    pub fn remind(&self, id: Uuid) -> LeaveResult<Application> {
        let mut application = self.load(id)?;
        let today = self.today();

        if !application.has_status(ApplicationStatus::Waiting) {
            warn!(application_id = %id, status = %application.status, "Refused reminder");
            return Err(LeaveError::InvalidStatusTransition {
                id,
                message: format!("cannot remind about a {} application", application.status),
            });
        }

        match application.remind_date {
            Some(date) if date == today => {
                warn!(application_id = %id, remind_date = %date, "Reminder already sent today");
                return Err(LeaveError::RemindAlreadySent { id, date });
            }
            Some(_) => {}
            None => {
                let applied = application.application_date.unwrap_or(today);
                let earliest = applied
                    .checked_add_days(Days::new(u64::from(self.reminder.min_days_before_reminding)))
                    .unwrap_or(NaiveDate::MAX);
                if earliest > today {
                    warn!(application_id = %id, earliest = %earliest, "Reminder sent too early");
                    return Err(LeaveError::ImpatientAboutApplicationForLeaveProcess {
                        message: format!("reminding is possible from {}", earliest),
                    });
                }
            }
        }

        application.remind_date = Some(today);
        let saved = self.store.save(application)?;

        info!(
            application_id = %saved.id,
            person = %saved.person.login,
            "Sent reminder for application for leave"
        );

        Ok(saved)
    }

    /// Calculates the vacation days `person` has left in `allowance.year`.
    pub fn vacation_days_left(
        &self,
        person: &Person,
        allowance: &Allowance,
        holidays: &[PublicHoliday],
    ) -> LeaveResult<VacationDaysResult> {
        let year = Period::year(allowance.year)?;
        let applications =
            self.get_applications_for_period_and_person(year.start_date, year.end_date, person)?;
        Ok(remaining_vacation_days(allowance, &applications, holidays))
    }

    fn load(&self, id: Uuid) -> LeaveResult<Application> {
        self.store
            .find_one(id)?
            .ok_or(LeaveError::ApplicationNotFound { id })
    }
}
