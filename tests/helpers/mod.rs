//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use roomescape_core::config::AuthConfig;
use roomescape_core::traits::{Clock, FixedClock};
use roomescape_database::memory::{
    MemoryMemberRepository, MemoryReservationRepository, MemoryReservationTimeRepository,
    MemoryThemeRepository, MemoryWaitingRepository,
};
use roomescape_entity::theme::Theme;
use roomescape_entity::time::ReservationTime;
use roomescape_service::catalog::{ThemeRequest, TimeRequest};
use roomescape_service::member::SignupRequest;
use roomescape_service::{
    MemberService, RequestContext, ReservationService, ReservationTimeService, ThemeService,
    WaitingService,
};

/// Password used for every member created by [`TestApp::member`].
pub const PASSWORD: &str = "open-sesame";

/// Services wired against in-memory stores with a pinned clock.
pub struct TestApp {
    /// Clock the services consult for past-slot checks.
    pub clock: Arc<FixedClock>,
    pub members: Arc<MemberService>,
    pub themes: Arc<ThemeService>,
    pub times: Arc<ReservationTimeService>,
    pub waitings: Arc<WaitingService>,
    pub reservations: Arc<ReservationService>,
    /// Seeded theme "theme-1".
    pub theme: Theme,
    /// Seeded 10:00 start time.
    pub ten: ReservationTime,
    /// Seeded 12:00 start time.
    pub noon: ReservationTime,
}

impl TestApp {
    /// Builds the services with the clock at 2024-12-31 09:00 and one theme
    /// with two start times.
    pub async fn new() -> Self {
        let clock = Arc::new(FixedClock::new(at(date(2024, 12, 31), 9, 0)));
        let dyn_clock: Arc<dyn Clock> = clock.clone();

        let auth = AuthConfig {
            jwt_secret: "integration-secret".to_string(),
            ..AuthConfig::default()
        };

        let members = Arc::new(MemberService::new(
            Arc::new(MemoryMemberRepository::new()),
            &auth,
        ));
        let themes = Arc::new(ThemeService::new(Arc::new(MemoryThemeRepository::new())));
        let times = Arc::new(ReservationTimeService::new(Arc::new(
            MemoryReservationTimeRepository::new(),
        )));
        let reservation_repo = Arc::new(MemoryReservationRepository::new());
        let waitings = Arc::new(WaitingService::new(
            Arc::new(MemoryWaitingRepository::new()),
            reservation_repo.clone(),
            Arc::clone(&times),
            Arc::clone(&themes),
            Arc::clone(&members),
            Arc::clone(&dyn_clock),
        ));
        let reservations = Arc::new(ReservationService::new(
            reservation_repo,
            Arc::clone(&waitings),
            Arc::clone(&times),
            Arc::clone(&themes),
            Arc::clone(&members),
            dyn_clock,
        ));

        let theme = themes
            .add_theme(ThemeRequest {
                name: "theme-1".to_string(),
                description: "an abandoned submarine".to_string(),
                thumbnail: "https://img.example.com/sub.png".to_string(),
            })
            .await
            .expect("seed theme");
        let ten = times
            .add_time(TimeRequest {
                start_at: hm(10, 0),
            })
            .await
            .expect("seed 10:00");
        let noon = times
            .add_time(TimeRequest {
                start_at: hm(12, 0),
            })
            .await
            .expect("seed 12:00");

        Self {
            clock,
            members,
            themes,
            times,
            waitings,
            reservations,
            theme,
            ten,
            noon,
        }
    }

    /// Signs up a member and returns the context a login token resolves to.
    pub async fn member(&self, name: &str) -> RequestContext {
        let member = self
            .members
            .signup(SignupRequest {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("signup");
        RequestContext::from(&member)
    }

    /// Adds another theme.
    pub async fn other_theme(&self, name: &str) -> Theme {
        self.themes
            .add_theme(ThemeRequest {
                name: name.to_string(),
                description: String::new(),
                thumbnail: String::new(),
            })
            .await
            .expect("theme")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_time(hm(h, m))
}
