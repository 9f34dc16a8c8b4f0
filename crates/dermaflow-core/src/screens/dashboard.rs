//! Dashboard: summary counts plus the next five upcoming appointments.

use super::{apply_fetch, FetchGuard, Navigation, ScreenState};
use crate::gateway::{Filter, Gateway, Query, StoreError};
use crate::records::UpcomingAppointment;
use crate::session::SessionContext;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_clients: u64,
    pub today_appointments: u64,
    pub upcoming_appointments: u64,
    /// Photo records created in the last 14 days.
    pub recent_photos: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub upcoming: Vec<UpcomingAppointment>,
}

pub struct DashboardScreen {
    pub state: ScreenState<DashboardData>,
    guard: FetchGuard,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Start of the given day and of the next one, in UTC. The boundary follows
/// the caller's zone, matching how the original app computed "today" from
/// the browser clock.
pub fn day_bounds<Tz: TimeZone>(now: DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    let start = now
        .timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| now.clone())
        .with_timezone(&Utc);
    (start, start + Duration::days(1))
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            state: ScreenState::Loading,
            guard: FetchGuard::default(),
        }
    }

    pub fn begin_load(&mut self) -> u64 {
        self.state = ScreenState::Loading;
        self.guard.begin()
    }

    pub fn fetch<Tz: TimeZone>(
        gateway: &Gateway,
        now: DateTime<Tz>,
    ) -> Result<DashboardData, StoreError> {
        let (today_start, tomorrow_start) = day_bounds(now.clone());
        let today_start_s = today_start.to_rfc3339();
        let tomorrow_start_s = tomorrow_start.to_rfc3339();
        let two_weeks_ago = (now.with_timezone(&Utc) - Duration::days(14)).to_rfc3339();

        let total_clients = gateway.count("clients", &Query::new())?;
        let today_appointments = gateway.count(
            "appointments",
            &Query::new()
                .filter(Filter::gte("date_time", &today_start_s))
                .filter(Filter::lt("date_time", &tomorrow_start_s)),
        )?;
        let upcoming_appointments = gateway.count(
            "appointments",
            &Query::new().filter(Filter::gt("date_time", &today_start_s)),
        )?;
        let recent_photos = gateway.count(
            "treatment_photos",
            &Query::new().filter(Filter::gt("created_at", &two_weeks_ago)),
        )?;

        let upcoming: Vec<UpcomingAppointment> = gateway.select(
            "appointments",
            &Query::new()
                .columns("id,date_time,treatment,status,clients(id,name,email)")
                .filter(Filter::gt("date_time", &today_start_s))
                .order_asc("date_time")
                .limit(5),
        )?;

        Ok(DashboardData {
            stats: DashboardStats {
                total_clients,
                today_appointments,
                upcoming_appointments,
                recent_photos,
            },
            upcoming,
        })
    }

    pub fn finish_load(
        &mut self,
        token: u64,
        ctx: &SessionContext,
        outcome: Result<DashboardData, StoreError>,
    ) -> Navigation {
        apply_fetch(&mut self.state, &self.guard, token, ctx, outcome, Navigation::Stay)
    }

    pub fn load<Tz: TimeZone>(
        &mut self,
        gateway: &Gateway,
        ctx: &SessionContext,
        now: DateTime<Tz>,
    ) -> Navigation {
        let token = self.begin_load();
        let outcome = Self::fetch(gateway, now);
        self.finish_load(token, ctx, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn day_bounds_in_utc() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 15, 42, 7).unwrap();
        let (start, end) = day_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn day_bounds_follow_local_zone() {
        // UTC+2: 00:30 local on June 3 is 22:30 UTC on June 2.
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = zone.with_ymd_and_hms(2025, 6, 3, 0, 30, 0).unwrap();
        let (start, end) = day_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 2, 22, 0, 0).unwrap());
        assert_eq!(end - start, Duration::days(1));
    }
}
