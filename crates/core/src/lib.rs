//! Core constants, units, and time helpers for the solar power estimator workspace.

/// Physical constants expressed in kilometre-based units unless stated otherwise.
pub mod constants {
    /// Geocentric gravitational constant (km³/s²), IAU 2009 system.
    pub const GM_EARTH_KM3_S2: f64 = 398_600.4418;
    /// Earth equatorial radius (km), IAU WG on Cartographic Coordinates 2015.
    pub const R_EARTH_KM: f64 = 6_378.1366;
    /// Sun equatorial radius (km), IAU WG on Cartographic Coordinates 2015.
    pub const R_SUN_KM: f64 = 695_700.0;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

/// Julian-date and calendar conversions shared across crates.
pub mod time {
    use chrono::{DateTime, Datelike, Timelike, Utc};

    use super::constants::SECONDS_PER_DAY;

    /// Julian date of the Unix epoch (1970-01-01T00:00:00 UTC).
    pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

    /// Convert a UTC datetime to a Julian date.
    pub fn datetime_to_julian_date(dt: &DateTime<Utc>) -> f64 {
        UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / (SECONDS_PER_DAY * 1_000.0)
    }

    /// Convert a Julian date to a UTC datetime.
    ///
    /// Returns `None` when the date falls outside the range chrono can represent.
    pub fn julian_date_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
        let seconds = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round() as u32;
        DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
    }

    /// Fractional day of year for a Julian date (1.0 at Jan 1 00:00 UTC).
    ///
    /// The fractional part carries the time of day so that annual models can be
    /// evaluated continuously rather than stepping once per calendar day.
    pub fn fractional_day_of_year(jd: f64) -> Option<f64> {
        let dt = julian_date_to_datetime(jd)?;
        let seconds_into_day = f64::from(dt.num_seconds_from_midnight());
        Some(f64::from(dt.ordinal()) + seconds_into_day / SECONDS_PER_DAY)
    }

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}
