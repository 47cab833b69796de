//! GPS to UTC conversion.

use chrono::{DateTime, Utc};

/// Unix timestamp of the GPS epoch, 1980-01-06T00:00:00Z.
const GPS_EPOCH_UNIX: i64 = 315_964_800;

/// GPS times at which a leap second was inserted into UTC.
const LEAP_SECONDS_GPS: [i64; 18] = [
    46_828_800,    // 1981-07-01
    78_364_801,    // 1982-07-01
    109_900_802,   // 1983-07-01
    173_059_203,   // 1985-07-01
    252_028_804,   // 1988-01-01
    315_187_205,   // 1990-01-01
    346_723_206,   // 1991-01-01
    393_984_007,   // 1992-07-01
    425_520_008,   // 1993-07-01
    457_056_009,   // 1994-07-01
    504_489_610,   // 1996-01-01
    551_750_411,   // 1997-07-01
    599_184_012,   // 1999-01-01
    820_108_813,   // 2006-01-01
    914_803_214,   // 2009-01-01
    1_025_136_015, // 2012-07-01
    1_119_744_016, // 2015-07-01
    1_167_264_017, // 2017-01-01
];

/// Number of leap seconds between the GPS epoch and `gps_seconds`.
#[must_use]
pub fn leap_seconds(gps_seconds: i64) -> i64 {
    LEAP_SECONDS_GPS
        .iter()
        .take_while(|&&leap| leap <= gps_seconds)
        .count() as i64
}

/// Convert GPS seconds to a UTC timestamp, accounting for leap seconds.
///
/// Returns `None` for non-finite input or times chrono cannot represent.
#[must_use]
pub fn gps_to_utc(gps: f64) -> Option<DateTime<Utc>> {
    if !gps.is_finite() {
        return None;
    }
    let whole = gps.floor();
    let nanos = ((gps - whole) * 1e9).round().min(999_999_999.0) as u32;
    let whole = whole as i64;
    DateTime::from_timestamp(whole - leap_seconds(whole) + GPS_EPOCH_UNIX, nanos)
}
