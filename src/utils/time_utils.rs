use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_S * 60 * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_S * 60 * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_S * 60 * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_2_H: i64 = Self::MS_IN_MIN * 60 * 2;
    pub const MS_IN_4_H: i64 = Self::MS_IN_MIN * 60 * 4;
    pub const MS_IN_6_H: i64 = Self::MS_IN_MIN * 60 * 6;
    pub const MS_IN_12_H: i64 = Self::MS_IN_MIN * 60 * 12;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_3_D: i64 = Self::MS_IN_H * 24 * 3;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const INTRADAY_TIME_FORMAT: &str = "%m-%d %H:%M";
}

/// Exchange timestamps are ms since epoch; chart timestamps are whole seconds (floor).
pub fn epoch_ms_to_sec(epoch_ms: i64) -> i64 {
    epoch_ms.div_euclid(TimeUtils::MS_IN_S)
}

/// Axis label for a candle time. Intraday buckets need hours, daily+ buckets only the date.
pub fn epoch_sec_to_axis_label(epoch_sec: i64, bucket_ms: i64) -> String {
    let format = if bucket_ms >= TimeUtils::MS_IN_D {
        TimeUtils::STANDARD_TIME_FORMAT
    } else {
        TimeUtils::INTRADAY_TIME_FORMAT
    };
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(format).to_string(),
        None => String::new(),
    }
}

/// Compact "how long ago" text for the status bar.
pub fn format_age(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.0}s", seconds)
    } else if seconds < 3_600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else {
        format!("{:.1}h", seconds / 3_600.0)
    }
}
