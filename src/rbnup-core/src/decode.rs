// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Parser for the receiver's FT8 decode log.
//!
//! One record per line:
//! `yymmdd HHMMSS  sync  snr  dt  freq  [callsign [grid]]`.
//! The six leading fields are mandatory; callsign and grid are best-effort
//! and default to empty when the line ends early.

use chrono::NaiveDateTime;

pub const MAX_CALLSIGN_LEN: usize = 13;
pub const MAX_GRID_LEN: usize = 4;

const TIME_FORMAT: &str = "%y%m%d %H%M%S";
const TIME_FIELD_LEN: usize = 13;

/// One parsed decode-log record.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeEvent {
    /// Date and time of the decode, no timezone, second resolution.
    pub timestamp: NaiveDateTime,
    /// Sync quality indicator; parsed but not forwarded on the wire.
    pub sync: f64,
    pub snr_db: i32,
    /// Receiver timing offset in seconds.
    pub delta_time_s: f64,
    /// Absolute receive frequency in Hz.
    pub freq_hz: u32,
    /// Sender callsign, empty when the line carries none.
    pub callsign: String,
    /// 4-character locator, empty when the line carries none.
    pub grid: String,
}

/// Parse one decode-log line.
///
/// Returns `None` when any of the six leading fields fails to parse; such
/// lines (noise, banners) are routine and the caller simply skips them.
pub fn parse_line(line: &str) -> Option<DecodeEvent> {
    let mut s = Scanner::new(line);
    let timestamp = s.read_time()?;
    let sync = s.read_f64()?;
    let snr_db = i32::try_from(s.read_int()?).ok()?;
    let delta_time_s = s.read_f64()?;
    let freq_hz = u32::try_from(s.read_int()?).ok()?;
    let callsign = s.read_token(MAX_CALLSIGN_LEN).unwrap_or("").to_string();
    let grid = s.read_token(MAX_GRID_LEN).unwrap_or("").to_string();
    Some(DecodeEvent {
        timestamp,
        sync,
        snr_db,
        delta_time_s,
        freq_hz,
        callsign,
        grid,
    })
}

/// Left-to-right cursor over one line. Every reader either consumes input
/// and returns a value or leaves the cursor where it was and returns `None`.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_spaces(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Fixed-width `yymmdd HHMMSS` field at the cursor.
    fn read_time(&mut self) -> Option<NaiveDateTime> {
        if self.rest.len() < TIME_FIELD_LEN || !self.rest.is_char_boundary(TIME_FIELD_LEN) {
            return None;
        }
        let (head, tail) = self.rest.split_at(TIME_FIELD_LEN);
        let ts = NaiveDateTime::parse_from_str(head, TIME_FORMAT).ok()?;
        self.rest = tail;
        Some(ts)
    }

    /// Decimal integer with optional sign; the cursor stops at the first
    /// non-digit, like `strtol`.
    fn read_int(&mut self) -> Option<i64> {
        self.skip_spaces();
        let bytes = self.rest.as_bytes();
        let mut idx = 0;
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            idx = 1;
        }
        let digits_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == digits_start {
            return None;
        }
        let value = self.rest[..idx].parse().ok()?;
        self.rest = &self.rest[idx..];
        Some(value)
    }

    /// Decimal float with optional sign and fraction; the cursor stops at
    /// the first character that cannot extend the number, like `strtod`.
    fn read_f64(&mut self) -> Option<f64> {
        self.skip_spaces();
        let bytes = self.rest.as_bytes();
        let mut idx = 0;
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            idx = 1;
        }
        let mut saw_digit = false;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
            saw_digit = true;
        }
        if idx < bytes.len() && bytes[idx] == b'.' {
            let frac_start = idx + 1;
            let mut frac = frac_start;
            while frac < bytes.len() && bytes[frac].is_ascii_digit() {
                frac += 1;
            }
            if frac > frac_start || saw_digit {
                idx = frac;
                saw_digit = saw_digit || frac > frac_start;
            }
        }
        if !saw_digit {
            return None;
        }
        let value = self.rest[..idx].parse().ok()?;
        self.rest = &self.rest[idx..];
        Some(value)
    }

    /// Next whitespace-delimited token, truncated to `max` characters. The
    /// cursor advances only past the consumed characters, so an overlong
    /// token spills its tail into the next read (matching `%13s %4s`).
    fn read_token(&mut self, max: usize) -> Option<&'a str> {
        self.skip_spaces();
        if self.rest.is_empty() {
            return None;
        }
        let token_len = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        let mut take = token_len.min(max);
        while !self.rest.is_char_boundary(take) {
            take -= 1;
        }
        let (token, tail) = self.rest.split_at(take);
        self.rest = tail;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_full_record() {
        let ev = parse_line("230101 120000  1.5  10  0.2  7075123 AB1XYZ FN42").unwrap();
        assert_eq!(ev.timestamp, ts(2023, 1, 1, 12, 0, 0));
        assert_eq!(ev.sync, 1.5);
        assert_eq!(ev.snr_db, 10);
        assert_eq!(ev.delta_time_s, 0.2);
        assert_eq!(ev.freq_hz, 7_075_123);
        assert_eq!(ev.callsign, "AB1XYZ");
        assert_eq!(ev.grid, "FN42");
    }

    #[test]
    fn leading_fields_round_trip() {
        let ev = parse_line("240229 235959 -0.5 -24 -1.8 14074321 SP2SJG JO93").unwrap();
        assert_eq!(ev.timestamp.format("%y%m%d %H%M%S").to_string(), "240229 235959");
        assert_eq!(ev.sync, -0.5);
        assert_eq!(ev.snr_db, -24);
        assert_eq!(ev.delta_time_s, -1.8);
        assert_eq!(ev.freq_hz, 14_074_321);
    }

    #[test]
    fn missing_grid_is_empty() {
        let ev = parse_line("230101 120000  1.5  10  0.2  7075123 AB1XYZ").unwrap();
        assert_eq!(ev.callsign, "AB1XYZ");
        assert_eq!(ev.grid, "");
    }

    #[test]
    fn missing_callsign_and_grid_are_empty() {
        let ev = parse_line("230101 120000  1.5  10  0.2  7075123").unwrap();
        assert_eq!(ev.callsign, "");
        assert_eq!(ev.grid, "");
    }

    #[test]
    fn rejects_unparseable_time() {
        assert!(parse_line("garbage 120000 1.5 10 0.2 7075123 AB1XYZ FN42").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn rejects_missing_numeric_field() {
        assert!(parse_line("230101 120000  1.5  10  0.2").is_none());
        assert!(parse_line("230101 120000  1.5  x  0.2  7075123").is_none());
    }

    #[test]
    fn flexible_whitespace_between_tokens() {
        let ev = parse_line("230101 120000 1.5 10 0.2 7075123   AB1XYZ    FN42").unwrap();
        assert_eq!(ev.callsign, "AB1XYZ");
        assert_eq!(ev.grid, "FN42");
    }

    #[test]
    fn overlong_callsign_spills_into_grid() {
        let ev = parse_line("230101 120000 1.5 10 0.2 7075123 ABCDEFGHIJKLMNOP").unwrap();
        assert_eq!(ev.callsign, "ABCDEFGHIJKLM");
        assert_eq!(ev.grid, "NOP");
    }

    #[test]
    fn junk_glued_to_numeric_field_rejects_line() {
        // the integer read stops at "dB"; the following float read then
        // stalls on it and the whole line is rejected
        assert!(parse_line("230101 120000 1.5 10dB 0.2 7075123 AB1XYZ FN42").is_none());
    }
}
