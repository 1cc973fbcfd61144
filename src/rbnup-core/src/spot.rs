// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Turns parsed decode events into the datagrams to broadcast.
//!
//! The encoder owns the only mutable state of the pipeline: the base
//! frequency of the previously reported channel. A decode on a new channel
//! is preceded by a status datagram announcing the switch.

use crate::channel::ChannelPlan;
use crate::decode::DecodeEvent;
use crate::wsjtx::{DecodeDatagram, StatusDatagram, MODE_FT8};

/// Station fields carried in the status datagram. RBN Aggregator ignores
/// them, but the schema requires them to be present.
#[derive(Debug, Clone)]
pub struct StationIdentity {
    pub software_id: String,
    pub operator_callsign: String,
    pub operator_grid: String,
}

impl Default for StationIdentity {
    fn default() -> Self {
        Self {
            software_id: "QMTECH FT8 RX 1.0".to_string(),
            operator_callsign: "AB1CDE".to_string(),
            operator_grid: "AB12".to_string(),
        }
    }
}

/// Wire output for one decode event.
#[derive(Debug, Clone)]
pub struct EncodedSpot {
    /// Present when the decode moved to a new channel; must be sent first.
    pub status: Option<Vec<u8>>,
    pub decode: Vec<u8>,
    pub base_freq_hz: u32,
    pub delta_hz: i32,
}

/// Stateful event-to-datagram encoder.
#[derive(Debug)]
pub struct SpotEncoder {
    plan: ChannelPlan,
    identity: StationIdentity,
    prev_base_hz: Option<u32>,
}

impl SpotEncoder {
    pub fn new(plan: ChannelPlan, identity: StationIdentity) -> Self {
        Self {
            plan,
            identity,
            prev_base_hz: None,
        }
    }

    /// Encode one event. The first event of a run always produces a status
    /// datagram; later events only when the resolved base frequency changes.
    pub fn encode_event(&mut self, event: &DecodeEvent) -> EncodedSpot {
        let base_freq_hz = self.plan.base_for(event.freq_hz);
        let delta_hz = (i64::from(event.freq_hz) - i64::from(base_freq_hz)) as i32;
        let report = event.snr_db.to_string();
        let message = format!("CQ {} {}", event.callsign, event.grid);

        let status = if self.prev_base_hz != Some(base_freq_hz) {
            Some(
                StatusDatagram {
                    software_id: &self.identity.software_id,
                    dial_freq_hz: base_freq_hz,
                    mode: MODE_FT8,
                    dx_call: &event.callsign,
                    report: &report,
                    de_call: &self.identity.operator_callsign,
                    de_grid: &self.identity.operator_grid,
                    dx_grid: &self.identity.operator_grid,
                }
                .encode(),
            )
        } else {
            None
        };
        self.prev_base_hz = Some(base_freq_hz);

        let decode = DecodeDatagram {
            software_id: &self.identity.software_id,
            snr_db: event.snr_db,
            delta_time_s: event.delta_time_s,
            delta_freq_hz: delta_hz,
            mode: MODE_FT8,
            message: &message,
        }
        .encode();

        EncodedSpot {
            status,
            decode,
            base_freq_hz,
            delta_hz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse_line;
    use crate::wsjtx::MAGIC;

    fn encoder() -> SpotEncoder {
        SpotEncoder::new(ChannelPlan::builtin(), StationIdentity::default())
    }

    fn event(freq_hz: u32) -> DecodeEvent {
        let line = format!("230101 120000  1.5  10  0.2  {} AB1XYZ FN42", freq_hz);
        parse_line(&line).unwrap()
    }

    #[test]
    fn first_event_emits_status() {
        let mut enc = encoder();
        let spot = enc.encode_event(&event(7_075_123));
        assert!(spot.status.is_some());
        assert_eq!(spot.base_freq_hz, 7_074_000);
        assert_eq!(spot.delta_hz, 1_123);
    }

    #[test]
    fn same_channel_skips_status() {
        let mut enc = encoder();
        assert!(enc.encode_event(&event(7_075_123)).status.is_some());
        assert!(enc.encode_event(&event(7_074_500)).status.is_none());
        assert!(enc.encode_event(&event(7_077_999)).status.is_none());
    }

    #[test]
    fn channel_change_emits_status_again() {
        let mut enc = encoder();
        assert!(enc.encode_event(&event(7_075_123)).status.is_some());
        assert!(enc.encode_event(&event(14_074_800)).status.is_some());
        // and back again
        assert!(enc.encode_event(&event(7_075_200)).status.is_some());
        assert!(enc.encode_event(&event(7_075_300)).status.is_none());
    }

    #[test]
    fn decode_message_embeds_call_and_grid() {
        let mut enc = encoder();
        let spot = enc.encode_event(&event(7_075_123));
        let needle = b"CQ AB1XYZ FN42";
        assert!(spot
            .decode
            .windows(needle.len())
            .any(|w| w == needle.as_slice()));
    }

    #[test]
    fn missing_grid_leaves_trailing_space() {
        let mut enc = encoder();
        let ev = parse_line("230101 120000  1.5  10  0.2  7075123 AB1XYZ").unwrap();
        let spot = enc.encode_event(&ev);
        let needle = b"CQ AB1XYZ \x00";
        assert!(spot
            .decode
            .windows(needle.len())
            .any(|w| w == needle.as_slice()));
    }

    #[test]
    fn both_datagrams_carry_the_magic() {
        let mut enc = encoder();
        let spot = enc.encode_event(&event(7_075_123));
        assert_eq!(&spot.status.unwrap()[..4], &MAGIC);
        assert_eq!(&spot.decode[..4], &MAGIC);
    }
}
