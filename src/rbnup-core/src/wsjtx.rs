// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Pruned WSJT-X UDP broadcast protocol, schema version 2.
//!
//! RBN Aggregator only inspects a handful of fields in each datagram; the
//! remaining schema fields are populated with fixed values so the payload
//! stays byte-compatible. All multi-byte integers are big-endian and strings
//! are 4-byte length-prefixed with no terminator.

pub const MAGIC: [u8; 4] = [0xAD, 0xBC, 0xCB, 0xDA];
pub const SCHEMA_VERSION: u32 = 2;
pub const MSG_STATUS: u32 = 1;
pub const MSG_DECODE: u32 = 2;
pub const MODE_FT8: &str = "FT8";

/// Status datagram (message type 1), announcing the active channel.
#[derive(Debug, Clone)]
pub struct StatusDatagram<'a> {
    pub software_id: &'a str,
    pub dial_freq_hz: u32,
    pub mode: &'a str,
    /// Callsign of the decoded station; informational only.
    pub dx_call: &'a str,
    /// SNR rendered as a decimal string; informational only.
    pub report: &'a str,
    pub de_call: &'a str,
    pub de_grid: &'a str,
    pub dx_grid: &'a str,
}

impl StatusDatagram<'_> {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = header(MSG_STATUS);
        push_utf8(&mut out, self.software_id);
        push_u64_be(&mut out, u64::from(self.dial_freq_hz));
        push_utf8(&mut out, self.mode);
        push_utf8(&mut out, self.dx_call);
        push_utf8(&mut out, self.report);
        push_utf8(&mut out, self.mode); // tx mode
        push_bool(&mut out, false); // tx enabled
        push_bool(&mut out, false); // transmitting
        push_bool(&mut out, false); // decoding
        push_u32_be(&mut out, 0); // rx offset
        push_u32_be(&mut out, 0); // tx offset
        push_utf8(&mut out, self.de_call);
        push_utf8(&mut out, self.de_grid);
        push_utf8(&mut out, self.dx_grid);
        push_bool(&mut out, false); // tx watchdog
        push_utf8(&mut out, ""); // submode
        push_bool(&mut out, false); // fast mode
        out.push(0); // special operation mode
        out
    }
}

/// Decode datagram (message type 2), carrying one spot.
#[derive(Debug, Clone)]
pub struct DecodeDatagram<'a> {
    pub software_id: &'a str,
    pub snr_db: i32,
    pub delta_time_s: f64,
    pub delta_freq_hz: i32,
    pub mode: &'a str,
    pub message: &'a str,
}

impl DecodeDatagram<'_> {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = header(MSG_DECODE);
        push_utf8(&mut out, self.software_id);
        push_bool(&mut out, true); // new decode
        push_u32_be(&mut out, 0); // time since midnight, unused
        push_i32_be(&mut out, self.snr_db);
        out.extend_from_slice(&encode_f64(self.delta_time_s));
        push_i32_be(&mut out, self.delta_freq_hz);
        push_utf8(&mut out, self.mode);
        push_utf8(&mut out, self.message);
        push_bool(&mut out, false); // low confidence
        push_bool(&mut out, false); // off air
        out
    }
}

/// Encode a 64-bit float for the wire: IEEE-754 bits split into two 32-bit
/// words, each big-endian, high word first. Zero (either sign) encodes as
/// eight zero bytes.
pub fn encode_f64(value: f64) -> [u8; 8] {
    if value == 0.0 {
        return [0; 8];
    }
    let bits = value.to_bits();
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&((bits >> 32) as u32).to_be_bytes());
    out[4..].copy_from_slice(&(bits as u32).to_be_bytes());
    out
}

fn header(msg_type: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(192);
    out.extend_from_slice(&MAGIC);
    push_u32_be(&mut out, SCHEMA_VERSION);
    push_u32_be(&mut out, msg_type);
    out
}

fn push_bool(out: &mut Vec<u8>, v: bool) {
    out.push(u8::from(v));
}

fn push_u32_be(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_i32_be(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_u64_be(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_utf8(out: &mut Vec<u8>, s: &str) {
    push_u32_be(out, s.len() as u32);
    out.extend_from_slice(s.as_bytes());
}
