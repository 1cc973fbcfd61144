// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Core of the FT8 decode-log uplink: decode-log line parsing, the FT8
//! channel plan, and the pruned WSJT-X datagram encoding consumed by
//! RBN Aggregator.

pub mod channel;
pub mod decode;
pub mod spot;
pub mod wsjtx;

pub use channel::ChannelPlan;
pub use decode::{parse_line, DecodeEvent};
pub use spot::{EncodedSpot, SpotEncoder, StationIdentity};
