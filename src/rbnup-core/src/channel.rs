// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! FT8 channel plan: snaps receive frequencies to standard dial frequencies.

/// Width of one receive window above its base frequency.
pub const CHANNEL_WINDOW_HZ: u32 = 4_000;

/// Standard FT8 dial frequencies covered by the stock receiver builds.
const BUILTIN_BASES_HZ: [u32; 16] = [
    1_840_000, 3_573_000, 5_357_000, 7_056_000, 7_074_000, 10_131_000, 10_136_000, 14_074_000,
    18_095_000, 18_100_000, 21_074_000, 24_911_000, 24_915_000, 28_074_000, 50_313_000, 50_323_000,
];

/// Immutable, ordered table of 4 kHz windows mapping a receive frequency to
/// its base frequency, with a round-down fallback for everything else.
#[derive(Debug, Clone)]
pub struct ChannelPlan {
    bases: Vec<u32>,
}

impl ChannelPlan {
    /// The builtin plan with the standard dial frequencies only.
    pub fn builtin() -> Self {
        Self::with_extra_bases(&[])
    }

    /// Builtin plan extended with site-specific window bases.
    pub fn with_extra_bases(extra: &[u32]) -> Self {
        let mut bases: Vec<u32> = BUILTIN_BASES_HZ
            .iter()
            .chain(extra.iter())
            .copied()
            .collect();
        bases.sort_unstable();
        bases.dedup();
        Self { bases }
    }

    /// Snap a receive frequency to the base of its window. Frequencies
    /// outside every window round down to the kHz boundary 200 Hz below.
    pub fn base_for(&self, freq_hz: u32) -> u32 {
        self.bases
            .iter()
            .copied()
            .find(|&base| freq_hz >= base && freq_hz - base < CHANNEL_WINDOW_HZ)
            .unwrap_or_else(|| fallback_base(freq_hz))
    }
}

// The 200 Hz offset follows the receiver's calibration convention; it can
// place the base below the nominal kHz boundary for frequencies within
// 200 Hz of one.
fn fallback_base(freq_hz: u32) -> u32 {
    ((i64::from(freq_hz) - 200) / 1_000 * 1_000).max(0) as u32
}
