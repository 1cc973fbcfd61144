// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Sequential decode-file to UDP broadcast driver.
//!
//! One line in, zero to two datagrams out, before the next line is read.
//! Malformed lines are skipped; every transport failure is fatal, since a
//! silently lost datagram would corrupt the aggregator's view of the
//! receiver state.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;
use tokio::time;
use tracing::{debug, warn};

use rbnup_core::{parse_line, SpotEncoder};

/// Soft ceiling on bytes per run; beyond it the aggregator has been seen to
/// drop decodes, so the operator gets a warning.
const UPLOAD_SIZE_WARN_BYTES: u64 = 65_535;

#[derive(Debug, Error)]
pub enum UplinkError {
    #[error("Cannot set up broadcast socket for {target}: {source}")]
    Socket {
        target: SocketAddr,
        source: std::io::Error,
    },

    #[error("Cannot open decode file '{path}': {source}")]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading decode file: {0}")]
    Read(std::io::Error),

    #[error("Send to {target} failed: {source}")]
    Send {
        target: SocketAddr,
        source: std::io::Error,
    },

    #[error("Sent {sent} of {expected} bytes to {target}")]
    ShortWrite {
        target: SocketAddr,
        sent: usize,
        expected: usize,
    },
}

/// Per-run counters, reported once at the end of the run.
#[derive(Debug, Default)]
pub struct UplinkStats {
    pub lines: u64,
    pub skipped: u64,
    pub decodes_sent: u64,
    pub status_sent: u64,
    pub bytes_sent: u64,
}

/// Stream the decode file to the broadcast target until end of file.
pub async fn run_uplink(
    target: SocketAddr,
    decode_file: &Path,
    mut encoder: SpotEncoder,
    status_pacing: Duration,
) -> Result<UplinkStats, UplinkError> {
    let socket = open_broadcast_socket(target).await?;
    let file = File::open(decode_file)
        .await
        .map_err(|source| UplinkError::OpenFile {
            path: decode_file.to_path_buf(),
            source,
        })?;
    let mut lines = BufReader::new(file).lines();
    let mut stats = UplinkStats::default();

    while let Some(line) = lines.next_line().await.map_err(UplinkError::Read)? {
        stats.lines += 1;
        let Some(event) = parse_line(&line) else {
            debug!("skipping unparseable line: {}", line.trim_end());
            stats.skipped += 1;
            continue;
        };

        let spot = encoder.encode_event(&event);
        if let Some(status) = &spot.status {
            send_all(&socket, target, status).await?;
            stats.status_sent += 1;
            stats.bytes_sent += status.len() as u64;
            // Give the receiver time to register the channel switch before
            // the decode datagram lands.
            time::sleep(status_pacing).await;
        }
        send_all(&socket, target, &spot.decode).await?;
        stats.decodes_sent += 1;
        stats.bytes_sent += spot.decode.len() as u64;
        debug!(
            "decode at {} Hz (base {} Hz, delta {} Hz), snr {} dB",
            event.freq_hz, spot.base_freq_hz, spot.delta_hz, event.snr_db
        );
    }

    if stats.bytes_sent > UPLOAD_SIZE_WARN_BYTES {
        warn!(
            "Total upload is {} bytes, risk for lost decodes",
            stats.bytes_sent
        );
    }
    Ok(stats)
}

async fn open_broadcast_socket(target: SocketAddr) -> Result<UdpSocket, UplinkError> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .map_err(|source| UplinkError::Socket { target, source })?;
    socket
        .set_broadcast(true)
        .map_err(|source| UplinkError::Socket { target, source })?;
    socket
        .connect(target)
        .await
        .map_err(|source| UplinkError::Socket { target, source })?;
    Ok(socket)
}

async fn send_all(
    socket: &UdpSocket,
    target: SocketAddr,
    buf: &[u8],
) -> Result<(), UplinkError> {
    let sent = socket
        .send(buf)
        .await
        .map_err(|source| UplinkError::Send { target, source })?;
    if sent != buf.len() {
        return Err(UplinkError::ShortWrite {
            target,
            sent,
            expected: buf.len(),
        });
    }
    Ok(())
}
