//! Transport payload decoding.
//!
//! The wearable pushes one notification per sample. The payload carries no
//! header and no timestamp: the receiver stamps each packet on arrival.
//!
//! # Payload Format (12 bytes, little-endian)
//!
//! ```text
//! ┌────────┬────────┬────────┬────────┬────────┬────────┐
//! │ ax i16 │ ay i16 │ az i16 │ gx i16 │ gy i16 │ gz i16 │
//! │ milli-g│ milli-g│ milli-g│ cdeg/s │ cdeg/s │ cdeg/s │
//! └────────┴────────┴────────┴────────┴────────┴────────┘
//! ```

use log::warn;

use crate::error::WireError;
use crate::types::RawSample;

/// Exact size of one sample notification.
pub const SAMPLE_PAYLOAD_LEN: usize = 12;

#[inline]
fn read_i16(buf: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buf[offset], buf[offset + 1]])
}

/// Decode one notification payload stamped with its receive time.
///
/// Payloads of any other length are rejected rather than truncated.
pub fn decode_sample(payload: &[u8], timestamp_ms: u64) -> Result<RawSample, WireError> {
    if payload.len() != SAMPLE_PAYLOAD_LEN {
        warn!(
            "dropping sample payload of {} bytes (expected {})",
            payload.len(),
            SAMPLE_PAYLOAD_LEN
        );
        return Err(WireError::InvalidLength {
            expected: SAMPLE_PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    Ok(RawSample {
        ax: read_i16(payload, 0),
        ay: read_i16(payload, 2),
        az: read_i16(payload, 4),
        gx: read_i16(payload, 6),
        gy: read_i16(payload, 8),
        gz: read_i16(payload, 10),
        timestamp_ms,
    })
}

impl RawSample {
    /// Write the 12-byte payload form of this sample. The timestamp is not
    /// part of the payload.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        if buf.len() < SAMPLE_PAYLOAD_LEN {
            return Err(WireError::BufferTooSmall {
                needed: SAMPLE_PAYLOAD_LEN,
                available: buf.len(),
            });
        }
        self.encode(buf);
        Ok(SAMPLE_PAYLOAD_LEN)
    }

    /// Payload bytes of this sample.
    pub fn to_payload(&self) -> [u8; SAMPLE_PAYLOAD_LEN] {
        let mut buf = [0u8; SAMPLE_PAYLOAD_LEN];
        self.encode(&mut buf);
        buf
    }

    // Caller guarantees buf holds at least SAMPLE_PAYLOAD_LEN bytes
    fn encode(&self, buf: &mut [u8]) {
        let fields = [self.ax, self.ay, self.az, self.gx, self.gy, self.gz];
        for (i, v) in fields.iter().enumerate() {
            buf[i * 2..i * 2 + 2].copy_from_slice(&v.to_le_bytes());
        }
    }
}
