use bytes::{Buf, Bytes};

use crate::error::{FrameError, Result};

/// Magic word marking the start of every frame on the wire.
pub const MAGIC_WORD: [u8; 8] = [0x02, 0x01, 0x04, 0x03, 0x06, 0x05, 0x08, 0x07];

/// Frame header: magic (8) + eight little-endian u32 fields = 40 bytes.
pub const HEADER_SIZE: usize = 40;

/// TLV record header: kind (4) + length (4).
pub const TLV_HEADER_SIZE: usize = 8;

/// Detected points: x, y, z, velocity as f32 each.
pub const TLV_DETECTED_POINTS: u32 = 1;
/// Range profile (raw passthrough).
pub const TLV_RANGE_PROFILE: u32 = 2;
/// Noise floor profile (raw passthrough).
pub const TLV_NOISE_PROFILE: u32 = 3;
/// Azimuth static heatmap (raw passthrough).
pub const TLV_AZIMUTH_HEATMAP: u32 = 4;
/// Range-Doppler heatmap (raw passthrough).
pub const TLV_RANGE_DOPPLER_HEATMAP: u32 = 5;
/// Chirp/frame processing statistics (raw passthrough).
pub const TLV_STATS: u32 = 6;
/// Per-point side info: SNR and noise as i16 each.
pub const TLV_POINT_SIDE_INFO: u32 = 7;

const POINT_RECORD_SIZE: usize = 16;
const SIDE_INFO_RECORD_SIZE: usize = 4;

/// Returns a human-readable name for a TLV kind.
pub fn tlv_name(kind: u32) -> &'static str {
    match kind {
        TLV_DETECTED_POINTS => "DETECTED_POINTS",
        TLV_RANGE_PROFILE => "RANGE_PROFILE",
        TLV_NOISE_PROFILE => "NOISE_PROFILE",
        TLV_AZIMUTH_HEATMAP => "AZIMUTH_HEATMAP",
        TLV_RANGE_DOPPLER_HEATMAP => "RANGE_DOPPLER_HEATMAP",
        TLV_STATS => "STATS",
        TLV_POINT_SIDE_INFO => "POINT_SIDE_INFO",
        _ => "UNKNOWN",
    }
}

/// Fixed frame header, minus the magic word.
///
/// All fields are little-endian u32 on the wire. `total_len` covers the whole
/// frame including the magic word, this header, and any trailing padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u32,
    pub total_len: u32,
    pub platform: u32,
    pub frame_number: u32,
    pub time_cpu_cycles: u32,
    pub num_detected_obj: u32,
    pub num_tlvs: u32,
    pub sub_frame_number: u32,
}

/// One radar detection in Cartesian sensor coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub velocity: f32,
}

/// Per-point detection quality, paired index-wise with the detected points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideInfo {
    pub snr: i16,
    pub noise: i16,
}

/// A TLV record this crate does not interpret, carried through as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    pub kind: u32,
    pub payload: Bytes,
}

/// One fully decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorFrame {
    pub header: FrameHeader,
    pub points: Vec<DetectedPoint>,
    pub side_info: Vec<SideInfo>,
    pub extra_tlvs: Vec<Tlv>,
}

/// Decode one raw frame slice.
///
/// Wire format:
/// ```text
/// ┌──────────────┬────────────────────┬───────────────────────────┐
/// │ Magic (8B)   │ Header (8 × u32 LE)│ TLVs up to total_len       │
/// │ 02 01 04 03  │ version, total_len,│ kind (u32 LE), len (u32 LE)│
/// │ 06 05 08 07  │ platform, ...      │ payload (len bytes)        │
/// └──────────────┴────────────────────┴───────────────────────────┘
/// ```
///
/// The slice may extend past `total_len` (inter-frame padding); anything
/// beyond the declared length is ignored. Never panics for any byte content.
pub fn decode_frame(raw: &[u8]) -> Result<SensorFrame> {
    if raw.len() < HEADER_SIZE {
        return Err(FrameError::TruncatedHeader {
            len: raw.len(),
            needed: HEADER_SIZE,
        });
    }
    if raw[..MAGIC_WORD.len()] != MAGIC_WORD {
        return Err(FrameError::BadMagic);
    }

    let mut cursor = &raw[MAGIC_WORD.len()..HEADER_SIZE];
    let header = FrameHeader {
        version: cursor.get_u32_le(),
        total_len: cursor.get_u32_le(),
        platform: cursor.get_u32_le(),
        frame_number: cursor.get_u32_le(),
        time_cpu_cycles: cursor.get_u32_le(),
        num_detected_obj: cursor.get_u32_le(),
        num_tlvs: cursor.get_u32_le(),
        sub_frame_number: cursor.get_u32_le(),
    };

    let total_len = header.total_len as usize;
    if total_len < HEADER_SIZE || total_len > raw.len() {
        return Err(FrameError::LengthMismatch {
            declared: total_len,
            actual: raw.len(),
        });
    }

    let mut body = &raw[HEADER_SIZE..total_len];
    let mut points = Vec::new();
    let mut side_info = Vec::new();
    let mut extra_tlvs = Vec::new();

    for _ in 0..header.num_tlvs {
        if body.len() < TLV_HEADER_SIZE {
            return Err(FrameError::TruncatedTlv {
                needed: TLV_HEADER_SIZE,
                remaining: body.len(),
            });
        }
        let kind = body.get_u32_le();
        let len = body.get_u32_le() as usize;
        if len > body.len() {
            return Err(FrameError::TruncatedTlv {
                needed: len,
                remaining: body.len(),
            });
        }

        match kind {
            TLV_DETECTED_POINTS => {
                points = decode_points(kind, &body[..len])?;
            }
            TLV_POINT_SIDE_INFO => {
                side_info = decode_side_info(kind, &body[..len])?;
            }
            _ => {
                extra_tlvs.push(Tlv {
                    kind,
                    payload: Bytes::copy_from_slice(&body[..len]),
                });
            }
        }
        body.advance(len);
    }

    Ok(SensorFrame {
        header,
        points,
        side_info,
        extra_tlvs,
    })
}

fn decode_points(kind: u32, mut payload: &[u8]) -> Result<Vec<DetectedPoint>> {
    if payload.len() % POINT_RECORD_SIZE != 0 {
        return Err(FrameError::TlvLength {
            kind,
            len: payload.len(),
            record: POINT_RECORD_SIZE,
        });
    }
    let mut points = Vec::with_capacity(payload.len() / POINT_RECORD_SIZE);
    while payload.has_remaining() {
        points.push(DetectedPoint {
            x: payload.get_f32_le(),
            y: payload.get_f32_le(),
            z: payload.get_f32_le(),
            velocity: payload.get_f32_le(),
        });
    }
    Ok(points)
}

fn decode_side_info(kind: u32, mut payload: &[u8]) -> Result<Vec<SideInfo>> {
    if payload.len() % SIDE_INFO_RECORD_SIZE != 0 {
        return Err(FrameError::TlvLength {
            kind,
            len: payload.len(),
            record: SIDE_INFO_RECORD_SIZE,
        });
    }
    let mut records = Vec::with_capacity(payload.len() / SIDE_INFO_RECORD_SIZE);
    while payload.has_remaining() {
        records.push(SideInfo {
            snr: payload.get_i16_le(),
            noise: payload.get_i16_le(),
        });
    }
    Ok(records)
}
