#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::Command;

use bytes::{BufMut, BytesMut};
use mmwlink::frame::{HEADER_SIZE, MAGIC_WORD, TLV_DETECTED_POINTS};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/mmwlink-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn frame_bytes(frame_number: u32, points: &[(f32, f32, f32, f32)]) -> Vec<u8> {
    let tlv_len = points.len() * 16;
    let num_tlvs = u32::from(!points.is_empty());
    let total = HEADER_SIZE + if points.is_empty() { 0 } else { 8 + tlv_len };

    let mut buf = BytesMut::new();
    buf.put_slice(&MAGIC_WORD);
    buf.put_u32_le(0x0304_0006);
    buf.put_u32_le(total as u32);
    buf.put_u32_le(0x000A_6843);
    buf.put_u32_le(frame_number);
    buf.put_u32_le(0);
    buf.put_u32_le(points.len() as u32);
    buf.put_u32_le(num_tlvs);
    buf.put_u32_le(0);
    if !points.is_empty() {
        buf.put_u32_le(TLV_DETECTED_POINTS);
        buf.put_u32_le(tlv_len as u32);
        for (x, y, z, v) in points {
            buf.put_f32_le(*x);
            buf.put_f32_le(*y);
            buf.put_f32_le(*z);
            buf.put_f32_le(*v);
        }
    }
    buf.to_vec()
}

#[test]
fn replay_prints_decoded_frames_as_json() {
    let dir = unique_temp_dir("replay-json");
    let capture = dir.join("capture.bin");

    // Line noise before the first frame, then three frames; a trailing magic
    // word completes the third.
    let mut wire = vec![0xDE, 0xAD, 0xBE, 0xEF];
    wire.extend_from_slice(&frame_bytes(1, &[(1.0, 2.0, 0.0, 0.5)]));
    wire.extend_from_slice(&frame_bytes(2, &[]));
    wire.extend_from_slice(&frame_bytes(3, &[(0.0, 4.5, -0.5, -1.0), (2.0, 2.0, 0.0, 0.0)]));
    wire.extend_from_slice(&MAGIC_WORD);
    std::fs::write(&capture, &wire).expect("capture should be writable");

    let output = Command::new(env!("CARGO_BIN_EXE_mmwlink"))
        .arg("--log-level")
        .arg("error")
        .arg("--format")
        .arg("json")
        .arg("replay")
        .arg(&capture)
        .arg("--chunk-size")
        .arg("16")
        .output()
        .expect("replay command should run");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect();

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0]["frame_number"], 1);
    assert_eq!(frames[1]["frame_number"], 2);
    assert_eq!(frames[2]["frame_number"], 3);
    assert_eq!(frames[0]["points"].as_array().map(Vec::len), Some(1));
    assert_eq!(frames[2]["points"].as_array().map(Vec::len), Some(2));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn replay_missing_capture_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_mmwlink"))
        .arg("--log-level")
        .arg("error")
        .arg("replay")
        .arg("/nonexistent/capture.bin")
        .output()
        .expect("replay command should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("capture read failed"), "stderr: {stderr}");
}

#[test]
fn version_reports_package() {
    let output = Command::new(env!("CARGO_BIN_EXE_mmwlink"))
        .arg("version")
        .output()
        .expect("version command should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("mmwlink "), "stdout: {stdout}");
}
