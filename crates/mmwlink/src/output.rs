use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use mmwlink_frame::{tlv_name, SensorFrame};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PointOutput {
    x: f32,
    y: f32,
    z: f32,
    velocity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    snr: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    noise: Option<i16>,
}

#[derive(Serialize)]
struct TlvOutput {
    kind: u32,
    name: &'static str,
    len: usize,
}

#[derive(Serialize)]
struct FrameOutput {
    schema_id: &'static str,
    frame_number: u32,
    sub_frame_number: u32,
    time_cpu_cycles: u32,
    num_detected_obj: u32,
    points: Vec<PointOutput>,
    extra_tlvs: Vec<TlvOutput>,
}

fn frame_output(frame: &SensorFrame) -> FrameOutput {
    let points = frame
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let side = frame.side_info.get(i);
            PointOutput {
                x: p.x,
                y: p.y,
                z: p.z,
                velocity: p.velocity,
                snr: side.map(|s| s.snr),
                noise: side.map(|s| s.noise),
            }
        })
        .collect();

    FrameOutput {
        schema_id: "https://schemas.3leaps.dev/mmwlink/cli/v1/frame-decoded.schema.json",
        frame_number: frame.header.frame_number,
        sub_frame_number: frame.header.sub_frame_number,
        time_cpu_cycles: frame.header.time_cpu_cycles,
        num_detected_obj: frame.header.num_detected_obj,
        points,
        extra_tlvs: frame
            .extra_tlvs
            .iter()
            .map(|tlv| TlvOutput {
                kind: tlv.kind,
                name: tlv_name(tlv.kind),
                len: tlv.payload.len(),
            })
            .collect(),
    }
}

pub fn print_frame(frame: &SensorFrame, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&frame_output(frame)).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAME", "SUBFRAME", "POINTS", "EXTRA TLVS", "NEAREST"])
                .add_row(vec![
                    frame.header.frame_number.to_string(),
                    frame.header.sub_frame_number.to_string(),
                    frame.points.len().to_string(),
                    frame.extra_tlvs.len().to_string(),
                    nearest_point_preview(frame),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "frame={} subframe={} points={} extra_tlvs={} nearest={}",
                frame.header.frame_number,
                frame.header.sub_frame_number,
                frame.points.len(),
                frame.extra_tlvs.len(),
                nearest_point_preview(frame),
            );
        }
    }
}

/// The detection closest to the sensor, as a compact preview string.
fn nearest_point_preview(frame: &SensorFrame) -> String {
    let nearest = frame.points.iter().min_by(|a, b| {
        let ra = a.x * a.x + a.y * a.y + a.z * a.z;
        let rb = b.x * b.x + b.y * b.y + b.z * b.z;
        ra.total_cmp(&rb)
    });
    match nearest {
        Some(p) => format!(
            "({:.2}, {:.2}, {:.2}) v={:.2}",
            p.x, p.y, p.z, p.velocity
        ),
        None => "-".to_string(),
    }
}
