use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serialport::SerialPortType;

use crate::cmd::PortsArgs;
use crate::exit::{CliError, CliResult, SUCCESS, TRANSPORT_ERROR};
use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct PortEntry {
    name: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<String>,
}

#[derive(Debug, Serialize)]
struct PortsOutput {
    schema_id: &'static str,
    ports: Vec<PortEntry>,
}

pub fn run(_args: PortsArgs, format: OutputFormat) -> CliResult<i32> {
    let ports = serialport::available_ports()
        .map_err(|err| CliError::new(TRANSPORT_ERROR, format!("port enumeration failed: {err}")))?;

    let entries: Vec<PortEntry> = ports
        .into_iter()
        .map(|port| {
            let (kind, product) = match port.port_type {
                SerialPortType::UsbPort(info) => ("usb", info.product),
                SerialPortType::PciPort => ("pci", None),
                SerialPortType::BluetoothPort => ("bluetooth", None),
                SerialPortType::Unknown => ("unknown", None),
            };
            PortEntry {
                name: port.port_name,
                kind,
                product,
            }
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let output = PortsOutput {
                schema_id: "https://schemas.3leaps.dev/mmwlink/cli/v1/ports.schema.json",
                ports: entries,
            };
            println!(
                "{}",
                serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND", "PRODUCT"]);
            for entry in &entries {
                table.add_row(vec![
                    entry.name.clone(),
                    entry.kind.to_string(),
                    entry.product.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in &entries {
                println!(
                    "{} kind={} product={}",
                    entry.name,
                    entry.kind,
                    entry.product.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(SUCCESS)
}
