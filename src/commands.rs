// Command handlers (split from main.rs)

use anyhow::Context;
use hidapi::HidApi;
use tracing::debug;

use daqhid_transport::{DeviceRegistry, ReportSender};

use crate::cli::{parse_byte, ReportTypeArg};

/// List detected devices, one line (or one JSON record) per device
pub fn list(json: bool) -> anyhow::Result<()> {
    let api = HidApi::new().context("initializing hidapi")?;
    let registry = DeviceRegistry::discover(&api);
    debug!("Discovered {} device(s)", registry.len());

    if json {
        let infos: Vec<_> = registry.iter().map(|d| &d.info).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("No DAQ devices found");
        return Ok(());
    }

    for (index, device) in registry.iter().enumerate() {
        let info = &device.info;
        println!(
            "{index}: {:04x}:{:04x}  {}  {}",
            info.vid,
            info.pid,
            info.product.as_deref().unwrap_or("(unnamed)"),
            info.path
        );
    }
    Ok(())
}

/// Send one report and print the normalized result
pub fn send(
    device: usize,
    report_type: ReportTypeArg,
    id: u8,
    bytes: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let payload = parse_payload(bytes)?;

    let api = HidApi::new().context("initializing hidapi")?;
    let registry = DeviceRegistry::discover(&api);
    let sender = ReportSender::new(registry);

    // Pre-flight problems error out here; transport problems come back
    // as a result record below
    let result = sender.send_report(device, report_type.raw(), id, &payload)?;

    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else if result.is_success() {
        println!("ok");
    } else {
        println!(
            "error {} ({}): {}",
            result.code, result.name, result.description
        );
    }
    Ok(())
}

/// Flatten "aa,bb 0x10"-style arguments into report bytes.
///
/// Emptiness is not checked here; the transport's own pre-flight
/// validation owns that rule.
fn parse_payload(args: &[String]) -> anyhow::Result<Vec<u8>> {
    let mut payload = Vec::new();
    for arg in args {
        for token in arg.split([',', ' ']).filter(|t| !t.is_empty()) {
            payload.push(parse_byte(token).map_err(anyhow::Error::msg)?);
        }
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_tokens_split_on_commas_and_spaces() {
        let args = ["0xAA,0xBB".to_string(), "16".to_string()];
        assert_eq!(parse_payload(&args).unwrap(), vec![0xAA, 0xBB, 16]);
    }

    #[test]
    fn bad_tokens_are_reported() {
        let args = ["0xZZ".to_string()];
        assert!(parse_payload(&args).is_err());
    }
}
