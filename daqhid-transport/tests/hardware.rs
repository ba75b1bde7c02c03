//! Smoke test against real hardware.
//!
//! Requires a supported DAQ device to be connected. Run with:
//! cargo test -p daqhid-transport --test hardware -- --ignored --nocapture

use daqhid_transport::{DeviceRegistry, ReportSender};
use hidapi::HidApi;

#[test]
#[ignore] // requires hardware
fn echo_against_first_discovered_device() {
    let api = HidApi::new().expect("hidapi init failed");
    let registry = DeviceRegistry::discover(&api);
    assert!(
        !registry.is_empty(),
        "no DAQ device connected — plug in a supported module"
    );

    let sender = ReportSender::new(registry);
    let result = sender
        .send_report(0, 0, 0, &[0x01, 0x02, 0x03])
        .expect("echo send failed");
    assert!(result.is_success());
}
