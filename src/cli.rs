// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "daqhid")]
#[command(author, version, about = "Send reports to USB HID data-acquisition devices")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Emit results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List detected DAQ devices
    #[command(visible_aliases = ["ls", "l"])]
    List,

    /// Send an output or feature report (or echo it for inspection)
    #[command(visible_alias = "s")]
    Send {
        /// Device index from `list`
        #[arg(short, long, default_value_t = 0)]
        device: usize,

        /// Report type
        #[arg(short = 't', long = "type", value_enum, default_value = "output")]
        report_type: ReportTypeArg,

        /// Report id (0 = no id framing; 0x11 arms the scan clock)
        #[arg(short = 'i', long, default_value_t = 0, value_parser = parse_byte)]
        id: u8,

        /// Report bytes, decimal or 0x-hex, space or comma separated
        #[arg(required = true)]
        bytes: Vec<String>,
    },
}

/// Report type names mapped to the raw wire values the transport
/// validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportTypeArg {
    /// Trace the report without touching the device
    Echo,
    /// HID output report
    Output,
    /// HID feature report
    Feature,
}

impl ReportTypeArg {
    pub fn raw(self) -> i32 {
        match self {
            Self::Echo => 0,
            Self::Output => 2,
            Self::Feature => 3,
        }
    }
}

/// Parse "17" or "0x11" style byte values
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };
    u8::from_str_radix(digits, radix).map_err(|e| format!("invalid byte {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_byte_accepts_both_radices() {
        assert_eq!(parse_byte("17").unwrap(), 17);
        assert_eq!(parse_byte("0x11").unwrap(), 0x11);
        assert_eq!(parse_byte("0XFF").unwrap(), 0xFF);
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("zz").is_err());
    }

    #[test]
    fn report_type_args_map_to_wire_values() {
        assert_eq!(ReportTypeArg::Echo.raw(), 0);
        assert_eq!(ReportTypeArg::Output.raw(), 2);
        assert_eq!(ReportTypeArg::Feature.raw(), 3);
    }
}
