//! `bp-pins`: decode Blueprint pin attribute lists to JSON.
//!
//! Input is either clipboard text (node blocks with
//! `CustomProperties Pin (...)` lines) or bare attribute lists, one per
//! line. Verbosity follows `RUST_LOG`.

use bp_core::config::{ConfigError, DecodeConfig};
use bp_core::model::PinProperty;
use bp_core::palette::pin_color;
use bp_core::parser::{PinPropertyParser, strip_pin_wrapper};
use clap::Parser;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "bp-pins")]
#[command(about = "Decode Blueprint pin attribute lists to JSON", long_about = None)]
struct Cli {
    /// Clipboard text or attribute lists to read; stdin when absent or `-`
    input: Option<PathBuf>,

    /// Node name for pins outside a `Begin Object` block
    #[arg(short, long, default_value = "")]
    node: String,

    /// Decoder config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enum registry (JSON), replaces the config's enums
    #[arg(short, long)]
    enums: Option<PathBuf>,

    /// Keep pin names as written
    #[arg(long)]
    raw_names: bool,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// A decoded pin plus its editor color.
#[derive(Serialize)]
struct PinRecord<'a> {
    #[serde(flatten)]
    pin: &'a PinProperty,
    color: String,
}

/// One attribute list found in the input, with the node that owns it.
#[derive(Debug, PartialEq, Eq)]
struct PinSource<'a> {
    node: &'a str,
    attributes: &'a str,
}

/// `Name="..."` of a `Begin Object` line.
fn begin_object_name(line: &str) -> Option<&str> {
    let rest = line.split_once("Name=\"")?.1;
    rest.split_once('"').map(|(name, _)| name)
}

/// Collect every pin attribute list in `text`.
///
/// Inside `Begin Object` / `End Object` blocks only `CustomProperties Pin`
/// lines are pins, owned by the innermost named block. Outside blocks each
/// non-empty line is taken as a bare attribute list owned by `default_node`.
fn collect_pins<'a>(text: &'a str, default_node: &'a str) -> Vec<PinSource<'a>> {
    let mut nodes: Vec<&str> = Vec::new();
    let mut pins = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Begin Object") {
            let owner = nodes.last().copied().unwrap_or(default_node);
            nodes.push(begin_object_name(trimmed).unwrap_or(owner));
        } else if trimmed.starts_with("End Object") {
            nodes.pop();
        } else if let Some(attributes) = strip_pin_wrapper(trimmed) {
            pins.push(PinSource {
                node: nodes.last().copied().unwrap_or(default_node),
                attributes,
            });
        } else if nodes.is_empty() && !trimmed.is_empty() {
            pins.push(PinSource {
                node: default_node,
                attributes: trimmed,
            });
        }
    }

    pins
}

fn load_config(cli: &Cli) -> Result<DecodeConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => DecodeConfig::load(path)?,
        None => DecodeConfig::default(),
    };
    if let Some(path) = &cli.enums {
        config.enums = DecodeConfig::load_enums(path)?;
    }
    if cli.raw_names {
        config.prettify_names = false;
    }
    Ok(config)
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let text = read_input(cli.input.as_ref()).map_err(CliError::Input)?;

    let parser = PinPropertyParser::new(&config);
    let pins: Vec<PinProperty> = collect_pins(&text, &cli.node)
        .into_iter()
        .map(|source| parser.parse(source.attributes, source.node))
        .collect();
    log::info!("decoded {} pins", pins.len());

    let records: Vec<PinRecord<'_>> = pins
        .iter()
        .map(|pin| PinRecord {
            pin,
            color: pin_color(pin).to_hex(),
        })
        .collect();

    let mut stdout = io::stdout().lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut stdout, &records)?;
    } else {
        serde_json::to_writer(&mut stdout, &records)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("bp-pins: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pins_inside_blocks_belong_to_their_node() {
        let text = r#"Begin Object Class=/Script/BlueprintGraph.K2Node_IfThenElse Name="K2Node_IfThenElse_0"
   NodePosX=128
   CustomProperties Pin (PinId=A,PinName="execute",)
   CustomProperties Pin (PinId=B,PinName="Condition",)
End Object
Begin Object Class=/Script/BlueprintGraph.K2Node_Event Name="K2Node_Event_0"
   CustomProperties Pin (PinId=C,PinName="then",)
End Object
"#;
        assert_eq!(
            collect_pins(text, "unused"),
            vec![
                PinSource {
                    node: "K2Node_IfThenElse_0",
                    attributes: "PinId=A,PinName=\"execute\",",
                },
                PinSource {
                    node: "K2Node_IfThenElse_0",
                    attributes: "PinId=B,PinName=\"Condition\",",
                },
                PinSource {
                    node: "K2Node_Event_0",
                    attributes: "PinId=C,PinName=\"then\",",
                },
            ]
        );
    }

    #[test]
    fn bare_lines_use_default_node() {
        let text = "PinId=A,PinName=\"x\"\n\n  PinId=B  \n";
        assert_eq!(
            collect_pins(text, "K2Node_0"),
            vec![
                PinSource {
                    node: "K2Node_0",
                    attributes: "PinId=A,PinName=\"x\"",
                },
                PinSource {
                    node: "K2Node_0",
                    attributes: "PinId=B",
                },
            ]
        );
    }

    #[test]
    fn node_properties_are_not_pins() {
        let text = "Begin Object Name=\"K2Node_0\"\n   NodeGuid=ABC\nEnd Object\n";
        assert!(collect_pins(text, "").is_empty());
    }

    #[test]
    fn begin_object_names() {
        assert_eq!(
            begin_object_name(r#"Begin Object Class=/Script/X.Y Name="K2Node_1" ExportPath="a""#),
            Some("K2Node_1")
        );
        assert_eq!(begin_object_name("Begin Object Class=/Script/X.Y"), None);
    }

    #[test]
    fn records_carry_color() {
        let pin = bp_core::parser::parse_pin(r#"PinType.PinCategory="bool""#, "K2Node_0");
        let record = PinRecord {
            pin: &pin,
            color: pin_color(&pin).to_hex(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["color"], "#920101");
        assert_eq!(json["category"], "bool");
        assert_eq!(json["default_value"]["value"], false);
    }

    #[test]
    fn cli_flags_parse() {
        let cli = Cli::parse_from(["bp-pins", "pins.txt", "--node", "K2Node_3", "--raw-names", "-p"]);
        assert_eq!(cli.input, Some(PathBuf::from("pins.txt")));
        assert_eq!(cli.node, "K2Node_3");
        assert!(cli.raw_names);
        assert!(cli.pretty);

        let config = load_config(&cli).unwrap();
        assert!(!config.prettify_names);
    }
}
