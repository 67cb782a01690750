//
// Copyright (c) 2023 ZettaScale Technology
//
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// http://www.eclipse.org/legal/epl-2.0, or the Apache License, Version 2.0
// which is available at https://www.apache.org/licenses/LICENSE-2.0.
//
// SPDX-License-Identifier: EPL-2.0 OR Apache-2.0
//
// Contributors:
//   ZettaScale Zenoh Team, <zenoh@zettascale.tech>
//
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use zenoh_dissector::{DecodedFrame, Dissector, DissectorConfig, Framing, Outcome};
use zenoh_result::{bail, ZResult};
use zenoh_util::LogFormat;

const DEFAULT_LOG: &str = "zdissect=info,zenoh_dissector=warn";

#[derive(Debug, Parser)]
#[command(version, about = "Dissects captured Zenoh 0.6 frames")]
struct Args {
    /// Files holding one captured frame each, as raw bytes. Without any input, a single frame
    /// is read from stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
    /// A frame given as a hexadecimal string, whitespace being ignored (e.g. "03 00 04 08 34 2c").
    /// Repeat this option to dissect several frames.
    #[arg(short = 'x', long, value_name = "HEX")]
    hex: Vec<String>,
    /// The configuration file. Currently, this file must be a valid JSON5 file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// How messages are laid out in a frame: "datagram" (back to back) or "stream" (in batches
    /// prefixed by a 16-bit little-endian length). Overrides the configuration file.
    #[arg(short, long, value_name = "datagram|stream")]
    framing: Option<Framing>,
    /// The maximum number of layers decoded in one frame. Overrides the configuration file.
    #[arg(short, long, value_name = "N")]
    max_messages: Option<usize>,
    /// Prints one JSON object per frame instead of a tree.
    #[arg(long)]
    json: bool,
    /// How log lines are rendered on stderr. Logging is configured with RUST_LOG.
    #[arg(long, value_name = "text|json", default_value = "text")]
    log_format: LogFormat,
}

/// A frame and where it came from.
struct Input {
    source: String,
    bytes: Vec<u8>,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = zenoh_util::init_log_from_env_or_with(DEFAULT_LOG, args.log_format) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Dissects every input, returning whether all of them were fully decoded.
fn run(args: &Args) -> ZResult<bool> {
    let config = config_from_args(args)?;
    info!("Dissector configuration: {}", config);
    let dissector = Dissector::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_done = true;
    for (i, input) in inputs(args)?.iter().enumerate() {
        debug!("Dissecting {} ({} bytes)", input.source, input.bytes.len());
        let decoded = dissector.dissect(&input.bytes);
        all_done &= decoded.is_done();
        if args.json {
            print_json(&mut out, i, input, &decoded)?;
        } else {
            print_tree(&mut out, i, input, &decoded)?;
        }
    }
    out.flush()?;
    Ok(all_done)
}

fn config_from_args(args: &Args) -> ZResult<DissectorConfig> {
    let mut config = match &args.config {
        Some(path) => DissectorConfig::from_file(path)?,
        None => DissectorConfig::default(),
    };
    if let Some(framing) = args.framing {
        config.framing = framing;
    }
    if let Some(max_messages) = args.max_messages {
        config.max_messages = max_messages;
    }
    config.validate()?;
    Ok(config)
}

fn inputs(args: &Args) -> ZResult<Vec<Input>> {
    let mut inputs = Vec::with_capacity(args.hex.len() + args.files.len());
    for (i, s) in args.hex.iter().enumerate() {
        inputs.push(Input {
            source: format!("--hex #{}", i),
            bytes: parse_hex(s)?,
        });
    }
    for path in args.files.iter() {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => bail!(e => "Couldn't read file {}", path.display()),
        };
        inputs.push(Input {
            source: path.display().to_string(),
            bytes,
        });
    }
    if inputs.is_empty() {
        let mut bytes = vec![];
        io::stdin().lock().read_to_end(&mut bytes)?;
        inputs.push(Input {
            source: "stdin".to_string(),
            bytes,
        });
    }
    Ok(inputs)
}

fn parse_hex(s: &str) -> ZResult<Vec<u8>> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    match hex::decode(&digits) {
        Ok(bytes) => Ok(bytes),
        Err(e) => bail!("Invalid hexadecimal frame '{}': {}", s, e),
    }
}

fn print_tree(
    out: &mut impl Write,
    index: usize,
    input: &Input,
    decoded: &DecodedFrame<'_>,
) -> io::Result<()> {
    writeln!(
        out,
        "frame {} from {} ({} bytes)",
        index,
        input.source,
        input.bytes.len()
    )?;
    for message in decoded {
        writeln!(out, "  {}", message)?;
        for field in message.fields.iter() {
            writeln!(out, "    {}", field)?;
        }
    }
    match &decoded.outcome {
        Outcome::Done => writeln!(
            out,
            "  done: {}/{} bytes",
            decoded.consumed(),
            input.bytes.len()
        )?,
        Outcome::Failed(diagnostic) => {
            writeln!(out, "  error at offset {}: {}", diagnostic.offset(), diagnostic)?;
            for field in diagnostic.fields.iter() {
                writeln!(out, "    {}", field)?;
            }
        }
    }
    Ok(())
}

fn print_json(
    out: &mut impl Write,
    index: usize,
    input: &Input,
    decoded: &DecodedFrame<'_>,
) -> ZResult<()> {
    let value = serde_json::json!({
        "frame": index,
        "source": input.source,
        "len": input.bytes.len(),
        "messages": decoded.messages,
        "outcome": decoded.outcome,
    });
    serde_json::to_writer(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}
