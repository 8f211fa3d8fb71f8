//! Track known constants through a decoded trace

use super::utils::write_output;
use crate::analysis::{ConstantContext, TrackedSequence};
use crate::error::Error;
use crate::trace::Trace;
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Output format of the track subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the track subcommand
#[derive(Debug, Clone)]
pub struct TrackArgs {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub format: OutputFormat,
    /// Only report this program point (the program length means "exit")
    pub at: Option<usize>,
}

#[derive(Serialize)]
struct PointReport<'a> {
    index: usize,
    insn: Option<&'a str>,
    constants: &'a ConstantContext,
}

/// Run the track subcommand
pub fn track(args: &TrackArgs) -> Result<()> {
    let trace = Trace::from_file(&args.input_path)?;
    let tracked = trace.track()?;
    log::info!(
        "Tracked {} instructions from {}",
        trace.len(),
        args.input_path.display()
    );

    let mnemonics: Vec<&str> = trace
        .instances()?
        .into_iter()
        .map(|(insn, _)| insn.mnemonic())
        .collect();

    let reports = match args.at {
        Some(index) => {
            let constants = tracked.at(index).ok_or(Error::OutOfRange {
                index,
                len: tracked.len(),
            })?;
            vec![PointReport {
                index,
                insn: mnemonics.get(index).copied(),
                constants,
            }]
        }
        None => all_points(&tracked, &mnemonics),
    };

    let content = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
        OutputFormat::Text => render_text(&reports),
    };

    write_output(&content, args.output_path.as_deref())?;
    Ok(())
}

fn all_points<'a>(tracked: &'a TrackedSequence, mnemonics: &[&'a str]) -> Vec<PointReport<'a>> {
    (0..tracked.len())
        .filter_map(|index| {
            tracked.at(index).map(|constants| PointReport {
                index,
                insn: mnemonics.get(index).copied(),
                constants,
            })
        })
        .collect()
}

fn render_text(reports: &[PointReport<'_>]) -> String {
    let mut out = String::new();
    for report in reports {
        let label = report.insn.unwrap_or("<exit>");
        let _ = writeln!(out, "{:>4}  {:<12} {}", report.index, label, report.constants);
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let empty = ConstantContext::empty();
        let mut constants = ConstantContext::empty();
        constants.set("x2", 8192);
        let reports = vec![
            PointReport {
                index: 0,
                insn: Some("lui"),
                constants: &empty,
            },
            PointReport {
                index: 1,
                insn: None,
                constants: &constants,
            },
        ];

        assert_eq!(
            render_text(&reports),
            "   0  lui          {x0=0}\n   1  <exit>       {x0=0, x2=8192}"
        );
    }
}
