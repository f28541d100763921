//! `pathscope trace` command - pull an algorithm's events and print them
//!
//! One line per event; `--format json` prints one JSON object per line.
//! `--limit` abandons the sequence early, `--summary` prints only the last
//! event pulled.

use std::io::{self, BufWriter, Write};
use std::time::Instant;

use pathscope_core::config::EngineConfig;
use pathscope_core::error::Result;
use pathscope_core::{trace_time, Event, Request};

use crate::cli::{Cli, OutputFormat, TraceArgs};
use crate::commands::format::event_line;
use crate::document::load_graph;

/// Execute the trace command
pub fn execute(cli: &Cli, config: &EngineConfig, args: &TraceArgs) -> Result<()> {
    let mut graph = load_graph(&args.graph)?;
    let request = Request {
        algorithm: args.algorithm,
        source: args.source,
        target: args.target,
        k: args.k,
    };

    let start = Instant::now();
    let events = pathscope_core::trace(&mut graph, &request, &config.trace)?;
    let limit = args.limit.unwrap_or(usize::MAX);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut pulled = 0;
    let mut last: Option<Event> = None;
    for event in events.take(limit) {
        pulled += 1;
        if !args.summary {
            write_event(&mut out, cli.format, &event)?;
        }
        last = Some(event);
    }

    if args.summary {
        if let Some(event) = &last {
            write_event(&mut out, cli.format, event)?;
        }
    }
    out.flush()?;

    let completed = last.as_ref().is_some_and(Event::is_done);
    if !completed && !cli.quiet && cli.format == OutputFormat::Human {
        eprintln!("stopped after {pulled} events");
    }
    trace_time!(start, "trace_complete", events = pulled, completed = completed);
    Ok(())
}

fn write_event(out: &mut impl Write, format: OutputFormat, event: &Event) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(event)?)?,
        OutputFormat::Human => writeln!(out, "{}", event_line(event))?,
    }
    Ok(())
}
