use std::path::Path;

use anyhow::{Context, Result};

use revealbar_core::{replay, AppConfig, ReplayReport, ScrollTrace};

pub async fn run(config: &AppConfig, path: &Path, json: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    let trace = ScrollTrace::from_json(&content)
        .with_context(|| format!("Failed to parse trace {}", path.display()))?;

    let report = replay(&trace, config.header.resolve(), config.tracker);
    tracing::info!(
        frames = report.frames.len(),
        events = report.events.len(),
        "Replayed {}",
        path.display()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_timeline(&report);
    }
    Ok(())
}

/// Print frames where something visible changed, plus every event
fn print_timeline(report: &ReplayReport) {
    println!(
        "{:>7}  {:>8}  {:>8}  {:<11} {:>6}  {:>7}",
        "t(ms)", "scroll", "offset", "state", "border", "content"
    );

    let mut events = report.events.iter().peekable();
    let mut previous = None;

    for frame in &report.frames {
        let changed = previous.map_or(true, |p: (f64, f64, _)| {
            p.0 != frame.offset || p.1 != frame.scroll_signal || p.2 != frame.state
        });
        if changed {
            println!(
                "{:>7}  {:>8.1}  {:>8.2}  {:<11} {:>6.3}  {:>7.3}",
                frame.at_ms,
                frame.scroll_signal,
                frame.offset,
                frame.state.to_string(),
                frame.border,
                frame.content
            );
        }
        while let Some(event) = events.next_if(|e| e.at_ms == frame.at_ms) {
            println!("{:>7}  -> {:?}", event.at_ms, event.event);
        }
        previous = Some((frame.offset, frame.scroll_signal, frame.state));
    }

    if let Some(last) = report.final_frame() {
        println!("final: offset {:.1}px, {}", last.offset, last.state);
    }
}
