//! Command implementations

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::TrimInteractor;
use crate::cli::args::{OverwriteArgs, ProbeArgs, SuggestArgs, TrimArgs};
use crate::domain::model::{
    OverwriteRequest, ProgressEvent, TimeSpec, TrimMode, TrimRequest, TrimResult,
};
use crate::domain::rules::sanitize_job_id;
use crate::utils::path::find_available_output_path;
use crate::utils::time::format_timestamp;

/// Execute the probe command
pub async fn probe(interactor: &TrimInteractor, args: ProbeArgs) -> Result<()> {
    let probe = interactor.probe_video(&args.input).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&probe)?);
        return Ok(());
    }

    println!("File: {}", args.input.display());
    println!(
        "Duration: {} ({:.3}s)",
        format_timestamp(probe.duration_seconds),
        probe.duration_seconds
    );
    println!("Resolution: {}x{}", probe.width, probe.height);
    println!("Format: {}", probe.format);
    match probe.frame_rate_hint {
        Some(fps) => println!("Frame rate: {:.3} fps", fps),
        None => println!("Frame rate: unknown"),
    }
    Ok(())
}

/// Execute the suggest command
pub fn suggest(interactor: &TrimInteractor, args: SuggestArgs) -> Result<()> {
    let mut suggestion = interactor.suggest_output_path(&args.input);
    if args.available {
        suggestion = find_available_output_path(&suggestion);
    }
    println!("{}", suggestion.display());
    Ok(())
}

/// Execute the trim command
pub async fn trim(interactor: &TrimInteractor, args: TrimArgs) -> Result<()> {
    let (start, end) = parse_range(&args.start, &args.end)?;
    let mode = TrimMode::parse(&args.mode)?;
    let job_id = resolve_job_id(args.job_id.as_deref());

    let output = match args.output {
        Some(output) => output,
        None => find_available_output_path(&interactor.suggest_output_path(&args.input)),
    };

    info!(
        "Trimming {} [{} - {}] -> {} (mode: {}, job: {})",
        args.input.display(),
        format_timestamp(start),
        format_timestamp(end),
        output.display(),
        mode,
        job_id
    );

    let request = TrimRequest::new(job_id.clone(), args.input, output, start, end, mode);

    let (tx, printer) = spawn_progress_printer();
    let sink = move |ratio: f64| {
        let _ = tx.send(ProgressEvent {
            job_id: job_id.clone(),
            ratio,
        });
    };
    let outcome = interactor.trim_video(&request, &sink).await;
    drop(sink);
    let _ = printer.await;

    report(outcome?, args.json)
}

/// Execute the overwrite command
pub async fn overwrite(interactor: &TrimInteractor, args: OverwriteArgs) -> Result<()> {
    let (start, end) = parse_range(&args.start, &args.end)?;
    let mode = TrimMode::parse(&args.mode)?;
    let job_id = resolve_job_id(args.job_id.as_deref());

    info!(
        "Overwriting {} with [{} - {}] (mode: {}, job: {})",
        args.input.display(),
        format_timestamp(start),
        format_timestamp(end),
        mode,
        job_id
    );

    let request = OverwriteRequest::new(job_id.clone(), args.input, start, end, mode);

    let (tx, printer) = spawn_progress_printer();
    let sink = move |ratio: f64| {
        let _ = tx.send(ProgressEvent {
            job_id: job_id.clone(),
            ratio,
        });
    };
    let outcome = interactor.overwrite_video(&request, &sink).await;
    drop(sink);
    let _ = printer.await;

    report(outcome?, args.json)
}

fn parse_range(start: &str, end: &str) -> Result<(f64, f64)> {
    let start = TimeSpec::parse(start).with_context(|| format!("Invalid start time '{}'", start))?;
    let end = TimeSpec::parse(end).with_context(|| format!("Invalid end time '{}'", end))?;
    Ok((start.as_seconds(), end.as_seconds()))
}

fn resolve_job_id(requested: Option<&str>) -> String {
    match requested {
        Some(id) => {
            let sanitized = sanitize_job_id(id);
            if sanitized != id {
                warn!("Job id '{}' sanitized to '{}'", id, sanitized);
            }
            sanitized
        }
        None => Uuid::new_v4().to_string(),
    }
}

/// Print the outcome; a failed attempt becomes the command's error
fn report(result: TrimResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if !result.ok {
        bail!(
            "Trim failed ({}): {}",
            result.used_mode,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    if !json {
        println!(
            "Done ({}): {}",
            result.used_mode,
            result.output_path.display()
        );
    }
    Ok(())
}

/// Render progress events on stderr, one update per whole percent
fn spawn_progress_printer() -> (mpsc::UnboundedSender<ProgressEvent>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();

    let handle = tokio::spawn(async move {
        let mut last_percent: Option<u32> = None;
        while let Some(event) = rx.recv().await {
            let percent = (event.ratio.clamp(0.0, 1.0) * 100.0).floor() as u32;
            if last_percent != Some(percent) {
                eprint!("\r[{}] {:>3}%", event.job_id, percent);
                last_percent = Some(percent);
            }
        }
        if last_percent.is_some() {
            eprintln!();
        }
    });

    (tx, handle)
}
