//! Application orchestrator.
//! Initializes logging, installs the signal handler, probes free space,
//! derives the fill plan, asks for confirmation, and supervises the fill run.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use diskfill::output as out;
use diskfill::{
    CancelToken, FillError, FillPlan, FillTarget, Progress, ProgressReporter, RunOutcome,
    available_bytes, filler_path, start_fill,
};

use crate::cli::Args;
use crate::logging::init_tracing;

/// Console implementation of the engine's reporter: rewrites a single progress
/// line in place and terminates it when the run reaches a terminal state.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_progress(&self, p: Progress) {
        let mut line = format!(
            "chunk {}/{} ({:>5.1}%) written {}",
            p.current_chunk,
            p.total_chunks,
            p.ratio() * 100.0,
            out::format_bytes(p.bytes_written),
        );
        if let Some(speed) = p.speed_mbps {
            line.push_str(&format!("  {:.1} MiB/s", speed));
        }
        if let Some(eta) = p.eta_seconds {
            line.push_str(&format!("  eta {}s", eta));
        }
        out::print_progress(&line);
    }

    fn on_terminal(&self, outcome: &RunOutcome) {
        out::end_progress();
        debug!(?outcome, "Fill run reached terminal state");
    }
}

/// Ask the user to confirm a destructive-ish operation on stdin.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N]: ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let settings = args.settings();
    let level = args.effective_log_level();

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&level, args.effective_log_file().as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    debug!("Starting diskfill: {:?}", args);

    // Probe once; the snapshot is never re-queried mid-run.
    let free = match available_bytes(&args.target) {
        Ok(free) => free,
        Err(e) => {
            error!(kind = e.kind(), path = %args.target.display(), error = %e, "Free-space probe failed");
            out::print_error(&e.to_string());
            return Err(e.into());
        }
    };
    let budget = settings.max_bytes.map_or(free, |cap| free.min(cap));
    info!(
        path = %args.target.display(),
        free_bytes = free,
        budget_bytes = budget,
        "Probed free space"
    );

    let plan = match FillPlan::derive(&args.target, budget, &settings) {
        Ok(plan) => plan,
        // Zero free space is a warning condition, not a failure.
        Err(FillError::NoFreeSpace(path)) => {
            out::print_warn(&format!(
                "No free space available on the volume holding '{}'; nothing to do.",
                path.display()
            ));
            return Ok(());
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Could not derive a fill plan");
            out::print_error(&e.to_string());
            return Err(e.into());
        }
    };

    out::print_info(&format!(
        "Plan: {} across {} file(s) into '{}' ({} chunks of {}), starting at '{}'",
        out::format_bytes(plan.free_bytes),
        plan.file_count(),
        args.target.display(),
        plan.total_chunks,
        out::format_bytes(plan.chunk_size),
        filler_path(&args.target, plan.start_index)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    ));
    if args.plan_only {
        return Ok(());
    }

    if !args.yes {
        if !atty::is(atty::Stream::Stdin) {
            out::print_error("Refusing to fill without confirmation; pass --yes for non-interactive use.");
            anyhow::bail!("confirmation required");
        }
        if !confirm(&format!(
            "Fill {} on '{}'?",
            out::format_bytes(plan.free_bytes),
            args.target.display()
        ))? {
            out::print_info("Aborted; nothing was written.");
            return Ok(());
        }
    }

    // Token is wired into the signal handler before the worker starts, so an
    // early Ctrl-C still stops the run at the first check point.
    let token = CancelToken::new();
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let token = token.clone();
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            token.signal();
            out::print_warn("Received interrupt; stopping after the current chunk...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    let target = FillTarget::new(args.target.clone(), plan.free_bytes);
    let report_every = settings.report_every;
    let handle = start_fill(target, plan, report_every, token, Arc::new(ConsoleReporter))?;

    let result = match handle.wait() {
        RunOutcome::Completed => {
            out::print_success(&format!(
                "Filled all available space on '{}'.",
                args.target.display()
            ));
            Ok(())
        }
        RunOutcome::Stopped => {
            out::print_warn(&format!(
                "Fill stopped; filler files written so far remain in '{}'.",
                args.target.display()
            ));
            Ok(())
        }
        RunOutcome::Failed(e) => {
            error!(kind = e.kind(), error = %e, "Fill failed");
            out::print_error(&format!("Fill failed: {e}. Partial filler files were kept."));
            Err(e.into())
        }
    };

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
