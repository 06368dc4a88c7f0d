//! Colorful console output for allocation events.
//!
//! Provides a custom `tracing` layer that formats allocator events with
//! colors. Enabled with the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "allocforge_solver=info";

/// Installs the console subscriber.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `allocforge_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another global subscriber may already be installed.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(AllocationConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats allocator events with colors.
pub struct AllocationConsoleLayer;

impl<S: Subscriber> Layer<S> for AllocationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("allocforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    tasks: Option<u64>,
    workers: Option<u64>,
    rules: Option<u64>,
    units: Option<u64>,
    assigned: Option<u64>,
    unassigned: Option<u64>,
    dropped_rules: Option<u64>,
    problems: Option<u64>,
    duration_ms: Option<u64>,
    index: Option<u64>,
    unit: Option<String>,
    worker: Option<String>,
    rule: Option<String>,
    reason: Option<String>,
    selection: Option<String>,
    score: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, format!("{:?}", value).trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "tasks" => self.tasks = Some(value),
            "workers" => self.workers = Some(value),
            "rules" => self.rules = Some(value),
            "units" => self.units = Some(value),
            "assigned" => self.assigned = Some(value),
            "unassigned" => self.unassigned = Some(value),
            "dropped_rules" => self.dropped_rules = Some(value),
            "problems" => self.problems = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "index" => self.index = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "unit" => &mut self.unit,
            "worker" => &mut self.worker,
            "rule" => &mut self.rule,
            "reason" => &mut self.reason,
            "selection" => &mut self.selection,
            "score" => &mut self.score,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "allocation_start" => format_allocation_start(v),
        "rule_dropped" => format_rule_dropped(v),
        "unit_assigned" => format_unit_assigned(v),
        "unit_unassigned" => format_unit_unassigned(v),
        "allocation_end" => format_allocation_end(v),
        "batch_end" => format_batch_end(v),
        _ => String::new(),
    }
}

fn format_allocation_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} tasks ({}), workers ({}), rules ({}), units ({}), selection ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Allocator]".bright_cyan(),
        v.tasks.unwrap_or(0).bright_yellow(),
        v.workers.unwrap_or(0).bright_yellow(),
        v.rules.unwrap_or(0).bright_yellow(),
        v.units.unwrap_or(0).bright_yellow(),
        v.selection.as_deref().unwrap_or("BestScore").white().bold()
    )
}

fn format_rule_dropped(v: &EventVisitor) -> String {
    format!(
        "{} {} {} rule #{} {} dropped: {}",
        timestamp().bright_black(),
        "WARN".yellow(),
        "[Rules]".bright_cyan(),
        v.index.unwrap_or(0),
        v.rule.as_deref().unwrap_or("?").white().bold(),
        v.reason.as_deref().unwrap_or("invalid").yellow()
    )
}

fn format_unit_assigned(v: &EventVisitor) -> String {
    format!(
        "    {} {} -> {} | {}",
        "+".bright_green(),
        v.unit.as_deref().unwrap_or("?").white(),
        v.worker.as_deref().unwrap_or("?").bright_white().bold(),
        format_score(v.score.as_deref().unwrap_or("0"))
    )
}

fn format_unit_unassigned(v: &EventVisitor) -> String {
    format!(
        "    {} {} | {}",
        "x".bright_red(),
        v.unit.as_deref().unwrap_or("?").white(),
        v.reason.as_deref().unwrap_or("?").bright_red()
    )
}

fn format_allocation_end(v: &EventVisitor) -> String {
    let unassigned = v.unassigned.unwrap_or(0);
    let unassigned = if unassigned == 0 {
        unassigned.bright_green().to_string()
    } else {
        unassigned.bright_red().to_string()
    };

    format!(
        "{} {} {} Allocation ended: time spent ({}), assigned ({}), unassigned ({}), dropped rules ({}), total score ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Allocator]".bright_cyan(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.assigned.unwrap_or(0).bright_green(),
        unassigned,
        v.dropped_rules.unwrap_or(0).yellow(),
        format_score(v.score.as_deref().unwrap_or("0"))
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} problems allocated, {} tasks assigned",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Batch]".bright_cyan(),
        v.problems.unwrap_or(0).bright_yellow(),
        v.assigned.unwrap_or(0).bright_green()
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

fn format_score(score: &str) -> String {
    match score.parse::<f64>() {
        Ok(n) if n < 0.0 => score.bright_red().to_string(),
        Ok(n) if n > 0.0 => score.bright_green().to_string(),
        _ => score.white().to_string(),
    }
}
