//! Colorful console output for colony runs.
//!
//! Provides a custom `tracing` layer that formats colony events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Run start and end, every improvement
//! - **DEBUG**: Progress after each iteration
//! - **TRACE**: Every constructed tour

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directive used when `RUST_LOG` is unset or invalid.
#[cfg(not(feature = "verbose-logging"))]
pub const DEFAULT_DIRECTIVE: &str = "antforge_solver=info";

/// Directive used when `RUST_LOG` is unset or invalid.
#[cfg(feature = "verbose-logging")]
pub const DEFAULT_DIRECTIVE: &str = "antforge_solver=debug";

/// Initializes the colony console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the AntForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ColonyConsoleLayer)
            .try_init();
    });
}

// Marks the start of a run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since run start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
    _          _   _____
   / \   _ __ | |_|  ___|__  _ __ __ _  ___
  / _ \ | '_ \| __| |_ / _ \| '__/ _` |/ _ \
 / ___ \| | | | |_|  _| (_) | | | (_| |  __/
/_/   \_\_| |_|\__|_|  \___/|_|  \__, |\___|
                                 |___/
"#;

    let version_line = format!(
        "              v{} - Ant Colony Optimization for the TSP\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats colony events with colors.
pub struct ColonyConsoleLayer;

impl<S: Subscriber> Layer<S> for ColonyConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("antforge_solver") && !target.starts_with("antforge::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    city_count: Option<u64>,
    ant_count: Option<u64>,
    iteration_count: Option<u64>,
    seed: Option<String>,
    iteration: Option<u64>,
    ant: Option<u64>,
    distance: Option<f64>,
    percent: Option<f64>,
    max_trail: Option<f64>,
    iterations: Option<u64>,
    duration_ms: Option<u64>,
    tours: Option<u64>,
    speed: Option<u64>,
    terminated_early: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "seed" => self.seed = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "city_count" => self.city_count = Some(value),
            "ant_count" => self.ant_count = Some(value),
            "iteration_count" => self.iteration_count = Some(value),
            "iteration" => self.iteration = Some(value),
            "ant" => self.ant = Some(value),
            "iterations" => self.iterations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "tours" => self.tours = Some(value),
            "speed" => self.speed = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "distance" => self.distance = Some(value),
            "percent" => self.percent = Some(value),
            "max_trail" => self.max_trail = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "terminated_early" {
            self.terminated_early = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.event = Some(value.to_string());
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "run_start" => format_run_start(v),
        "run_end" => format_run_end(v),
        "improvement" => format_improvement(v),
        "progress" => format_progress(v),
        "tour" => format_tour(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_run_start(v: &EventVisitor) -> String {
    mark_run_start();
    let cities = v.city_count.unwrap_or(0);
    let ants = v.ant_count.unwrap_or(0);
    let iterations = v.iteration_count.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} cities │ {} ants │ {} iterations │ {} tours",
        format_elapsed(),
        "▶".bright_green().bold(),
        cities.to_formatted_string(&Locale::en).bright_yellow(),
        ants.to_formatted_string(&Locale::en).bright_yellow(),
        iterations.to_formatted_string(&Locale::en).bright_yellow(),
        (ants * iterations)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
    );

    // Debug formatting of Option<u64>: "Some(42)" or "None".
    if let Some(seed) = v.seed.as_deref() {
        if let Some(inner) = seed.strip_prefix("Some(").and_then(|s| s.strip_suffix(')')) {
            output.push_str(&format!(" │ seed {}", inner.bright_yellow()));
        }
    }

    output
}

fn format_run_end(v: &EventVisitor) -> String {
    let distance = v.distance.unwrap_or(f64::INFINITY);
    let iterations = v.iterations.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let tours = v.tours.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let early = v.terminated_early.unwrap_or(false);

    let status = if early {
        "TERMINATED EARLY".bright_yellow().bold().to_string()
    } else {
        "COMPLETE".bright_green().bold().to_string()
    };

    let mut output = format!(
        "{} {} Run finished │ {} │ {} iterations │ {} tours │ {} tours/s │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        iterations.to_formatted_string(&Locale::en).white(),
        tours.to_formatted_string(&Locale::en).white(),
        speed.to_formatted_string(&Locale::en).bright_magenta().bold(),
        status
    );

    // Summary box
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    let headline = if distance.is_finite() {
        "BEST TOUR FOUND"
    } else {
        "NO TOUR CONSTRUCTED"
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(headline.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        headline.bright_green().bold(),
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Best Distance:",
        format_plain_distance(distance),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_improvement(v: &EventVisitor) -> String {
    let iteration = v.iteration.unwrap_or(0);
    let distance = v.distance.unwrap_or(f64::INFINITY);

    format!(
        "{} {} New best │ iteration {:>8} │ {}",
        format_elapsed(),
        "★".bright_green().bold(),
        iteration.to_formatted_string(&Locale::en).white(),
        format_distance(distance)
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let iteration = v.iteration.unwrap_or(0);
    let percent = v.percent.unwrap_or(0.0);
    let distance = v.distance.unwrap_or(f64::INFINITY);
    let max_trail = v.max_trail.unwrap_or(0.0);

    format!(
        "{} {} iteration {:>8} │ {:>6.1}% │ best {} │ max trail {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        iteration.to_formatted_string(&Locale::en).white(),
        percent.bright_magenta(),
        format_distance(distance),
        format!("{:.4}", max_trail).bright_blue()
    )
}

fn format_tour(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let iteration = v.iteration.unwrap_or(0);
    let ant = v.ant.unwrap_or(0);
    let distance = v.distance.unwrap_or(f64::INFINITY);

    format!(
        "{} {} Iteration {:>8} │ Ant {:>5} │ {}",
        format_elapsed(),
        "·".bright_black(),
        iteration.to_formatted_string(&Locale::en).bright_black(),
        ant.to_formatted_string(&Locale::en).bright_black(),
        format_plain_distance(distance).bright_black()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_plain_distance(distance: f64) -> String {
    if !distance.is_finite() {
        "∞".to_string()
    } else if distance.fract() == 0.0 {
        format!("{}", distance as i64)
    } else {
        format!("{:.3}", distance)
    }
}

fn format_distance(distance: f64) -> String {
    let plain = format_plain_distance(distance);
    if distance.is_finite() {
        plain.bright_green().to_string()
    } else {
        plain.bright_red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_plain_distance() {
        assert_eq!(format_plain_distance(80.0), "80");
        assert_eq!(format_plain_distance(12.5), "12.500");
        assert_eq!(format_plain_distance(f64::INFINITY), "∞");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("something_else".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_tour_events_only_at_trace() {
        let visitor = EventVisitor {
            event: Some("tour".to_string()),
            iteration: Some(3),
            ant: Some(1),
            distance: Some(80.0),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&visitor, Level::TRACE).contains("80"));
    }

    #[test]
    fn test_progress_shows_max_trail() {
        let visitor = EventVisitor {
            event: Some("progress".to_string()),
            iteration: Some(9),
            percent: Some(10.0),
            distance: Some(80.0),
            max_trail: Some(0.125),
            ..EventVisitor::default()
        };
        let line = format_event(&visitor, Level::DEBUG);
        assert!(line.contains("max trail"));
        assert!(line.contains("0.1250"));
    }

    #[test]
    fn test_run_start_shows_seed() {
        let visitor = EventVisitor {
            event: Some("run_start".to_string()),
            city_count: Some(4),
            ant_count: Some(50),
            iteration_count: Some(100),
            seed: Some("Some(42)".to_string()),
            ..EventVisitor::default()
        };
        let line = format_event(&visitor, Level::INFO);
        assert!(line.contains("seed"));
        assert!(line.contains("42"));
        assert!(line.contains("5,000"));
    }

    #[test]
    fn test_run_end_reports_status() {
        let visitor = EventVisitor {
            event: Some("run_end".to_string()),
            distance: Some(80.0),
            iterations: Some(5),
            terminated_early: Some(true),
            ..EventVisitor::default()
        };
        let summary = format_event(&visitor, Level::INFO);
        assert!(summary.contains("TERMINATED EARLY"));
        assert!(summary.contains("BEST TOUR FOUND"));
        assert!(summary.contains("80"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
