use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use graphguard_core::model::SubjectId;
use services::{AppServices, Clock};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt, prelude::*};
use ui::{App, UiApp, build_app_context};

const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 1000;
const DEFAULT_TICK_MS: u64 = 50;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTick { raw: String },
    InvalidSubject { raw: String },
    InvalidSeed { raw: String },
    InvalidLogFilter { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTick { raw } => write!(
                f,
                "invalid --tick-ms value: {raw} (expected {MIN_TICK_MS}..={MAX_TICK_MS})"
            ),
            ArgsError::InvalidSubject { raw } => write!(f, "invalid --subject value: {raw:?}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidLogFilter { raw } => write!(f, "invalid --log filter: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  graphguard [--tick-ms <ms>] [--subject <id>] [--seed <n>] [--log <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --tick-ms {DEFAULT_TICK_MS}   ({MIN_TICK_MS}..={MAX_TICK_MS})");
    eprintln!("  --log info");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GRAPHGUARD_TICK_MS, GRAPHGUARD_SUBJECT, GRAPHGUARD_SEED, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    tick_period: Duration,
    subject: Option<SubjectId>,
    seed: Option<u64>,
    log_filter: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Launch(Args),
    Help,
}

fn parse_tick(raw: &str) -> Result<Duration, ArgsError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if (MIN_TICK_MS..=MAX_TICK_MS).contains(&ms) => Ok(Duration::from_millis(ms)),
        _ => Err(ArgsError::InvalidTick {
            raw: raw.to_string(),
        }),
    }
}

fn parse_subject(raw: &str) -> Result<SubjectId, ArgsError> {
    SubjectId::parse(raw).map_err(|_| ArgsError::InvalidSubject {
        raw: raw.to_string(),
    })
}

fn parse_seed(raw: &str) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed {
        raw: raw.to_string(),
    })
}

impl Args {
    /// Flags win over environment variables.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let mut tick_period = None;
        let mut subject = None;
        let mut seed = None;
        let mut log_filter = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--tick-ms" => tick_period = Some(parse_tick(&require_value(args, "--tick-ms")?)?),
                "--subject" => subject = Some(parse_subject(&require_value(args, "--subject")?)?),
                "--seed" => seed = Some(parse_seed(&require_value(args, "--seed")?)?),
                "--log" => log_filter = Some(require_value(args, "--log")?),
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        // Environment values are only read for settings no flag supplied.
        let tick_period = match tick_period {
            Some(period) => period,
            None => match env("GRAPHGUARD_TICK_MS") {
                Some(raw) => parse_tick(&raw)?,
                None => Duration::from_millis(DEFAULT_TICK_MS),
            },
        };
        // A blank prefill from the environment just means "no prefill".
        let subject = subject
            .or_else(|| env("GRAPHGUARD_SUBJECT").and_then(|raw| SubjectId::parse(&raw).ok()));
        let seed = match seed {
            Some(seed) => Some(seed),
            None => env("GRAPHGUARD_SEED").map(|raw| parse_seed(&raw)).transpose()?,
        };

        Ok(Command::Launch(Self {
            tick_period,
            subject,
            seed,
            log_filter,
        }))
    }
}

fn setup_logging(log_filter: Option<&str>) -> Result<(), ArgsError> {
    let filter = match log_filter {
        Some(raw) => EnvFilter::try_new(raw).map_err(|_| ArgsError::InvalidLogFilter {
            raw: raw.to_string(),
        })?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // A subscriber installed by an embedding process takes precedence.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().with_target(false))
        .try_init();
    Ok(())
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = match Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Command::Launch(args) => args,
        Command::Help => {
            print_usage();
            return Ok(());
        }
    };

    setup_logging(args.log_filter.as_deref())?;
    info!(
        tick = ?args.tick_period,
        subject = args.subject.as_ref().map(SubjectId::as_str),
        seeded = args.seed.is_some(),
        "starting GraphGuard"
    );

    let services = AppServices::new(Clock::system())
        .with_tick_period(args.tick_period)
        .with_default_subject(args.subject.map(|subject| subject.to_string()))
        .with_assessor_seed(args.seed);
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("GraphGuard 风险识别研判系统")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, ArgsError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter, |key| env.get(key).cloned())
    }

    fn launch(args: &[&str], env: &[(&str, &str)]) -> Args {
        match parse(args, env).unwrap() {
            Command::Launch(args) => args,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let args = launch(&[], &[]);
        assert_eq!(args.tick_period, Duration::from_millis(DEFAULT_TICK_MS));
        assert_eq!(args.subject, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.log_filter, None);
    }

    #[test]
    fn flags_override_environment() {
        let args = launch(
            &["--tick-ms", "100", "--subject", " USER_001 "],
            &[("GRAPHGUARD_TICK_MS", "20"), ("GRAPHGUARD_SUBJECT", "USER_999")],
        );
        assert_eq!(args.tick_period, Duration::from_millis(100));
        assert_eq!(args.subject.unwrap().as_str(), "USER_001");
    }

    #[test]
    fn malformed_environment_is_ignored_when_flags_are_given() {
        let env = [("GRAPHGUARD_TICK_MS", "fast"), ("GRAPHGUARD_SEED", "x")];
        let args = launch(&["--tick-ms", "100", "--seed", "3"], &env);
        assert_eq!(args.tick_period, Duration::from_millis(100));
        assert_eq!(args.seed, Some(3));

        let err = parse(&["--seed", "3"], &env).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidTick { .. }), "{err}");
    }

    #[test]
    fn environment_fills_missing_flags() {
        let args = launch(&[], &[("GRAPHGUARD_TICK_MS", "250"), ("GRAPHGUARD_SEED", "42")]);
        assert_eq!(args.tick_period, Duration::from_millis(250));
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn blank_subject_env_is_ignored() {
        let args = launch(&[], &[("GRAPHGUARD_SUBJECT", "   ")]);
        assert_eq!(args.subject, None);
    }

    #[test]
    fn tick_outside_range_is_rejected() {
        for raw in ["5", "1001", "fast"] {
            let err = parse(&["--tick-ms", raw], &[]).unwrap_err();
            assert!(matches!(err, ArgsError::InvalidTick { .. }), "{raw}: {err}");
        }
    }

    #[test]
    fn blank_subject_flag_is_rejected() {
        let err = parse(&["--subject", "  "], &[]).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSubject { .. }));
    }

    #[test]
    fn missing_value_and_unknown_args() {
        let err = parse(&["--log"], &[]).unwrap_err();
        assert_eq!(err.to_string(), "--log requires a value");
        let err = parse(&["--db", "x"], &[]).unwrap_err();
        assert_eq!(err.to_string(), "unknown argument: --db");
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["--tick-ms", "100", "-h"], &[]).unwrap(), Command::Help);
    }
}
