//! ValueLens CLI — clean, lookup, chart and tickers commands.
//!
//! Commands:
//! - `clean` — turn a raw valuation export into the canonical snapshot file
//! - `lookup` — point lookup of PE/PB/PS for a ticker
//! - `chart` — filtered metric series with fast/slow EMA overlays and stats
//! - `tickers` — list tickers and the date range of the snapshot

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use valuelens_core::config::CONFIG_FILE;
use valuelens_core::data::{clean_file, Dataset, MatchPolicy, Valuation, ValuationRepository};
use valuelens_core::{ChartView, Config};

#[derive(Parser, Debug)]
#[command(
    name = "valuelens",
    about = "ValueLens CLI — valuation multiples lookup and EMA charts"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to <config dir>/valuelens/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clean a raw export into the canonical snapshot file.
    Clean {
        /// Raw export. Defaults to `data.raw_path` from the config.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Canonical output. Defaults to `data.canonical_path` from the config.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Look up valuation multiples for a ticker.
    Lookup {
        /// Ticker code (case-insensitive), e.g. HPG.
        ticker: String,

        /// Metrics to return: PE, PB, PS (case-insensitive).
        #[arg(required = true)]
        metrics: Vec<String>,

        /// Canonical snapshot. Defaults to `data.canonical_path` from the config.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Answer from the most recent row instead of the first row in file order.
        #[arg(long, default_value_t = false)]
        latest: bool,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Build a chart view: metric series, fast/slow EMA, summary stats.
    Chart {
        /// Ticker code (case-insensitive).
        ticker: String,

        /// Metric to chart: PE, PB or PS.
        #[arg(long, default_value = "PE")]
        metric: String,

        /// First calendar year to include. Defaults to `chart.default_start_year`.
        #[arg(long)]
        start_year: Option<i32>,

        /// Canonical snapshot. Defaults to `data.canonical_path` from the config.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Print the whole view as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write `date,<METRIC>,EMA<fast>,EMA<slow>` rows to this CSV file.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Number of most recent rows to print in text mode.
        #[arg(long, default_value_t = 10)]
        tail: usize,
    },
    /// List tickers in the canonical snapshot.
    Tickers {
        /// Canonical snapshot. Defaults to `data.canonical_path` from the config.
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber. `RUST_LOG` overrides `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("valuelens").join(CONFIG_FILE))
}

fn run(cli: Cli) -> Result<()> {
    let default_path = default_config_path();
    let config = Config::resolve(cli.config.as_deref(), default_path.as_deref())
        .context("loading config")?;
    debug!(?config, "resolved config");

    match cli.command {
        Commands::Clean { input, output } => {
            let input = input.unwrap_or_else(|| config.data.raw_path.clone());
            let output = output.unwrap_or_else(|| config.data.canonical_path.clone());
            run_clean(&input, &output)
        }
        Commands::Lookup {
            ticker,
            metrics,
            data,
            latest,
            json,
        } => {
            let mut repo = repository(&config, data);
            if latest {
                repo = repo.with_policy(MatchPolicy::LatestByDate);
            }
            run_lookup(&repo, &ticker, &metrics, json)
        }
        Commands::Chart {
            ticker,
            metric,
            start_year,
            data,
            json,
            export,
            tail,
        } => {
            let repo = repository(&config, data);
            let start_year = start_year.unwrap_or(config.chart.default_start_year);
            let view = build_chart(&config, &repo, &ticker, &metric, start_year)?;
            match view {
                Some(view) => {
                    if let Some(path) = export {
                        export_chart(&view, &path)?;
                    }
                    if json {
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    } else {
                        print!("{}", format_chart(&view, tail));
                    }
                }
                None => println!(
                    "No {} data for {} since {start_year}.",
                    metric.to_uppercase(),
                    ticker.to_uppercase()
                ),
            }
            Ok(())
        }
        Commands::Tickers { data } => {
            let dataset = repository(&config, data).load()?;
            print!("{}", format_tickers(&dataset));
            Ok(())
        }
    }
}

fn repository(config: &Config, data: Option<PathBuf>) -> ValuationRepository {
    let repo = config.repository();
    match data {
        Some(path) => ValuationRepository::new(path).with_policy(repo.policy()),
        None => repo,
    }
}

fn run_clean(input: &Path, output: &Path) -> Result<()> {
    let report = clean_file(input, output)
        .with_context(|| format!("cleaning {}", input.display()))?;

    println!("Cleaned {} rows -> {}", report.rows, output.display());
    for (from, to) in &report.renamed {
        println!("  renamed {from} -> {to}");
    }
    Ok(())
}

fn run_lookup(
    repo: &ValuationRepository,
    ticker: &str,
    metrics: &[String],
    json: bool,
) -> Result<()> {
    let valuation = repo.lookup(ticker, metrics)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&valuation)?);
    } else {
        println!("{}", format_valuation(&valuation));
    }
    Ok(())
}

fn build_chart(
    config: &Config,
    repo: &ValuationRepository,
    ticker: &str,
    metric: &str,
    start_year: i32,
) -> Result<Option<ChartView>> {
    let builder = config.chart_builder()?;
    let dataset = repo
        .load()
        .map_err(valuelens_core::ChartError::from)?;
    Ok(builder.build_named(&dataset, ticker, metric, start_year)?)
}

fn export_chart(view: &ChartView, path: &Path) -> Result<()> {
    let csv = view.to_csv()?;
    std::fs::write(path, csv).with_context(|| format!("writing {}", path.display()))?;
    println!("Exported {} rows to {}", view.len(), path.display());
    Ok(())
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn format_valuation(v: &Valuation) -> String {
    let mut out = v.ticker.clone();
    if let Some(date) = v.trade_date {
        out.push_str(&format!("  {date}"));
    }
    for mv in &v.values {
        out.push_str(&format!("  {}={}", mv.metric, format_value(mv.value)));
    }
    out
}

fn format_chart(view: &ChartView, tail: usize) -> String {
    let mut out = String::new();
    let fast = view.ema_fast.label();
    let slow = view.ema_slow.label();

    out.push_str(&format!("=== {} ===\n", view.title()));
    if let (Some(first), Some(last)) = (view.raw.first_date(), view.raw.last_date()) {
        out.push_str(&format!("Period:   {first} to {last}\n"));
    }
    out.push_str(&format!("Points:   {}\n", view.len()));
    out.push('\n');
    out.push_str(&format!("Last:     {:.2}\n", view.stats.last));
    out.push_str(&format!("Mean:     {:.2}\n", view.stats.mean));
    out.push_str(&format!("Max:      {:.2}\n", view.stats.max));
    out.push_str(&format!("Min:      {:.2}\n", view.stats.min));
    out.push_str(&format!("{fast:<9} {}\n", format_value(view.last_fast())));
    out.push_str(&format!("{slow:<9} {}\n", format_value(view.last_slow())));

    if tail > 0 {
        out.push('\n');
        out.push_str(&format!(
            "{:<12} {:>10} {:>10} {:>10}\n",
            "Date",
            view.metric.column(),
            fast,
            slow
        ));
        out.push_str(&format!("{}\n", "-".repeat(45)));
        let skip = view.len().saturating_sub(tail);
        for (date, value, f, s) in view.rows().skip(skip) {
            out.push_str(&format!("{date:<12} {value:>10.2} {f:>10.2} {s:>10.2}\n"));
        }
    }
    out
}

fn format_tickers(dataset: &Dataset) -> String {
    let tickers = dataset.tickers();
    let mut out = format!(
        "Snapshot: {} ({})\n",
        dataset.source().display(),
        dataset.hash().short()
    );
    out.push_str(&format!("Rows:     {}\n", dataset.len()));
    if let Some((from, to)) = dataset.year_range() {
        out.push_str(&format!("Years:    {from}-{to}\n"));
    }
    out.push_str(&format!("Tickers:  {}\n", tickers.len()));
    for ticker in &tickers {
        out.push_str(&format!("  {ticker}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use valuelens_core::data::MetricValue;
    use valuelens_core::{ChartDataBuilder, LookupError, Metric};

    const CANONICAL: &str = "\
PRIMARYSECID,TRADE_DATE,PE,PB,PS
HPG,2021-03-01,8.0,1.3,0.9
HPG,2024-01-02,10.5,1.2,0.8
VNM,2024-01-02,18.2,,2.9
";

    fn write_canonical(dir: &Path) -> PathBuf {
        let path = dir.join("VALUATION_cleaned.csv");
        std::fs::write(&path, CANONICAL).unwrap();
        path
    }

    #[test]
    fn parses_lookup_with_global_flags() {
        let cli = Cli::try_parse_from([
            "valuelens",
            "lookup",
            "hpg",
            "pe",
            "pb",
            "--latest",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::Lookup {
                ticker,
                metrics,
                latest,
                json,
                ..
            } => {
                assert_eq!(ticker, "hpg");
                assert_eq!(metrics, vec!["pe", "pb"]);
                assert!(latest);
                assert!(!json);
            }
            other => panic!("expected lookup, got {other:?}"),
        }
    }

    #[test]
    fn lookup_requires_a_metric() {
        assert!(Cli::try_parse_from(["valuelens", "lookup", "HPG"]).is_err());
    }

    #[test]
    fn chart_defaults() {
        let cli = Cli::try_parse_from(["valuelens", "chart", "HPG"]).unwrap();
        match cli.command {
            Commands::Chart {
                metric,
                start_year,
                tail,
                export,
                ..
            } => {
                assert_eq!(metric, "PE");
                assert_eq!(start_year, None);
                assert_eq!(tail, 10);
                assert!(export.is_none());
            }
            other => panic!("expected chart, got {other:?}"),
        }
    }

    #[test]
    fn valuation_text_marks_missing_values() {
        let v = Valuation {
            ticker: "VNM".into(),
            trade_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            values: vec![
                MetricValue {
                    metric: Metric::Pe,
                    value: Some(18.2),
                },
                MetricValue {
                    metric: Metric::Pb,
                    value: None,
                },
            ],
        };
        assert_eq!(format_valuation(&v), "VNM  2024-01-02  PE=18.20  PB=n/a");
    }

    #[test]
    fn data_flag_overrides_config_path_and_keeps_policy() {
        let mut config = Config::default();
        config.lookup.match_policy = MatchPolicy::LatestByDate;
        let repo = repository(&config, Some(PathBuf::from("other.csv")));
        assert_eq!(repo.path(), Path::new("other.csv"));
        assert_eq!(repo.policy(), MatchPolicy::LatestByDate);
    }

    #[test]
    fn lookup_errors_surface_typed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ValuationRepository::new(write_canonical(dir.path()));
        let err = run_lookup(&repo, "HPG", &["XX".to_string()], false).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LookupError>(),
            Some(&LookupError::InvalidMetric(vec!["XX".into()]))
        );
    }

    #[test]
    fn chart_text_shows_stats_and_tail() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ValuationRepository::new(write_canonical(dir.path()));
        let view = build_chart(&Config::default(), &repo, "hpg", "pe", 2021)
            .unwrap()
            .unwrap();

        let text = format_chart(&view, 1);
        assert!(text.starts_with("=== P/E of HPG since 2021 ===\n"));
        assert!(text.contains("Period:   2021-03-01 to 2024-01-02"));
        assert!(text.contains("Max:      10.50"));
        assert!(text.contains("EMA20"));
        assert!(text.contains("2024-01-02"));
        // Only the last row is listed.
        assert_eq!(
            text.lines().filter(|l| l.starts_with("2021-03-01")).count(),
            0
        );
    }

    #[test]
    fn chart_for_unknown_ticker_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ValuationRepository::new(write_canonical(dir.path()));
        let view = build_chart(&Config::default(), &repo, "ZZZ", "PE", 2021).unwrap();
        assert!(view.is_none());
    }

    #[test]
    fn chart_rejects_bad_metric() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ValuationRepository::new(write_canonical(dir.path()));
        let err = build_chart(&Config::default(), &repo, "HPG", "EV", 2021).unwrap_err();
        assert!(err.to_string().contains("EV"));
    }

    #[test]
    fn export_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let ds = ValuationRepository::new(write_canonical(dir.path()))
            .load()
            .unwrap();
        let view = ChartDataBuilder::default()
            .build(&ds, "HPG", Metric::Pb, 2021)
            .unwrap()
            .unwrap();
        let out = dir.path().join("hpg_pb.csv");
        export_chart(&view, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("date,PB,EMA20,EMA200\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn tickers_listing() {
        let dir = tempfile::tempdir().unwrap();
        let ds = ValuationRepository::new(write_canonical(dir.path()))
            .load()
            .unwrap();
        let text = format_tickers(&ds);
        assert!(text.contains("Rows:     3"));
        assert!(text.contains("Years:    2021-2024"));
        assert!(text.contains("Tickers:  2\n  HPG\n  VNM\n"));
    }

    #[test]
    fn clean_command_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("VALUATION.csv");
        std::fs::write(
            &raw,
            "PRIMARYSECID,TRADE_DATE,PE_RATIO\nHPG VN Equity,2024-01-02,10.5\n",
        )
        .unwrap();
        let out = dir.path().join("clean.csv");
        run_clean(&raw, &out).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "PRIMARYSECID,TRADE_DATE,PE\nHPG,2024-01-02,10.5\n"
        );
    }
}
