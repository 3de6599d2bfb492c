use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use idcard_report::roster::{
    locations::LocationMap,
    person::read_roster,
    report::{write_report_to_path, DEFAULT_REPORT_PATH},
    sorting::{prompt_sort_key, SortKey, SortOrder},
};
use std::{
    io,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Age,
    AgeDesc,
    Gender,
    City,
    None,
}

impl SortArg {
    fn sort_key(self) -> Option<SortKey> {
        match self {
            Self::Age => Some(SortKey::Age(SortOrder::Ascending)),
            Self::AgeDesc => Some(SortKey::Age(SortOrder::Descending)),
            Self::Gender => Some(SortKey::Gender),
            Self::City => Some(SortKey::City),
            Self::None => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON table mapping address codes to city names
    #[arg(long, env = "IDCARD_LOCATIONS", default_value = "T_Location_202206181755.json")]
    locations: PathBuf,

    /// Whitespace separated `name----ID` entries
    #[arg(long, env = "IDCARD_ROSTER", default_value = "card.txt")]
    roster: PathBuf,

    /// CSV report to write
    #[arg(short, long, env = "IDCARD_OUTPUT", default_value = DEFAULT_REPORT_PATH)]
    output: PathBuf,

    /// Reference date for ages, defaults to today
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,

    /// Sort without asking
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Never ask interactively
    #[arg(long)]
    no_prompt: bool,
}

/// Success line, always printed so skipped entries stay visible even when
/// warnings are filtered out of the log.
fn export_summary(output: &Path, written: usize, skipped: usize) -> String {
    format!(
        "✅ 成功导出：{}（{written} 条，跳过 {skipped} 条）",
        output.display()
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idcard_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let as_of = args
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(%as_of, "computing ages");

    let locations = LocationMap::from_path(&args.locations)
        .with_context(|| format!("loading {}", args.locations.display()))?;
    let mut roster = read_roster(&args.roster, &locations, as_of)
        .with_context(|| format!("reading {}", args.roster.display()))?;

    let sort_key = match args.sort {
        Some(sort) => sort.sort_key(),
        None if args.no_prompt => None,
        None => prompt_sort_key(io::stdin().lock(), io::stdout().lock())?,
    };
    if let Some(key) = sort_key {
        info!(?key, "sorting records");
        key.apply(&mut roster.records);
    }

    write_report_to_path(&args.output, &roster.records)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!(
        "\n{}",
        export_summary(&args.output, roster.records.len(), roster.skipped.len())
    );

    Ok(())
}
