use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ytpick::api::data_api::DataApiClient;
use ytpick::config;
use ytpick::metadata::{self, VideoRecord};
use ytpick::output::{export, print_json, table};
use ytpick::search::{self, filters};
use ytpick::session::SessionState;
use ytpick::transcript::{self, innertube::InnertubeClient};

#[derive(Parser)]
#[command(name = "ytpick", version, about = "YouTube search & compare — filter the catalog, pick videos, bulk-collect transcripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// YouTube Data API v3 key (falls back to YOUTUBE_API_KEY, then ~/.ytpick/config.toml)
    #[arg(long, global = true)]
    api_key: Option<String>,
}

#[derive(Args)]
struct FilterArgs {
    /// Search keyword (omit to browse popular videos)
    keyword: Option<String>,

    /// Total results to fetch across pages
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(2..=100))]
    max_results: u64,

    /// Upload period lower bound
    #[arg(long, value_enum, default_value = "month")]
    period: filters::UploadPeriod,

    /// Video length class (short < 4 min, medium 4-20 min, long > 20 min)
    #[arg(long, value_enum, default_value = "short")]
    duration: filters::DurationClass,

    /// Result ordering
    #[arg(long, value_enum, default_value = "view-count")]
    order: filters::SortOrder,
}

impl FilterArgs {
    fn to_filter(&self) -> filters::SearchFilter {
        filters::SearchFilter {
            keyword: self.keyword.clone().filter(|k| !k.trim().is_empty()),
            max_results: self.max_results,
            period: self.period,
            duration: self.duration,
            order: self.order,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and print the comparison grid
    Search {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Search, pick a bounded subset, collect transcripts, export CSV/TXT
    Collect {
        #[command(flatten)]
        filter: FilterArgs,

        /// Per-batch selection cap
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(2..=50))]
        cap: u64,

        /// 1-based row numbers to collect (e.g. 1,3,5); omit to pick interactively
        #[arg(long, value_delimiter = ',')]
        select: Option<Vec<usize>>,

        /// Transcript language priority for manually-created tracks
        #[arg(long, value_delimiter = ',', default_value = "ko,ja,en")]
        langs: Vec<String>,

        /// Directory to write the export files into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Skip the CSV export
        #[arg(long)]
        no_csv: bool,

        /// Skip the plain-text export
        #[arg(long)]
        no_txt: bool,
    },

    /// Manage ~/.ytpick/config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Create the config file with a commented template
    Init,
    /// Show the config with secrets redacted
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;

    match cli.command {
        Commands::Search { filter } => {
            let records = search_records(cli.api_key.as_deref(), &filter)?;
            if records.is_empty() {
                println!("No videos matched the search filters.");
                return Ok(());
            }
            if json_output {
                print_json(&serde_json::json!({
                    "total": records.len(),
                    "videos": records,
                }))?;
            } else {
                table::print_video_grid(&records);
            }
        }

        Commands::Collect {
            filter,
            cap,
            select,
            langs,
            out_dir,
            no_csv,
            no_txt,
        } => {
            let records = search_records(cli.api_key.as_deref(), &filter)?;
            if records.is_empty() {
                println!("No videos matched the search filters.");
                return Ok(());
            }

            let mut session = SessionState::new(cap as usize);
            session.set_results(records);

            let rows = match select {
                Some(rows) => rows,
                None => {
                    table::print_video_grid(&session.records);
                    prompt_rows(session.records.len(), cap)?
                }
            };
            session.select_rows(&rows)?;
            let selected = session.selected();

            eprintln!(
                "Collecting transcripts for {} video{}...",
                selected.len(),
                if selected.len() == 1 { "" } else { "s" }
            );
            let priority: Vec<&str> = langs.iter().map(String::as_str).collect();
            let source = InnertubeClient::new()?;
            session.transcripts = transcript::collect(&source, &selected, &priority);

            if json_output {
                print_json(&serde_json::json!({
                    "total": session.transcripts.len(),
                    "transcripts": session.transcripts,
                }))?;
            } else {
                println!();
                table::print_transcript_summary(&session.transcripts);
            }

            let written = export::write_exports(&out_dir, &session.transcripts, !no_csv, !no_txt)?;
            for path in &written {
                println!("Wrote {}", path.display());
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Init => {
                let path = config::config_path()?;
                if config::init_config()? {
                    println!("Created {}", path.display());
                } else {
                    println!("Config already exists: {}", path.display());
                }
            }
            ConfigAction::Show => {
                let loaded = config::YtpickConfig::load()?;
                if json_output {
                    print_json(&loaded)?;
                } else {
                    println!("{}", loaded.display_redacted());
                }
            }
        },
    }

    Ok(())
}

/// Search + metadata join: the read-only half of the session. The API key is
/// resolved before any network call is made.
fn search_records(api_key_flag: Option<&str>, args: &FilterArgs) -> Result<Vec<VideoRecord>> {
    let loaded = config::YtpickConfig::load()?;
    let api_key = config::resolve_api_key(api_key_flag, &loaded)?;
    let api = DataApiClient::new(api_key)?;
    let filter = args.to_filter();

    let hits = search::run_search(&api, &filter)?;
    if hits.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = hits
        .iter()
        .filter_map(|h| h.video_id().map(str::to_string))
        .collect();
    let meta = metadata::fetch_metadata(&api, &ids)?;
    Ok(metadata::build_records(&hits, &meta, filter.order))
}

/// Ask for row numbers on stdin: comma-separated, 1-based.
fn prompt_rows(total: usize, cap: u64) -> Result<Vec<usize>> {
    eprint!("Rows to collect (1-{total}, comma-separated, max {cap}): ");
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    let rows = answer
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("Not a row number: {s}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if rows.is_empty() {
        bail!("No rows selected.");
    }
    Ok(rows)
}
