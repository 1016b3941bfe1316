//! gbana - Entry Point

use clap::Parser;
use gbana::config::CliOverrides;
use gbana::model::{QuerySyntax, SearchInput};
use gbana::state::{NullRenderer, QueryController, SubmitOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

/// gbana - terminal dashboard for Cloud Logging queries
#[derive(Parser, Debug)]
#[command(name = "gbana")]
#[command(version)]
#[command(about = "Search Google Cloud Logging from the terminal")]
pub struct Args {
    /// Free-text term matched against the log payload
    pub term: Option<String>,

    /// Lower time bound (e.g. "2024-03-15", "2h ago", "yesterday")
    #[arg(long)]
    pub from: Option<String>,

    /// Upper time bound
    #[arg(long)]
    pub to: Option<String>,

    /// Project to read logs from
    #[arg(short, long)]
    pub project: Option<String>,

    /// Maximum number of records per search (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Start with line wrapping off
    #[arg(long)]
    pub no_wrap: bool,

    /// Echo the generated query above the results
    #[arg(long)]
    pub show_query: bool,

    /// Spell the term clause as `payload contains "..."`
    #[arg(long)]
    pub plain_syntax: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run one search, print the lines to stdout and exit
    #[arg(long)]
    pub print: bool,
}

impl Args {
    fn search_input(&self) -> SearchInput {
        SearchInput::new(
            self.term.clone().unwrap_or_default(),
            self.from.clone().unwrap_or_default(),
            self.to.clone().unwrap_or_default(),
        )
    }

    /// Only flags the user actually passed override lower layers.
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            project: self.project.clone(),
            limit: self.limit.map(|l| l as usize),
            line_wrap: self.no_wrap.then_some(false),
            show_query: self.show_query.then_some(true),
            query_syntax: self.plain_syntax.then_some(QuerySyntax::Plain),
        }
    }
}

/// How long `--print` waits between checks on the running search.
const PRINT_WAIT_SLICE: Duration = Duration::from_secs(1);

/// Exit status when a date bound does not parse in `--print` mode.
const EXIT_BAD_INPUT: u8 = 2;

/// Run a single search without a terminal UI.
fn print_search(mut controller: QueryController, input: &SearchInput) -> ExitCode {
    let mut renderer = NullRenderer;

    if let SubmitOutcome::Rejected(err) = controller.submit(input, &mut renderer) {
        eprintln!("gbana: {}", err);
        return ExitCode::from(EXIT_BAD_INPUT);
    }

    while controller.is_busy() {
        controller.wait(PRINT_WAIT_SLICE, &mut renderer);
    }

    for line in controller.view().lines() {
        println!("{}", line);
    }
    ExitCode::SUCCESS
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = gbana::config::load_config_with_precedence(args.config.clone())?;
        let merged = gbana::config::merge_config(config_file);
        let with_env = gbana::config::apply_env_overrides(merged);
        gbana::config::apply_cli_overrides(with_env, args.overrides())
    };

    gbana::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let controller = gbana::integration::controller_from_config(&config);
    let input = args.search_input();

    if args.print {
        return Ok(print_search(controller, &input));
    }

    gbana::view::run(controller, input)?;

    Ok(ExitCode::SUCCESS)
}
