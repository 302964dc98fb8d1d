use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;
use lazyfolio::data_dir::DataDirectory;
use lazyfolio::{App, app::DEFAULT_REFERENCE_TICKER, init_logging, report};
use lazyfolio_core::model::{DateRange, Ticker};
use lazyfolio_core::{JoinPolicy, SimulationRequest};

#[derive(Parser, Debug)]
#[command(name = "lazyfolio")]
#[command(about = "Simulate and compare lazy index-fund portfolios")]
struct Args {
    /// Path to the data directory (default: ~/.lazyfolio/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Portfolio catalog file (default: <data-dir>/catalog.yaml if present)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog portfolios and their holdings
    Portfolios {
        #[arg(long)]
        json: bool,
    },
    /// Simulate growth of one portfolio
    Simulate(SimulateArgs),
    /// Compare risk and return across portfolios
    Compare(CompareArgs),
}

#[derive(ClapArgs, Debug)]
struct WindowArgs {
    /// First date (YYYY-MM-DD); defaults to 90 days into the reference history
    #[arg(long)]
    start: Option<Date>,

    /// Last date (YYYY-MM-DD); defaults to the end of the reference history
    #[arg(long)]
    end: Option<Date>,

    /// Ticker whose history sets the default window
    #[arg(long, default_value = DEFAULT_REFERENCE_TICKER)]
    reference: String,

    /// Require every holding and use only dates common to all of them
    #[arg(long)]
    strict: bool,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
struct SimulateArgs {
    /// Portfolio name as listed by `lazyfolio portfolios`
    #[arg(short, long)]
    portfolio: String,

    #[arg(long, default_value_t = 10_000.0)]
    initial: f64,

    #[arg(long, default_value_t = 500.0)]
    monthly: f64,

    #[command(flatten)]
    window: WindowArgs,
}

#[derive(ClapArgs, Debug)]
struct CompareArgs {
    /// Portfolios to compare (repeatable); all catalog portfolios by default
    #[arg(short, long)]
    portfolio: Vec<String>,

    #[command(flatten)]
    window: WindowArgs,
}

fn open(args: &Args, strict: bool) -> color_eyre::Result<App> {
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(DataDirectory::default_path);
    let policy = if strict {
        JoinPolicy::Strict
    } else {
        JoinPolicy::Lenient
    };
    Ok(App::load(data_dir, args.catalog.as_deref(), policy)?)
}

fn window(app: &App, args: &WindowArgs) -> DateRange {
    let today = jiff::Zoned::now().date();
    app.window(&Ticker::new(&args.reference), args.start, args.end, today)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    match &args.command {
        Command::Portfolios { json } => {
            let app = open(&args, false)?;
            let catalog = app.engine().catalog();
            if *json {
                println!("{}", report::portfolios_json(catalog)?);
            } else {
                println!("{}", report::render_portfolios(catalog));
            }
        }
        Command::Simulate(sim) => {
            let app = open(&args, sim.window.strict)?;
            let request = SimulationRequest::new(&sim.portfolio, window(&app, &sim.window))
                .initial_investment(sim.initial)
                .monthly_contribution(sim.monthly);
            let result = app.engine().run(&request)?;
            if sim.window.json {
                println!("{}", report::simulation_json(&result)?);
            } else {
                println!("{}", report::render_simulation(&result, app.engine().catalog()));
            }
        }
        Command::Compare(cmp) => {
            let app = open(&args, cmp.window.strict)?;
            let names: Vec<String> = if cmp.portfolio.is_empty() {
                app.engine().catalog().names().map(str::to_string).collect()
            } else {
                cmp.portfolio.clone()
            };
            let entries = app.engine().compare(&names, window(&app, &cmp.window));
            if cmp.window.json {
                println!("{}", report::comparison_json(&entries)?);
            } else {
                println!("{}", report::render_comparison(&entries));
            }
        }
    }

    tracing::debug!("done");
    Ok(())
}
