use std::path::PathBuf;

use clap::Parser;

use worklog::config;
use worklog::input::Console;
use worklog::logging;
use worklog::menu;
use worklog::store::EntryStore;

#[derive(Parser)]
#[command(
    name = "worklog",
    version,
    about = "Work log: record, browse, edit and delete time-tracking entries"
)]
struct Cli {
    /// Entry database file (default: platform data dir)
    #[arg(long, env = "WORKLOG_DB_PATH")]
    db: Option<PathBuf>,

    /// Never clear the screen between views
    #[arg(long)]
    no_clear: bool,

    /// Log store and lookup activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cfg = config::load()?;
    let Some(db_path) = cfg.db_path(cli.db.as_deref()) else {
        anyhow::bail!("cannot determine entry database path; pass --db or set WORKLOG_DB_PATH");
    };
    let store = EntryStore::open(&db_path)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock())
        .with_clear_screen(cfg.ui.clear_screen && !cli.no_clear);
    menu::run(&mut console, &store)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("[worklog] warning: {e:#}");
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("[worklog] error: {e:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
