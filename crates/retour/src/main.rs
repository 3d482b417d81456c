use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use clap::Parser;
use command::{AppResult, RetourCmd};
use env_logger::{Builder, Env, Target};
use log::{debug, error};
use retour_common::{config::load_config, utils::get_data_dir};
use retour_database::Context;
mod command;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const LOG_FILE: &str = "retour.log";

#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: &str = "debug";
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: &str = "error";

static HELP_TEMPLATE: &str = "\
    {before-help} {name} {version}
    {author}
    {about}

    {usage-heading}
      {usage}


    {all-args}
    {after-help}";

#[derive(Parser)]
#[command(
    author = "Retour Developers",
    version = VERSION,
    about = "Find your way back through your shell history.",
    help_template(HELP_TEMPLATE),
)]
struct Retour {
    /// Read configuration from this file instead of the default location.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    retour: RetourCmd,
}

impl Retour {
    fn run(self) -> AppResult<()> {
        let config = load_config(self.config.as_deref())?;
        debug!("config: {config:?}");
        let mut context = Context::new(config)?;
        self.retour.run(&mut context)
    }
}

/// Send logs to a file in the data dir so they never land on the terminal
/// the search screen occupies.
fn init_logging() {
    let env = Env::new().filter_or("RETOUR_LOG", DEFAULT_LOG_LEVEL);
    let mut builder = Builder::from_env(env);

    let data_dir = get_data_dir();
    let log_file = fs::create_dir_all(&data_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILE))
    });
    match log_file {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        // Without a log file stay quiet rather than write over the UI.
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() {
    init_logging();

    if let Err(err) = Retour::parse().run() {
        error!("{err}");
        eprintln!("retour: {err}");
        std::process::exit(1);
    }
}
