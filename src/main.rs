use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use rent_guarantee_calculator::{
    app::{self, Session},
    config, engine, i18n, logging, ui_cli,
};

#[derive(Parser)]
#[command(name = "rent_guarantee_calculator_cli")]
#[command(about = "Rent guarantee cost calculator (terminal)")]
struct Cli {
    /// auto / es / en
    #[arg(short = 'L', long, default_value = "auto", global = true)]
    lang: String,

    /// Path to the config file (created with defaults when missing)
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a single quote. Values are free text and coerce to 0 when invalid.
    Quote {
        /// Contract duration in months
        #[arg(short, long, allow_hyphen_values = true)]
        duration: Option<String>,

        /// First rent payment
        #[arg(short, long, allow_hyphen_values = true)]
        rent: Option<String>,

        /// First month's building expenses
        #[arg(short, long, allow_hyphen_values = true)]
        expenses: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Edit the inputs and see the quote after every change (default)
    Interactive,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    logging::init();
    match try_run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            app::report_fatal(&err);
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let cfg = config::load_or_create(&cli.config)?;
    let rates = cfg.resolve_rates();
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    info!(lang = %lang, "cli started");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Quote {
            duration,
            rent,
            expenses,
            json,
        } => {
            let defaults = cfg.defaults.to_input();
            let input = engine::ContractInput::from_raw(
                &duration.unwrap_or_else(|| defaults.duration_months.to_string()),
                &rent.unwrap_or_else(|| defaults.rent.to_string()),
                &expenses.unwrap_or_else(|| defaults.expenses.to_string()),
            );
            let result = engine::compute(&input, &rates);
            if json {
                println!("{}", app::quote_json(&input, &result)?);
            } else {
                print!("{}", ui_cli::render_quote(&tr, &input, &result));
            }
        }
        Commands::Interactive => {
            let mut session = Session::new(cfg.defaults.to_input(), rates);
            app::run(&mut session, &tr)?;
        }
    }
    Ok(())
}
