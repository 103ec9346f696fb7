use clap::Parser;
use sentiboard::core::config::Config;
use sentiboard::core::error::{Error, Result};
use sentiboard::core::logging;
use sentiboard::ui::cli::{Cli, Commands};
use sentiboard::ui::report::{analysis_report, history_report};
use sentiboard::view::filter::filter_by_local_day;
use sentiboard::{AnalysisRequest, ApiClient, DashboardTui, DateOption, NewsFetcher, Store};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let runtime = Runtime::new()?;

    let store = Store::new();
    let api = ApiClient::new(&config)?;
    let fetcher = NewsFetcher::new(Arc::new(api), store);

    match cli.command {
        None | Some(Commands::Dashboard) => handle_dashboard(config, fetcher, &runtime),
        Some(Commands::Analyze { keyword, date }) => {
            logging::init_stderr();
            handle_analyze(&fetcher, &runtime, &keyword, date)
        }
        Some(Commands::History { date }) => {
            logging::init_stderr();
            handle_history(&fetcher, &runtime, date.as_deref().unwrap_or(""))
        }
        Some(Commands::Show { id }) => {
            logging::init_stderr();
            handle_show(&fetcher, &runtime, &id)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone())?;
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs)?;
    }
    if let Some(fetch_on_load) = cli.fetch_on_load {
        config.fetch_on_load = fetch_on_load;
    }
    Ok(config)
}

fn handle_dashboard(config: Config, fetcher: NewsFetcher, runtime: &Runtime) -> Result<()> {
    if let Err(e) = logging::init_file(&config.log_path()) {
        eprintln!("⚠ Warning: logging disabled ({})", e);
    }

    let mut tui = DashboardTui::new(config, fetcher, runtime.handle().clone());
    tui.run()
}

fn handle_analyze(fetcher: &NewsFetcher, runtime: &Runtime, keyword: &str, date: DateOption) -> Result<()> {
    // Validate before any request goes out
    let request = AnalysisRequest::new(keyword, date)?;
    println!("Analizando noticias para \"{}\" ({})...\n", request.keyword(), date.label());

    let analysis = runtime.block_on(fetcher.analyze(request))?;
    print!("{}", analysis_report(&analysis));
    Ok(())
}

fn handle_history(fetcher: &NewsFetcher, runtime: &Runtime, date: &str) -> Result<()> {
    runtime.block_on(fetcher.load_history())?;

    let state = fetcher.store().snapshot();
    let entries = filter_by_local_day(&state.previous_analyses, date)?;
    print!("{}", history_report(&entries));
    Ok(())
}

fn handle_show(fetcher: &NewsFetcher, runtime: &Runtime, id: &str) -> Result<()> {
    runtime.block_on(fetcher.load_history())?;

    let analysis = fetcher
        .store()
        .read(|state| state.previous_analyses.iter().find(|a| a.id == id).cloned())
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    print!("{}", analysis_report(&analysis));
    Ok(())
}
