use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
use trk_tui::cli::{Cli, Commands};
use trk_tui::{Backend, Config, Profile};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // The TUI owns the terminal, so logs go to a file in the data directory
    let _log_guard = init_logging(profile);

    let config = Config::load_with_profile(profile)?;
    let server_url = cli.server.unwrap_or_else(|| config.server_url.clone());
    let backend = Backend::new(server_url)?;

    match cli.command {
        None | Some(Commands::Tui) => {
            let app = trk_tui::tui::App::new(config, backend);
            trk_tui::tui::run_event_loop(app)?;
        }
        Some(Commands::AddTask { title, due, priority, project }) => {
            trk_tui::cli::handle_add_task(title, due, priority, project, &backend)?;
        }
        Some(Commands::AddNote { title, content, tags }) => {
            trk_tui::cli::handle_add_note(title, content, tags, &backend)?;
        }
        Some(Commands::Timer { action }) => {
            trk_tui::cli::handle_timer(action, &backend)?;
        }
        Some(Commands::Attach { note_id, file }) => {
            trk_tui::cli::handle_attach(note_id, file, &backend)?;
        }
    }

    Ok(())
}

fn init_logging(profile: Profile) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let data_dir = trk_tui::config::get_data_dir(profile)?;
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(data_dir, "trk.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
