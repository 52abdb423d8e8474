mod ai;
mod app;
mod config;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod sync;
mod ticker;
mod ui;

use ai::{ChatMessage, FallbackChain, OpenRouterClient, Worker};
use anyhow::{bail, Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_due_date, Mood};
use persistence::{
    clear_session, ensure_data_dir, init_local_data_dir, load_session, load_settings,
    save_session, save_settings, LocalTaskStore, Settings, LOG_FILE, SESSION_FILE, SETTINGS_FILE,
    TASKS_FILE,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use sync::{AuthClient, AuthOutcome, SupabaseData, SyncError, TaskRemote, TaskRepository};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "noteflow")]
#[command(about = "A mood-based productivity companion for the terminal", long_about = None)]
struct Cli {
    /// Config file. Defaults to <config_dir>/noteflow/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .noteflow directory in the current directory
    Init,
    /// Sign in with email and password (password read from stdin)
    Login {
        #[arg(short, long)]
        email: String,
    },
    /// Create an account (password read from stdin)
    Signup {
        #[arg(short, long)]
        email: String,
    },
    /// Email a sign-in link
    MagicLink {
        #[arg(short, long)]
        email: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Keep everything on this machine
    Guest,
    /// Ask the assistant a single question
    Chat {
        prompt: String,
        #[arg(short, long, default_value = "motivated")]
        mood: Mood,
    },
    /// Print the task list
    Tasks,
    /// Generate a daily report with statistics
    Report {
        /// Date to generate report for (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <data_dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref());

    if let Some(Commands::Init) = cli.command {
        let data_dir = init_local_data_dir()?;
        println!("Initialized noteflow directory: {}", data_dir.display());
        println!();
        println!("NoteFlow will now use this local directory for tasks and settings.");
        println!("Run 'noteflow' to start.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    if let Err(e) = logging::init_tracing(&data_dir.join(LOG_FILE), config.log_level) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    match cli.command {
        Some(Commands::Init) => Ok(()),
        Some(Commands::Login { email }) => {
            let password = read_password()?;
            let outcome = auth_client(&config)?.sign_in(&email, &password)?;
            finish_sign_in(&data_dir, &config, outcome)
        }
        Some(Commands::Signup { email }) => {
            let password = read_password()?;
            let outcome = auth_client(&config)?.sign_up(&email, &password)?;
            finish_sign_in(&data_dir, &config, outcome)
        }
        Some(Commands::MagicLink { email }) => {
            auth_client(&config)?.send_magic_link(&email)?;
            println!("Check {email} for a sign-in link.");
            Ok(())
        }
        Some(Commands::Logout) => logout(&data_dir, &config),
        Some(Commands::Guest) => {
            let settings_path = data_dir.join(SETTINGS_FILE);
            let mut settings = load_app_settings(&settings_path, &config)?;
            settings.guest_mode = true;
            save_settings(&settings_path, &settings)?;
            println!("Guest mode on. Tasks stay in {}", data_dir.display());
            Ok(())
        }
        Some(Commands::Chat { prompt, mood }) => {
            let chain = build_chain(&config)?;
            let reply = chain.run(&[
                ChatMessage::system(ai::prompts::chat_system_prompt(mood)),
                ChatMessage::user(prompt),
            ]);
            println!("{}", reply.content);
            if reply.using_fallback() {
                eprintln!("(answered by a fallback model)");
            }
            Ok(())
        }
        Some(Commands::Tasks) => print_tasks(&data_dir, &config),
        Some(Commands::Report { date, output }) => {
            let report_date = if let Some(date_str) = date {
                chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?
            } else {
                chrono::Local::now().date_naive()
            };

            let output_path = output.map(PathBuf::from);

            println!("Generating report for {}...", report_date);
            let report_path = report::generate_report(&data_dir, Some(report_date), output_path)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        None => run_tui(&data_dir, &config),
    }
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    Ok(password)
}

fn auth_client(config: &AppConfig) -> Result<AuthClient> {
    let backend = config.supabase.backend().ok_or(SyncError::NotConfigured)?;
    Ok(AuthClient::new(backend)?)
}

fn build_chain(config: &AppConfig) -> Result<FallbackChain> {
    let client = OpenRouterClient::new(&config.ai).context("Failed to build AI client")?;
    Ok(FallbackChain::from_config(&config.ai, Arc::new(client)))
}

/// Settings from disk; a first run takes its pomodoro defaults from config
fn load_app_settings(path: &Path, config: &AppConfig) -> Result<Settings> {
    if path.exists() {
        return load_settings(path);
    }
    Ok(Settings {
        pomodoro: config.pomodoro.to_settings(),
        ..Settings::default()
    })
}

fn finish_sign_in(data_dir: &Path, config: &AppConfig, outcome: AuthOutcome) -> Result<()> {
    let session = match outcome {
        AuthOutcome::SignedIn(session) => session,
        AuthOutcome::NeedsEmailConfirmation => {
            println!("Check your email for a link to finish signing in.");
            return Ok(());
        }
    };

    save_session(data_dir.join(SESSION_FILE), &session)?;
    let settings_path = data_dir.join(SETTINGS_FILE);
    let mut settings = load_app_settings(&settings_path, config)?;
    settings.guest_mode = false;
    save_settings(&settings_path, &settings)?;

    let email = session.user.email.clone().unwrap_or_default();
    if let Some(backend) = config.supabase.backend() {
        let data = SupabaseData::new(backend, session)?;
        match data.get_profile() {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = data.create_profile(None) {
                    warn!(error = %e, "creating profile failed");
                }
            }
            Err(e) => warn!(error = %e, "loading profile failed"),
        }
    }
    info!(email = %email, "session stored");
    println!("Signed in as {email}.");
    Ok(())
}

fn logout(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let session_path = data_dir.join(SESSION_FILE);
    if let Some(session) = load_session(&session_path)? {
        if let Some(backend) = config.supabase.backend() {
            if let Err(e) = AuthClient::new(backend).and_then(|auth| auth.sign_out(&session)) {
                warn!(error = %e, "remote sign-out failed");
            }
        }
    }
    clear_session(&session_path)?;
    println!("Signed out.");
    Ok(())
}

/// Pick guest or cloud storage. Returns the backend (when signed in) and a
/// warning to show if the stored session could not be used.
fn resolve_backend(
    data_dir: &Path,
    config: &AppConfig,
    settings: &Settings,
) -> Result<(Option<SupabaseData>, Option<String>)> {
    if settings.guest_mode {
        return Ok((None, None));
    }
    let Some(backend) = config.supabase.backend() else {
        return Ok((None, None));
    };
    let session_path = data_dir.join(SESSION_FILE);
    let Some(mut session) = load_session(&session_path)? else {
        return Ok((None, None));
    };

    if session.is_expired(chrono::Utc::now().timestamp()) {
        match AuthClient::new(backend.clone()).and_then(|auth| auth.refresh(&session.refresh_token)) {
            Ok(fresh) => {
                save_session(&session_path, &fresh)?;
                session = fresh;
                info!("session refreshed");
            }
            Err(e) => {
                warn!(error = %e, "session refresh failed, using guest mode");
                return Ok((
                    None,
                    Some("Session expired. Using guest mode; run noteflow login.".to_string()),
                ));
            }
        }
    }

    Ok((Some(SupabaseData::new(backend, session)?), None))
}

fn build_repository(data_dir: &Path, remote: Option<SupabaseData>) -> TaskRepository {
    let store = LocalTaskStore::new(data_dir.join(TASKS_FILE));
    TaskRepository::new(store, remote.map(|d| Box::new(d) as Box<dyn TaskRemote>))
}

fn print_tasks(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let settings = load_app_settings(&data_dir.join(SETTINGS_FILE), config)?;
    let (remote, warning) = resolve_backend(data_dir, config, &settings)?;
    if let Some(warning) = warning {
        eprintln!("{warning}");
    }
    let mut repo = build_repository(data_dir, remote);
    if repo.load()?.is_local_only() {
        eprintln!("Error loading tasks; showing the local copy.");
    }

    let today = chrono::Local::now().date_naive();
    if repo.tasks().is_empty() {
        println!("No tasks yet.");
    }
    for task in repo.tasks() {
        let check = if task.completed { "[x]" } else { "[ ]" };
        let star = if task.priority { " ★" } else { "" };
        let due = task
            .due_date
            .map(|d| format!("  (due {})", format_due_date(d, today)))
            .unwrap_or_default();
        println!("{check}{star} {}  [{}]{due}", task.text, task.category);
        for sub in &task.sub_tasks {
            println!("    {} {}", sub.status.symbol(), sub.text);
        }
    }
    Ok(())
}

fn run_tui(data_dir: &Path, config: &AppConfig) -> Result<()> {
    eprintln!("Using noteflow directory: {}", data_dir.display());

    let settings_path = data_dir.join(SETTINGS_FILE);
    let mut settings = load_app_settings(&settings_path, config)?;
    settings.has_visited = true;

    let (remote, warning) = resolve_backend(data_dir, config, &settings)?;
    let repo = build_repository(data_dir, remote.clone());
    let worker = Worker::new(Arc::new(build_chain(config)?));

    let mut app = AppState::new(repo, settings, settings_path, worker);
    if let Some(data) = remote {
        info!(user = data.user_id(), "cloud mode");
        app = app.with_backend(data);
    }
    app.open_in_browser = config.music.open_in_browser;
    app.settings_dirty = true;
    app.load()?;
    if let Some(warning) = warning {
        app.error(warning);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save_settings() {
        eprintln!("Error saving settings: {}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // $EDITOR needs the real terminal
        if app.external_edit_requested {
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

            if let Err(e) = input::edit_notes_external(app) {
                warn!(error = %e, "external editor failed");
                app.error(format!("Editor failed: {e}"));
            }

            enable_raw_mode()?;
            execute!(io::stdout(), EnterAlternateScreen)?;
            terminal.clear()?;
        }

        app.tick(Instant::now())?;
    }
}
