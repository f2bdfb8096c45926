mod app;
mod config;
mod db;
mod logging;
mod navigation;
mod points;
mod profile;
mod session;
#[cfg(test)]
mod testing;
mod ui;

use app::{App, Screen};
use clap::{Parser, Subcommand};
use config::AppConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use session::{FileSessionStore, SessionStore};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

/// Terminal profile screen backed by a cached session and a points ledger
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the stored session record (overrides config)
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Path to the points ledger database (overrides config)
    #[arg(long, global = true)]
    points_db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI (default)
    Run,
    /// Add points to a user's ledger
    Award {
        /// User id to credit
        #[arg(short, long)]
        user: String,
        /// Number of points
        #[arg(short, long, allow_negative_numbers = true)]
        points: i64,
        /// Free-form reason stored with the award
        #[arg(short, long, default_value = "")]
        reason: String,
    },
    /// Print a user's point total
    Points {
        /// User id to look up
        #[arg(short, long)]
        user: String,
        /// Also list individual awards, newest first
        #[arg(long)]
        history: bool,
    },
    /// Forget the stored session
    Logout,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.session, cli.points_db);

    let (_log_guard, log_warning) = logging::init_logging(&config.log_dir);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Award {
            user,
            points,
            reason,
        } => {
            let database = db::Database::open(&config.points_db).await?;
            database.award(&user, points, &reason).await?;
            let total = database.total_points(&user).await?;
            eprintln!("Awarded {points} to {user}; total is now {total}.");
        }
        Commands::Points { user, history } => {
            let database = db::Database::open(&config.points_db).await?;
            println!("{}", database.total_points(&user).await?);
            if history {
                for award in database.list_awards(&user).await? {
                    println!(
                        "{}\t{}\t{:+}\t{}",
                        award.awarded_at, award.user_id, award.points, award.reason
                    );
                }
            }
        }
        Commands::Logout => {
            let store = FileSessionStore::new(&config.session_file);
            store.clear().await?;
            eprintln!("Session cleared ({}).", store.path().display());
        }
        Commands::Run => {
            let points = db::open_points_source(&config.points_db).await;
            let session: Rc<dyn SessionStore> = Rc::new(FileSessionStore::new(&config.session_file));

            // Loader tasks are !Send; everything runs on this thread
            let local = tokio::task::LocalSet::new();
            let result = local
                .run_until(async move {
                    let mut app =
                        App::start(session, points, config.institution.clone()).await;

                    // Init terminal
                    let mut terminal = ratatui::init();
                    let result = run_app(&mut terminal, &mut app, config.tick_rate()).await;

                    // Restore terminal
                    ratatui::restore();
                    result
                })
                .await;

            if let Err(e) = result {
                // Returning drops the log guard, which flushes this line
                tracing::error!(error = %e, "terminal loop failed");
                return Err(e);
            }
        }
    }

    if let Some(message) = log_warning {
        eprintln!("Warning: {message}");
    }

    Ok(())
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Drain input without blocking so local tasks keep running
        if event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key).await;
                }
                _ => {}
            }
            continue;
        }

        app.wait_for_update(tick).await;
    }
}

async fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.screen() {
        Screen::Login => handle_login_key(app, key).await,
        Screen::Profile => handle_profile_key(app, key).await,
        Screen::Destination => handle_destination_key(app, key),
    }
}

async fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.toggle_focus();
        }
        KeyCode::Enter => {
            app.submit_login().await;
        }
        KeyCode::Backspace => {
            app.login.focused_mut().pop();
            app.login.error = None;
        }
        KeyCode::Char(c) => {
            app.login.focused_mut().push(c);
            app.login.error = None;
        }
        _ => {}
    }
}

async fn handle_profile_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_prev();
        }
        KeyCode::Enter => {
            app.select_current().await;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            app.select_menu(index).await;
        }
        _ => {}
    }
}

fn handle_destination_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.go_back();
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.task_tab = app.task_tab.next();
        }
        _ => {}
    }
}
