use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use commitview::api::ApiClient;
use commitview::app::App;
use commitview::highlight::Highlighter;
use commitview::session::{self, Session};
use commitview::{input, ui};

#[derive(Parser)]
#[command(name = "commitview")]
#[command(about = "Terminal viewer for CodeShare commit batches and their diffs")]
#[command(version)]
struct Cli {
    /// Base URL of the CodeShare server
    #[arg(short, long, global = true, default_value = "http://localhost:8080")]
    server: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Commit ids to load, comma separated
    #[arg(short, long, value_delimiter = ',')]
    commits: Vec<String>,

    /// Project id shown in the header
    #[arg(short, long)]
    project: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        /// Account username
        username: String,
    },

    /// Remove the stored access token
    Logout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Some(Commands::Login { username }) => run_login(&cli.server, &username),
        Some(Commands::Logout) => run_logout(),
        None => {
            if cli.commits.is_empty() {
                bail!("no commits requested; pass --commits <ID,ID,...>");
            }
            run_view(&cli.server, cli.project, cli.commits)
        }
    }
}

fn run_view(server: &str, project: Option<String>, commits: Vec<String>) -> Result<()> {
    let Some(session) = session::load()? else {
        bail!("not logged in; run `commitview login <username>` first");
    };

    let client = ApiClient::new(server, Some(session.token));
    let mut app = App::new(client, project, commits)?;
    let highlighter = Highlighter::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = run_app(&mut terminal, &mut app, &highlighter);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.flush_pending_settings()?;
    run_result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    highlighter: &Highlighter,
) -> Result<()> {
    let poll_timeout = Duration::from_millis(120);

    loop {
        let size = terminal.size()?;
        app.update_layout(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| ui::render(frame, app, highlighter))?;

        if event::poll(poll_timeout)? {
            let next_event = event::read()?;
            if !input::handle_event(app, next_event) {
                break;
            }
        }

        app.tick();
    }

    Ok(())
}

fn run_login(server: &str, username: &str) -> Result<()> {
    let password = prompt_password(username)?;

    let client = ApiClient::new(server, None);
    let auth = client.login(username, &password)?;
    let path = session::save(&Session {
        token: auth.access_token,
    })?;

    println!("Logged in as {username}. Token stored at {}.", path.display());
    Ok(())
}

fn run_logout() -> Result<()> {
    if session::clear()? {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

// Raw-mode prompt so the password never echoes.
fn prompt_password(username: &str) -> Result<String> {
    print!("Password for {username}: ");
    io::stdout().flush().context("failed to flush prompt")?;

    enable_raw_mode()?;
    let result = read_password_keys();
    disable_raw_mode()?;
    println!();

    result
}

fn read_password_keys() -> Result<String> {
    let mut password = String::new();

    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Esc => bail!("login cancelled"),
                KeyCode::Backspace => {
                    password.pop();
                }
                KeyCode::Char(ch) => password.push(ch),
                _ => {}
            }
        }
    }

    Ok(password)
}
