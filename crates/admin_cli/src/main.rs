use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "holocron_admin")]
#[command(about = "Admin utilities for Holocron (bootstrap and inspect users)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./holocron.db?mode=rwc"
    )]
    database_url: String,

    /// Token secret of the server, so the engine can be built with the same keys.
    #[arg(long, env = "HOLOCRON__AUTH__SECRET", hide_env_values = true)]
    token_secret: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user; the password is prompted for twice.
    Create(UserCreateArgs),
    /// List every user.
    List,
    /// Show the favorites of a user.
    Favorites(UserFavoritesArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct UserFavoritesArgs {
    #[arg(long)]
    id: i32,
}

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Keeps the terminal in raw mode while a secret is typed.
struct RawMode;

impl RawMode {
    fn enter() -> CliResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Prints `line` on a cleared row of stderr.
fn notice(out: &mut impl Write, line: &str) -> CliResult<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(line)
    )?;
    out.flush()?;
    Ok(())
}

/// Reads a line from the terminal, echoing `*` for each character.
fn read_secret(label: &str) -> CliResult<String> {
    let _raw = RawMode::enter()?;
    let mut out = std::io::stderr();
    notice(&mut out, label)?;

    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);

        match code {
            KeyCode::Enter => break,
            KeyCode::Char('c') if ctrl => {
                execute!(out, Print("\r\n"))?;
                return Err("interrupted".into());
            }
            KeyCode::Backspace if secret.pop().is_some() => {
                execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
            }
            KeyCode::Char(ch) if !ctrl => {
                secret.push(ch);
                execute!(out, Print("*"))?;
            }
            _ => continue,
        }
        out.flush()?;
    }

    execute!(out, Print("\r\n"))?;
    out.flush()?;
    Ok(secret)
}

/// Asks for the new user's password until two entries match.
fn read_new_password() -> CliResult<String> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let first = read_secret("Password: ")?;
        if first.trim().is_empty() {
            notice(&mut out, "Password must not be blank.\r\n")?;
            continue;
        }

        if read_secret("Confirm password: ")? == first {
            return Ok(first);
        }
        notice(&mut out, "Passwords do not match. Try again.\r\n")?;
    }

    Err("too many attempts".into())
}

async fn connect_db(database_url: &str) -> CliResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .token_secret(cli.token_secret)
        .build()
        .await?;

    let Command::User(User { command }) = cli.command;
    match command {
        UserCommand::Create(args) => {
            let password = read_new_password()?;

            match engine.register(Some(&args.email), Some(&password)).await {
                Ok(id) => println!("created user: {} ({id})", args.email),
                Err(EngineError::Conflict(_)) => {
                    eprintln!("user already exists: {}", args.email);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        UserCommand::List => {
            for user in engine.users().await? {
                let state = if user.is_active { "active" } else { "inactive" };
                println!("{}\t{}\t{state}", user.id, user.email);
            }
        }
        UserCommand::Favorites(args) => {
            let favorites = match engine.user_favorites(args.id).await {
                Ok(favorites) => favorites,
                Err(EngineError::NotFound(msg)) => {
                    eprintln!("{msg}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };

            for person in favorites.people {
                println!("person\t{}\t{}", person.id, person.name);
            }
            for planet in favorites.planets {
                println!("planet\t{}\t{}", planet.id, planet.name);
            }
            for vehicle in favorites.vehicles {
                println!("vehicle\t{}\t{}", vehicle.id, vehicle.name);
            }
        }
    }

    Ok(())
}
