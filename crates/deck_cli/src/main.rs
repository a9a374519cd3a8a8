use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use deck_core::core_api::{Catalog, CoreError, CoreErrorCode, Counter, Engine, Session};
use deck_render::{
    render_catalog, render_deck_table, render_decks_table, render_global_summary,
    render_json_deck, render_json_decks, render_json_global, render_warlord_row,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Deck file to read and write.
    #[arg(
        long,
        value_name = "DECKS.JSON",
        env = "DECK_TRACKER_FILE",
        default_value = "default_decks.json"
    )]
    file: PathBuf,
    /// Replace the built-in faction/warlord catalog.
    #[arg(long, value_name = "CATALOG.JSON", env = "DECK_TRACKER_CATALOG")]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the stats table for one deck or all of them.
    Show {
        #[arg(long, value_name = "N")]
        deck: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print totals across every deck.
    Summary {
        #[arg(long)]
        json: bool,
    },
    /// List the factions and warlords every deck tracks.
    Catalog,
    /// Add a deck with every counter at zero.
    New {
        #[arg(long)]
        name: Option<String>,
    },
    /// Rename a deck.
    Rename {
        #[arg(long, value_name = "N")]
        deck: usize,
        name: String,
    },
    /// Add one to a warlord's counter.
    Inc(CounterTarget),
    /// Take one from a warlord's counter.
    Dec(CounterTarget),
    /// Rewrite the file so every deck matches the current catalog.
    Merge,
}

#[derive(Debug, Args)]
struct CounterTarget {
    #[arg(long, value_name = "N")]
    deck: usize,
    #[arg(long)]
    faction: String,
    #[arg(long)]
    warlord: String,
    /// off_wins, off_losses, def_wins or def_losses (hyphens accepted).
    #[arg(long)]
    counter: Counter,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let engine = match &cli.catalog {
        Some(path) => Engine::with_catalog(Catalog::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading catalog {}: {e}", path.display());
            process::exit(1);
        })),
        None => Engine::new(),
    };

    if let Err(e) = run(&cli, &engine) {
        eprintln!("{e}");
        process::exit(1);
    }
}

/// A missing file is an empty working set; anything else must load cleanly.
fn open_session(engine: &Engine, path: &Path) -> Result<Session, CoreError> {
    if !path.exists() {
        log::info!("{} does not exist, starting empty", path.display());
        return Ok(engine.new_session());
    }
    engine.open_path(path).map_err(|e| {
        CoreError::new(
            e.code,
            format!("Error loading deck file: {}\n  {}", path.display(), e.message),
        )
    })
}

fn run(cli: &Cli, engine: &Engine) -> Result<(), CoreError> {
    match &cli.command {
        Command::Catalog => {
            print!("{}", render_catalog(engine.catalog()));
            Ok(())
        }
        Command::Show { deck, json } => {
            let session = open_session(engine, &cli.file)?;
            match deck {
                Some(n) => {
                    let index = deck_index(&session, *n)?;
                    let deck = &session.decks()[index];
                    if *json {
                        print_json(&render_json_deck(deck));
                    } else {
                        print!("{}", render_deck_table(deck));
                    }
                }
                None => {
                    if *json {
                        print_json(&render_json_decks(session.decks()));
                    } else {
                        print!("{}", render_decks_table(session.decks()));
                    }
                }
            }
            Ok(())
        }
        Command::Summary { json } => {
            let session = open_session(engine, &cli.file)?;
            let summary = session.global_summary();
            if *json {
                print_json(&render_json_global(&summary));
            } else {
                print!("{}", render_global_summary(&summary));
            }
            Ok(())
        }
        Command::New { name } => {
            let mut session = open_session(engine, &cli.file)?;
            let index = session.add_deck();
            if let Some(name) = name {
                session.rename_deck(index, name.clone())?;
            }
            session.save_as(&cli.file)?;
            println!(
                "Added deck {} \"{}\"; saved to {}",
                index + 1,
                session.decks()[index].name,
                cli.file.display()
            );
            Ok(())
        }
        Command::Rename { deck, name } => {
            let mut session = open_session(engine, &cli.file)?;
            let index = deck_index(&session, *deck)?;
            session.rename_deck(index, name.clone())?;
            session.save_as(&cli.file)?;
            println!("Renamed deck {deck} to \"{name}\"");
            Ok(())
        }
        Command::Inc(target) => adjust_counter(cli, engine, target, true),
        Command::Dec(target) => adjust_counter(cli, engine, target, false),
        Command::Merge => {
            let mut session = open_session(engine, &cli.file)?;
            session.save_as(&cli.file)?;
            println!(
                "Merged {} decks into {}",
                session.len(),
                cli.file.display()
            );
            Ok(())
        }
    }
}

fn adjust_counter(
    cli: &Cli,
    engine: &Engine,
    target: &CounterTarget,
    increment: bool,
) -> Result<(), CoreError> {
    let mut session = open_session(engine, &cli.file)?;
    let index = deck_index(&session, target.deck)?;
    let counter = target.counter;
    if increment {
        session.increment(index, &target.faction, &target.warlord, counter)?;
    } else {
        session.decrement(index, &target.faction, &target.warlord, counter)?;
    }
    session.save_as(&cli.file)?;

    let totals = session.warlord_totals(index, &target.faction, &target.warlord)?;
    println!(
        "{}",
        render_warlord_row(&target.faction, &target.warlord, &totals).trim_end()
    );
    Ok(())
}

/// Converts a 1-based deck number from the command line.
fn deck_index(session: &Session, n: usize) -> Result<usize, CoreError> {
    if n == 0 || n > session.len() {
        return Err(CoreError::new(
            CoreErrorCode::NotFound,
            format!("no deck {n}; file has {} decks", session.len()),
        ));
    }
    Ok(n - 1)
}

fn print_json(value: &serde_json::Value) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}
