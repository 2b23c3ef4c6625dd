//! keyphrase command line tool - look up, save, and complete snippets.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::prelude::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keyphrase_input::{AutocompleteField, KeyCompletions, Settings};
use keyphrase_store::{BackupRotation, PhraseStore};

/// keyphrase snippet store
#[derive(Parser)]
#[command(name = "keyphrase")]
#[command(about = "key/phrase snippet store - look up, save, and complete")]
struct Cli {
    /// Table file (defaults to the configured location)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the phrases matching all given keys
    Lookup {
        /// Keys to match (a phrase must carry every one of them)
        #[arg(required = true)]
        keys: Vec<String>,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Save a phrase under the given keys.
    ///
    /// With no --key arguments the phrase is deleted from the table.
    Save {
        phrase: String,

        /// A key for the phrase; repeat for several keys
        #[arg(short, long = "key")]
        keys: Vec<String>,
    },

    /// Print the keys saved for an exact phrase
    Keys { phrase: String },

    /// Print the keys completing a partial key (case-insensitive)
    Complete {
        partial: String,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the phrases starting with a prefix (case-sensitive)
    Phrases { partial: String },

    /// Replay text through a key field and show each completion step
    Suggest { text: String },

    /// Run the rotating daily/weekly/monthly/yearly backups
    Backup,

    /// Fill the table with random entries from a word list (for testing)
    Gen {
        /// Number of entries to generate
        #[arg(long, default_value_t = 500)]
        size: usize,

        /// Word list file, one word per line
        #[arg(long, default_value = "/usr/share/dict/words")]
        words: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keyphrase=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = Settings::load()?;
    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => settings
            .db_path()
            .context("could not determine a data directory; pass --db")?,
    };
    debug!("table file: {:?}", db_path);
    let mut store = PhraseStore::load(&db_path)
        .with_context(|| format!("failed to load table {}", db_path.display()))?;

    match cli.command {
        Commands::Lookup { keys, json } => run_lookup(&store, &keys, json)?,
        Commands::Save { phrase, keys } => run_save(&mut store, &keys, &phrase),
        Commands::Keys { phrase } => {
            let keys = store.saved_keys(&phrase);
            if keys.is_empty() {
                println!("no keys saved for that phrase");
            } else {
                println!("{}", keys.join(" "));
            }
        }
        Commands::Complete { partial, json } => {
            let keys = store.valid_keys(&partial);
            print_list(&keys, json, "no key completes that input")?;
        }
        Commands::Phrases { partial } => {
            let phrases = store.valid_phrases(&partial);
            print_list(&phrases, false, "no phrase starts with that input")?;
        }
        Commands::Suggest { text } => run_suggest(&store, &text),
        Commands::Backup => run_backup(&settings, &mut store)?,
        Commands::Gen { size, words } => run_gen(&mut store, size, &words)?,
    }

    if store.is_dirty() {
        store.save()?;
    }
    Ok(())
}

fn print_list(items: &[String], json: bool, empty_message: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else if items.is_empty() {
        println!("{empty_message}");
    } else {
        for item in items {
            println!("{item}");
        }
    }
    Ok(())
}

fn run_lookup(store: &PhraseStore, keys: &[String], json: bool) -> Result<()> {
    match store.phrase_list(keys) {
        Some(phrases) if !phrases.is_empty() => print_list(&phrases, json, "")?,
        _ if json => println!("[]"),
        _ => println!("no phrase matches those keys"),
    }
    Ok(())
}

fn run_save(store: &mut PhraseStore, keys: &[String], phrase: &str) {
    if phrase.is_empty() {
        println!("refusing to save an empty phrase");
        return;
    }
    let existed = !store.saved_keys(phrase).is_empty();
    store.save_entry(keys, phrase);
    if keys.is_empty() {
        if existed {
            println!("deleted the phrase");
        } else {
            println!("nothing to delete");
        }
    } else {
        println!("saved under: {}", keys.join(" "));
    }
}

/// Feed `text` to a key field one character at a time, echoing each
/// keystroke the way a text widget would, and print what the user would
/// see at every step.
fn run_suggest(store: &PhraseStore, text: &str) {
    let mut field = AutocompleteField::key_field();
    let source = KeyCompletions(store);
    println!("{:<7} {:<24} {:<16} {}", "typed", "committed", "pending", "display");
    for ch in text.chars() {
        let caret = field.committed_cursor();
        let mut display = field.render().text().to_string();
        let byte = display
            .char_indices()
            .nth(caret)
            .map(|(i, _)| i)
            .unwrap_or(display.len());
        display.insert(byte, ch);
        field.handle_input(&source, &display, caret + 1);
        println!(
            "{:<7} {:<24} {:<16} {}",
            ch,
            field.committed_text(),
            field.suggestion_tail(),
            field.render().text()
        );
    }
    if field.has_suggestion() {
        let completed = field.render().text().to_string();
        println!("Tab would accept: {completed}");
    }
}

fn run_backup(settings: &Settings, store: &mut PhraseStore) -> Result<()> {
    if !settings.backup.enabled {
        println!("backups are disabled in the configuration");
        return Ok(());
    }
    let dir = Settings::backup_dir().context("could not determine a backup directory")?;
    // Flush pending changes so the copies are current
    if store.is_dirty() {
        store.save()?;
    }
    let mut rotation = BackupRotation::open(&dir)?;
    let ran = rotation.run(store.path(), chrono::Local::now().date_naive())?;
    if ran.is_empty() {
        println!("all backups are current");
    } else {
        for tier in ran {
            println!("{:?} backup: {}", tier, dir.join(tier.file_name()).display());
        }
    }
    Ok(())
}

fn run_gen(store: &mut PhraseStore, size: usize, words: &Path) -> Result<()> {
    let content = std::fs::read_to_string(words)
        .with_context(|| format!("failed to read word list {}", words.display()))?;
    let words: Vec<&str> = content.lines().filter(|line| !line.is_empty()).collect();
    anyhow::ensure!(!words.is_empty(), "word list is empty");

    let mut rng = rand::thread_rng();
    for i in 0..size {
        let keys = pick_words(&mut rng, &words, 1, 3);
        let phrase = pick_words(&mut rng, &words, 8, 30).join(" ");
        store.save_entry(&keys, &phrase);
        debug!("generated entry {} of {}", i + 1, size);
    }
    println!("generated {} entries ({} phrases total)", size, store.table().len());
    Ok(())
}

fn pick_words(rng: &mut impl Rng, words: &[&str], min: usize, max: usize) -> Vec<String> {
    let count = rng.gen_range(min..=max);
    (0..count)
        .map(|_| words.choose(rng).unwrap().to_string())
        .collect()
}
