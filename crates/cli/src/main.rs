// menusearch CLI - headless driver for the menu search engine

mod exit_codes;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;

use menusearch_config::{RecentCommands, Settings};
use menusearch_core::{
    build, load_catalog, load_catalog_or_empty, BlinkSchedule, Catalog, CatalogKind, CommandId,
    GroupCaps, InputEvent, ItemIdentity, KeyCommand, OutputEvent, RecentlyUsed, RepeatAction,
    ResultEntry, ResultList, SearchSession,
};

use exit_codes::{EXIT_ERROR, EXIT_NOTHING_TO_REPEAT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "menusearch")]
#[command(about = "Search an application's command menu and preferences dialog")]
#[command(version)]
struct Cli {
    /// Directory holding settings.json and recent.json
    #[arg(long, global = true, env = "MENUSEARCH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG also works)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CatalogArgs {
    /// Command menu snapshot (.json or .toml)
    #[arg(long)]
    commands: PathBuf,

    /// Preferences dialog snapshot; skipped with a warning if unreadable
    #[arg(long)]
    dialog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grouped results for a query
    #[command(after_help = "\
Examples:
  menusearch search --commands menu.json --dialog prefs.json save
  menusearch search --commands menu.json --all --json line end")]
    Search {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Show every match instead of capping each group
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Query words, in any order
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Type a query, replay keys, and print what the session emits
    #[command(after_help = "\
Examples:
  menusearch keys --commands menu.json --query 'save' down enter
  menusearch keys --commands menu.json --dialog prefs.json --query line tab enter")]
    Keys {
        #[command(flatten)]
        catalogs: CatalogArgs,

        /// Text typed into the search field
        #[arg(long)]
        query: String,

        /// Keys pressed after typing
        #[arg(value_enum)]
        keys: Vec<Key>,
    },

    /// Print the most recently used command still in the menu
    Repeat {
        /// Command menu snapshot (.json or .toml)
        #[arg(long)]
        commands: PathBuf,

        /// Command id of the repeat action itself, never offered
        #[arg(long)]
        exclude: Option<u32>,
    },

    /// Forget all recently used commands
    ClearRecent,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Key {
    Down,
    Up,
    Tab,
    ShiftTab,
    Enter,
    Esc,
    More,
}

impl Key {
    fn command(self) -> KeyCommand {
        match self {
            Key::Down => KeyCommand::MoveNext,
            Key::Up => KeyCommand::MovePrevious,
            Key::Tab => KeyCommand::NextGroup,
            Key::ShiftTab => KeyCommand::PreviousGroup,
            Key::Enter => KeyCommand::Commit,
            Key::Esc => KeyCommand::Dismiss,
            Key::More => KeyCommand::ShowMore,
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = cli.config_dir.unwrap_or_else(menusearch_config::config_dir);
    let result = match cli.command {
        Commands::Search { catalogs, all, json, query } => {
            cmd_search(&config_dir, catalogs, all, json, query)
        }
        Commands::Keys { catalogs, query, keys } => cmd_keys(&config_dir, catalogs, query, keys),
        Commands::Repeat { commands, exclude } => cmd_repeat(&config_dir, commands, exclude),
        Commands::ClearRecent => cmd_clear_recent(&config_dir),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// Shared loading
// ============================================================================

fn load_settings(config_dir: &Path) -> Settings {
    if config_dir == menusearch_config::config_dir() {
        Settings::load()
    } else {
        Settings::load_from(&Settings::path_in(config_dir))
    }
}

fn default_caps(settings: &Settings) -> GroupCaps {
    GroupCaps::new(settings.max_menu_results, settings.max_preference_results)
}

fn load_commands(path: &Path) -> Result<Catalog, CliError> {
    load_catalog(path, CatalogKind::Commands).map_err(|e| {
        CliError::args(format!("cannot load command menu: {}", e))
            .with_hint("--commands expects a .json or .toml menu snapshot")
    })
}

fn load_catalogs(args: &CatalogArgs) -> Result<(Catalog, Catalog), CliError> {
    let commands = load_commands(&args.commands)?;
    let dialog = match &args.dialog {
        Some(path) => load_catalog_or_empty(path, CatalogKind::DialogControls),
        None => Catalog::new(CatalogKind::DialogControls),
    };
    log::info!(
        "{} menu items, {} preference items",
        commands.leaves().count(),
        dialog.leaves().count()
    );
    Ok((commands, dialog))
}

fn load_recent(config_dir: &Path, limit: usize) -> RecentlyUsed {
    match RecentCommands::load_from(&RecentCommands::path_in(config_dir)) {
        Some(saved) => RecentlyUsed::from_entries(saved.commands.into_iter().map(CommandId), limit),
        None => RecentlyUsed::new(limit),
    }
}

fn save_recent(config_dir: &Path, recent: &RecentlyUsed) -> Result<(), CliError> {
    let saved = RecentCommands::new(recent.entries().map(|id| id.0).collect());
    saved
        .save_to(&RecentCommands::path_in(config_dir))
        .map_err(|e| CliError::io(format!("cannot save recently used commands: {}", e)))
}

fn write_err(e: io::Error) -> CliError {
    CliError::io(e.to_string())
}

// ============================================================================
// search
// ============================================================================

fn cmd_search(
    config_dir: &Path,
    catalogs: CatalogArgs,
    all: bool,
    json: bool,
    query: Vec<String>,
) -> Result<(), CliError> {
    let settings = load_settings(config_dir);
    let (commands, dialog) = load_catalogs(&catalogs)?;
    let caps = if all { GroupCaps::unbounded() } else { default_caps(&settings) };

    let text = query.join(" ");
    let results = build(&text, &commands, &dialog, caps.commands, caps.dialog);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let doc = results_json(&text, &results);
        let rendered = serde_json::to_string_pretty(&doc).map_err(|e| CliError::io(e.to_string()))?;
        writeln!(out, "{}", rendered).map_err(write_err)?;
    } else {
        write_results(&mut out, &results).map_err(write_err)?;
    }
    Ok(())
}

fn write_results(out: &mut impl Write, results: &ResultList) -> io::Result<()> {
    for group in results.groups() {
        writeln!(out, "{} ({})", group.kind().name(), group.total_candidates())?;
        for entry in group.entries() {
            match entry.candidate().and_then(|c| c.shortcut.as_deref()) {
                Some(shortcut) => writeln!(out, "  {}\t{}", entry.display(), shortcut)?,
                None => writeln!(out, "  {}", entry.display())?,
            }
        }
    }
    Ok(())
}

fn identity_json(identity: ItemIdentity) -> serde_json::Value {
    match identity {
        ItemIdentity::Command(id) => json!({ "kind": "command", "id": id.0 }),
        ItemIdentity::DialogControl(id) => json!({ "kind": "control", "id": id.0 }),
    }
}

fn results_json(query: &str, results: &ResultList) -> serde_json::Value {
    let groups: Vec<serde_json::Value> = results
        .groups()
        .iter()
        .map(|group| {
            let entries: Vec<serde_json::Value> = group
                .entries()
                .iter()
                .map(|entry| match entry {
                    ResultEntry::Candidate(c) => json!({
                        "label": c.label,
                        "identity": identity_json(c.identity),
                        "shortcut": c.shortcut,
                        "score": c.score,
                    }),
                    ResultEntry::Overflow { hidden } => json!({ "overflow": hidden }),
                })
                .collect();
            json!({
                "name": group.kind().name(),
                "total": group.total_candidates(),
                "truncated": group.is_truncated(),
                "entries": entries,
            })
        })
        .collect();
    json!({ "query": query, "groups": groups })
}

// ============================================================================
// keys
// ============================================================================

fn cmd_keys(
    config_dir: &Path,
    catalogs: CatalogArgs,
    query: String,
    keys: Vec<Key>,
) -> Result<(), CliError> {
    let settings = load_settings(config_dir);
    let (commands, dialog) = load_catalogs(&catalogs)?;
    let mut recent = load_recent(config_dir, settings.recent_limit);
    let mut session = SearchSession::new(commands, dialog, default_caps(&settings));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut activated_command = false;

    let inputs = [InputEvent::VisibilityChanged(true), InputEvent::QueryChanged(query)]
        .into_iter()
        .chain(keys.into_iter().map(|key| InputEvent::Key(key.command())));
    for input in inputs {
        let events = session.handle(input, &mut recent);
        for event in &events {
            if let OutputEvent::Activate(ItemIdentity::Command(_)) = event {
                activated_command = true;
            }
            write_event(&mut out, &session, event, settings.blink_repeat).map_err(write_err)?;
        }
    }

    if activated_command {
        save_recent(config_dir, &recent)?;
    }
    Ok(())
}

fn label_of(session: &SearchSession, identity: ItemIdentity) -> String {
    let catalog = match identity {
        ItemIdentity::Command(_) => session.commands(),
        ItemIdentity::DialogControl(_) => session.dialog(),
    };
    catalog
        .find_leaf(identity)
        .map(|leaf| catalog.label(leaf))
        .unwrap_or_default()
}

fn write_event(
    out: &mut impl Write,
    session: &SearchSession,
    event: &OutputEvent,
    blink_repeat: u32,
) -> io::Result<()> {
    match event {
        OutputEvent::ResultsUpdated => {
            let results = session.results();
            let counts: Vec<String> = results
                .groups()
                .iter()
                .map(|g| format!("{} {}", g.kind().name(), g.len()))
                .collect();
            writeln!(out, "results: {}", counts.join(", "))
        }
        OutputEvent::SelectionChanged(Some(at)) => {
            let label = session.results().entry(*at).map(ResultEntry::display).unwrap_or("");
            writeln!(out, "select: {}", label)
        }
        OutputEvent::SelectionChanged(None) => writeln!(out, "select: none"),
        OutputEvent::Activate(identity) => {
            let label = label_of(session, *identity);
            match identity {
                ItemIdentity::Command(id) => writeln!(out, "activate command {}: {}", id.0, label),
                ItemIdentity::DialogControl(id) => {
                    writeln!(out, "activate control {}: {}", id.0, label)?;
                    // Headless: the control is always "visible" for the whole schedule
                    let mut blink = BlinkSchedule::new(blink_repeat);
                    let mut inverts = 0;
                    while !blink.is_finished() {
                        if blink.tick(true).invert {
                            inverts += 1;
                        }
                    }
                    writeln!(out, "highlight control {}: {} blinks", id.0, inverts / 2)
                }
            }
        }
        OutputEvent::ClearQuery => writeln!(out, "clear-query"),
        OutputEvent::Hide => writeln!(out, "hide"),
    }
}

// ============================================================================
// repeat / clear-recent
// ============================================================================

fn cmd_repeat(config_dir: &Path, commands: PathBuf, exclude: Option<u32>) -> Result<(), CliError> {
    let settings = load_settings(config_dir);
    let commands = load_commands(&commands)?;
    let recent = load_recent(config_dir, settings.recent_limit);

    match recent.repeat_action(&commands, exclude.map(CommandId)) {
        RepeatAction::Available { command, label } => {
            println!("{}\t{}", command.0, label);
            Ok(())
        }
        RepeatAction::Unavailable => {
            // Terminal bell, the headless stand-in for a beep
            eprint!("\x07");
            Err(CliError {
                code: EXIT_NOTHING_TO_REPEAT,
                message: "nothing to repeat".to_string(),
                hint: Some("activate a command with `menusearch keys ... enter` first".to_string()),
            })
        }
    }
}

fn cmd_clear_recent(config_dir: &Path) -> Result<(), CliError> {
    RecentCommands::clear_at(&RecentCommands::path_in(config_dir))
        .map_err(|e| CliError::io(format!("cannot clear recently used commands: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use menusearch_core::{CatalogSnapshot, ResultCap};

    fn menu() -> Catalog {
        let snapshot: CatalogSnapshot = serde_json::from_str(
            r#"{ "items": [ { "caption": "&File", "children": [
                { "caption": "&Save\tCtrl+S", "id": 41006 },
                { "caption": "Save &As...", "id": 41008 }
            ]}]}"#,
        )
        .unwrap();
        Catalog::from_snapshot(CatalogKind::Commands, &snapshot)
    }

    #[test]
    fn test_write_results_text() {
        let dialog = Catalog::new(CatalogKind::DialogControls);
        let results = build("save", &menu(), &dialog, ResultCap::limited(15), ResultCap::limited(10));
        let mut buf = Vec::new();
        write_results(&mut buf, &results).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Menu (2)\n  File > Save\tCtrl+S\n  File > Save As...\nPreferences (0)\n"
        );
    }

    #[test]
    fn test_results_json_marks_overflow() {
        let dialog = Catalog::new(CatalogKind::DialogControls);
        let results = build("save", &menu(), &dialog, ResultCap::limited(1), ResultCap::limited(1));
        let doc = results_json("save", &results);
        assert_eq!(doc["groups"][0]["truncated"], true);
        assert_eq!(doc["groups"][0]["entries"][0]["overflow"], 2);
        assert_eq!(doc["groups"][1]["total"], 0);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_str("shift-tab", false).unwrap().command(), KeyCommand::PreviousGroup);
        assert_eq!(Key::from_str("more", false).unwrap().command(), KeyCommand::ShowMore);
    }
}
