//! Dispatch from parsed arguments to the API, and from results to the terminal.
//!
//! Handlers follow one shape: build inputs, call a single `AdinsightApi` method, render
//! what came back. Anything that touches the disk besides the data directory (payload
//! files, draft files, backups to restore) happens here and nowhere in the library.

use super::render::{
    print_messages, render_entry_list, render_full_entries, render_options, render_settings,
    render_templates,
};
use super::setup::{
    Cli, Commands, DataCommands, EntryCommands, MiscCommands, SettingsCommands,
    TemplateCommands,
};
use adinsightapp::analyzer::analyzer_for;
use adinsightapp::api::AdinsightApi;
use adinsightapp::attributes::suggestions;
use adinsightapp::commands::settings::SettingsAction;
use adinsightapp::commands::templates::TemplateAction;
use adinsightapp::commands::Payload;
use adinsightapp::config::AdinsightConfig;
use adinsightapp::draft::EntryDraft;
use adinsightapp::store::fs::FsStore;
use adinsightapp::timer::{format_hms, Stopwatch};
use anyhow::{anyhow, bail, Context, Result};
use console::Term;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

struct AppContext {
    api: AdinsightApi<FsStore>,
    config: AdinsightConfig,
}

/// Field overrides for `create`, on top of the default or loaded draft.
struct CreateArgs {
    name: Vec<String>,
    genre: Option<String>,
    duration: Option<String>,
    notes: Option<String>,
    groups: Vec<String>,
    game_times: Vec<String>,
    attrs: Vec<String>,
    draft: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Misc(MiscCommands::Timer)) = &cli.command {
        return handle_timer();
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Entry(cmd)) => match cmd {
            EntryCommands::Create {
                name,
                genre,
                duration,
                notes,
                groups,
                game_times,
                attrs,
                draft,
            } => handle_create(
                &mut ctx,
                CreateArgs {
                    name,
                    genre,
                    duration,
                    notes,
                    groups,
                    game_times,
                    attrs,
                    draft,
                },
            ),
            EntryCommands::List => handle_list(&ctx),
            EntryCommands::View { indexes } => handle_view(&ctx, &indexes),
            EntryCommands::Copy { index, output } => handle_copy(&ctx, &index, output),
            EntryCommands::Delete { indexes } => handle_delete(&mut ctx, &indexes),
            EntryCommands::Clear { yes } => handle_clear(&mut ctx, yes),
            EntryCommands::Analyze { index } => handle_analyze(&ctx, &index),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Export { indexes, output } => handle_export(&mut ctx, &indexes, &output),
            DataCommands::Backup { output } => handle_backup(&ctx, &output),
            DataCommands::Restore { file, yes } => handle_restore(&mut ctx, &file, yes),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Templates { action } => handle_templates(&mut ctx, action),
            MiscCommands::Settings { action } => handle_settings(&mut ctx, action),
            MiscCommands::Timer => handle_timer(),
        },
        None => handle_list(&ctx),
    }
}

fn load_config(cli: &Cli) -> Result<AdinsightConfig> {
    if let Some(path) = &cli.config {
        return AdinsightConfig::load_from(path)
            .with_context(|| format!("Could not load config {}", path.display()));
    }
    Ok(AdinsightConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable config, using defaults");
        AdinsightConfig::default()
    }))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = load_config(cli)?;
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    debug!(data_dir = %data_dir.display(), "Opening store");

    let api = AdinsightApi::new(FsStore::new(data_dir), config.projection_options());
    Ok(AppContext { api, config })
}

/// Splits an optional 1-based `N:` module prefix off a flag value.
///
/// Values without a numeric prefix go to the first module.
fn split_group_prefix(raw: &str) -> Result<(usize, &str)> {
    if let Some((n, rest)) = raw.split_once(':') {
        if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) {
            let n: usize = n.parse().map_err(|_| anyhow!("Bad module number in {}", raw))?;
            if n == 0 {
                bail!("Module numbers start at 1: {}", raw);
            }
            return Ok((n - 1, rest));
        }
    }
    Ok((0, raw))
}

fn build_draft(args: CreateArgs) -> Result<EntryDraft> {
    let mut draft = match &args.draft {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Could not read draft {}", path.display()))?;
            serde_json::from_str::<EntryDraft>(&raw)
                .with_context(|| format!("Invalid draft {}", path.display()))?
        }
        None => EntryDraft::new(),
    };

    if !args.name.is_empty() {
        draft.game_name = args.name.join(" ");
    }
    if let Some(genre) = args.genre {
        draft.genre = genre;
    }
    if let Some(duration) = args.duration {
        draft.duration = duration;
    }
    if let Some(notes) = args.notes {
        draft.notes = notes;
    }

    for name in &args.groups {
        draft.add_group();
        let last = draft.ad_groups.len() - 1;
        draft.rename_group(last, name);
    }

    for raw in &args.game_times {
        let (group, value) = split_group_prefix(raw)?;
        if !draft.set_game_time(group, Some(value.to_string())) {
            bail!("No ad module {} for --game-time {}", group + 1, raw);
        }
    }

    for raw in &args.attrs {
        let (group, pair) = split_group_prefix(raw)?;
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected KEY=VALUE, got {}", raw))?;
        if key.trim().is_empty() {
            bail!("Attribute key is empty in {}", raw);
        }
        if !draft.upsert_attribute(group, key, value) {
            bail!("No ad module {} for --attr {}", group + 1, raw);
        }
    }

    Ok(draft)
}

fn handle_create(ctx: &mut AppContext, args: CreateArgs) -> Result<()> {
    let draft = build_draft(args)?;
    let result = ctx.api.create_entry(&draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_entries();
    print!("{}", render_entry_list(&result.listed_entries));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, indexes: &[String]) -> Result<()> {
    let result = ctx.api.view_entries(indexes)?;
    print!("{}", render_full_entries(&result.listed_entries));
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &AppContext, index: &str, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.copy_entry(index)?;
    let draft = result
        .draft
        .as_ref()
        .ok_or_else(|| anyhow!("Entry {} produced no draft", index))?;
    let json = serde_json::to_string_pretty(draft)?;

    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Could not write draft {}", path.display()))?;
            print_messages(&result.messages);
            println!("Draft written to {}", path.display());
        }
        // Stdout carries only the draft so it can be piped into a file.
        None => println!("{}", json),
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, indexes: &[String]) -> Result<()> {
    let result = ctx.api.delete_entries(indexes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let count = ctx.api.state().entries.len();
    if !yes && count > 0 {
        println!(
            "This deletes all {} entries. Run again with --yes to confirm.",
            count
        );
        return Ok(());
    }
    let result = ctx.api.clear_entries();
    print_messages(&result.messages);
    Ok(())
}

fn handle_analyze(ctx: &AppContext, index: &str) -> Result<()> {
    let analyzer = analyzer_for(ctx.config.analyzer_config());
    let result = ctx.api.analyze(index, analyzer.as_ref())?;
    if let Some(text) = &result.analysis {
        println!("{}", text);
    }
    print_messages(&result.messages);
    Ok(())
}

fn write_payload(dir: &Path, payload: &Payload) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Could not create {}", dir.display()))?;
    let path = dir.join(&payload.filename);
    fs::write(&path, &payload.bytes)
        .with_context(|| format!("Could not write {}", path.display()))?;
    Ok(path)
}

fn handle_export(ctx: &mut AppContext, indexes: &[String], output: &Path) -> Result<()> {
    let result = if indexes.is_empty() {
        ctx.api.export()?
    } else {
        ctx.api.export_entries(indexes)?
    };
    print_messages(&result.messages);
    if let Some(payload) = &result.payload {
        let path = write_payload(output, payload)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_backup(ctx: &AppContext, output: &Path) -> Result<()> {
    let result = ctx.api.backup();
    print_messages(&result.messages);
    if let Some(payload) = &result.payload {
        let path = write_payload(output, payload)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, file: &Path, yes: bool) -> Result<()> {
    let bytes =
        fs::read(file).with_context(|| format!("Could not read backup {}", file.display()))?;
    let (restore, preview) = ctx.api.preview_restore(&bytes)?;
    print_messages(&preview.messages);

    if !yes {
        println!("Run again with --yes to restore.");
        return Ok(());
    }
    let result = ctx.api.restore(&restore);
    print_messages(&result.messages);
    Ok(())
}

fn handle_templates(ctx: &mut AppContext, action: Option<TemplateCommands>) -> Result<()> {
    let action = match action.unwrap_or(TemplateCommands::List) {
        TemplateCommands::List => {
            let result = ctx.api.list_templates();
            if let Some(templates) = &result.templates {
                print!("{}", render_templates(templates));
            }
            return Ok(());
        }
        TemplateCommands::Options { key } => {
            let options = suggestions(&key, &ctx.api.state().templates);
            print!("{}", render_options(&key, &options));
            return Ok(());
        }
        TemplateCommands::AddKey { key } => TemplateAction::AddKey(key),
        TemplateCommands::RemoveKey { key } => TemplateAction::RemoveKey(key),
        TemplateCommands::Add { key, value } => TemplateAction::AddValue { key, value },
        TemplateCommands::Remove { key, value } => TemplateAction::RemoveValue { key, value },
    };

    let result = ctx.api.edit_templates(&action);
    print_messages(&result.messages);
    Ok(())
}

fn handle_settings(ctx: &mut AppContext, action: Option<SettingsCommands>) -> Result<()> {
    let action = match action.unwrap_or(SettingsCommands::Show) {
        SettingsCommands::Show => SettingsAction::Show,
        SettingsCommands::AutoSave { enabled } => SettingsAction::AutoSave(enabled),
        SettingsCommands::FileName { name } => SettingsAction::FileName(name),
    };

    let result = ctx.api.settings(&action);
    if let Some(settings) = &result.settings {
        print!("{}", render_settings(settings));
    }
    print_messages(&result.messages);
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Interactive stopwatch. Prints the final `HH:MM:SS` for use with `create --duration`.
fn handle_timer() -> Result<()> {
    let input = spawn_stdin_reader();
    let term = Term::stdout();
    let mut watch = Stopwatch::new();
    watch.start(Instant::now());

    println!("Enter: pause/resume  r: reset  q: quit");
    loop {
        let now = Instant::now();
        let status = if watch.is_running() { "running" } else { "paused" };
        if term.is_term() {
            term.clear_line()?;
            print!("{}  {}", format_hms(watch.elapsed_secs(now)), status);
            io::stdout().flush()?;
        }

        match input.recv_timeout(Duration::from_secs(1)) {
            Ok(line) => match line.trim() {
                "q" => break,
                "r" => watch.reset(),
                _ => watch.toggle(Instant::now()),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if term.is_term() {
        println!();
    }
    println!("{}", format_hms(watch.elapsed_secs(Instant::now())));
    Ok(())
}
