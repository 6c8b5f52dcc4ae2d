use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adinsight", bin_name = "adinsight", version)]
#[command(
    about = "Record mobile-game ad monetization tests and export them to spreadsheets",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the saved data (overrides config and ADINSIGHT_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to load instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Entry(EntryCommands),

    #[command(flatten)]
    Data(DataCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record a new test entry
    #[command(alias = "n", display_order = 1)]
    Create {
        /// Game name words (joined with spaces)
        name: Vec<String>,

        /// Game genre
        #[arg(long)]
        genre: Option<String>,

        /// Play duration, e.g. 00:25:10 (see `adinsight timer`)
        #[arg(long)]
        duration: Option<String>,

        /// Free-form feedback
        #[arg(long)]
        notes: Option<String>,

        /// Add another ad module after the default one
        #[arg(long = "group", value_name = "NAME")]
        groups: Vec<String>,

        /// Game-time node, optionally for module N: [N:]VALUE
        #[arg(long = "game-time", value_name = "[N:]VALUE")]
        game_times: Vec<String>,

        /// Attribute value, optionally for module N: [N:]KEY=VALUE
        #[arg(long = "attr", value_name = "[N:]KEY=VALUE")]
        attrs: Vec<String>,

        /// Start from a draft JSON file (as written by `copy -o`)
        #[arg(long, value_name = "FILE")]
        draft: Option<PathBuf>,
    },

    /// List entries, newest first
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Show entries in full
    #[command(alias = "v", display_order = 3)]
    View {
        /// Indexes of the entries (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Copy an entry into a new draft
    #[command(display_order = 4)]
    Copy {
        /// Index of the entry
        index: String,

        /// Write the draft to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Delete entries
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Indexes of the entries (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Delete every entry
    #[command(display_order = 6)]
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Ask the analyzer for a monetization strategy summary
    #[command(display_order = 7)]
    Analyze {
        /// Index of the entry
        index: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Export entries to an xlsx spreadsheet
    #[command(display_order = 20)]
    Export {
        /// Indexes of the entries (e.g. 1 2-3) - if omitted, exports everything
        #[arg(required = false, num_args = 0..)]
        indexes: Vec<String>,

        /// Directory to write the spreadsheet into
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Write a full JSON backup
    #[command(display_order = 21)]
    Backup {
        /// Directory to write the backup into
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Replace all data with a backup
    #[command(display_order = 22)]
    Restore {
        /// Backup file
        file: PathBuf,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Manage saved attribute values
    #[command(alias = "tpl", display_order = 30)]
    Templates {
        #[command(subcommand)]
        action: Option<TemplateCommands>,
    },

    /// Show or change settings
    #[command(display_order = 31)]
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommands>,
    },

    /// Run a session stopwatch (Enter toggles, r resets, q quits)
    #[command(display_order = 32)]
    Timer,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List saved keys and values
    List,

    /// Add a key with no values
    AddKey { key: String },

    /// Remove a key and all its values
    RemoveKey { key: String },

    /// Save a value under a key
    Add { key: String, value: String },

    /// Remove one saved value
    Remove { key: String, value: String },

    /// Show the values offered for a key (built-in presets, then saved values)
    Options { key: String },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the current settings
    Show,

    /// Turn auto-save on or off
    AutoSave {
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Set the export file name prefix (empty restores the default)
    FileName { name: String },
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("expected on or off, got {}", other)),
    }
}
