//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use plants_persistence::Backend;

/// 30Plants - track the plants you eat each week
#[derive(Parser, Debug)]
#[command(name = "plants")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "PLANTS_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, env = "PLANTS_BACKEND", global = true)]
    pub backend: Option<BackendArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8787)]
        port: u16,
    },

    /// List all lists, newest first
    Lists {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one list with its items (the latest list if omitted)
    Show {
        /// List ID
        list: Option<String>,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the most recently created list
    Latest {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a list (titled after the current week if no title is given)
    NewList {
        /// List title
        title: Option<String>,
    },

    /// Rename a list
    Rename {
        /// List ID
        list: String,

        /// New title
        title: String,
    },

    /// Add an item to a list
    Add {
        /// List ID
        list: String,

        /// Item content
        content: String,
    },

    /// Add a collection's items to a list, or the text itself if no
    /// collection has that title
    Apply {
        /// List ID
        list: String,

        /// Collection title or item content
        text: String,
    },

    /// Delete a list and all its items
    DeleteList {
        /// List ID
        list: String,
    },

    /// Delete one item from a list
    DeleteItem {
        /// List ID
        list: String,

        /// Item ID
        item: String,
    },

    /// List all collections
    Collections {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a collection
    NewCollection {
        /// Collection title
        title: String,
    },

    /// Rename a collection
    RenameCollection {
        /// Collection ID
        collection: String,

        /// New title
        title: String,
    },

    /// Add an item to a collection
    AddToCollection {
        /// Collection ID
        collection: String,

        /// Item content
        content: String,
    },

    /// Delete one item from a collection
    DeleteCollectionItem {
        /// Collection ID
        collection: String,

        /// Item ID
        item: String,
    },

    /// Collections whose title contains the given text
    Suggest {
        /// Text to match
        text: String,
    },

    /// Write every list and collection as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with a previously exported file
    Import {
        /// Exported JSON file
        #[arg(required = true)]
        file: PathBuf,
    },
}

impl Commands {
    /// Short description of what the command does, used in failure messages.
    pub fn action(&self) -> &'static str {
        match self {
            Commands::Serve { .. } => "start the server",
            Commands::Lists { .. } => "load lists",
            Commands::Show { .. } | Commands::Latest { .. } => "load list",
            Commands::NewList { .. } => "create list",
            Commands::Rename { .. } => "rename list",
            Commands::Add { .. } => "add item",
            Commands::Apply { .. } => "apply collection",
            Commands::DeleteList { .. } => "delete list",
            Commands::DeleteItem { .. } => "delete item",
            Commands::Collections { .. } => "load collections",
            Commands::NewCollection { .. } => "create collection",
            Commands::RenameCollection { .. } => "rename collection",
            Commands::AddToCollection { .. } => "add collection item",
            Commands::DeleteCollectionItem { .. } => "delete collection item",
            Commands::Suggest { .. } => "load suggestions",
            Commands::Export { .. } => "export data",
            Commands::Import { .. } => "import data",
        }
    }
}

/// Output format for read commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Storage backend selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    #[value(alias = "local")]
    Json,
    #[value(aliases = ["sql", "db"])]
    Sqlite,
    #[value(alias = "mem")]
    Memory,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Json => Backend::Json,
            BackendArg::Sqlite => Backend::Sqlite,
            BackendArg::Memory => Backend::Memory,
        }
    }
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(plants_core::config::state_dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
