//! Clap derive structures for the `zheye` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// zheye -- read and write column posts from the command line
#[derive(Debug, Parser)]
#[command(
    name = "zheye",
    version,
    about = "Browse columns and manage posts from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API root URL (overrides config)
    #[arg(long, short = 'u', env = "ZHEYE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Session file holding the token and cached profile
    #[arg(long, env = "ZHEYE_STORAGE_PATH", global = true)]
    pub session_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "ZHEYE_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "ZHEYE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "ZHEYE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse columns
    #[command(alias = "col", alias = "c")]
    Columns(ColumnsArgs),

    /// Read and manage posts
    #[command(alias = "p")]
    Posts(PostsArgs),

    /// Sign in and store the session token
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check whether a page route is reachable with the current session
    Route {
        /// Route path, e.g. `/create` or `/column/abc`
        path: String,
    },

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Columns ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(subcommand)]
    pub command: ColumnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ColumnsCommand {
    /// List columns, one page at a time
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Columns per page
        #[arg(long, short = 'l', default_value = "6")]
        size: u32,
    },

    /// Show a single column
    Get {
        /// Column id
        id: String,
    },

    /// List the posts of a column
    Posts {
        /// Column id
        id: String,
    },
}

// ── Posts ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// Show a post with its full content
    Get {
        /// Post id
        id: String,
    },

    /// Publish a post in your column
    Create {
        /// Post title
        #[arg(long, short = 't')]
        title: String,

        #[command(flatten)]
        body: PostBodyArgs,

        /// Column to publish in (defaults to your own)
        #[arg(long)]
        column: Option<String>,
    },

    /// Edit a post
    Update {
        /// Post id
        id: String,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        #[command(flatten)]
        body: PostBodyArgs,
    },

    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post id
        id: String,
    },
}

/// Content fields shared by create and update.
#[derive(Debug, Args)]
pub struct PostBodyArgs {
    /// Post content
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read post content from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Short summary shown in listings
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Id of a previously uploaded image
    #[arg(long)]
    pub image: Option<String>,

    /// Content is HTML rather than Markdown
    #[arg(long)]
    pub html: bool,
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted if omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password (prompted if omitted)
    #[arg(long, env = "ZHEYE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a config value
    Set {
        /// Key: base_url, timeout, insecure, ca_cert, storage_path, output, color
        key: String,
        /// New value
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
