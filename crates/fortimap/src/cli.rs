//! Clap derive structures for the `fortimap` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fortimap -- FortiOS configuration objects from the command line
#[derive(Debug, Parser)]
#[command(
    name = "fortimap",
    version,
    about = "Map FortiOS configuration objects between local JSON and the CMDB API",
    long_about = "Inspect object schemas, preview the request body a configuration\n\
        would produce for a given firmware, and read, apply, or destroy objects\n\
        on a FortiGate with a local JSON state file.",
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
    /// Device profile to use
    #[arg(long, short = 'p', env = "FORTIMAP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device address (overrides profile)
    #[arg(long, short = 'H', env = "FORTIMAP_HOST", global = true)]
    pub host: Option<String>,

    /// REST API token
    #[arg(long, env = "FORTIMAP_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Default vdom (overrides profile)
    #[arg(long, env = "FORTIMAP_VDOM", global = true)]
    pub vdom: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FORTIMAP_OUTPUT",
        default_value = "table",
        global = true
    )]
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FORTIMAP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "FORTIMAP_TIMEOUT", global = true)]
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
    /// Plain text, one value per line (scripting)
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
    /// List known object types
    #[command(alias = "ls")]
    Resources,

    /// Show the fields of an object type
    Schema(SchemaArgs),

    /// Preview the request body for a configuration (offline)
    Payload(PayloadArgs),

    /// Read one object from the device
    Read(ReadArgs),

    /// List the keys of every object in a table
    List(ListArgs),

    /// Create or update an object and record its state
    Apply(ApplyArgs),

    /// Delete an object (singletons are reset) and clear its state
    Destroy(DestroyArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Object commands ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Object type (see `fortimap resources`)
    pub resource: String,
}

#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Object type
    pub resource: String,

    /// JSON file with the desired configuration (local keys)
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// State file from a previous apply, for change tracking
    #[arg(long, short = 's')]
    pub state: Option<PathBuf>,

    /// Firmware version to gate against; omit to skip version checks
    #[arg(long)]
    pub firmware: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Object type
    pub resource: String,

    /// Key of a table object to look up
    pub key: Option<String>,

    /// Refresh this state file instead of looking up by key
    #[arg(long, short = 's', conflicts_with = "key")]
    pub state: Option<PathBuf>,

    /// Reconcile every sub-table
    #[arg(long)]
    pub all_tables: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Object type (tables only)
    pub resource: String,

    /// CMDB filter expression (e.g. `name=@hq`)
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Object type
    pub resource: String,

    /// JSON file with the desired configuration (local keys)
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// State file, created if missing
    #[arg(long, short = 's')]
    pub state: PathBuf,
}

#[derive(Debug, Args)]
pub struct DestroyArgs {
    /// Object type
    pub resource: String,

    /// State file of the object to delete
    #[arg(long, short = 's')]
    pub state: PathBuf,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration (tokens redacted)
    Show,

    /// Print the config file path
    Path,

    /// Store the API token for a profile in the system keyring (read from stdin)
    SetToken,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
