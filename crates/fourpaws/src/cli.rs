//! Clap derive structures for the `fourpaws` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fourpaws -- command-line client for the FourPaws adoption platform
#[derive(Debug, Parser)]
#[command(
    name = "fourpaws",
    version,
    about = "Browse and manage pet adoptions from the command line",
    long_about = "A CLI for the FourPaws adoption platform.\n\n\
        Lists adoptable animals, posts and communities, and performs\n\
        the authenticated actions (register, adopt, follow, like) the\n\
        web frontend offers.",
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
    /// Backend base URL (overrides the config file)
    #[arg(long, short = 'b', env = "FOURPAWS_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FOURPAWS_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "FOURPAWS_TIMEOUT", global = true)]
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
    /// Log in, register an account, and inspect the session
    Auth(AuthArgs),

    /// Browse and manage adoptable animals
    #[command(alias = "a")]
    Animals(AnimalsArgs),

    /// Browse and follow communities
    #[command(alias = "c")]
    Communities(CommunitiesArgs),

    /// Read and write community posts
    #[command(alias = "p")]
    Posts(PostsArgs),

    /// Read and write post comments
    Comments(CommentsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in and persist the session for later commands
    Login {
        /// Username (prompted when omitted)
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "FOURPAWS_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Create a new account and log in
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Date of birth, ISO format (YYYY-MM-DD)
        #[arg(long)]
        birth_date: NaiveDate,

        /// Password (prompted when omitted)
        #[arg(long, env = "FOURPAWS_PASSWORD", hide_env = true)]
        password: Option<String>,
    },

    /// Forget the persisted session
    Logout,

    /// Show the logged-in user
    Whoami,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ANIMALS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AnimalsArgs {
    #[command(subcommand)]
    pub command: AnimalsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AnimalsCommand {
    /// List adoptable animals
    #[command(alias = "ls")]
    List(AnimalListArgs),

    /// Get one animal's details
    Get {
        /// Animal id
        id: i64,
    },

    /// Register a new animal for adoption
    Register(AnimalRegisterArgs),

    /// Mark an animal as adopted
    Adopt {
        /// Animal id
        id: i64,
    },

    /// Delete an animal record
    #[command(alias = "rm")]
    Delete {
        /// Animal id
        id: i64,
    },

    /// List animals similar to the given one
    Similar {
        /// Animal id
        id: i64,
    },
}

/// Listing filters. All gates are conjunctive; an omitted flag leaves
/// its gate inactive.
#[derive(Debug, Args)]
pub struct AnimalListArgs {
    /// Substring match over name, breed, and location
    #[arg(long, short = 'f')]
    pub query: Option<String>,

    /// Species tab
    #[arg(long, default_value = "all")]
    pub species: SpeciesFilter,

    /// Minimum age in whole years
    #[arg(long)]
    pub min_age: Option<i32>,

    /// Maximum age in whole years
    #[arg(long)]
    pub max_age: Option<i32>,

    /// Gender gate (repeatable)
    #[arg(long)]
    pub gender: Vec<GenderArg>,

    /// Size gate (repeatable)
    #[arg(long)]
    pub size: Vec<SizeArg>,

    /// Location gate, exact match (repeatable)
    #[arg(long)]
    pub location: Vec<String>,
}

#[derive(Debug, Args)]
pub struct AnimalRegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub species: SpeciesArg,

    #[arg(long)]
    pub breed: String,

    /// Free-text description, at least 10 characters
    #[arg(long)]
    pub description: String,

    /// Date of birth, ISO format (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: NaiveDate,

    #[arg(long)]
    pub gender: GenderArg,

    #[arg(long)]
    pub size: SizeArg,

    #[arg(long)]
    pub location: String,

    /// Contact phone, 6 to 15 digits with optional leading +
    #[arg(long)]
    pub phone: String,

    /// Photo to upload alongside the record
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Species tab over the listing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpeciesFilter {
    All,
    Dogs,
    Cats,
    /// Neither dog nor cat
    Others,
}

/// Species accepted on registration.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpeciesArg {
    Dog,
    Cat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SizeArg {
    Small,
    Medium,
    Large,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMMUNITIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CommunitiesArgs {
    #[command(subcommand)]
    pub command: CommunitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CommunitiesCommand {
    /// List communities
    #[command(alias = "ls")]
    List {
        /// Only communities in this category
        #[arg(long, conflicts_with = "search")]
        category: Option<String>,

        /// Server-side name search
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one community with its posts
    Get {
        /// Community id
        id: i64,

        /// Which post ordering to fetch
        #[arg(long, default_value = "recent")]
        posts: PostOrder,
    },

    /// Create a community
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        category: String,

        /// Banner image to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Follow a community
    Follow {
        /// Community id
        id: i64,
    },

    /// Unfollow a community
    Unfollow {
        /// Community id
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PostOrder {
    /// Newest first
    Recent,
    /// Most liked first
    Popular,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  POSTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// List posts, optionally narrowed to one community
    #[command(alias = "ls")]
    List {
        /// Only posts in this community
        #[arg(long)]
        community: Option<i64>,

        /// Server-side ordering (requires --community)
        #[arg(long, requires = "community")]
        order: Option<PostOrder>,
    },

    /// Get one post
    Get {
        /// Post id
        id: i64,
    },

    /// Create a post in a community
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// Community id to post in
        #[arg(long)]
        community: i64,

        /// Image to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Like a post
    Like {
        /// Post id
        id: i64,
    },

    /// Remove a like from a post
    Unlike {
        /// Post id
        id: i64,
    },

    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CommentsArgs {
    #[command(subcommand)]
    pub command: CommentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CommentsCommand {
    /// List comments, optionally narrowed to one post
    #[command(alias = "ls")]
    List {
        /// Only comments on this post, newest first
        #[arg(long)]
        post: Option<i64>,
    },

    /// Comment on a post
    Add {
        /// Post id to comment on
        #[arg(long)]
        post: i64,

        #[arg(long)]
        content: String,
    },

    /// Delete a comment
    #[command(alias = "rm")]
    Delete {
        /// Comment id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG & COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Conversions into core types ──────────────────────────────────────

impl From<SpeciesFilter> for fourpaws_core::SpeciesTab {
    fn from(value: SpeciesFilter) -> Self {
        match value {
            SpeciesFilter::All => Self::All,
            SpeciesFilter::Dogs => Self::Dogs,
            SpeciesFilter::Cats => Self::Cats,
            SpeciesFilter::Others => Self::Others,
        }
    }
}

impl From<SpeciesArg> for fourpaws_core::Species {
    fn from(value: SpeciesArg) -> Self {
        match value {
            SpeciesArg::Dog => Self::Dog,
            SpeciesArg::Cat => Self::Cat,
        }
    }
}

impl From<GenderArg> for fourpaws_core::Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
        }
    }
}

impl From<SizeArg> for fourpaws_core::Size {
    fn from(value: SizeArg) -> Self {
        match value {
            SizeArg::Small => Self::Small,
            SizeArg::Medium => Self::Medium,
            SizeArg::Large => Self::Large,
        }
    }
}

impl From<PostOrder> for fourpaws_core::PostOrdering {
    fn from(value: PostOrder) -> Self {
        match value {
            PostOrder::Recent => Self::Recent,
            PostOrder::Popular => Self::Popular,
        }
    }
}
