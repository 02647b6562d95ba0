//! Clap derive structures for the `aciops` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Scope and toggle arguments stay raw strings here; the core validates
//! them before anything reaches the controller.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// aciops -- locate and provision Cisco ACI fabric objects
#[derive(Debug, Parser)]
#[command(
    name = "aciops",
    version,
    about = "Resolve and provision Cisco ACI fabric objects from the command line",
    long_about = "Look up where endpoints live, which bridge domain serves a gateway,\n\
        and how healthy each pod is. Create tenants, VRFs, bridge domains,\n\
        application profiles, EPGs and subnets without duplicating what exists.",
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
    /// Controller profile to use
    #[arg(long, short = 'p', env = "ACIOPS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// APIC URL (overrides profile)
    #[arg(long, short = 'c', env = "ACIOPS_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Login user (overrides profile)
    #[arg(long, short = 'u', env = "ACIOPS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ACIOPS_OUTPUT",
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
    #[arg(long, short = 'k', env = "ACIOPS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ACIOPS_TIMEOUT", global = true)]
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
    /// Locate an endpoint by MAC or IPv4 address
    #[command(alias = "ep")]
    Endpoint(EndpointArgs),

    /// Find the bridge domain serving a gateway address
    #[command(alias = "gw")]
    Gateway(GatewayArgs),

    /// List every subnet gateway configured in the fabric
    Gateways,

    /// Summarise pod health and registered nodes
    Health(HealthArgs),

    /// List tenants, VRFs, bridge domains, app profiles, EPGs or subnets
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a fabric object unless it already exists
    Create(CreateArgs),

    /// Set the routing scope of a bridge domain subnet
    Scope(ScopeArgs),

    /// Enable or disable unicast routing on a bridge domain
    Unicast(UnicastArgs),

    /// Associate a VRF with a bridge domain
    VrfBd(VrfBdArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESOLVERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EndpointArgs {
    /// MAC (e.g. 00:50:56:AA:BB:CC) or IPv4 address
    pub address: String,

    /// Skip the lookup of the reverse address
    #[arg(long)]
    pub no_reverse: bool,
}

#[derive(Debug, Args)]
pub struct GatewayArgs {
    /// Part of the gateway address, e.g. "10.1.20"
    #[arg(default_value = "")]
    pub fragment: String,
}

#[derive(Debug, Args)]
pub struct HealthArgs {
    /// Highest pod number to probe (overrides profile)
    #[arg(long)]
    pub max_pods: Option<u8>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATALOG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommand,
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Tenants in the fabric
    Tenants,

    /// VRFs in a tenant
    Vrfs {
        #[arg(long, short = 't')]
        tenant: String,
    },

    /// Bridge domains in a tenant
    #[command(alias = "bridge-domains")]
    Bds {
        #[arg(long, short = 't')]
        tenant: String,
    },

    /// Application profiles in a tenant
    Apps {
        #[arg(long, short = 't')]
        tenant: String,
    },

    /// EPGs in an application profile
    Epgs {
        #[arg(long, short = 't')]
        tenant: String,

        #[arg(long, short = 'a')]
        app: String,
    },

    /// Subnets on a bridge domain
    Subnets {
        #[arg(long, short = 't')]
        tenant: String,

        #[arg(long, short = 'b')]
        bd: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MUTATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(subcommand)]
    pub command: CreateCommand,
}

#[derive(Debug, Subcommand)]
pub enum CreateCommand {
    /// Create a tenant
    Tenant {
        /// Tenant name
        name: String,
    },

    /// Create a VRF in a tenant
    Vrf {
        #[arg(long, short = 't')]
        tenant: String,

        /// VRF name
        name: String,
    },

    /// Create a layer-2 bridge domain
    BdL2 {
        #[arg(long, short = 't')]
        tenant: String,

        /// Bridge domain name
        name: String,
    },

    /// Create a bridge domain with its first subnet
    BdL3 {
        #[arg(long, short = 't')]
        tenant: String,

        /// Bridge domain name
        name: String,

        /// Gateway address with mask, e.g. 10.1.20.1/24
        #[arg(long)]
        subnet: String,

        /// Comma-separated subset of private, public, shared
        #[arg(long, default_value = "private")]
        scope: String,
    },

    /// Create an application profile
    App {
        #[arg(long, short = 't')]
        tenant: String,

        /// Application profile name
        name: String,
    },

    /// Create an EPG under an application profile
    Epg {
        #[arg(long, short = 't')]
        tenant: String,

        #[arg(long, short = 'a')]
        app: String,

        /// EPG name
        name: String,
    },

    /// Add a subnet to an existing bridge domain
    Subnet {
        #[arg(long, short = 't')]
        tenant: String,

        #[arg(long, short = 'b')]
        bd: String,

        /// Gateway address with mask, e.g. 10.1.30.1/24
        ip: String,

        /// Comma-separated subset of private, public, shared
        #[arg(long, default_value = "private")]
        scope: String,
    },
}

#[derive(Debug, Args)]
pub struct ScopeArgs {
    #[arg(long, short = 't')]
    pub tenant: String,

    #[arg(long, short = 'b')]
    pub bd: String,

    /// Subnet gateway with mask, e.g. 10.1.20.1/24
    pub subnet: String,

    /// Comma-separated subset of private, public, shared
    pub scope: String,
}

#[derive(Debug, Args)]
pub struct UnicastArgs {
    #[arg(long, short = 't')]
    pub tenant: String,

    #[arg(long, short = 'b')]
    pub bd: String,

    /// yes or no
    pub enable: String,
}

#[derive(Debug, Args)]
pub struct VrfBdArgs {
    #[arg(long, short = 't')]
    pub tenant: String,

    #[arg(long, short = 'b')]
    pub bd: String,

    /// VRF name
    pub vrf: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key (controller, username, ca_cert, insecure, timeout, max_pods)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
