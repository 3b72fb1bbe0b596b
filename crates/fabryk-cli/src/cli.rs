//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use fabryk_acl::{AclId, NodeRef};

/// Fabryk ACL administration
#[derive(Parser, Debug)]
#[command(name = "fabryk")]
#[command(about = "Resolve which authorities can read repository nodes", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the readable authorities of one or more nodes
    Readers {
        /// ACL fixture file (JSON or TOML); overrides the config file
        #[arg(short, long)]
        fixture: Option<String>,

        /// Node references, e.g. workspace://SpacesStore/<uuid>
        #[arg(required = true)]
        nodes: Vec<NodeRef>,
    },
    /// Print the resolved inheritance chain of an ACL, root first
    Chain {
        /// ACL fixture file (JSON or TOML); overrides the config file
        #[arg(short, long)]
        fixture: Option<String>,

        /// Leaf ACL id
        acl_id: AclId,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. `acl.batch.concurrency`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value (bool, integer, float, or string)
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}
