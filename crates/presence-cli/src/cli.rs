//! Command line arguments

use clap::{Parser, Subcommand};
use presence_core::PresenceStatus;

#[derive(Parser, Debug)]
#[command(name = "team-presence")]
#[command(author, version, about = "See where your team is and tell them where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        username: String,

        #[arg(long, env = "PRESENCE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the team roster
    Team {
        /// Only show members with this status (code or label); repeatable
        #[arg(long, short)]
        status: Vec<PresenceStatus>,
    },

    /// Set your own status (code or label)
    Status { status: PresenceStatus },

    /// Show the current session
    Whoami,
}
