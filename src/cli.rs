use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::size::SizeFormat;

mod commands {
    pub(crate) mod config_command;
    pub(crate) mod watch_command;
}

use commands::watch_command::WatchOptions;

#[derive(Parser)]
#[command(name = "duwatch")]
#[command(version)]
#[command(about = "Watch a running disk-usage scan live from the terminal")]
#[command(long_about = "duwatch connects to the progress stream of a running disk-usage scanner, \
    shows live item and size counters while it scans, and a summary once it is done. \
    Lost connections are retried forever.\n\n\
    Examples:\n  \
    duwatch                                  # Watch ws://localhost:8888/ws in the terminal UI\n  \
    duwatch watch --url ws://nas:8888/ws     # Watch another scanner\n  \
    duwatch watch --plain --once             # Print progress lines, exit when done\n  \
    duwatch config --init                    # Write a default config file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to the scanner and show its progress (default)
    #[command(visible_alias = "w")]
    Watch {
        /// WebSocket URL of the scanner's progress stream
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Print progress lines instead of the full-screen UI
        #[arg(long)]
        plain: bool,

        /// Exit as soon as the scan reports it is done (plain mode)
        #[arg(long, requires = "plain")]
        once: bool,

        /// Wait between reconnect attempts, in milliseconds
        #[arg(long, value_name = "MS")]
        reconnect_delay: Option<u64>,

        /// How to print byte sizes
        #[arg(long, value_enum, value_name = "FORMAT")]
        size_format: Option<SizeFormat>,
    },

    /// Show or create the configuration file
    Config {
        /// Write a config file with default values
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Commands::Watch {
            url: None,
            plain: false,
            once: false,
            reconnect_delay: None,
            size_format: None,
        });

        match command {
            Commands::Watch {
                url,
                plain,
                once,
                reconnect_delay,
                size_format,
            } => commands::watch_command::handle_watch(WatchOptions {
                url,
                plain,
                once,
                reconnect_delay_ms: reconnect_delay,
                size_format,
                config: self.config,
                verbose: self.verbose,
                quiet: self.quiet,
            }),
            Commands::Config { init } => {
                commands::config_command::handle_config(init, self.config.as_deref())
            }
        }
    }
}
