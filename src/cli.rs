//! Command-line definition.
//!
//! Lives in the library so `xtask` can render man pages from it.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use crate::api::VideoId;

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("SUBSEEK_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("SUBSEEK_BUILD_DATE"),
    ")"
);

#[derive(Debug, Parser)]
#[command(name = "subseek")]
#[command(about = "Search video subtitles and jump playback to the matching line")]
#[command(version = VERSION)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m
  subseek videos                         List videos on the server
  subseek search 3 \"good morning\"        Find a line in video 3
  subseek play 3 --search \"good morning\" Jump to the first match
  subseek play 3 --at 00:01:02,500       Jump to a position
  subseek parse 1:02:03                  Show the offset of a timestamp")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List videos available on the server
    Videos,

    /// Upload a video file (.mp4, .mkv or .avi)
    Upload {
        /// Video file to send
        file: PathBuf,

        /// Title shown in the catalog (defaults to the file name)
        #[arg(long, short)]
        title: Option<String>,
    },

    /// Remove a video and its subtitles from the server
    Delete {
        /// Video id
        video: VideoId,

        /// Confirm the deletion
        #[arg(long, short)]
        yes: bool,
    },

    /// List every subtitle line of a video
    Subtitles {
        /// Video id
        video: VideoId,
    },

    /// List subtitle languages of a video
    Languages {
        /// Video id
        video: VideoId,
    },

    /// Search the subtitles of a video
    Search {
        /// Video id
        video: VideoId,

        /// Text to look for
        query: String,
    },

    /// Load a video and jump to a position or search result
    #[command(long_about = "Load a video and jump to a position or search result.\n\n\
        The seek is issued right away and applied once the video's metadata \
        has loaded. Playback then starts unless autoplay is disabled in the config.")]
    Play {
        /// Video id
        video: VideoId,

        /// Position to jump to (H:M:S or M:S, fraction with . or ,)
        #[arg(long, value_name = "TIMESTAMP", conflicts_with = "search")]
        at: Option<String>,

        /// Jump to a subtitle line matching this text
        #[arg(long, short, value_name = "QUERY")]
        search: Option<String>,

        /// Which search result to jump to (1 = best)
        #[arg(long, default_value_t = 1, requires = "search")]
        pick: usize,
    },

    /// Show the offset in seconds of one or more timestamps
    Parse {
        /// Timestamps to parse
        #[arg(required = true)]
        timestamps: Vec<String>,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
