//! Run configuration.
//!
//! Every value can come from the command line or from a `PODFETCH_*`
//! environment variable, which suits timer- or cron-driven invocations.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Check a podcast feed and download every episode not fetched before.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// URL of the RSS or Atom feed
    #[arg(long, env = "PODFETCH_FEED_URL")]
    pub feed_url: String,

    /// Folder the episode files are written into
    #[arg(long, env = "PODFETCH_DOWNLOAD_FOLDER", default_value = "downloads")]
    pub download_folder: PathBuf,

    /// File listing the identifiers of finished downloads, one per line
    #[arg(long, env = "PODFETCH_HISTORY_FILE", default_value = "downloaded.txt")]
    pub history_file: PathBuf,

    /// Give up on any single HTTP request after this many seconds. The limit
    /// covers the whole transfer, so it must exceed the slowest episode download
    #[arg(long, env = "PODFETCH_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log failed downloads and carry on with the remaining episodes
    #[arg(long, env = "PODFETCH_KEEP_GOING")]
    pub keep_going: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = Config::try_parse_from(["podfetch", "--feed-url", "http://x/feed"]).unwrap();

        assert_eq!(config.feed_url, "http://x/feed");
        assert_eq!(config.download_folder, PathBuf::from("downloads"));
        assert_eq!(config.history_file, PathBuf::from("downloaded.txt"));
        assert_eq!(config.timeout(), None);
        assert!(!config.keep_going);
        assert_eq!(config.verbose, 0);
    }

    #[test]
    fn all_options_parse() {
        let config = Config::try_parse_from([
            "podfetch",
            "--feed-url",
            "http://x/feed",
            "--download-folder",
            "/srv/pods",
            "--history-file",
            "/srv/pods/.history",
            "--timeout",
            "45",
            "--keep-going",
            "-vv",
        ])
        .unwrap();

        assert_eq!(config.download_folder, PathBuf::from("/srv/pods"));
        assert_eq!(config.history_file, PathBuf::from("/srv/pods/.history"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
        assert!(config.keep_going);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn timeout_help_warns_it_covers_the_whole_transfer() {
        use clap::CommandFactory;
        let help = Config::command().render_long_help().to_string();
        assert!(help.contains("whole transfer"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
