use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ScrapeArgs {
    /// Per-request timeout in seconds
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Attempts before giving up on a page
    #[clap(long)]
    pub retries: Option<u64>,

    /// Proxy for retried requests,
    /// e.g. socks5://127.0.0.1:9050
    #[clap(long)]
    pub proxy: Option<String>,

    /// Override the default browser user agent
    #[clap(long)]
    pub user_agent: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query video metadata
    Meta {
        /// A video id or url
        #[clap(allow_hyphen_values = true)]
        reference: String,

        #[clap(flatten)]
        scrape_args: ScrapeArgs,
    },
    /// Resolve a video reference to its canonical id
    Resolve {
        /// A video id or url
        #[clap(allow_hyphen_values = true)]
        reference: String,

        /// Print the canonical watch url instead of the bare id
        #[clap(short, long, default_value = "false")]
        url: bool,
    },
}
