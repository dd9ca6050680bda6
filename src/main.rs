use clap::Parser;

mod cli;
mod config;
mod metadata;
mod scrape;
mod video_id;

use cli::ScrapeArgs;
use config::Config;
use metadata::fetch_video_meta;
use video_id::VideoId;

fn apply_scrape_args(config: &mut Config, args: &ScrapeArgs) {
    if let Some(timeout) = args.timeout {
        config.scrape.timeout_secs = timeout;
    }
    if let Some(retries) = args.retries {
        config.scrape.retries = retries;
    }
    if let Some(proxy) = &args.proxy {
        config.scrape.proxy = Some(proxy.clone());
    }
    if let Some(user_agent) = &args.user_agent {
        config.scrape.user_agent = Some(user_agent.clone());
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Meta {
            reference,
            scrape_args,
        } => {
            let mut config = Config::load();
            apply_scrape_args(&mut config, &scrape_args);
            config.validate();

            match fetch_video_meta(&reference, Some(&config.scrape))? {
                Some(meta) => println!("{}", serde_json::to_string_pretty(&meta).unwrap()),
                None => println!("{{}}"),
            }

            Ok(())
        }

        cli::Command::Resolve { reference, url } => {
            let id = VideoId::resolve(&reference)?;

            if url {
                println!("{}", id.watch_url());
            } else {
                println!("{}", id.as_str());
            }

            Ok(())
        }
    }
}
