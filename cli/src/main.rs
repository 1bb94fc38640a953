//! `techops`: terminal front end for techops user administration.

mod cli;
mod commands;
mod config;
mod context;
mod dialogs;
mod output;
mod render;
mod timing;

use anyhow::Result;
use clap::Parser as _;
use techops_business::NewUser;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands::{
    generate_completions, run_add, run_browse, run_config, run_list, run_status, run_unlock,
};
use crate::config::{Config, Overrides};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    timing::init_tracing(cli.verbose, cli.timing);

    let file = Config::load()?;
    let overrides = Overrides {
        api_url: cli.api_url,
        page_size: cli.page_size,
    };
    let config = file.resolve(std::env::vars(), &overrides)?;
    debug!(api = %config.api_base_url, page_size = config.page_size, "resolved config");

    match cli.command {
        None => run_browse(&config, None).await,
        Some(Commands::Browse { filter }) => run_browse(&config, filter.into_query()).await,
        Some(Commands::List { page, filter }) => {
            run_list(&config, page, filter.into_query()).await
        }
        Some(Commands::Status {
            id,
            email,
            disabled,
            yes,
        }) => run_status(&config, id, email, disabled, yes).await,
        Some(Commands::Unlock { id, email, yes }) => run_unlock(&config, id, email, yes).await,
        Some(Commands::Add { email, name, phone }) => {
            let preset = NewUser {
                email: email.unwrap_or_default(),
                name,
                phone,
            };
            run_add(&config, preset).await
        }
        Some(Commands::Config {
            set_api_url,
            set_page_size,
        }) => run_config(file, &config, set_api_url, set_page_size),
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
    }
}
