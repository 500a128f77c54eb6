//! `shopfront`: browse the catalog and manage the cart from a terminal.
//!
//! Commands:
//! - `shopfront products [--search Q]`, `show`, `add`, `edit`, `delete`
//! - `shopfront buy <ID>`, `cart [inc|dec|remove <ITEM> | clear]`, `checkout`
//! - `shopfront shell` - interactive loop over the same commands

mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shopfront_client::{CatalogApi, ClientConfig, HttpCatalogClient, InMemoryCatalog};
use shopfront_ui::Storefront;
use shopfront_ui::commands::{self, Command, ShellCommand, ShellLine};
use tokio::io::{AsyncBufReadExt, BufReader};

use output::Output;

/// Storefront client for the product catalog service
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the catalog service [env: SHOPFRONT_API_URL]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Log request lines and view activity
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run against a seeded in-memory catalog instead of the service
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Top>,
}

#[derive(Subcommand)]
enum Top {
    #[command(flatten)]
    Run(Command),

    /// Interactive shell; view state persists between commands
    Shell,
}

fn catalog(cli: &Cli) -> Arc<dyn CatalogApi> {
    if cli.demo {
        tracing::info!("using in-memory demo catalog");
        return Arc::new(InMemoryCatalog::demo());
    }
    let config = match &cli.api_url {
        Some(url) => ClientConfig::new(url.as_str()),
        None => ClientConfig::from_env(),
    };
    let client = HttpCatalogClient::new(config);
    tracing::info!(base_url = client.config().base_url(), "using catalog service");
    Arc::new(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    shopfront_observability::init(cli.verbose);

    let output = Output::new(cli.json);
    let mut shop = Storefront::new(catalog(&cli));
    shop.mount().await;

    let command = match cli.command {
        Some(Top::Run(command)) => command,
        Some(Top::Shell) => return shell(&mut shop, &output).await,
        None => Command::Products { search: None },
    };

    match commands::execute(&mut shop, command).await {
        Ok(report) => {
            output.report(&report);
            if report.failed() {
                std::process::exit(1);
            }
        }
        Err(err) => {
            output.error(&format!("{err:#}"));
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn shell(shop: &mut Storefront, output: &Output) -> Result<()> {
    output.info("type `help` for commands, `exit` to leave");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        output.prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        shop.tick(chrono::Utc::now());

        let words = match commands::split_args(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(err) => {
                output.error(&format!("{err:#}"));
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(words) {
            Ok(ShellLine {
                command: ShellCommand::Run(command),
            }) => command,
            Ok(ShellLine {
                command: ShellCommand::Exit,
            }) => break,
            Err(err) => {
                // Help and usage errors are rendered by clap itself.
                let _ = err.print();
                continue;
            }
        };

        match commands::execute(shop, command).await {
            Ok(report) => output.report(&report),
            Err(err) => output.error(&format!("{err:#}")),
        }
    }
    Ok(())
}
