use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use mercado::config::{ClientConfig, ConfigError};
use mercado::guard;
use mercado::navigation::{Route, TracingNavigator};
use mercado::net::{ApiClient, AuthClient, Product, ProductClient};
use mercado::session::{FileStore, SessionService};
use mercado::state::ProductList;
use mercado::ClientError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `mercado login` first")]
    NotLoggedIn,
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mercado", about = "AppMercado product client")]
struct Cli {
    #[arg(long, env = "MERCADO_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "MERCADO_SESSION_DIR")]
    session_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MERCADO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    Products(ProductsCommand),
}

#[derive(Args, Debug)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductsSubcommand {
    List,
    Add {
        name: String,
    },
    Remove {
        id: u64,
        #[arg(long, short = 'y', default_value_t = false, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

struct CliContext {
    session: SessionService,
    api: ApiClient,
}

impl CliContext {
    fn build(cli: &Cli) -> Result<Self, CliError> {
        let config = ClientConfig::from_env_with(cli.base_url.as_deref(), cli.session_dir.clone())?;

        let store = Arc::new(FileStore::new(config.session_dir.clone()));
        let session = SessionService::new(store, Arc::new(TracingNavigator::new()));
        let api = ApiClient::new(&config, session.clone())?;
        Ok(Self { session, api })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn render_error(error: &CliError) -> String {
    format!("error: {error}")
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::build(&cli)?;

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Logout => {
            ctx.session.logout();
            println!("logged out");
            Ok(())
        }
        Command::Whoami => run_whoami(&ctx),
        Command::Products(products) => run_products(&ctx, products).await,
    }
}

async fn run_login(ctx: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let auth = AuthClient::new(ctx.api.clone());
    let response = auth.login_and_store(email, password).await?;
    println!("logged in");
    if !ctx.session.is_logged_in() {
        eprintln!("warning: session could not be saved; the next command will need a fresh login");
    }
    print_json(&response.user)
}

fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    if !ctx.session.is_logged_in() {
        return Err(CliError::NotLoggedIn);
    }
    let user = ctx.session.user().unwrap_or(serde_json::Value::Null);
    print_json(&user)
}

async fn run_products(ctx: &CliContext, products: ProductsCommand) -> Result<(), CliError> {
    if !guard::enforce(&ctx.session, Route::Products) {
        return Err(CliError::NotLoggedIn);
    }

    let client = ProductClient::new(ctx.api.clone());
    let mut list = ProductList::new();

    match products.command {
        ProductsSubcommand::List => {
            list.load(&client).await?;
            print_products(&list.products);
            Ok(())
        }
        ProductsSubcommand::Add { name } => {
            list.set_draft_name(name);
            match list.add(&client).await? {
                Some(product) => println!("{}\t{}", product.id, product.name),
                None => eprintln!("product name is empty; nothing created"),
            }
            Ok(())
        }
        ProductsSubcommand::Remove { id, yes } => {
            // The listing only labels the prompt; a failed fetch must not block the delete.
            if !yes {
                list.refresh(&client).await;
            }
            let mut prompt_error = None;
            let removed = list
                .remove(&client, id, |id, product| {
                    if yes {
                        return true;
                    }
                    match confirm_removal(id, product) {
                        Ok(answer) => answer,
                        Err(e) => {
                            prompt_error = Some(e);
                            false
                        }
                    }
                })
                .await?;
            if let Some(e) = prompt_error {
                return Err(e.into());
            }
            if removed {
                println!("removed {id}");
            } else {
                eprintln!("removal cancelled");
            }
            Ok(())
        }
    }
}

fn confirm_removal(id: u64, product: Option<&Product>) -> io::Result<bool> {
    let label = product.map_or_else(|| format!("#{id}"), |p| format!("#{id} ({})", p.name));
    let mut stderr = io::stderr();
    write!(stderr, "Remove product {label} from the list? [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        eprintln!("no products");
        return;
    }
    for product in products {
        println!("{}\t{}", product.id, product.name);
    }
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
