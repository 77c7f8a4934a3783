use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use infomart::entities::{OrderStatus, ShippingMethod};
use infomart::middleware::logging::init_tracing;
use infomart::store::{ReviewFilter, SortBy, SIMILAR_LIMIT};
use infomart::{ApiClient, ClientConfig, ClientError};

mod commands;

use commands::Output;

#[derive(Parser)]
#[command(name = "infomart")]
#[command(version, about = "info.mart storefront and admin console client")]
#[command(
    after_help = "Environment:\n  INFOMART_API_URL   Base url of the store API\n  INFOMART_TOKEN     Bearer token from `infomart login`\n  RUST_LOG           Log filter, defaults to infomart=info"
)]
struct Cli {
    /// Overrides INFOMART_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Overrides INFOMART_TOKEN.
    #[arg(long, global = true)]
    token: Option<String>,
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Logs in and prints the bearer token.
    Login {
        login: String,
        #[arg(long, env = "INFOMART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        username: String,
        email: String,
        #[arg(long, env = "INFOMART_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Products {
        #[command(subcommand)]
        command: ProductsCommand,
    },
    Categories {
        #[command(subcommand)]
        command: CategoriesCommand,
    },
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Places an order for everything in the cart, paid cash on delivery.
    Checkout {
        /// Saved address id, the first address when omitted.
        #[arg(long)]
        address: Option<u64>,
        #[arg(long, default_value = "standard")]
        shipping: ShippingMethod,
        /// Only print the summary.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommand,
    },
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProductsCommand {
    List {
        #[arg(long)]
        category: Option<u64>,
        #[arg(long)]
        min_price: Option<i64>,
        #[arg(long)]
        max_price: Option<i64>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "name")]
        sort: SortBy,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Show {
        id: u64,
    },
    Similar {
        id: u64,
        #[arg(long, default_value_t = SIMILAR_LIMIT)]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub(crate) enum CategoriesCommand {
    List,
}

#[derive(Subcommand)]
pub(crate) enum CartCommand {
    Show,
    Add {
        product_id: u64,
        #[arg(default_value_t = 1)]
        quantity: i64,
    },
    Set {
        item_id: u64,
        quantity: i64,
    },
    Inc {
        item_id: u64,
    },
    Dec {
        item_id: u64,
    },
    Remove {
        item_id: u64,
    },
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum OrdersCommand {
    List,
    Show { id: u64 },
}

#[derive(Subcommand)]
pub(crate) enum ReviewsCommand {
    List {
        product_id: u64,
    },
    Add {
        product_id: u64,
        #[arg(long)]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum AdminCommand {
    Stats,
    Orders,
    SetStatus {
        id: u64,
        /// One of: Menunggu Pembayaran, Diproses, Dikirim, Selesai, Dibatalkan.
        status: OrderStatus,
    },
    ProductCreate {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: i64,
        #[arg(long, default_value_t = 0)]
        stock: i64,
        #[arg(long)]
        category: u64,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
    /// Changes only the given fields of an existing product.
    ProductUpdate {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<i64>,
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        category: Option<u64>,
        #[arg(long)]
        active: Option<bool>,
    },
    ProductDelete {
        id: u64,
    },
    CategoryCreate {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        icon: String,
    },
    CategoryUpdate {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    CategoryDelete {
        id: u64,
    },
    CategoryRecount,
    Reviews {
        #[arg(long, default_value = "all")]
        filter: ReviewFilter,
    },
    ReviewDelete {
        id: u64,
    },
    Users,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if err
                .downcast_ref::<ClientError>()
                .is_some_and(ClientError::is_unauthorized)
            {
                eprintln!("Run `infomart login <username>` and export INFOMART_TOKEN with the printed token.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::init()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }

    let client = ApiClient::new(&config)?;
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Login { login, password } => commands::login(&client, out, login, password).await,
        Commands::Register {
            username,
            email,
            password,
        } => commands::register(&client, out, username, email, password).await,
        Commands::Products { command } => commands::products(&client, out, command).await,
        Commands::Categories { command } => commands::categories(&client, out, command).await,
        Commands::Cart { command } => commands::cart(client, out, command).await,
        Commands::Checkout {
            address,
            shipping,
            dry_run,
        } => commands::checkout(client, out, address, shipping, dry_run).await,
        Commands::Orders { command } => commands::orders(&client, out, command).await,
        Commands::Reviews { command } => commands::reviews(&client, out, command).await,
        Commands::Admin { command } => commands::admin(client, out, command).await,
    }
}
