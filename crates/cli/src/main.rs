//! GIMCO KE CLI - operator tools over a seeded in-memory shop.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! gimco catalog --category MEN --occasion "Business Formal" --max-price 20000
//!
//! # Admin order list, oldest first, then export it
//! gimco orders --payment PAID --sort oldest
//! gimco export --search kevin --dir exports
//!
//! # Simulate a checkout for Sarah
//! gimco checkout --user u-102 --item m-1 --item a-m-1 --phone 0712345678
//!
//! # Ask the stylist (needs GEMINI_API_KEY)
//! gimco ask --user u-101 "What should I wear to a Nairobi wedding?"
//! ```
//!
//! Output is written through `tracing`; set `RUST_LOG` to change verbosity
//! (default `gimco=info`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use gimco_admin::{BulkAction, SortOrder};
use gimco_core::{Category, ItemType, Occasion, PaymentStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gimco")]
#[command(author, version, about = "GIMCO KE shop tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Acting user id (admin commands need an ADMIN profile)
    #[arg(long = "as", global = true, default_value = "u-101")]
    acting_user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog entries
    Catalog {
        /// MEN, WOMEN or ACCESSORIES
        #[arg(long)]
        category: Option<Category>,
        /// e.g. "Business Formal"
        #[arg(long)]
        occasion: Option<Occasion>,
        /// Upper price bound in KES (default: the priciest entry)
        #[arg(long)]
        max_price: Option<u64>,
    },
    /// Show one catalog entry and record it as recently viewed
    View {
        /// Catalog entry id
        id: String,
    },
    /// Back-office overview figures
    Overview,
    /// Admin order list
    Orders {
        /// PENDING, PAID or FAILED
        #[arg(long)]
        payment: Option<PaymentStatus>,
        /// Customer name, phone or order id
        #[arg(long, default_value = "")]
        search: String,
        /// newest or oldest
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },
    /// A customer's own orders with progress
    Track {
        /// Customer id
        #[arg(long)]
        user: String,
        /// Show finished orders instead of active ones
        #[arg(long)]
        history: bool,
        /// Order id or item name
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Apply a bulk action to orders and show the result
    Bulk {
        /// MARK_PAID, MARK_PENDING, SET_PRODUCTS_SHIPPED or SET_SERVICES_READY
        action: BulkAction,
        /// Order ids
        #[arg(required = true)]
        orders: Vec<String>,
    },
    /// Print an order invoice
    Invoice {
        /// Order id
        order: String,
    },
    /// Export the filtered order list as CSV
    Export {
        /// PENDING, PAID or FAILED
        #[arg(long)]
        payment: Option<PaymentStatus>,
        /// Customer name, phone or order id
        #[arg(long, default_value = "")]
        search: String,
        /// Output directory (default: GIMCO_EXPORT_DIR or .)
        #[arg(long)]
        dir: Option<std::path::PathBuf>,
    },
    /// Search the customer directory
    Customers {
        /// Name, email or phone
        #[arg(default_value = "")]
        query: String,
    },
    /// Pay for items over simulated M-PESA and place the order
    Checkout {
        /// Customer id
        #[arg(long)]
        user: String,
        /// Catalog entry ids to put in the cart
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// Safaricom number
        #[arg(long)]
        phone: String,
        /// Skip the simulated delays
        #[arg(long)]
        instant: bool,
    },
    /// Ask the Tailor AI stylist a question
    Ask {
        /// Customer id whose measurements give context
        #[arg(long)]
        user: String,
        /// The question
        query: String,
    },
    /// Generate a product photo and save it as a catalog item
    GenerateImage {
        /// Item name
        #[arg(long)]
        name: String,
        /// MEN, WOMEN or ACCESSORIES
        #[arg(long, default_value = "ACCESSORIES")]
        category: Category,
        /// SERVICE or PRODUCT
        #[arg(long = "type", default_value = "PRODUCT")]
        item_type: ItemType,
        /// Price in KES
        #[arg(long)]
        price: u64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gimco=info".into());

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = gimco_core::seed::shop()?;
    let acting = gimco_core::UserId::new(cli.acting_user);

    match cli.command {
        Commands::Catalog {
            category,
            occasion,
            max_price,
        } => commands::shop::catalog(&shop, category, occasion, max_price),
        Commands::View { id } => commands::shop::view(&shop, &acting, &id)?,
        Commands::Overview => commands::shop::overview(&shop, &acting)?,
        Commands::Customers { query } => commands::shop::customers(&shop, &acting, &query)?,
        Commands::Orders {
            payment,
            search,
            sort,
        } => commands::orders::list(&shop, &acting, payment, search, sort)?,
        Commands::Track {
            user,
            history,
            search,
        } => commands::orders::track(&shop, &user, history, &search),
        Commands::Bulk { action, orders } => {
            commands::orders::bulk(&mut shop, &acting, action, &orders)?;
        }
        Commands::Invoice { order } => commands::orders::invoice(&shop, &acting, &order)?,
        Commands::Export {
            payment,
            search,
            dir,
        } => commands::orders::export(&shop, &acting, payment, search, dir)?,
        Commands::Checkout {
            user,
            items,
            phone,
            instant,
        } => commands::checkout::run(&mut shop, &user, &items, &phone, instant).await?,
        Commands::Ask { user, query } => commands::ai::ask(&shop, &user, &query).await?,
        Commands::GenerateImage {
            name,
            category,
            item_type,
            price,
        } => {
            commands::ai::generate_image(&mut shop, &acting, name, category, item_type, price)
                .await?;
        }
    }
    Ok(())
}
