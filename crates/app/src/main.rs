//! Purchase Ledger Operator CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use purchases_app::{
    database,
    domain::purchases::{
        data::{Page, PurchaseFilter},
        format::{DEFAULT_FIELD_DELIMITER, DEFAULT_RECORD_DELIMITER, PurchaseFormatter},
        store::{PgPurchaseStore, PurchaseStore},
    },
};

#[derive(Debug, Parser)]
#[command(name = "purchases-app", about = "Purchase ledger CLI", long_about = None)]
struct Cli {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database schema management.
    Schema(SchemaCommand),

    /// Purchase lookups.
    Purchases(PurchasesCommand),
}

#[derive(Debug, Args)]
struct SchemaCommand {
    #[command(subcommand)]
    command: SchemaSubcommand,
}

#[derive(Debug, Subcommand)]
enum SchemaSubcommand {
    /// Create the purchases table and indexes if missing.
    Ensure,
}

#[derive(Debug, Args)]
struct PurchasesCommand {
    #[command(subcommand)]
    command: PurchasesSubcommand,
}

#[derive(Debug, Subcommand)]
enum PurchasesSubcommand {
    /// Print a buyer's purchases as a delimited line.
    List(ListPurchasesArgs),
}

#[derive(Debug, Args)]
struct ListPurchasesArgs {
    /// Buyer (avatar) identifier
    #[arg(long)]
    buyer: String,

    /// Only purchases of this product
    #[arg(long)]
    product: Option<String>,

    /// Only purchases from this vendor
    #[arg(long)]
    vendor: Option<String>,

    /// Page number, starting at 1
    #[arg(long)]
    page: Option<u32>,

    /// Records per page
    #[arg(long)]
    per: Option<u32>,

    /// Separator between records
    #[arg(long, env = "RECORD_DELIMITER", default_value = DEFAULT_RECORD_DELIMITER)]
    record_delimiter: String,

    /// Separator between product and vendor
    #[arg(long, env = "FIELD_DELIMITER", default_value = DEFAULT_FIELD_DELIMITER)]
    field_delimiter: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let database_url = cli
        .database_url
        .ok_or_else(|| "DATABASE_URL or --database-url is required".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match cli.command {
        Commands::Schema(SchemaCommand {
            command: SchemaSubcommand::Ensure,
        }) => {
            database::ensure_schema(&pool)
                .await
                .map_err(|error| format!("failed to prepare schema: {error}"))?;

            println!("schema ready");
        }
        Commands::Purchases(PurchasesCommand {
            command: PurchasesSubcommand::List(args),
        }) => {
            let records = PgPurchaseStore::new(pool)
                .list_by_buyer(
                    &args.buyer,
                    &PurchaseFilter {
                        product: args.product,
                        vendor: args.vendor,
                    },
                    Page::new(args.page, args.per),
                )
                .await
                .map_err(|error| format!("failed to list purchases: {error}"))?;

            let formatter = PurchaseFormatter::new(args.record_delimiter, args.field_delimiter);

            println!("{}", formatter.format(&records));
        }
    }

    Ok(())
}
