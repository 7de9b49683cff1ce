//! Barrique Application CLI

use std::process;

use barrique::status::OrderStatus;
use barrique_app::{
    context::AppContext,
    database,
    domain::{
        events::models::NewEvent,
        promos::models::NewPromoCode,
    },
};
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "barrique-app", about = "Barrique CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, default_value = "")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    Event(EventCommand),
    Promo(PromoCommand),
    Order(OrderCommand),
}

#[derive(Debug, Args)]
struct EventCommand {
    #[command(subcommand)]
    command: EventSubcommand,
}

#[derive(Debug, Subcommand)]
enum EventSubcommand {
    Create(CreateEventArgs),
}

#[derive(Debug, Args)]
struct CreateEventArgs {
    /// Event display name
    #[arg(long)]
    name: String,

    /// Bundle size for the tiered discount; omit to disable the tier
    #[arg(long)]
    bundle_size: Option<u32>,

    /// Delivery fee in cents; omit to disable delivery
    #[arg(long)]
    delivery_fee: Option<u64>,

    /// Optional event UUID; generated when omitted
    #[arg(long)]
    event_uuid: Option<Uuid>,
}

#[derive(Debug, Args)]
struct PromoCommand {
    #[command(subcommand)]
    command: PromoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoSubcommand {
    Create(CreatePromoArgs),
    Deactivate(PromoCodeArgs),
    List(PromoListArgs),
}

#[derive(Debug, Args)]
struct CreatePromoArgs {
    /// Event UUID the code belongs to
    #[arg(long)]
    event: Uuid,

    /// The code customers will enter
    #[arg(long)]
    code: String,

    /// Fixed discount in cents
    #[arg(long)]
    discount: u64,
}

#[derive(Debug, Args)]
struct PromoCodeArgs {
    /// Event UUID the code belongs to
    #[arg(long)]
    event: Uuid,

    /// The code to deactivate
    #[arg(long)]
    code: String,
}

#[derive(Debug, Args)]
struct PromoListArgs {
    /// Event UUID
    #[arg(long)]
    event: Uuid,
}

#[derive(Debug, Args)]
struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    SetStatus(SetStatusArgs),
}

#[derive(Debug, Args)]
struct SetStatusArgs {
    /// Order UUID
    #[arg(long)]
    order: Uuid,

    /// Target status: pending, paid, prepared, delivered or cancelled
    #[arg(long)]
    status: String,
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
    if cli.database_url.is_empty() {
        return Err("DATABASE_URL is not set".to_string());
    }

    match cli.command {
        Commands::Migrate => migrate(&cli.database_url).await,
        Commands::Event(EventCommand {
            command: EventSubcommand::Create(args),
        }) => create_event(&cli.database_url, args).await,
        Commands::Promo(PromoCommand { command }) => match command {
            PromoSubcommand::Create(args) => create_promo(&cli.database_url, args).await,
            PromoSubcommand::Deactivate(args) => deactivate_promo(&cli.database_url, args).await,
            PromoSubcommand::List(args) => list_promos(&cli.database_url, args).await,
        },
        Commands::Order(OrderCommand {
            command: OrderSubcommand::SetStatus(args),
        }) => set_status(&cli.database_url, args).await,
    }
}

async fn context(database_url: &str) -> Result<AppContext, String> {
    AppContext::from_database_url(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}

async fn migrate(database_url: &str) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}

async fn create_event(database_url: &str, args: CreateEventArgs) -> Result<(), String> {
    let context = context(database_url).await?;

    let event = context
        .events
        .create_event(NewEvent {
            uuid: args.event_uuid.unwrap_or_else(Uuid::now_v7),
            name: args.name,
            tiered_discount_enabled: args.bundle_size.is_some(),
            bundle_size: args.bundle_size.unwrap_or(0),
            delivery_enabled: args.delivery_fee.is_some(),
            delivery_fee: args.delivery_fee.unwrap_or(0),
        })
        .await
        .map_err(|error| format!("failed to create event: {error}"))?;

    println!("event_uuid: {}", event.uuid);
    println!("event_name: {}", event.name);

    Ok(())
}

async fn create_promo(database_url: &str, args: CreatePromoArgs) -> Result<(), String> {
    let context = context(database_url).await?;

    let code = context
        .promos
        .create_code(
            args.event,
            NewPromoCode {
                uuid: Uuid::now_v7(),
                code: args.code,
                discount: args.discount,
            },
        )
        .await
        .map_err(|error| format!("failed to create promo code: {error}"))?;

    println!("promo_uuid: {}", code.uuid);
    println!("promo_code: {}", code.code);
    println!("discount_cents: {}", code.discount);

    Ok(())
}

async fn deactivate_promo(database_url: &str, args: PromoCodeArgs) -> Result<(), String> {
    let context = context(database_url).await?;

    context
        .promos
        .deactivate_code(args.event, &args.code)
        .await
        .map_err(|error| format!("failed to deactivate promo code: {error}"))?;

    println!("deactivated: {}", args.code);

    Ok(())
}

async fn list_promos(database_url: &str, args: PromoListArgs) -> Result<(), String> {
    let context = context(database_url).await?;

    let codes = context
        .promos
        .list_codes(args.event)
        .await
        .map_err(|error| format!("failed to list promo codes: {error}"))?;

    for code in codes {
        let state = if code.active { "active" } else { "inactive" };

        println!("{}\t{}\t{}\t{state}", code.uuid, code.code, code.discount);
    }

    Ok(())
}

async fn set_status(database_url: &str, args: SetStatusArgs) -> Result<(), String> {
    let status = OrderStatus::parse(&args.status)
        .ok_or_else(|| format!("unknown status: {}", args.status))?;

    let context = context(database_url).await?;

    let order = context
        .orders
        .set_status(args.order, status)
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("order_code: {}", order.code);
    println!("status: {}", order.status.as_str());

    Ok(())
}
