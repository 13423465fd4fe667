use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use trustbnb::application::session::{BookingSession, SessionConfig, SessionEvent};
use trustbnb::domain::draft::{MIN_GUESTS, PaymentMethod};
use trustbnb::domain::money::NightlyRate;
use trustbnb::domain::ports::PropertyCatalog;
use trustbnb::domain::pricing::{PricingPolicy, validate_stay};
use trustbnb::error::BookingError;
use trustbnb::infrastructure::in_memory::InMemoryPropertyCatalog;
use trustbnb::infrastructure::simulated_gateway::SimulatedPaymentGateway;
use trustbnb::interfaces::csv::property_reader::PropertyReader;
use trustbnb::interfaces::csv::report_writer::ReportWriter;
use trustbnb::interfaces::json::confirmation_writer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a stay at a given nightly rate
    Quote {
        /// Nightly rate
        #[arg(long, value_parser = parse_rate)]
        rate: NightlyRate,

        /// Check-in date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        check_in: String,

        /// Check-out date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        check_out: String,

        /// Reject missing or inverted dates instead of charging one night
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        pricing: PricingArgs,
    },
    /// Book a catalog property through the full wizard flow
    Book {
        /// Property catalog CSV file
        #[arg(long)]
        catalog: PathBuf,

        /// Id of the property to book
        #[arg(long)]
        property: String,

        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: String,

        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: String,

        /// Number of guests
        #[arg(long, default_value_t = MIN_GUESTS, value_parser = clap::value_parser!(u8).range(1..=10))]
        guests: u8,

        #[arg(long, value_enum, default_value_t = PaymentArg::Card)]
        payment: PaymentArg,

        /// Output format for the confirmation
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Simulated payment processing delay in milliseconds
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,

        /// Make the simulated gateway decline this many attempts first
        #[arg(long, default_value_t = 0)]
        decline_attempts: u32,

        /// Payment attempts before giving up
        #[arg(long, default_value_t = 3)]
        max_attempts: u32,

        /// Require valid dates with check-out after check-in
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        pricing: PricingArgs,
    },
    /// List the properties in a catalog
    Properties {
        /// Property catalog CSV file
        #[arg(long)]
        catalog: PathBuf,
    },
}

#[derive(Args)]
struct PricingArgs {
    /// Override the fixed cleaning fee
    #[arg(long)]
    cleaning_fee: Option<Decimal>,

    /// Override the service fee rate (e.g. 0.12)
    #[arg(long)]
    service_rate: Option<Decimal>,

    /// Override the tax rate (e.g. 0.08)
    #[arg(long)]
    tax_rate: Option<Decimal>,
}

impl PricingArgs {
    fn policy(&self) -> trustbnb::error::Result<PricingPolicy> {
        let default = PricingPolicy::default();
        PricingPolicy::new(
            self.cleaning_fee.unwrap_or(default.cleaning_fee().value()),
            self.service_rate.unwrap_or(default.service_rate()),
            self.tax_rate.unwrap_or(default.tax_rate()),
        )
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaymentArg {
    Card,
    Paypal,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Card => PaymentMethod::Card,
            PaymentArg::Paypal => PaymentMethod::Paypal,
        }
    }
}

fn parse_rate(value: &str) -> std::result::Result<NightlyRate, String> {
    let decimal: Decimal = value.parse().map_err(|e| format!("{e}"))?;
    NightlyRate::new(decimal).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();

    match cli.command {
        Command::Quote {
            rate,
            check_in,
            check_out,
            strict,
            pricing,
        } => {
            let policy = pricing.policy().into_diagnostic()?;
            if strict {
                validate_stay(&check_in, &check_out).into_diagnostic()?;
            }
            let breakdown = policy.quote(rate, &check_in, &check_out);
            ReportWriter::new(stdout.lock())
                .write_breakdown(&breakdown)
                .into_diagnostic()?;
        }
        Command::Book {
            catalog,
            property,
            check_in,
            check_out,
            guests,
            payment,
            format,
            delay_ms,
            decline_attempts,
            max_attempts,
            strict,
            pricing,
        } => {
            let policy = pricing.policy().into_diagnostic()?;
            let catalog = load_catalog(&catalog)?;
            let property = catalog
                .get(&property)
                .await
                .into_diagnostic()?
                .ok_or(BookingError::NotFound(format!("property '{property}'")))
                .into_diagnostic()?;

            let gateway = SimulatedPaymentGateway::new(Duration::from_millis(delay_ms))
                .decline_first(decline_attempts);
            let config = SessionConfig {
                policy,
                strict_dates: strict,
            };
            let (mut session, mut events) =
                BookingSession::open(property, Arc::new(gateway), config);

            session.set_guests(guests).await.into_diagnostic()?;
            session.set_dates(&check_in, &check_out).await.into_diagnostic()?;
            session.forward().await.into_diagnostic()?;
            session.forward().await.into_diagnostic()?;
            session
                .set_payment_method(payment.into())
                .await
                .into_diagnostic()?;

            for attempt in 1..=max_attempts {
                session.confirm_payment().await;
                match session.wait_for_payment().await {
                    Ok(_) => break,
                    Err(BookingError::PaymentError(reason)) => {
                        eprintln!("Payment attempt {attempt} failed: {reason}");
                    }
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            session.close().await;

            let mut confirmation = None;
            while let Ok(event) = events.try_recv() {
                if let SessionEvent::Completed(c) = event {
                    confirmation = Some(c);
                }
            }
            let confirmation = confirmation
                .ok_or_else(|| miette!("booking not completed after {max_attempts} attempts"))?;
            match format {
                OutputFormat::Csv => ReportWriter::new(stdout.lock())
                    .write_confirmation(&confirmation)
                    .into_diagnostic()?,
                OutputFormat::Json => {
                    confirmation_writer::write_confirmation(stdout.lock(), &confirmation)
                        .into_diagnostic()?
                }
            }
        }
        Command::Properties { catalog } => {
            let catalog = load_catalog(&catalog)?;
            let properties = catalog.all().await.into_diagnostic()?;
            ReportWriter::new(stdout.lock())
                .write_properties(&properties)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<InMemoryPropertyCatalog> {
    let file = File::open(path).into_diagnostic()?;
    let reader = PropertyReader::new(file);

    let mut properties = Vec::new();
    for result in reader.properties() {
        match result {
            Ok(property) => properties.push(property),
            Err(e) => eprintln!("Error reading property: {}", e),
        }
    }
    Ok(InMemoryPropertyCatalog::from_properties(properties))
}
