use std::path::{Path, PathBuf};

use aerobooking::admin::{AdminError, AdminStore};
use aerobooking::auth::{AdminSession, AuthError};
use aerobooking::booking::{self, BookingError, BookingSession};
use aerobooking::checkin::{self, CheckInError};
use aerobooking::config::{self, ConfigError};
use aerobooking::model::{
    AircraftForm, AirportForm, ContactDetails, PassengerCounts, PassengerInfo, PassengerKind,
    SearchCriteria, UserForm,
};
use aerobooking::payment::{self, PaymentForm};
use aerobooking::search::{self, SearchError};
use aerobooking::seats::SeatMap;
use aerobooking::ticket::{self, TicketDocument};
use aerobooking::util::{datetime, money};
use aerobooking::{ApiClient, ApiError, ClientConfig, Resource, ValidationError, catalog};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    CheckIn(#[from] CheckInError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error("no flight {0} in the search results")]
    NoSuchFlight(i64),
    #[error("no flights found")]
    NoFlights,
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    WriteFile { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "aero", about = "AeroColombiana booking CLI")]
struct Cli {
    /// Overrides `AERO_API_BASE_URL`.
    #[arg(long, env = "AERO_API_BASE_URL")]
    base_url: Option<String>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List airports, falling back to the built-in list.
    Airports,
    /// Search flights for a route and date.
    Search(SearchArgs),
    /// Search, pick a flight, pay, and write the ticket.
    Book(BookArgs),
    /// Print the cabin seat map.
    Seats,
    /// Check in a ticket and print the boarding pass.
    Checkin {
        ticket_id: String,
        #[arg(long)]
        last_name: String,
    },
    Admin(AdminCommand),
    /// Raw CRUD against a backend collection.
    Api(ApiCommand),
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: String,
    /// Departure date, YYYY-MM-DD.
    #[arg(long)]
    date: String,
    #[arg(long)]
    return_date: Option<String>,
    #[arg(long, default_value_t = 1)]
    adults: u32,
    #[arg(long, default_value_t = 0)]
    youth: u32,
    #[arg(long, default_value_t = 0)]
    children: u32,
    #[arg(long, default_value_t = 0)]
    infants: u32,
    /// Seed for the simulated schedule.
    #[arg(long)]
    seed: Option<u64>,
    /// Skip posting the search draft.
    #[arg(long)]
    no_record: bool,
}

#[derive(Args, Debug)]
struct BookArgs {
    #[command(flatten)]
    search: SearchArgs,
    /// Flight id from the search results; defaults to the first result.
    #[arg(long)]
    flight: Option<i64>,
    /// JSON array of passengers.
    #[arg(long)]
    passengers: PathBuf,
    /// JSON contact object.
    #[arg(long)]
    contact: PathBuf,
    #[arg(long = "service")]
    services: Vec<String>,
    #[arg(long)]
    seat: Option<String>,
    #[arg(long)]
    card_number: String,
    /// MM/YY.
    #[arg(long)]
    expiry: String,
    #[arg(long)]
    cvv: String,
    #[arg(long)]
    card_name: String,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,

    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Stats,
    Aircraft {
        #[command(subcommand)]
        command: AircraftSubcommand,
    },
    Airports {
        #[command(subcommand)]
        command: AirportSubcommand,
    },
    Users {
        #[command(subcommand)]
        command: UserSubcommand,
    },
}

#[derive(Args, Debug)]
struct AircraftFields {
    #[arg(long)]
    registration: String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    capacity: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    kind: String,
    #[arg(long, default_value = "")]
    service_class: String,
}

#[derive(Subcommand, Debug)]
enum AircraftSubcommand {
    List,
    Create(AircraftFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: AircraftFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct AirportFields {
    #[arg(long)]
    code: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    city: String,
}

#[derive(Subcommand, Debug)]
enum AirportSubcommand {
    List,
    Create(AirportFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: AirportFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct UserFields {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    nationality: String,
    #[arg(long, default_value = "")]
    date_of_birth: String,
    #[arg(long, default_value = "Cliente")]
    role: String,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    List,
    Create(UserFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct ApiCommand {
    #[command(subcommand)]
    command: ApiSubcommand,
}

#[derive(Subcommand, Debug)]
enum ApiSubcommand {
    List {
        resource: Resource,
    },
    Get {
        resource: Resource,
        id: String,
    },
    Create {
        resource: Resource,
        #[arg(long)]
        data: String,
    },
    Update {
        resource: Resource,
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        resource: Resource,
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config.api_base_url = config::normalize_base_url(url)?;
    }
    let api = ApiClient::new(&config)?;

    match cli.command {
        Command::Airports => run_airports(&api).await,
        Command::Search(args) => run_search(&api, &args).await,
        Command::Book(args) => run_book(&api, &config, &args).await,
        Command::Seats => {
            print!("{}", SeatMap::default());
            Ok(())
        }
        Command::Checkin {
            ticket_id,
            last_name,
        } => run_checkin(&api, &ticket_id, &last_name).await,
        Command::Admin(command) => run_admin(&api, &config, command).await,
        Command::Api(command) => run_api(&api, command.command).await,
    }
}

// =============================================================================
// BOOKING FLOW
// =============================================================================

async fn run_airports(api: &ApiClient) -> Result<(), CliError> {
    let airports = match api.list_airports().await {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => catalog::fallback_airports(),
        Err(e) => {
            tracing::warn!(error = %e, "airport list unavailable; using built-in list");
            catalog::fallback_airports()
        }
    };
    for airport in airports {
        println!("{}  {} ({})", airport.code, airport.name, airport.city);
    }
    Ok(())
}

fn criteria_of(args: &SearchArgs) -> (SearchCriteria, PassengerCounts) {
    let mut criteria = SearchCriteria::new(&args.from, &args.to, &args.date);
    if let Some(return_date) = &args.return_date {
        criteria = criteria.with_return(return_date);
    }
    let counts = PassengerCounts::new(args.adults, args.youth, args.children, args.infants);
    (criteria, counts)
}

fn rng_of(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

async fn find_flights(
    api: &ApiClient,
    args: &SearchArgs,
    rng: &mut StdRng,
) -> Result<(SearchCriteria, PassengerCounts, search::SearchResults), CliError> {
    let (criteria, counts) = criteria_of(args);
    criteria.validate(datetime::today_local())?;
    counts.validate()?;

    let now = datetime::now();
    if !args.no_record {
        if let Err(e) = booking::record_search(api, &criteria, &counts, now).await {
            tracing::warn!(error = %e, "search draft not saved");
        }
    }
    let results = search::search_flights(api, &criteria, &counts, rng, now).await?;
    Ok((criteria, counts, results))
}

async fn run_search(api: &ApiClient, args: &SearchArgs) -> Result<(), CliError> {
    let mut rng = rng_of(args.seed);
    let (criteria, counts, results) = find_flights(api, args, &mut rng).await?;

    println!(
        "{} → {}  {}  {}{}",
        catalog::city_name(&criteria.origin),
        catalog::city_name(&criteria.destination),
        criteria.departure_date,
        counts.label(),
        if results.simulated { "  (horario simulado)" } else { "" }
    );
    for kind in PassengerKind::ALL {
        let count = counts.get(kind);
        if count > 0 {
            println!("  {count} {} ({})", kind.label(), kind.age_range());
        }
    }
    for flight in &results.flights {
        println!(
            "#{:<6} {} - {}  {:>8}  {}",
            flight.id,
            flight.departure_hm(),
            flight.arrival_hm(),
            flight.duration_label(),
            money::format_cop_label(flight.price)
        );
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

async fn run_book(api: &ApiClient, config: &ClientConfig, args: &BookArgs) -> Result<(), CliError> {
    let mut rng = rng_of(args.search.seed);
    let (criteria, counts, results) = find_flights(api, &args.search, &mut rng).await?;

    let flight = match args.flight {
        Some(id) => results
            .flights
            .into_iter()
            .find(|f| f.id == id)
            .ok_or(CliError::NoSuchFlight(id))?,
        None => results.flights.into_iter().next().ok_or(CliError::NoFlights)?,
    };

    let mut session = BookingSession::new(criteria, counts)?;
    tracing::info!(flight_id = flight.id, price = flight.price, "flight selected");
    session.select_flight(flight);

    let passengers: Vec<PassengerInfo> = read_json(&args.passengers)?;
    session.set_passengers(passengers)?;
    let contact: ContactDetails = read_json(&args.contact)?;
    session.set_contact(contact)?;

    let now = datetime::now();
    let outcome = booking::submit_purchase(api, &mut session, now).await?;
    if let Some(message) = &outcome.api_error {
        eprintln!("purchase not recorded: {message}");
    }

    for id in &args.services {
        session.toggle_service(id)?;
    }
    if let Some(seat) = &args.seat {
        let class = session.select_seat(&SeatMap::default(), seat)?;
        println!("seat {seat}: {}", class.summary_label());
    }

    let breakdown = session.price_breakdown()?;
    println!("fare      {}", money::format_cop(breakdown.fare));
    println!("services  {}", money::format_cop(breakdown.services));
    println!("seat      {}", money::format_cop(breakdown.seat_surcharge));
    println!("total     {}", money::format_cop_label(breakdown.total));

    let form = PaymentForm {
        card_number: payment::format_card_number(&args.card_number),
        expiry_date: args.expiry.clone(),
        cvv: args.cvv.clone(),
        card_name: args.card_name.clone(),
    };
    let receipt = session.pay(&form, config.payment_delay()).await?;
    println!(
        "paid {} with card ending {}",
        money::format_cop_label(receipt.amount),
        receipt.card_last_four
    );
    println!("booking reference {}", receipt.booking_reference);

    let doc = TicketDocument::from_session(&session, &mut rng, datetime::now());
    let path = args.out_dir.join(doc.file_name());
    std::fs::write(&path, doc.render_html()).map_err(|source| CliError::WriteFile {
        path: path.clone(),
        source,
    })?;
    println!("ticket written to {}", path.display());

    if ticket::save_ticket(api, &doc).await.is_some() {
        println!("ticket saved");
    }
    Ok(())
}

async fn run_checkin(api: &ApiClient, ticket_id: &str, last_name: &str) -> Result<(), CliError> {
    let id = checkin::parse_ticket_id(ticket_id)?;
    let pass = checkin::check_in(api, id, last_name, datetime::now()).await?;
    print_json(&serde_json::to_value(&pass)?)
}

// =============================================================================
// ADMIN
// =============================================================================

async fn run_admin(
    api: &ApiClient,
    config: &ClientConfig,
    command: AdminCommand,
) -> Result<(), CliError> {
    let mut session = AdminSession::default();
    session.login(&config.admin, &command.username, &command.password)?;

    let mut store = AdminStore::default();
    let now_ms = datetime::unix_millis(datetime::now());

    match command.command {
        AdminSubcommand::Stats => {
            store.load_aircraft(api).await;
            store.load_airports(api).await;
            if let Err(e) = store.load_users(api).await {
                tracing::warn!(error = %e, "user list unavailable; counting seed users");
            }
            print_json(&serde_json::to_value(store.stats())?)
        }
        AdminSubcommand::Aircraft { command } => match command {
            AircraftSubcommand::List => {
                store.load_aircraft(api).await;
                print_json(&serde_json::to_value(store.aircraft())?)
            }
            AircraftSubcommand::Create(fields) => {
                let saved = store
                    .save_aircraft(api, &session, aircraft_form(fields), None, now_ms)
                    .await?;
                print_json(&saved)
            }
            AircraftSubcommand::Update { id, fields } => {
                let saved = store
                    .save_aircraft(api, &session, aircraft_form(fields), Some(&id), now_ms)
                    .await?;
                print_json(&saved)
            }
            AircraftSubcommand::Delete { id } => {
                store.remove_aircraft(api, &session, &id).await?;
                println!("aircraft {id} deleted");
                Ok(())
            }
        },
        AdminSubcommand::Airports { command } => match command {
            AirportSubcommand::List => {
                store.load_airports(api).await;
                print_json(&serde_json::to_value(store.airports())?)
            }
            AirportSubcommand::Create(fields) => {
                let airport = store
                    .save_airport(api, &session, airport_form(fields), None, now_ms)
                    .await?;
                print_json(&serde_json::to_value(airport)?)
            }
            AirportSubcommand::Update { id, fields } => {
                store.load_airports(api).await;
                let airport = store
                    .save_airport(api, &session, airport_form(fields), Some(&id), now_ms)
                    .await?;
                print_json(&serde_json::to_value(airport)?)
            }
            AirportSubcommand::Delete { id } => {
                store.remove_airport(api, &session, &id).await?;
                println!("airport {id} deleted");
                Ok(())
            }
        },
        AdminSubcommand::Users { command } => match command {
            UserSubcommand::List => {
                store.load_users(api).await?;
                print_json(&serde_json::to_value(store.users())?)
            }
            UserSubcommand::Create(fields) => {
                let user = store.save_user(api, &session, user_form(fields), None, now_ms).await?;
                print_json(&serde_json::to_value(user)?)
            }
            UserSubcommand::Update { id, fields } => {
                let user = store
                    .save_user(api, &session, user_form(fields), Some(&id), now_ms)
                    .await?;
                print_json(&serde_json::to_value(user)?)
            }
            UserSubcommand::Delete { id } => {
                store.remove_user(api, &session, &id).await?;
                println!("user {id} deleted");
                Ok(())
            }
        },
    }
}

fn aircraft_form(fields: AircraftFields) -> AircraftForm {
    AircraftForm {
        registration: fields.registration,
        model: fields.model,
        capacity: fields.capacity,
        company: fields.company,
        kind: fields.kind,
        service_class: fields.service_class,
    }
}

fn airport_form(fields: AirportFields) -> AirportForm {
    AirportForm {
        code: fields.code,
        name: fields.name,
        city: fields.city,
    }
}

fn user_form(fields: UserFields) -> UserForm {
    UserForm {
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        phone: fields.phone,
        nationality: fields.nationality,
        date_of_birth: fields.date_of_birth,
        role: fields.role,
    }
}

// =============================================================================
// RAW API
// =============================================================================

async fn run_api(api: &ApiClient, command: ApiSubcommand) -> Result<(), CliError> {
    let value = match command {
        ApiSubcommand::List { resource } => api.list(resource).await?,
        ApiSubcommand::Get { resource, id } => api.get(resource, &id).await?,
        ApiSubcommand::Create { resource, data } => {
            let body: Value = serde_json::from_str(&data)?;
            api.create(resource, &body).await?
        }
        ApiSubcommand::Update { resource, id, data } => {
            let body: Value = serde_json::from_str(&data)?;
            api.update(resource, &id, &body).await?
        }
        ApiSubcommand::Delete { resource, id } => api.delete(resource, &id).await?,
    };
    print_json(&value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
