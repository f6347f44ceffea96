//! Command line front end for the Stowage core.
//!
//! Every invocation boots a fresh set of seeded services, so changes made by
//! `schedule` or `cancel` only outlive the process with a file-backed
//! `sqlite` storage config.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stowage_core::view::account::AccountSettings;
use stowage_core::view::dashboard::load_dashboard;
use stowage_core::view::item_detail::load_item_detail;
use stowage_core::view::item_grid::{ItemGrid, CATEGORY_FILTERS};
use stowage_core::view::schedule::{
    cancel_pickup, load_pickups, pickup_date_heading, submit_pickup, PickupForm, SubmitOutcome,
};
use stowage_core::view::storage_plans::{load_plan_cards, DEFAULT_CURRENT_SIZE};
use stowage_core::{
    core_version, init_logging, init_stderr_logging, AppConfig, AppServices, Item, LatencyConfig,
    LoadState, Notice, NoticeKind, RecordId,
};

#[derive(Debug, Parser)]
#[command(name = "stowage", version, about = "Manage stored items, pickups and plans")]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Resolve service calls without simulated latency.
    #[arg(long, global = true)]
    no_latency: bool,

    /// Overrides the configured log level.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summary counts, recent items and upcoming pickups.
    Dashboard,
    /// Item grid with optional search and category filter.
    Items {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// One item's details.
    Item { id: String },
    /// All pickup appointments.
    Pickups,
    /// Book a new pickup.
    Schedule {
        /// Pickup date as YYYY-MM-DD.
        #[arg(long)]
        date: String,
        /// Slot label or name: morning, midday, afternoon, evening.
        #[arg(long)]
        slot: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Cancel a scheduled pickup.
    Cancel { id: RecordId },
    /// Storage plans compared to the current plan.
    Plans,
    /// Account settings overview.
    Account,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::from(2);
            }
        },
        None => AppConfig::default(),
    };
    if cli.no_latency {
        config.latency = LatencyConfig::none();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    let logging = match &config.log_dir {
        Some(dir) => init_logging(&config.log_level, &dir.to_string_lossy()),
        None => init_stderr_logging(&config.log_level),
    };
    if let Err(err) = logging {
        eprintln!("warning: logging disabled: {err}");
    }
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let services = match AppServices::from_config(&config) {
        Ok(services) => services,
        Err(err) => {
            log::error!("event=cli_start module=cli status=error error={err}");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if run(cli.command, &services).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Renders one page; returns `false` when the page ended in a failure state.
async fn run(command: Command, services: &AppServices) -> bool {
    match command {
        Command::Dashboard => render(load_dashboard(&services.items, &services.pickups).await, |s| {
            println!("Items stored: {}", s.stored_count);
            println!("In transit:   {}", s.in_transit_count);
            println!("\nRecent items");
            s.recent_items.iter().for_each(print_item_row);
            println!("\nUpcoming pickups");
            if s.upcoming_pickups.is_empty() {
                println!("  No upcoming pickups");
            }
            for pickup in &s.upcoming_pickups {
                println!("  {}  {}", pickup.scheduled_date, pickup.time_slot);
            }
        }),
        Command::Items { search, category } => {
            let mut grid = ItemGrid::default();
            grid.load(&services.items).await;
            if let Some(search) = search {
                grid.set_search(search);
            }
            grid.set_category(category.as_deref());

            if let LoadState::Failed { message } = &grid.items {
                eprintln!("{message}");
                return false;
            }
            let labels: Vec<_> = CATEGORY_FILTERS.iter().map(|f| f.label).collect();
            println!("Categories: {}", labels.join(", "));
            match grid.empty_state() {
                Some(empty) => println!("{}\n{}", empty.title, empty.description),
                None => grid.visible_items().iter().for_each(print_item_row),
            }
            true
        }
        Command::Item { id } => render(load_item_detail(&services.items, &id).await, |detail| {
            let item = &detail.item;
            println!("{} [{}]", item.name, item.status);
            println!("Category:         {}", item.category);
            println!("Storage location: {}", item.location);
            println!("Date stored:      {}", item.stored_date);
            if let Some(dimensions) = detail.dimensions_label() {
                println!("Dimensions:       {dimensions}");
            }
            match detail.selected_photo() {
                Some(photo) => println!("Photos:           {} ({photo})", item.photo_count()),
                None => println!("Photos:           No photos available"),
            }
            if let Some(notes) = &item.notes {
                println!("Notes:            {notes}");
            }
            for entry in detail.storage_history() {
                println!("  {}  {}", entry.date, entry.title);
            }
        }),
        Command::Pickups => render(load_pickups(&services.pickups).await, |pickups| {
            if pickups.is_empty() {
                println!("No pickups scheduled");
            }
            for pickup in pickups {
                println!(
                    "#{:<3} {}  {}  {}  [{}]",
                    pickup.id,
                    pickup_date_heading(pickup.scheduled_date),
                    pickup.time_slot,
                    pickup.address,
                    pickup.status
                );
            }
        }),
        Command::Schedule {
            date,
            slot,
            address,
            notes,
        } => {
            let form = PickupForm {
                scheduled_date: date,
                time_slot: slot,
                address,
                notes,
            };
            match submit_pickup(&services.pickups, &form).await {
                SubmitOutcome::Scheduled { pickup, notice } => {
                    print_notice(&notice);
                    println!("#{} {} {}", pickup.id, pickup.scheduled_date, pickup.time_slot);
                    true
                }
                SubmitOutcome::Rejected(err) => {
                    eprintln!("invalid pickup request: {err}");
                    false
                }
                SubmitOutcome::Failed(notice) => {
                    print_notice(&notice);
                    false
                }
            }
        }
        Command::Cancel { id } => {
            let notice = cancel_pickup(&services.pickups, id).await;
            print_notice(&notice);
            notice.kind != NoticeKind::Error
        }
        Command::Plans => render(
            load_plan_cards(&services.storage_plans, DEFAULT_CURRENT_SIZE).await,
            |cards| {
                for card in cards {
                    let popular = if card.is_popular { "  (Most Popular)" } else { "" };
                    println!(
                        "{} - {} storage - ${}/month [{}]{popular}",
                        card.plan.name,
                        card.plan.size,
                        card.plan.monthly_price,
                        card.action.label()
                    );
                    for feature in &card.plan.features {
                        println!("    - {feature}");
                    }
                }
            },
        ),
        Command::Account => {
            let settings = AccountSettings::default();
            let profile = &settings.profile;
            println!("{} <{}>", profile.name, profile.email);
            println!("Phone:   {}", profile.phone);
            println!("Address: {}", profile.address);
            println!(
                "Card:    {} (expires {})",
                settings.billing.card_number, settings.billing.expiry_date
            );
            for setting in &settings.notifications {
                let state = if setting.enabled { "on" } else { "off" };
                println!("  [{state:>3}] {} - {}", setting.label, setting.description);
            }
            true
        }
    }
}

fn render<T>(state: LoadState<T>, print: impl FnOnce(&T)) -> bool {
    match state {
        LoadState::Ready(value) => {
            print(&value);
            true
        }
        LoadState::Failed { message } => {
            eprintln!("{message}");
            eprintln!("Run the command again to retry.");
            false
        }
        LoadState::Loading => false,
    }
}

fn print_item_row(item: &Item) {
    println!(
        "  #{:<3} {:<28} {:<12} {:<10} {}",
        item.id, item.name, item.category, item.location, item.status
    );
}

fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Error => eprintln!("{}", notice.message),
        NoticeKind::Success | NoticeKind::Info => println!("{}", notice.message),
    }
}
