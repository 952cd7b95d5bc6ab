//! # Seed Data Generator
//!
//! Populates the database with the standard service catalogue and a demo
//! barber for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p clipper-db --bin seed
//!
//! # Specify database path
//! cargo run -p clipper-db --bin seed -- --db ./data/clipper.db
//! ```
//!
//! Shop settings (name, working hours, tax rate) are seeded by migration,
//! not here; this binary only fills the catalogue and roster.

use std::env;

use clipper_db::repository::service::NewService;
use clipper_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Sets up log output for the seed run.
///
/// Honours `RUST_LOG` when set; defaults to INFO with sqlx noise dimmed.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,clipper=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// The standard catalogue: (category, name, minutes, price cents, cost cents).
///
/// Prices are list prices in SAR cents. Costs cover consumables (blades,
/// towels, product) and drive the profit line on the dashboard.
const CATALOGUE: &[(&str, &str, i64, i64, i64)] = &[
    // Haircuts
    ("Haircut", "Classic Haircut", 30, 4_000, 300),
    ("Haircut", "Skin Fade", 45, 5_500, 400),
    ("Haircut", "Scissor Cut", 40, 5_000, 300),
    ("Haircut", "Buzz Cut", 15, 2_500, 200),
    ("Haircut", "Kids Haircut", 25, 3_000, 250),
    // Beard
    ("Beard", "Beard Trim", 20, 2_500, 200),
    ("Beard", "Hot Towel Shave", 30, 4_000, 500),
    ("Beard", "Beard Shaping", 25, 3_000, 250),
    ("Beard", "Beard Dye", 35, 5_000, 900),
    // Styling
    ("Styling", "Blow Dry & Style", 20, 2_500, 300),
    ("Styling", "Hair Wax Finish", 10, 1_500, 250),
    ("Styling", "Event Styling", 40, 6_000, 600),
    // Treatment
    ("Treatment", "Hair Wash", 15, 1_500, 200),
    ("Treatment", "Scalp Treatment", 30, 5_500, 1_200),
    ("Treatment", "Keratin Treatment", 90, 25_000, 6_000),
    ("Treatment", "Hair Color", 60, 12_000, 3_000),
    ("Treatment", "Face Mask", 20, 3_500, 800),
    ("Treatment", "Steam Facial", 30, 5_000, 1_000),
    // Packages
    ("Package", "Cut & Beard Combo", 50, 6_000, 500),
    ("Package", "Groom Package", 120, 30_000, 5_000),
    ("Package", "Full Service", 90, 15_000, 2_500),
    ("Package", "Father & Son", 60, 6_500, 550),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./clipper_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Clipper Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./clipper_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Clipper Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Skip if the catalogue is already populated
    let existing = db.services().list_all().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} services", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding service catalogue...");

    let mut seeded = 0;
    for (category, name, minutes, price_cents, cost_cents) in CATALOGUE {
        db.services()
            .create(NewService {
                name: (*name).to_string(),
                category: (*category).to_string(),
                duration_minutes: *minutes,
                price_cents: *price_cents,
                cost_cents: *cost_cents,
                commission_rate_bps: None,
            })
            .await?;
        seeded += 1;
    }

    println!("✓ Seeded {} services", seeded);

    println!();
    println!("Seeding demo barber...");

    let barber = db
        .barbers()
        .create("Khalid Mohammed", "0501234567", Some(3_500))
        .await?;

    println!("✓ Barber '{}' at 35% commission", barber.name);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
