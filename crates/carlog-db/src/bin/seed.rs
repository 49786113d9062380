//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database (./carlog.db)
//! cargo run -p carlog-db --bin seed
//!
//! # Generate more cars
//! cargo run -p carlog-db --bin seed -- --cars 12
//!
//! # Specify database path
//! cargo run -p carlog-db --bin seed -- --db ./data/carlog.db
//! ```
//!
//! ## Generated Data
//! - One demo account: `demo@carlog.app` / `demo-password`
//! - A handful of workshops
//! - N cars owned by the demo account, each with a maintenance history,
//!   invoices for the workshop visits, running expenses, and reminders

use std::env;

use chrono::NaiveDate;
use carlog_core::{
    Car, ExpenseIcon, ExpenseItem, FuelType, Invoice, InvoiceStatus, Maintenance, MaintenanceKind,
    Reminder, Transmission, Workshop,
};
use carlog_db::repository::new_entity_id;
use carlog_db::{Database, DbConfig};

const DEMO_EMAIL: &str = "demo@carlog.app";
const DEMO_PASSWORD: &str = "demo-password";

/// Brand/model pairs for generated cars.
const MODELS: &[(&str, &str)] = &[
    ("Toyota", "Corolla"),
    ("Honda", "Civic"),
    ("Ford", "Focus"),
    ("Volkswagen", "Golf"),
    ("Renault", "Clio"),
    ("Seat", "Ibiza"),
    ("Peugeot", "208"),
    ("Hyundai", "Tucson"),
    ("Kia", "Sportage"),
    ("Mazda", "3"),
];

const COLORS: &[&str] = &["Red", "Blue", "White", "Black", "Silver", "Green"];

const WORKSHOPS: &[(&str, &str, &str, &str, i64)] = &[
    (
        "Taller Central",
        "General mechanics",
        "+34 600 111 222",
        "Av. Principal 120",
        4500,
    ),
    (
        "MotorFix",
        "Electrics",
        "+34 600 333 444",
        "Calle Norte 8",
        5200,
    ),
    (
        "AutoServicio López",
        "Bodywork",
        "+34 600 555 666",
        "Polígono Sur 15",
        3800,
    ),
];

const MAINTENANCE_JOBS: &[(&str, MaintenanceKind, i64)] = &[
    ("Oil and filter change", MaintenanceKind::Preventive, 8500),
    ("Brake pad replacement", MaintenanceKind::Corrective, 22000),
    ("Tire rotation", MaintenanceKind::Preventive, 3000),
    ("Battery replacement", MaintenanceKind::Corrective, 14500),
    ("Annual inspection", MaintenanceKind::Preventive, 6000),
];

const EXPENSES: &[(&str, ExpenseIcon, i64)] = &[
    ("Fuel stop", ExpenseIcon::Fuel, 6200),
    ("Car wash", ExpenseIcon::Wash, 1500),
    ("Parking garage", ExpenseIcon::Parking, 900),
    ("Highway toll", ExpenseIcon::Toll, 450),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut cars: usize = 4;
    let mut db_path = String::from("./carlog.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cars" | "-c" => {
                if i + 1 < args.len() {
                    cars = args[i + 1].parse().unwrap_or(4);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CarLog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --cars <N>     Number of cars to generate (default: 4)");
                println!("  -d, --db <PATH>    Database file path (default: ./carlog.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 CarLog Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Cars:     {}", cars);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing cars
    let existing = db.cars().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} cars", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Demo account (reused if the email is already registered)
    let user = match db.auth().create_user(DEMO_EMAIL, DEMO_PASSWORD).await? {
        Some(user) => {
            println!("✓ Created demo account {}", DEMO_EMAIL);
            user
        }
        None => {
            let user = db
                .auth()
                .find_user_by_email(DEMO_EMAIL)
                .await?
                .ok_or("demo account vanished between create and lookup")?;
            println!("✓ Reusing existing demo account {}", DEMO_EMAIL);
            user
        }
    };

    // Workshops
    let mut workshop_ids = Vec::new();
    for (name, specialty, phone, location, hourly_rate_cents) in WORKSHOPS {
        let workshop = Workshop {
            id: new_entity_id(),
            name: name.to_string(),
            specialty: specialty.to_string(),
            phone: phone.to_string(),
            location: location.to_string(),
            hourly_rate_cents: *hourly_rate_cents,
        };
        db.workshops().add(&workshop).await?;
        workshop_ids.push(workshop.id);
    }
    println!("✓ Created {} workshops", workshop_ids.len());

    // Cars with history
    let mut generated = 0;
    for seed in 0..cars {
        let (brand, model) = MODELS[seed % MODELS.len()];

        let car = Car {
            id: new_entity_id(),
            user_id: user.id.clone(),
            brand: brand.to_string(),
            model: model.to_string(),
            year: 2015 + (seed % 10) as i32,
            plate: format!("{:04}-CLG", 1000 + seed * 37),
            odometer_km: 20_000 + (seed as i64 * 13_500) % 120_000,
            image_url: None,
            next_service_date: date(2026, 1 + (seed % 12) as u32, 15),
            color: COLORS[seed % COLORS.len()].to_string(),
            transmission: if seed % 3 == 0 {
                Transmission::Automatic
            } else {
                Transmission::Manual
            },
            fuel_type: if seed % 4 == 0 {
                FuelType::Diesel
            } else {
                FuelType::Gasoline
            },
            purchase_date: date(2015 + (seed % 10) as i32, 6, 1),
        };
        db.cars().add(&car).await?;
        generated += 1;

        seed_history(&db, &car, seed, &workshop_ids).await?;
    }

    let elapsed = start.elapsed();
    println!("✓ Generated {} cars with history in {:?}", generated, elapsed);

    // Sanity pass over the aggregates
    println!();
    println!("Verifying...");
    let owned = db.cars().list_for_user(&user.id).await?;
    println!("  Cars for {}: {}", DEMO_EMAIL, owned.len());
    if let Some(first) = owned.first() {
        let total = db.maintenances().total_cost_for_car(&first.id).await?;
        println!("  {} maintenance total: {}", first.display_name(), total);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Writes a maintenance history, expenses, and reminders for one car.
async fn seed_history(
    db: &Database,
    car: &Car,
    seed: usize,
    workshop_ids: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    for (idx, (description, kind, cost_cents)) in MAINTENANCE_JOBS.iter().enumerate() {
        // Every other job was done at a workshop
        let workshop_id = if idx % 2 == 0 {
            Some(workshop_ids[(seed + idx) % workshop_ids.len()].clone())
        } else {
            None
        };

        let maintenance = Maintenance {
            id: new_entity_id(),
            car_id: car.id.clone(),
            workshop_id,
            date: date(2024, 1 + (idx % 12) as u32, 10).ok_or("bad seed date")?,
            description: description.to_string(),
            cost_cents: *cost_cents,
            kind: *kind,
            odometer_km: car.odometer_km - (MAINTENANCE_JOBS.len() - idx) as i64 * 2_000,
        };
        db.maintenances().add(&maintenance).await?;

        // Workshop visits get billed
        if maintenance.workshop_id.is_some() {
            let invoice = Invoice {
                id: new_entity_id(),
                maintenance_id: maintenance.id.clone(),
                date: maintenance.date,
                total_cents: maintenance.cost_cents,
                status: if idx % 2 == 0 {
                    InvoiceStatus::Paid
                } else {
                    InvoiceStatus::Pending
                },
            };
            db.invoices().add(&invoice).await?;
        }
    }

    for (idx, (description, icon, amount_cents)) in EXPENSES.iter().enumerate() {
        let item = ExpenseItem {
            id: new_entity_id(),
            car_id: car.id.clone(),
            description: description.to_string(),
            date: date(2024, 1 + ((seed + idx) % 12) as u32, 3).ok_or("bad seed date")?,
            amount_cents: *amount_cents,
            icon: *icon,
        };
        db.expenses().add(&item).await?;
    }

    let reminder = Reminder {
        id: new_entity_id(),
        car_id: car.id.clone(),
        title: "Renew insurance".to_string(),
        subtitle: format!("{} {} policy expires soon", car.brand, car.model),
    };
    db.reminders().add(&reminder).await?;

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
