//! Database seeder for Claimdesk development and testing.
//!
//! Seeds a demo company's users, mode of payment accounts and accounting
//! dimensions, then prints an access token per user.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Duration;
use sea_orm::DatabaseConnection;

use claimdesk_core::dimension::DimensionError;
use claimdesk_db::entities::users;
use claimdesk_db::repositories::{
    AccountingDimensionRepository, CreateDimensionInput, ModeOfPaymentRepository,
    UserRepository,
};
use claimdesk_shared::{AppConfig, JwtService, UserRole};

const COMPANY: &str = "Demo Company";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().ok();
    let database_url = match (&config, std::env::var("DATABASE_URL")) {
        (_, Ok(url)) => url,
        (Some(config), Err(_)) => config.database.url.clone(),
        (None, Err(_)) => anyhow::bail!("DATABASE_URL must be set in environment"),
    };

    println!("Connecting to database...");
    let db = claimdesk_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding users...");
    let seeded = seed_users(&db).await?;

    println!("Seeding mode of payment accounts...");
    seed_payment_accounts(&db).await?;

    println!("Seeding accounting dimensions...");
    seed_dimensions(&db).await?;

    let secret = config.map_or_else(|| "change-me-in-production".to_string(), |c| c.jwt.secret);
    let jwt = JwtService::new(&secret, Duration::hours(24));

    println!("Development tokens:");
    for user in &seeded {
        let token = jwt.generate_access_token(user.id, user.role_name())?;
        println!("  {} ({}): {token}", user.email, user.role_name());
    }

    println!("Seeding complete!");
    Ok(())
}

struct SeededUser {
    id: uuid::Uuid,
    email: String,
    role: UserRole,
}

impl SeededUser {
    const fn role_name(&self) -> &'static str {
        self.role.as_str()
    }
}

impl From<users::Model> for SeededUser {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: claimdesk_db::repositories::user::role_from_db(model.role),
        }
    }
}

async fn seed_users(db: &DatabaseConnection) -> anyhow::Result<Vec<SeededUser>> {
    let repo = UserRepository::new(db.clone());
    let users = [
        ("owner@claimdesk.dev", "Olivia", Some("Owner"), UserRole::Owner),
        ("approver@claimdesk.dev", "Ada", Some("Lovelace"), UserRole::Approver),
        ("submitter@claimdesk.dev", "Sam", None, UserRole::Submitter),
    ];

    let mut seeded = Vec::with_capacity(users.len());
    for (email, first_name, last_name, role) in users {
        let user = if let Some(existing) = repo.find_by_email(email).await? {
            println!("  {email} already exists, skipping...");
            existing
        } else {
            let created = repo.create(email, first_name, last_name, role).await?;
            println!("  Created {email}");
            created
        };
        seeded.push(SeededUser::from(user));
    }

    Ok(seeded)
}

async fn seed_payment_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = ModeOfPaymentRepository::new(db.clone());
    let accounts = [
        ("Cash", "Cash - DC"),
        ("Bank Transfer", "Bank - DC"),
        ("Credit Card", "Credit Card - DC"),
    ];

    for (mode_of_payment, account) in accounts {
        repo.set_account(mode_of_payment, COMPANY, account).await?;
        println!("  {mode_of_payment} -> {account}");
    }

    Ok(())
}

async fn seed_dimensions(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = AccountingDimensionRepository::new(db.clone());
    let dimensions = [("Region", "Territory"), ("Department", "Department")];

    for (name, document_type) in dimensions {
        let input = CreateDimensionInput {
            name: name.to_string(),
            fieldname: None,
            label: None,
            document_type: document_type.to_string(),
            mandatory_for_bs: false,
            mandatory_for_pl: false,
            disabled: false,
        };

        match repo.create(input).await {
            Ok(dimension) => println!("  Created {} ({})", dimension.name, dimension.fieldname),
            Err(DimensionError::Duplicate(_)) => println!("  {name} already exists, skipping..."),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
