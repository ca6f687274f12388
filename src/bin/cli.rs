use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use tutorhub::cli::create_admin;
use tutorhub_config::DatabaseConfig;
use tutorhub_db::{init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "tutorhub-cli")]
#[command(about = "TutorHub CLI - administrative tools for TutorHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

fn prompt_text(label: &str, given: Option<String>) -> anyhow::Result<String> {
    match given {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(label).interact_text()?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => {
            let name = prompt_text("Name", name)?;
            let email = prompt_text("Email address", email)?;
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let pool = init_db_pool(&DatabaseConfig::from_env())
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool).await?;

            match create_admin(&pool, &name, &email, &password).await {
                Ok(admin) => {
                    println!("\n✅ Admin created successfully!");
                    println!("   Email: {}", admin.email);
                    println!("   Name: {}", admin.name);
                }
                Err(e) => {
                    eprintln!("\n❌ Error creating admin: {}", e.error);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
