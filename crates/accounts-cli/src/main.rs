use accounts_cli::superuser::create_superuser;
use accounts_config::DatabaseConfig;
use accounts_db::{PgUserRepository, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "accounts-cli")]
#[command(about = "Accounts CLI - Administrative tools for the accounts service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a superuser account
    CreateSuperuser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Create the account even if a superuser already exists
        #[arg(long)]
        force: bool,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;

    match cli.command {
        Commands::CreateSuperuser {
            email,
            password,
            force,
        } => {
            let email = match email {
                Some(email) => email,
                None => Input::new().with_prompt("Email address").interact_text()?,
            };

            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let repo = PgUserRepository::new(pool);
            let admin = create_superuser(&repo, &email, &password, force).await?;

            println!("\n✅ Superuser created successfully!");
            println!("   Email: {}", admin.email);
            println!("   ID: {}", admin.id);
        }
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
    }

    Ok(())
}
