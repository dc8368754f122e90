//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use prodmanage_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "prodmanage")]
#[command(version)]
#[command(about = "ProdManage: create, view, edit, and delete products")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the API base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the home page
    Home,
    /// Show contact details
    Contact,
    /// Show the navigation menu for the current session
    Nav,

    /// Manage products (requires login)
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Create a new account
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, env = "PRODMANAGE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// List registered users
    Users,

    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PRODMANAGE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Ask the server to confirm the stored token
        #[arg(long)]
        verify: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ProductCommands {
    /// List products
    List {
        #[arg(long)]
        page: Option<u32>,
        /// Items per page
        #[arg(long)]
        limit: Option<u32>,
        /// Sort order understood by the server (e.g. price_asc, newest)
        #[arg(long)]
        sort: Option<String>,
        /// Search title and description
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Show one product
    Show {
        #[arg(value_name = "PRODUCT_ID")]
        id: String,
    },
    /// Create a product
    Create {
        #[arg(long)]
        title: String,
        /// Image URL
        #[arg(long)]
        image: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
    },
    /// Update some fields of a product
    Update {
        #[arg(value_name = "PRODUCT_ID")]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    /// Delete a product
    Delete {
        #[arg(value_name = "PRODUCT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective configuration
    Show,
    /// Persist a new API base URL
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load().context("load config")?;
    let _log_guard = logging::init(&config.log);

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: config::Config) -> Result<()> {
    let Cli { command, api_url } = cli;
    let api_url = api_url.as_deref();

    match command {
        Commands::Home => {
            commands::pages::home();
            Ok(())
        }
        Commands::Contact => {
            commands::pages::contact();
            Ok(())
        }
        Commands::Nav => {
            let auth = commands::auth_context(&config, api_url)?;
            commands::pages::nav(&auth);
            Ok(())
        }

        Commands::Products { command } => {
            let mut auth = commands::auth_context(&config, api_url)?;
            match command {
                ProductCommands::List {
                    page,
                    limit,
                    sort,
                    keyword,
                } => {
                    let query = prodmanage_types::ProductQuery {
                        page,
                        limit,
                        sort,
                        keyword,
                    };
                    commands::products::list(&mut auth, &query).await
                }
                ProductCommands::Show { id } => commands::products::show(&mut auth, &id).await,
                ProductCommands::Create {
                    title,
                    image,
                    description,
                    price,
                } => {
                    let form = prodmanage_types::ProductFormData {
                        title,
                        image,
                        description,
                        price,
                    };
                    commands::products::create(&mut auth, form).await
                }
                ProductCommands::Update {
                    id,
                    title,
                    image,
                    description,
                    price,
                } => {
                    let patch = prodmanage_types::ProductPatch {
                        title,
                        image,
                        description,
                        price,
                    };
                    commands::products::update(&mut auth, &id, patch).await
                }
                ProductCommands::Delete { id } => commands::products::delete(&mut auth, &id).await,
            }
        }

        Commands::Register {
            full_name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let api = commands::api_client(&config, api_url)?;
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            let form = prodmanage_types::RegistrationForm {
                full_name,
                email,
                phone,
                password,
                confirm_password,
            };
            commands::users::register(&api, form).await
        }
        Commands::Users => {
            let api = commands::api_client(&config, api_url)?;
            commands::users::list(&api).await
        }

        Commands::Login { email, password } => {
            let mut auth = commands::auth_context(&config, api_url)?;
            commands::auth::login(&mut auth, email, password).await
        }
        Commands::Logout => {
            let mut auth = commands::auth_context(&config, api_url)?;
            commands::auth::logout(&mut auth);
            Ok(())
        }
        Commands::Whoami { verify } => {
            let mut auth = commands::auth_context(&config, api_url)?;
            commands::auth::whoami(&mut auth, verify).await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
