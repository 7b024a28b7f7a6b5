//! RecipeBox CLI
//!
//! Command-line front end for the RecipeBox service:
//! - Register and log in
//! - List everyone's recipes or your own
//! - Add, edit and delete your recipes

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use recipebox::config::generate_default_config;
use recipebox::{
    ActionError, ClientUi, Config, Controller, HttpRecipeApi, ImageFile, LocalImage, RecipeApi,
    RecipeId, RecipeList, View,
};

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Share recipes with the RecipeBox service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/recipebox/config.toml or ./recipebox.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API server URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Username for commands that need a session
    #[arg(short, long, env = "RECIPEBOX_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for commands that need a session
    #[arg(short, long, env = "RECIPEBOX_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Print listings as HTML instead of text
    #[arg(long, global = true)]
    pub html: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        username: String,
        password: String,
    },

    /// Log in and list your recipes
    Login,

    /// List every recipe
    All,

    /// List your recipes
    Mine,

    /// Add a recipe
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Image file to attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Edit one of your recipes (prompts for values not given)
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete one of your recipes
    Delete {
        id: i64,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    recipebox::logging::init(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let ui = TerminalUi::new(cli.html, assume_yes);
    let api = HttpRecipeApi::new(config.client_config())?;
    let controller = Controller::new(api, ui);

    tracing::debug!(api = %config.api.base_url, "RecipeBox CLI starting");

    let result = run(&cli, &controller).await;
    Ok(match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(ActionError::Cancelled) => {
            println!("Cancelled");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    })
}

async fn run(cli: &Cli, controller: &Controller<HttpRecipeApi, TerminalUi>) -> Result<(), ActionError> {
    match &cli.command {
        Commands::Register { username, password } => controller.register(username, password).await,

        Commands::Login => login(cli, controller, true).await,

        Commands::All => controller.load_all_recipes().await.map(|_| ()),

        Commands::Mine => login(cli, controller, true).await,

        Commands::Add {
            title,
            description,
            image,
        } => {
            login(cli, controller, false).await?;

            let image = image.as_ref().map(LocalImage::new);
            if let Some(file) = &image {
                controller.preview_image(Some(file as &dyn ImageFile)).await;
            }
            controller
                .add_recipe(title, description, image.as_ref().map(|f| f as &dyn ImageFile))
                .await
        }

        Commands::Edit {
            id,
            title,
            description,
        } => {
            login(cli, controller, false).await?;

            let session = controller.session().await;
            let Some(owner) = session.user_id() else {
                return Err(ActionError::Validation(recipebox::controller::MSG_LOGIN_REQUIRED));
            };

            let recipes = controller
                .api()
                .list_user_recipes(owner)
                .await
                .map_err(|e| {
                    controller.ui().alert(recipebox::controller::MSG_LOAD_MINE_FAILED);
                    ActionError::from(e)
                })?;
            let Some(current) = recipes.into_iter().find(|r| r.id == RecipeId(*id)) else {
                controller.ui().alert(&format!("Recipe #{} is not one of your recipes", id));
                return Err(ActionError::Validation("Unknown recipe"));
            };

            if title.is_none() && description.is_none() {
                controller.begin_edit(&current).await
            } else {
                let title = title.as_deref().unwrap_or(&current.title);
                let description = description.as_deref().unwrap_or(&current.description);
                controller.edit_recipe(current.id, title, description).await
            }
        }

        Commands::Delete { id, .. } => {
            login(cli, controller, false).await?;
            controller.delete_recipe(RecipeId(*id)).await
        }

        Commands::Config { .. } => Ok(()),
    }
}

/// Log in with the global credentials. The session is never stored, so every
/// command that needs one logs in first.
async fn login(
    cli: &Cli,
    controller: &Controller<HttpRecipeApi, TerminalUi>,
    show_listing: bool,
) -> Result<(), ActionError> {
    let username = cli.username.as_deref().unwrap_or_default();
    let password = cli.password.as_deref().unwrap_or_default();

    controller.ui().set_listings(show_listing);
    let result = controller.login(username, password).await;
    controller.ui().set_listings(true);

    result.map(|_| ())
}

/// [`ClientUi`] for a terminal: messages go to stdout, questions read stdin
struct TerminalUi {
    html: bool,
    assume_yes: bool,
    listings: AtomicBool,
    input: Mutex<Box<dyn BufRead + Send>>,
}

impl TerminalUi {
    fn new(html: bool, assume_yes: bool) -> Self {
        Self::with_input(html, assume_yes, Box::new(io::BufReader::new(io::stdin())))
    }

    fn with_input(html: bool, assume_yes: bool, input: Box<dyn BufRead + Send>) -> Self {
        Self {
            html,
            assume_yes,
            listings: AtomicBool::new(true),
            input: Mutex::new(input),
        }
    }

    fn set_listings(&self, enabled: bool) {
        self.listings.store(enabled, Ordering::SeqCst);
    }

    /// Ask on stdout and read one line. `ClientUi` questions are synchronous,
    /// so the read hands its runtime worker over while it waits.
    fn read_line(&self, question: &str) -> Option<String> {
        print!("{} ", question);
        let _ = io::stdout().flush();

        tokio::task::block_in_place(|| {
            let mut input = self.input.lock().ok()?;
            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
            }
        })
    }
}

impl ClientUi for TerminalUi {
    fn show_auth_message(&self, message: &str) {
        if !message.is_empty() {
            println!("{}", message);
        }
    }

    fn alert(&self, message: &str) {
        println!("{}", message);
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        matches!(
            self.read_line(&format!("{} [y/N]", question))
                .map(|answer| answer.trim().to_ascii_lowercase())
                .as_deref(),
            Some("y") | Some("yes")
        )
    }

    fn prompt(&self, question: &str, default: &str) -> Option<String> {
        let answer = self.read_line(&format!("{} [{}]", question, default))?;
        if answer.trim().is_empty() {
            Some(default.to_string())
        } else {
            Some(answer)
        }
    }

    fn show_view(&self, view: View, welcome: Option<&str>) {
        match (view, welcome) {
            (View::Recipes, Some(line)) => println!("{}", line),
            (View::Recipes, None) => {}
            (View::Auth, _) => println!("Logged out"),
        }
    }

    fn show_recipes(&self, list: &RecipeList) {
        if !self.listings.load(Ordering::SeqCst) {
            return;
        }
        if self.html {
            println!("{}", list.to_html());
        } else {
            print!("{}", list.to_text());
            if list.is_empty() {
                println!();
            }
        }
    }

    fn clear_recipe_form(&self) {
        tracing::debug!("Recipe form cleared");
    }

    fn show_preview(&self, data_uri: Option<&str>) {
        if let Some(uri) = data_uri {
            let mime = uri
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .unwrap_or("unknown");
            println!("Attaching image ({}, {} bytes encoded)", mime, uri.len());
        }
    }
}
