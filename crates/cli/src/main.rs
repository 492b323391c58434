use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use marquee_catalog::Field;
use marquee_client::{
    ClientConfig, DeleteOutcome, ListView, MovieApi, MovieClient, MovieForm, SubmitOutcome,
};
use marquee_kernel::settings::{ClientSettings, Settings};

mod render;

#[derive(Debug, Parser)]
#[command(name = "marquee", version, about = "Manage the marquee movie catalog")]
struct Cli {
    /// API root of a running catalog service (overrides `client.api_base_url`)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that talk to a running service.
#[derive(Debug, Subcommand)]
enum ClientCommand {
    /// Show every movie
    List {
        /// Show the full summary of this movie (repeatable)
        #[arg(long = "expand", value_name = "ID")]
        expand: Vec<String>,
    },
    /// Show one movie
    Show { id: String },
    /// Add a movie
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        img: String,
        #[arg(long)]
        summary: String,
    },
    /// Change fields of an existing movie
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        img: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Remove a movie
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load marquee settings")?;
    marquee_telemetry::init(&settings.telemetry);
    tracing::debug!(env = ?settings.environment, command = ?cli.command, "marquee cli starting");

    match cli.command {
        Command::Serve => marquee_app::run(settings).await,
        Command::Migrate => {
            let applied = marquee_app::migrate(&settings).await?;
            println!("Applied {applied} migration(s).");
            Ok(())
        }
        Command::Client(command) => {
            let config = client_config(&settings.client, cli.api_url);
            let api: Arc<dyn MovieApi> = Arc::new(MovieClient::new(&config)?);
            run_client(command, api, &config).await
        }
    }
}

fn client_config(settings: &ClientSettings, api_url: Option<String>) -> ClientConfig {
    ClientConfig {
        base_url: api_url.unwrap_or_else(|| settings.api_base_url.clone()),
        request_timeout: Duration::from_millis(settings.request_timeout_ms),
        notification_ttl: Duration::from_millis(settings.notification_ttl_ms),
        redirect_delay: Duration::from_millis(settings.redirect_delay_ms),
    }
}

async fn run_client(
    command: ClientCommand,
    api: Arc<dyn MovieApi>,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    match command {
        ClientCommand::List { expand } => {
            let mut view = ListView::new(api, config);
            view.load().await;
            if let Some(note) = view.notification() {
                bail!("{}", note.text);
            }
            for id in &expand {
                view.toggle_summary(id);
            }
            print!("{}", render::table(&view.rows()));
            Ok(())
        }
        ClientCommand::Show { id } => {
            let movie = api.get(&id).await?;
            print!("{}", render::movie(&movie));
            Ok(())
        }
        ClientCommand::Create { name, img, summary } => {
            let mut form = MovieForm::create(api, config);
            form.set_field(Field::Name, name);
            form.set_field(Field::Img, img);
            form.set_field(Field::Summary, summary);
            submit(form).await
        }
        ClientCommand::Update {
            id,
            name,
            img,
            summary,
        } => {
            let mut form = MovieForm::update(api, config, id);
            if !form.load().await {
                let reason = form.banner().map(|banner| banner.text.clone());
                bail!("{}", reason.unwrap_or_else(|| "cancelled".to_string()));
            }
            for (field, value) in [(Field::Name, name), (Field::Img, img), (Field::Summary, summary)] {
                if let Some(value) = value {
                    form.set_field(field, value);
                }
            }
            submit(form).await
        }
        ClientCommand::Delete { id, yes } => {
            let mut view = ListView::new(api, config);
            view.load().await;
            if let Some(note) = view.notification() {
                bail!("{}", note.text);
            }

            let outcome = if yes {
                view.delete(&id, &|_: &str| true).await
            } else {
                view.delete(&id, &prompt_yes_no).await
            };

            match outcome {
                DeleteOutcome::Deleted | DeleteOutcome::Failed => {
                    let note = view
                        .notification()
                        .ok_or_else(|| anyhow!("delete finished without a result"))?;
                    if outcome == DeleteOutcome::Failed {
                        bail!("{}", note.text);
                    }
                    println!("{}", note.text);
                    Ok(())
                }
                DeleteOutcome::Declined => {
                    println!("Nothing deleted.");
                    Ok(())
                }
                DeleteOutcome::Missing => bail!("Movie not found"),
                DeleteOutcome::Cancelled => bail!("delete cancelled"),
            }
        }
    }
}

async fn submit(mut form: MovieForm) -> anyhow::Result<()> {
    match form.submit().await {
        SubmitOutcome::Saved { movie, .. } => {
            if let Some(banner) = form.banner() {
                println!("{}", banner.text);
            }
            print!("{}", render::movie(&movie));
            Ok(())
        }
        SubmitOutcome::Invalid => {
            eprint!("{}", render::field_errors(form.errors()));
            bail!("movie failed validation")
        }
        SubmitOutcome::Failed(err) => {
            eprint!("{}", render::field_errors(form.errors()));
            let banner = form.banner().map(|banner| banner.text.clone());
            Err(anyhow!(err).context(banner.unwrap_or_default()))
        }
        SubmitOutcome::Cancelled => bail!("submit cancelled"),
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"),
        Err(_) => false,
    }
}
