//! `harmony`: journal entries with mental-health risk predictions.
//!
//! Stands in for the presentation layer: every subcommand is one user
//! action. Models are loaded once at startup; a missing artifact aborts
//! before any command runs.

mod display;

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use harmony_ai::{DualPrediction, load_predictor};
use harmony_core::{Metric, NewNote};
use harmony_store::{NoteStore, UserStore};
use tracing::info;

#[derive(Parser)]
#[command(name = "harmony", version, about = "Project Harmony journaling service")]
struct Cli {
    /// Directory with `depression/` and `schizophrenia/` model artifacts.
    #[arg(long, env = "HARMONY_MODELS_DIR", default_value = "models")]
    models_dir: PathBuf,

    /// Supabase project URL.
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: String,

    /// Supabase service key.
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    supabase_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run both classifiers over a text without saving anything.
    Predict { text: String },
    /// Predict from the body, then save a new note.
    Save {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// List a user's notes, newest first.
    List {
        #[arg(long)]
        user: i64,
    },
    /// Delete a note by id.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Re-predict from the new body, then replace an existing note.
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        user: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Print the (timestamp, score) series for one metric.
    Series {
        #[arg(long)]
        user: i64,
        #[arg(long, value_enum)]
        metric: MetricArg,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Check credentials.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Depression,
    Schizophrenia,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Depression => Metric::Depression,
            MetricArg::Schizophrenia => Metric::Schizophrenia,
        }
    }
}

fn new_note(user_id: i64, title: String, body: String, p: &DualPrediction) -> NewNote {
    NewNote {
        user_id,
        title,
        body,
        date_time: Utc::now().to_rfc3339(),
        pred_depression: p.depression,
        pred_schizophrenia: p.schizophrenia,
        prediction_message: p.message.trim().to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // Startup precondition: the service does not run without its models.
    let predictor = load_predictor(&cli.models_dir).context("loading model artifacts")?;
    let notes = NoteStore::new(cli.supabase_url.clone(), cli.supabase_key.clone());
    let users = UserStore::new(cli.supabase_url, cli.supabase_key);
    info!(version = env!("CARGO_PKG_VERSION"), "harmony ready");

    match cli.command {
        Command::Predict { text } => {
            let p = predictor.predict_both(&text)?;
            display::print_prediction(&p);
        }
        Command::Save { user, title, body } => {
            anyhow::ensure!(!title.trim().is_empty(), "title must not be empty");
            anyhow::ensure!(!body.trim().is_empty(), "body must not be empty");
            let p = predictor.predict_both(&body)?;
            let created = notes.save_note(&new_note(user, title, body, &p)).await?;
            println!("Saved note {}: {}", created.id, created.prediction_message);
        }
        Command::List { user } => {
            display::print_notes(&notes.list_notes(user).await?);
        }
        Command::Delete { id } => {
            notes.delete_note(id).await?;
            println!("Deleted note {id}.");
        }
        Command::Edit {
            id,
            user,
            title,
            body,
        } => {
            anyhow::ensure!(!title.trim().is_empty(), "title must not be empty");
            anyhow::ensure!(!body.trim().is_empty(), "body must not be empty");
            // New prediction comes from the new body before anything is
            // written; the old row is then dropped and recreated.
            let p = predictor.predict_both(&body)?;
            let replaced = notes
                .replace_note(id, &new_note(user, title, body, &p))
                .await?;
            println!("Updated note {}: {}", replaced.id, replaced.prediction_message);
        }
        Command::Series { user, metric } => {
            let metric = Metric::from(metric);
            let points = notes.time_series(user, metric).await?;
            display::print_series(metric, &points);
        }
        Command::Register {
            email,
            name,
            password,
        } => {
            let user = users.register(&email, &name, &password).await?;
            println!("Account created for {}. You can now log in.", user.email);
        }
        Command::Login { email, password } => {
            let user = users.login(&email, &password).await?;
            println!("Logged in as {} ({}).", user.name, user.email);
        }
    }

    Ok(())
}
