//! CLI for the DermaFlow clinic manager.
//!
//! Each subcommand mounts one screen: it checks the session guard, runs the
//! screen's fetch or submit off the async runtime, and renders the terminal
//! state.

mod commands;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dermaflow_core::config;
use std::path::PathBuf;
use uuid::Uuid;

use commands::{
    run_add_client, run_add_photos, run_appointment, run_book, run_client, run_clients,
    run_dashboard, run_edit_client, run_login, run_logout, run_note, run_photos,
};

/// Top-level CLI for the DermaFlow clinic manager.
#[derive(Debug, Parser)]
#[command(name = "dermaflow")]
#[command(about = "DermaFlow: clinic clients, appointments, notes, and photos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Sign in and cache the session.
    Login {
        /// Account email.
        email: String,
        /// Password; prompted on stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and clear the cached session.
    Logout,

    /// Summary counts and the next upcoming appointments.
    Dashboard,

    /// List clients, with optional client-side search.
    Clients {
        /// Case-insensitive match against name, email, or phone.
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one client and their appointment history.
    Client {
        /// Client identifier.
        id: Uuid,
    },

    /// Create a client.
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a client; only the given fields change.
    EditClient {
        /// Client identifier.
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Book an appointment for a client (status starts as pending).
    Book {
        /// Client identifier.
        client_id: Uuid,
        /// Date and time, RFC 3339 or `YYYY-MM-DDTHH:MM` (local).
        #[arg(long)]
        at: String,
        /// Treatment label, e.g. "Botox".
        #[arg(long)]
        treatment: String,
        /// Duration in minutes.
        #[arg(long, default_value = "60")]
        duration: u32,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show one appointment and its session note.
    Appointment {
        /// Appointment identifier.
        id: Uuid,
    },

    /// Write or update the session note for an appointment.
    Note {
        /// Appointment identifier.
        appointment_id: Uuid,
        /// Treatment notes text.
        #[arg(long)]
        notes: Option<String>,
        /// Consent document to upload and attach.
        #[arg(long)]
        consent: Option<PathBuf>,
    },

    /// List a client's before/after photo pairs.
    Photos {
        /// Client identifier.
        client_id: Uuid,
    },

    /// Upload a before/after pair for a client.
    AddPhotos {
        /// Client identifier.
        client_id: Uuid,
        /// Before-treatment image file.
        #[arg(long)]
        before: PathBuf,
        /// After-treatment image file.
        #[arg(long)]
        after: PathBuf,
        /// Treatment date, `YYYY-MM-DD`.
        #[arg(long)]
        date: String,
        #[arg(long)]
        notes: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config for store {}", cfg.store.base_url);

        match cli.command {
            CliCommand::Login { email, password } => run_login(&cfg, email, password).await?,
            CliCommand::Logout => run_logout(&cfg).await?,
            command => {
                // Every data screen sits behind the session guard.
                let Some(shell) = shell::open(cfg).await? else {
                    return Ok(());
                };
                match command {
                    CliCommand::Dashboard => run_dashboard(&shell).await?,
                    CliCommand::Clients { search } => run_clients(&shell, search).await?,
                    CliCommand::Client { id } => run_client(&shell, id).await?,
                    CliCommand::AddClient {
                        name,
                        email,
                        phone,
                        notes,
                    } => run_add_client(&shell, name, email, phone, notes).await?,
                    CliCommand::EditClient {
                        id,
                        name,
                        email,
                        phone,
                        notes,
                    } => run_edit_client(&shell, id, name, email, phone, notes).await?,
                    CliCommand::Book {
                        client_id,
                        at,
                        treatment,
                        duration,
                        notes,
                    } => run_book(&shell, client_id, &at, treatment, duration, notes).await?,
                    CliCommand::Appointment { id } => run_appointment(&shell, id).await?,
                    CliCommand::Note {
                        appointment_id,
                        notes,
                        consent,
                    } => run_note(&shell, appointment_id, notes, consent).await?,
                    CliCommand::Photos { client_id } => run_photos(&shell, client_id).await?,
                    CliCommand::AddPhotos {
                        client_id,
                        before,
                        after,
                        date,
                        notes,
                    } => run_add_photos(&shell, client_id, before, after, &date, notes).await?,
                    CliCommand::Login { .. } | CliCommand::Logout => unreachable!(),
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
