//! # presence-cli
//!
//! Text front end over the presence services. Parses a command, boots the
//! session from configuration and prints the result.

pub mod cli;
pub mod render;

use anyhow::{bail, Context};
use chrono::Utc;
use presence_common::{AppError, ClientConfig};
use presence_service::{
    login_error_message, AuthService, PresenceViewModel, ServiceContext,
};
use tracing::{debug, info};

pub use cli::{Cli, Command};

/// Run one command against the configured service
pub async fn run(cli: Cli, config: ClientConfig) -> anyhow::Result<()> {
    // Session must be restored before any command looks at it
    let ctx = ServiceContext::from_config(&config).context("failed to restore session")?;
    debug!(route = ?ctx.navigator().current(), "Booted");

    match cli.command {
        Command::Login { username, password } => {
            let password = password
                .or_else(|| config.credentials.as_ref().map(|c| c.password.clone()))
                .context("a password is required (--password or PRESENCE_PASSWORD)")?;
            login(&ctx, &username, &password).await
        }
        Command::Logout => {
            AuthService::new(&ctx).logout()?;
            println!("Logged out");
            Ok(())
        }
        Command::Team { status } => {
            ensure_session(&ctx, &config).await?;
            let vm = PresenceViewModel::from_context(&ctx);
            for value in status {
                vm.toggle_filter(value);
            }
            let result = vm.refresh_team().await;
            report(&vm, result)
        }
        Command::Status { status } => {
            ensure_session(&ctx, &config).await?;
            let vm = PresenceViewModel::from_context(&ctx);
            let result = vm.change_own_status(status).await;
            if vm.own_status() == Some(status) {
                println!("Status set to {status}");
            }
            report(&vm, result)
        }
        Command::Whoami => {
            println!("{}", render::session(&ctx.session().snapshot(), ctx.navigator().current()));
            Ok(())
        }
    }
}

async fn login(ctx: &ServiceContext, username: &str, password: &str) -> anyhow::Result<()> {
    match AuthService::new(ctx).login(username, password).await {
        Ok(()) => {
            println!("Logged in as {username}");
            Ok(())
        }
        Err(e) => bail!(login_error_message(&e)),
    }
}

/// Sign in with configured credentials when nothing was restored
async fn ensure_session(ctx: &ServiceContext, config: &ClientConfig) -> anyhow::Result<()> {
    if ctx.session().is_authenticated() {
        return Ok(());
    }

    match &config.credentials {
        Some(credentials) => {
            info!(username = %credentials.username, "Signing in with configured credentials");
            login(ctx, &credentials.username, &credentials.password).await
        }
        None => bail!("not logged in; run `team-presence login <username>` first"),
    }
}

fn report(vm: &PresenceViewModel, result: Result<(), AppError>) -> anyhow::Result<()> {
    if let Err(e) = result {
        if e.is_authentication_lost() {
            bail!("session expired; log in again");
        }
        if let Some(message) = vm.last_error() {
            bail!(message);
        }
        return Err(e.into());
    }

    print!("{}", render::dashboard(vm, Utc::now()));
    Ok(())
}
