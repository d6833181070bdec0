use std::cell::Cell;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use placario_core::{AuthContext, Config, Event, WarningPrompt};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Print current session state as JSON
    Status,
    /// Authenticate against the management API
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the session and drop stored credentials
    Logout,
    /// Renew the session without re-login
    Renew,
    /// Watch the session, surfacing the expiry warning
    Watch {
        /// Tick interval in seconds
        #[arg(long, default_value = "1")]
        interval_secs: u64,
    },
}

fn bootstrap(config: &Config) -> AuthContext {
    AuthContext::bootstrap(config.api(), config.warning_threshold_ms())
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        SessionAction::Status => {
            let mut ctx = bootstrap(&config);
            let now = Utc::now();
            // Observe a possible expiry before reporting.
            ctx.tick(now);
            println!(
                "{}",
                serde_json::to_string_pretty(&ctx.snapshot_event(now))?
            );
        }
        SessionAction::Login { username, password } => {
            let rt = tokio::runtime::Runtime::new()?;
            let mut ctx = bootstrap(&config);
            let event = rt.block_on(ctx.login(&username, &password))?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Logout => {
            let mut ctx = bootstrap(&config);
            let event = ctx.logout()?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Renew => {
            let rt = tokio::runtime::Runtime::new()?;
            let mut ctx = bootstrap(&config);
            let event = rt.block_on(ctx.renew())?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        SessionAction::Watch { interval_secs } => watch(&config, interval_secs)?,
    }
    Ok(())
}

/// Tick the session monitor on an interval, printing lifecycle events as
/// JSON lines. When the warning fires, either renew automatically
/// (`session.auto_renew`) or read `r`/`d` from stdin.
fn watch(config: &Config, interval_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut ctx = bootstrap(config);
        if !ctx.is_authenticated() {
            return Err("not authenticated".into());
        }
        println!("{}", serde_json::to_string(&ctx.snapshot_event(Utc::now()))?);

        let renew_requested = Cell::new(false);
        let dismiss_requested = Cell::new(false);
        let mut prompt = WarningPrompt::new(
            || renew_requested.set(true),
            || dismiss_requested.set(true),
        );

        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut warning_open = false;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Some(event) = ctx.tick(Utc::now()) {
                        println!("{}", serde_json::to_string(&event)?);
                        match event {
                            Event::WarningShown { .. } => {
                                if config.session.auto_renew {
                                    renew_requested.set(true);
                                } else {
                                    warning_open = true;
                                    eprintln!("Sessão prestes a expirar. [r] renovar / [d] dispensar");
                                }
                            }
                            Event::SessionExpired { .. } => break,
                            _ => {}
                        }
                    }
                }
                line = lines.next_line(), if warning_open => {
                    match line?.as_deref() {
                        Some("r") => prompt.renew(),
                        Some("d") => prompt.dismiss(),
                        Some(_) => eprintln!("[r] renovar / [d] dispensar"),
                        None => break, // stdin closed
                    }
                }
            }

            if renew_requested.replace(false) {
                match ctx.renew().await {
                    Ok(event) => {
                        println!("{}", serde_json::to_string(&event)?);
                        warning_open = false;
                    }
                    // Renew stays re-invocable: keep the prompt open.
                    Err(e) => eprintln!("renewal failed: {e}"),
                }
            }
            if dismiss_requested.replace(false) {
                if let Some(event) = ctx.dismiss(Utc::now()) {
                    println!("{}", serde_json::to_string(&event)?);
                }
                warning_open = false;
            }
        }
        Ok(())
    })
}
