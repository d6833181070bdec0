use clap::Subcommand;
use placario_core::{resolve_guard, return_link, AuthContext, Config};

#[derive(Subcommand)]
pub enum RouteAction {
    /// Decide what a guarded view should do for the current session
    Guard,
    /// Resolve the not-found return link for the current session
    NotFound,
}

pub fn run(action: RouteAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut ctx = AuthContext::bootstrap(config.api(), config.warning_threshold_ms());
    // Observe a possible expiry before deciding.
    ctx.tick(chrono::Utc::now());
    let state = ctx.snapshot();

    match action {
        RouteAction::Guard => {
            let outcome = resolve_guard(&state);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        RouteAction::NotFound => {
            let link = return_link(&state);
            println!("{}", serde_json::to_string_pretty(&link)?);
        }
    }
    Ok(())
}
