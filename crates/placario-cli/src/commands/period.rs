use clap::Subcommand;
use placario_core::period::{is_valid_period_kind, PeriodKind, VALID_TAGS};

#[derive(Subcommand)]
pub enum PeriodAction {
    /// List every period kind with its label and duration
    List,
    /// Check whether a tag is a member of the taxonomy
    Validate {
        /// Period tag (e.g. "monthly", "quinzenal")
        tag: String,
    },
    /// Show one kind's metadata as JSON
    Show {
        /// Period tag
        tag: String,
    },
}

pub fn run(action: PeriodAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PeriodAction::List => {
            let rows: Vec<serde_json::Value> = VALID_TAGS
                .iter()
                .filter_map(|tag| PeriodKind::from_tag(tag))
                .map(describe)
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        PeriodAction::Validate { tag } => {
            println!(
                "{}",
                if is_valid_period_kind(&tag) {
                    "valid"
                } else {
                    "invalid"
                }
            );
        }
        PeriodAction::Show { tag } => {
            let kind = PeriodKind::from_tag(&tag)
                .ok_or_else(|| format!("unknown period kind: {tag}"))?;
            println!("{}", serde_json::to_string_pretty(&describe(kind))?);
        }
    }
    Ok(())
}

fn describe(kind: PeriodKind) -> serde_json::Value {
    serde_json::json!({
        "tag": kind.as_tag(),
        "label": kind.label(),
        "duration_days": kind.duration_days(),
        "legacy": kind.is_legacy(),
    })
}
