//! `wavespa login`: exchange credentials for a user token.

use chrono::{DateTime, Utc};
use serde::Serialize;

use wavespa_core::{Controller, ControllerConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct LoginView {
    user_id: String,
    expires_at: i64,
    expires: Option<DateTime<Utc>>,
}

pub async fn handle(config: &ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let token = Controller::login(config).await?;

    let view = LoginView {
        user_id: token.user_id,
        expires_at: token.expires_at,
        expires: DateTime::from_timestamp(token.expires_at, 0),
    };

    let out = output::render_single(
        &global.output,
        &view,
        |v| {
            let expires = v
                .expires
                .map_or_else(|| v.expires_at.to_string(), |t| t.to_rfc3339());
            format!("Logged in as {}\nToken expires {expires}", v.user_id)
        },
        |v| v.user_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
