//! Implementation of the `profile-lookup lookup` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{CandidateProfile, Config, LookupRequest};
use crate::infrastructure::build_lookup_service;

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Phone number to look up (takes precedence over --email)
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address to look up
    #[arg(long)]
    pub email: Option<String>,

    /// Task SID to link the resolved profile to
    #[arg(long, visible_alias = "task-id")]
    pub task_sid: Option<String>,

    /// Do not save the profile to the task's context
    #[arg(long)]
    pub no_save_to_context: bool,

    /// Trigger the AI summary step for the resolved profile
    #[arg(long)]
    pub post_summary: bool,
}

impl LookupArgs {
    pub fn to_request(&self) -> LookupRequest {
        LookupRequest {
            task_sid: self.task_sid.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            save_to_context: !self.no_save_to_context,
            post_summary: self.post_summary,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct LookupOutput {
    pub profile: Option<CandidateProfile>,
}

impl CommandOutput for LookupOutput {
    fn to_human(&self) -> String {
        let Some(profile) = &self.profile else {
            return "No profile found".to_string();
        };

        let mut lines = vec![format!("Profile {} ({})", profile.sid, profile.status)];
        for (key, value) in &profile.fields {
            let value = value
                .as_str()
                .map_or_else(|| value.to_string(), str::to_string);
            lines.push(format!("  {key}: {value}"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: LookupArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_lookup_service(config)?;
    let outcome = service.lookup(&args.to_request()).await?;

    output(
        &LookupOutput {
            profile: outcome.profile,
        },
        json_mode,
    );

    // The result is already printed; only keep the process alive until the
    // link settles. Its outcome was logged by the task itself.
    if let Some(link) = outcome.context_link {
        if let Err(err) = link.wait().await {
            tracing::debug!(error = %err, "context link did not succeed");
        }
    }

    Ok(())
}
