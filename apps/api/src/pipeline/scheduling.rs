//! Interview scheduling: composes invitations and hands them to an outbox.
//!
//! Delivery is someone else's job: accepted invitations land in the
//! `interview_invitations` table with status `queued` for the mail relay.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::candidate::InterviewInvitationRow;

pub const INVITATION_SUBJECT: &str = "Interview Invitation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub recipient: String,
    pub sender: Option<String>,
    pub job_role: String,
    pub subject: String,
    pub body: String,
    pub meeting_url: String,
}

/// Per-address result. One bad address never stops the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvitationOutcome {
    Queued {
        recipient: String,
        invitation_id: Uuid,
        meeting_url: String,
    },
    Rejected {
        recipient: String,
        reason: String,
    },
    Failed {
        recipient: String,
        error: String,
    },
}

impl InvitationOutcome {
    #[cfg(test)]
    pub fn recipient(&self) -> &str {
        match self {
            InvitationOutcome::Queued { recipient, .. }
            | InvitationOutcome::Rejected { recipient, .. }
            | InvitationOutcome::Failed { recipient, .. } => recipient,
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, InvitationOutcome::Queued { .. })
    }

    /// One-line human summary used in reports.
    pub fn summary_line(&self) -> String {
        match self {
            InvitationOutcome::Queued {
                recipient,
                meeting_url,
                ..
            } => format!("Invitation queued for {recipient} with meeting link: {meeting_url}"),
            InvitationOutcome::Rejected { recipient, reason } => {
                format!("Invitation not sent to '{recipient}': {reason}")
            }
            InvitationOutcome::Failed { recipient, error } => {
                format!("Failed to queue invitation for {recipient}: {error}")
            }
        }
    }
}

#[async_trait]
pub trait InvitationOutbox: Send + Sync {
    async fn enqueue(&self, invitation: &Invitation) -> Result<Uuid, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgInvitationOutbox {
    pool: PgPool,
}

impl PgInvitationOutbox {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recently queued invitations first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<InterviewInvitationRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, recipient, sender, job_role, subject, body, meeting_url, status, created_at
            FROM interview_invitations
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl InvitationOutbox for PgInvitationOutbox {
    async fn enqueue(&self, invitation: &Invitation) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            INSERT INTO interview_invitations
                (recipient, sender, job_role, subject, body, meeting_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'queued')
            RETURNING id
            "#,
        )
        .bind(&invitation.recipient)
        .bind(&invitation.sender)
        .bind(&invitation.job_role)
        .bind(&invitation.subject)
        .bind(&invitation.body)
        .bind(&invitation.meeting_url)
        .fetch_one(&self.pool)
        .await
    }
}

pub fn compose_invitation(
    recipient: &str,
    job_role: &str,
    meeting_url: &str,
    sender: Option<&str>,
) -> Invitation {
    let body = format!(
        "Dear Candidate,\n\n\
         You have been selected for an interview for the {job_role} position.\n\
         Please join us using this meeting link: {meeting_url}\n\n\
         Best regards,\n\
         HR Team"
    );

    Invitation {
        recipient: recipient.to_string(),
        sender: sender.map(str::to_string),
        job_role: job_role.to_string(),
        subject: INVITATION_SUBJECT.to_string(),
        body,
        meeting_url: meeting_url.to_string(),
    }
}

/// Cheap shape check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn validate_address(raw: &str) -> Result<String, String> {
    let address = raw.trim();
    if address.is_empty() {
        return Err("blank address".to_string());
    }
    if address.chars().any(char::is_whitespace) {
        return Err("address contains whitespace".to_string());
    }

    let mut parts = address.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("address must contain exactly one '@'".to_string());
    };
    if local.is_empty() {
        return Err("missing local part".to_string());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("invalid domain".to_string());
    }

    Ok(address.to_string())
}

/// Splits comma-separated entries, so `["a@x.io, b@y.io"]` yields two recipients.
pub fn expand_addresses(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.split(','))
        .map(|e| e.trim().to_string())
        .collect()
}

pub async fn schedule_interviews(
    outbox: &dyn InvitationOutbox,
    addresses: &[String],
    job_role: &str,
    meeting_url: &str,
    sender: Option<&str>,
) -> Vec<InvitationOutcome> {
    let mut outcomes = Vec::new();

    for raw in expand_addresses(addresses) {
        let recipient = match validate_address(&raw) {
            Ok(address) => address,
            Err(reason) => {
                warn!(recipient = %raw, %reason, "Rejected interview invitation address");
                outcomes.push(InvitationOutcome::Rejected {
                    recipient: raw,
                    reason,
                });
                continue;
            }
        };

        let invitation = compose_invitation(&recipient, job_role, meeting_url, sender);
        match outbox.enqueue(&invitation).await {
            Ok(invitation_id) => {
                info!(%recipient, %invitation_id, "Interview invitation queued");
                outcomes.push(InvitationOutcome::Queued {
                    recipient,
                    invitation_id,
                    meeting_url: meeting_url.to_string(),
                });
            }
            Err(e) => {
                warn!(%recipient, error = %e, "Failed to queue interview invitation");
                outcomes.push(InvitationOutcome::Failed {
                    recipient,
                    error: e.to_string(),
                });
            }
        }
    }

    outcomes
}
