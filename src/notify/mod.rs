// Notification Module
// Copyright (C) 2025 CertSentry Team
// Licensed under GPL-3.0
// Eligibility filtering, message rendering, SMTP transport, and the
// dispatch orchestration that records every attempt in the ledger

pub mod dispatch;
pub mod eligibility;
pub mod smtp;
pub mod template;
pub mod tier;

pub use dispatch::{run_notifications, RunDetail, RunOutcome, RunSummary};
pub use eligibility::{
    select_recipients, EligibilityReport, Recipient, SkipReason, SkippedEntry, COOLDOWN_DAYS,
};
pub use smtp::{MailTransport, OutboundEmail, SmtpMailer};
pub use tier::Tier;
