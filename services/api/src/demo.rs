use crate::infra::InMemoryCandidateDirectory;
use async_trait::async_trait;
use chrono::Utc;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use recruiter::error::AppError;
use recruiter::workflows::shortlist::{
    format_cv_content, redact_pii, BlindError, CandidateDirectory, CandidateId, CandidateMatch,
    CartStore, CartStoreError, CvBlinder, MatchStatus, Notification, Notifier, Severity,
    ShortlistService,
};

#[derive(Args, Debug, Default)]
pub(crate) struct RedactArgs {
    /// CV document to redact. Reads stdin when omitted.
    pub(crate) input: Option<PathBuf>,
    /// Candidate name whose tokens should also be masked.
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Normalize the document layout after redaction.
    #[arg(long)]
    pub(crate) format: bool,
    /// Write the result to a file instead of stdout.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Employer address to share the shortlist with.
    #[arg(long)]
    pub(crate) recipient: Option<String>,
    /// Stop after the blinding step instead of sharing the cart.
    #[arg(long)]
    pub(crate) skip_share: bool,
}

pub(crate) fn run_redact(args: RedactArgs) -> Result<(), AppError> {
    let RedactArgs {
        input,
        name,
        format,
        output,
    } = args;

    let content = match input {
        Some(path) => fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    let redacted = redact_pii(&content, name.as_deref());
    let result = if format {
        format_cv_content(&redacted)
    } else {
        redacted
    };

    match output {
        Some(path) => fs::write(path, result)?,
        None => println!("{result}"),
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        recipient,
        skip_share,
    } = args;
    let recipient = recipient.unwrap_or_else(|| "talent-team@example.com".to_string());

    let directory = Arc::new(InMemoryCandidateDirectory::default());
    let roster = sample_roster();
    directory.seed(roster.clone());

    let service = Arc::new(ShortlistService::open(
        directory.clone(),
        Arc::new(LocalCvBlinder),
        Arc::new(ConsoleNotifier),
        EphemeralCartStore::default(),
    ));

    println!("Shortlist workflow demo");
    println!("\nMatched candidates for {}", roster[0].job_role);
    for candidate in &roster {
        let summary = candidate.summary();
        println!(
            "- {} | {} | score {} | {}",
            summary.id, summary.name, summary.match_score, summary.status
        );
    }

    println!("\nStaging the top two candidates");
    for candidate in roster.iter().take(2) {
        service.add_to_cart(candidate.clone()).await;
    }
    println!("Cart holds {} candidates", service.cart_count().await);

    let lead = &roster[0].id;
    println!("\nRedacted preview for {lead}");
    match service.preview(lead, false).await {
        Ok(view) => {
            println!(
                "contact: {} / {} / {}",
                view.contact.email, view.contact.phone, view.contact.location
            );
            println!("{}", view.body);
        }
        Err(err) => println!("preview unavailable: {err}"),
    }

    println!("\nRevealed preview for {lead}");
    match service.preview(lead, true).await {
        Ok(view) => println!(
            "contact: {} / {} / {}",
            view.contact.email, view.contact.phone, view.contact.location
        ),
        Err(err) => println!("preview unavailable: {err}"),
    }

    println!("\nBlinding every CV in the cart");
    let report = service.blind_all().await;
    println!("{}", report.summary().message());
    for id in &report.succeeded {
        println!("- {id} blinded");
    }

    if skip_share {
        println!("\nSkipping the share step as requested");
        return Ok(());
    }

    println!("\nSharing the cart with {recipient}");
    service.share(&recipient).await;

    println!("\nFinal candidate statuses");
    for candidate in &roster {
        if let Ok(Some(record)) = directory.fetch_match(&candidate.id) {
            println!("- {} | {}", record.name, record.status.label());
        }
    }

    Ok(())
}

/// Offline stand-in for the external blinding service, backed by the local
/// pattern redactor.
struct LocalCvBlinder;

#[async_trait]
impl CvBlinder for LocalCvBlinder {
    async fn blind(&self, cv_content: &str) -> Result<String, BlindError> {
        Ok(redact_pii(cv_content, None))
    }
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let severity = match notification.severity {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("[{severity}] {}: {}", notification.title, notification.description);
    }
}

#[derive(Default)]
struct EphemeralCartStore {
    entries: Mutex<Vec<CandidateMatch>>,
}

impl CartStore for EphemeralCartStore {
    fn save(&self, entries: &[CandidateMatch]) -> Result<(), CartStoreError> {
        *self.entries.lock().expect("cart store mutex poisoned") = entries.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<CandidateMatch>, CartStoreError> {
        Ok(self
            .entries
            .lock()
            .expect("cart store mutex poisoned")
            .clone())
    }
}

fn sample_roster() -> Vec<CandidateMatch> {
    let job_id = "job-postgres-platform".to_string();
    let job_description =
        "Own the storage layer of a multi-tenant analytics platform.".to_string();
    let job_role = "Senior Platform Engineer".to_string();

    vec![
        CandidateMatch {
            id: CandidateId("cand-priya".to_string()),
            name: "Priya Nair".to_string(),
            role: "Platform Engineer".to_string(),
            location: "Manchester".to_string(),
            experience: "8 years".to_string(),
            skills: vec![
                "Rust".to_string(),
                "PostgreSQL".to_string(),
                "Kubernetes".to_string(),
            ],
            email: "priya.nair@example.com".to_string(),
            phone: "+44 7700 900123".to_string(),
            cv_content: "PROFILE\nPlatform engineer focused on storage reliability.\n\nEXPERIENCE\nLed the shard rebalancer rewrite at a payments startup.\n\nContact: priya.nair@example.com, +44 7700 900123, 22 Castle Street\n".to_string(),
            match_score: 91.4,
            job_id: job_id.clone(),
            job_description: job_description.clone(),
            job_role: job_role.clone(),
            matched_at: Utc::now(),
            status: MatchStatus::Matched,
        },
        CandidateMatch {
            id: CandidateId("cand-tomas".to_string()),
            name: "Tomas Lindqvist".to_string(),
            role: "Backend Engineer".to_string(),
            location: "Gothenburg".to_string(),
            experience: "6 years".to_string(),
            skills: vec!["Rust".to_string(), "Kafka".to_string()],
            email: "tomas.l@example.com".to_string(),
            phone: "+46 70 123 45 67".to_string(),
            cv_content: "SUMMARY\nBackend engineer with streaming pipeline experience.\n\nContact: tomas.l@example.com\n".to_string(),
            match_score: 84.0,
            job_id: job_id.clone(),
            job_description: job_description.clone(),
            job_role: job_role.clone(),
            matched_at: Utc::now(),
            status: MatchStatus::Matched,
        },
        CandidateMatch {
            id: CandidateId("cand-amara".to_string()),
            name: "Amara Okafor".to_string(),
            role: "Site Reliability Engineer".to_string(),
            location: "Lagos".to_string(),
            experience: "5 years".to_string(),
            skills: vec!["Terraform".to_string(), "Go".to_string()],
            email: "amara.okafor@example.com".to_string(),
            phone: "+234 801 234 5678".to_string(),
            cv_content: "PROFILE\nSRE who keeps error budgets honest.\n\nContact: amara.okafor@example.com\n".to_string(),
            match_score: 72.8,
            job_id,
            job_description,
            job_role,
            matched_at: Utc::now(),
            status: MatchStatus::Matched,
        },
    ]
}
