//! `sred feedback`: record, inspect, export and sync reviewer feedback.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Subcommand, ValueEnum};
use sred_core::{FeedbackRecord, Rating, Section};
use sred_store::{FeedbackLog, write_preferences};
use sred_sync::AiClient;

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// Record a judgement on one paragraph.
    Add {
        #[arg(long)]
        report_id: String,
        /// 242, 244 or 246.
        #[arg(long)]
        section: Section,
        #[arg(long, default_value_t = 0)]
        paragraph_index: usize,
        #[arg(long, value_enum)]
        rating: RatingArg,
        /// A word marked as bad (repeatable).
        #[arg(long = "bad-word")]
        bad_words: Vec<String>,
        #[arg(long)]
        comment: Option<String>,
        /// Paragraph text.
        paragraph: String,
    },
    /// List recorded feedback.
    List {
        /// Only records not yet pushed to the server.
        #[arg(long)]
        pending: bool,
    },
    /// Write preference-tuning data as JSON Lines.
    Export {
        #[arg(long, default_value = "preferences.jsonl")]
        out: PathBuf,
    },
    /// Push pending feedback to the report AI server.
    Push,
    /// Print the feedback held by the report AI server.
    Pull,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RatingArg {
    Up,
    Down,
}

impl From<RatingArg> for Rating {
    fn from(r: RatingArg) -> Self {
        match r {
            RatingArg::Up => Rating::Up,
            RatingArg::Down => Rating::Down,
        }
    }
}

pub async fn run(client: &AiClient, data_dir: &Path, action: FeedbackAction) -> anyhow::Result<()> {
    let log = FeedbackLog::open(data_dir)
        .with_context(|| format!("opening feedback log in {}", data_dir.display()))?;

    match action {
        FeedbackAction::Add {
            report_id,
            section,
            paragraph_index,
            rating,
            bad_words,
            comment,
            paragraph,
        } => {
            let record = new_record(
                &log,
                report_id,
                section,
                paragraph_index,
                rating.into(),
                bad_words,
                comment,
                paragraph,
            )?;
            log.append(&record)?;
            println!("recorded {}", record.id);
        }
        FeedbackAction::List { pending } => {
            let records = if pending { log.pending()? } else { log.records()? };
            for r in &records {
                let rating = match r.rating {
                    Rating::Up => "+",
                    Rating::Down => "-",
                };
                println!(
                    "{:<24} {} line {} para {:<3} {}",
                    r.id,
                    rating,
                    r.section.line(),
                    r.paragraph_index,
                    preview(&r.paragraph, 60)
                );
            }
            eprintln!("  {} records ({} synced)", log.len()?, log.synced()?);
        }
        FeedbackAction::Export { out } => {
            let n = write_preferences(&log.records()?, &out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {n} examples to {}", out.display());
        }
        FeedbackAction::Push => {
            let pending = log.pending()?;
            if pending.is_empty() {
                println!("nothing to push");
                return Ok(());
            }
            let accepted = client
                .push_feedback(&pending)
                .await
                .context("pushing feedback to report server")?;
            let advanced = usize::try_from(accepted)
                .unwrap_or(usize::MAX)
                .min(pending.len());
            if advanced < pending.len() {
                tracing::warn!(
                    accepted = advanced,
                    sent = pending.len(),
                    "server accepted only part of the batch"
                );
            }
            let cursor = log.mark_synced(advanced)?;
            println!("pushed {advanced} of {} records (cursor at {cursor})", pending.len());
        }
        FeedbackAction::Pull => {
            let records = client
                .pull_feedback()
                .await
                .context("pulling feedback from report server")?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn new_record(
    log: &FeedbackLog,
    report_id: String,
    section: Section,
    paragraph_index: usize,
    rating: Rating,
    bad_words: Vec<String>,
    comment: Option<String>,
    paragraph: String,
) -> anyhow::Result<FeedbackRecord> {
    if paragraph.trim().is_empty() {
        anyhow::bail!("paragraph text is empty");
    }
    let now = Utc::now();
    Ok(FeedbackRecord {
        id: format!("fb-{}-{}", now.timestamp_millis(), log.len()?),
        report_id,
        section,
        paragraph_index,
        paragraph,
        rating,
        bad_words: bad_words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect(),
        comment,
        created_at: now.to_rfc3339(),
    })
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars - 3).collect();
        format!("{cut}...")
    }
}
