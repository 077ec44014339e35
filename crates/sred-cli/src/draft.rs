//! `sred generate` and `sred improve`.

use std::path::Path;

use anyhow::Context;
use sred_core::{GeneratedSections, ProjectInput, Section, SectionSelector};
use sred_draft::{
    SYSTEM_PROMPT, build_generate_prompt, build_improve_prompt, generate_sections, split_sections,
    template_improve,
};
use sred_sync::{AiClient, GenerateRequest};

use crate::analyze::read_text;

pub async fn generate(
    client: &AiClient,
    project_path: &Path,
    selector: SectionSelector,
    remote: bool,
    print_prompt: bool,
) -> anyhow::Result<()> {
    let project = load_project(project_path)?;

    if print_prompt {
        println!("{}", model_prompt(&build_generate_prompt(&project, selector)));
        return Ok(());
    }

    let sections = if remote {
        let request = GenerateRequest {
            section: selector,
            project,
            ..Default::default()
        };
        let resp = client
            .generate(&request)
            .await
            .context("requesting generation from report server")?;
        eprintln!("  Generated by server ({} mode)", resp.mode);
        resplit_combined(resp.sections, selector)
    } else {
        generate_sections(&project, selector)
    };

    print_sections(&sections);
    Ok(())
}

pub async fn improve(
    client: &AiClient,
    path: &Path,
    section: Section,
    remote: bool,
    print_prompt: bool,
) -> anyhow::Result<()> {
    let text = read_text(path)?;
    if text.trim().is_empty() {
        anyhow::bail!("{} is empty", path.display());
    }

    if print_prompt {
        println!("{}", model_prompt(&build_improve_prompt(&text, section)));
        return Ok(());
    }

    let improved = if remote {
        let resp = client
            .improve(&text, section)
            .await
            .context("requesting improvement from report server")?;
        eprintln!("  Improved by server ({} mode)", resp.mode);
        resp.improved
    } else {
        template_improve(&text, section)
    };

    println!("{improved}");
    Ok(())
}

fn load_project(path: &Path) -> anyhow::Result<ProjectInput> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).with_context(|| format!("parsing project {}", path.display()))
}

/// System and user prompt as the report model receives them.
fn model_prompt(user: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\n{user}")
}

/// A server in model mode may return the whole draft under `line242`.
fn resplit_combined(sections: GeneratedSections, selector: SectionSelector) -> GeneratedSections {
    if selector == SectionSelector::All
        && sections.line244.is_none()
        && sections.line246.is_none()
        && let Some(text) = &sections.line242
    {
        return split_sections(text, selector);
    }
    sections
}

fn print_sections(sections: &GeneratedSections) {
    let mut first = true;
    for section in Section::ALL {
        if let Some(text) = sections.get(section) {
            if !first {
                println!();
            }
            println!("{text}");
            first = false;
        }
    }
}
