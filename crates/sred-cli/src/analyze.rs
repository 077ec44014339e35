//! `sred analyze`: score a report and print the result.

use std::path::Path;

use anyhow::{Context, bail};
use sred_core::{ReportText, RuleBook, analyze_report};

pub fn run(
    advancement: Option<&Path>,
    uncertainty: Option<&Path>,
    work: Option<&Path>,
    rules: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let rules = load_rules(rules)?;
    let report = ReportText {
        advancement: read_optional(advancement)?,
        uncertainty: read_optional(uncertainty)?,
        work: read_optional(work)?,
    };

    if report.is_blank() {
        bail!("nothing to analyze: provide text for at least one of --advancement, --uncertainty, --work");
    }

    let analysis = analyze_report(&report, &rules);
    tracing::info!(
        overall = analysis.overall_score,
        status = analysis.overall_status.label(),
        "report analysed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        crate::display::print_report_card(&analysis, &rules);
    }
    Ok(())
}

pub fn load_rules(path: Option<&Path>) -> anyhow::Result<RuleBook> {
    match path {
        None => Ok(RuleBook::builtin()),
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .with_context(|| format!("reading rule book {}", p.display()))?;
            let book = RuleBook::from_json(&raw)
                .with_context(|| format!("loading rule book {}", p.display()))?;
            tracing::info!(path = %p.display(), "loaded custom rule book");
            Ok(book)
        }
    }
}

pub fn read_optional(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        None => Ok(String::new()),
        Some(p) => read_text(p),
    }
}

/// Read a UTF-8 text file, dropping a leading byte order mark.
pub fn read_text(path: &Path) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(match raw.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_reads_as_empty() {
        assert_eq!(read_optional(None).unwrap(), "");
    }

    #[test]
    fn blank_submission_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();
        let err = run(Some(file.path()), None, None, None, true).unwrap_err();
        assert!(err.to_string().starts_with("nothing to analyze"));
    }

    #[test]
    fn bom_only_file_is_blank() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}").unwrap();
        assert_eq!(read_optional(Some(file.path())).unwrap(), "");
        let err = run(Some(file.path()), None, None, None, true).unwrap_err();
        assert!(err.to_string().starts_with("nothing to analyze"));
    }

    #[test]
    fn bom_is_stripped_from_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}Line 242 text").unwrap();
        assert_eq!(read_text(file.path()).unwrap(), "Line 242 text");
    }

    #[test]
    fn invalid_rule_book_is_rejected() {
        let mut book = RuleBook::builtin();
        book.work.required_elements.clear();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&book).unwrap()).unwrap();
        assert!(load_rules(Some(file.path())).is_err());
    }

    #[test]
    fn builtin_rules_by_default() {
        assert_eq!(load_rules(None).unwrap(), RuleBook::builtin());
    }
}
