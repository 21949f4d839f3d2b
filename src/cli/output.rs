use crate::report::Report;
use crate::Severity;
use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything found in one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub content: String,
    pub reports: Vec<Report>,
}

/// 1-based line and column of a byte offset. Columns count grapheme
/// clusters, like an editor does.
pub fn line_col(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].graphemes(true).count() + 1;
    (line, column)
}

#[derive(Debug, Serialize)]
struct JsonIssue<'a> {
    file: String,
    line: usize,
    column: usize,
    end_line: usize,
    end_column: usize,
    #[serde(flatten)]
    report: &'a Report,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    files_checked: usize,
    total_issues: usize,
    issues: Vec<JsonIssue<'a>>,
}

pub fn print_reports(
    files: &[FileReport],
    colored_output: bool,
    format: OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            for file in files {
                print_text_reports(file, colored_output);
            }
            Ok(())
        }
        OutputFormat::Json => print_json_reports(files),
    }
}

fn severity_label(severity: Severity, colored_output: bool) -> String {
    let label = match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    if !colored_output {
        return format!("{:<7}", label);
    }
    let padded = format!("{:<7}", label);
    match severity {
        Severity::Info => padded.cyan().to_string(),
        Severity::Warning => padded.yellow().to_string(),
        Severity::Error => padded.red().bold().to_string(),
    }
}

fn print_text_reports(file: &FileReport, colored_output: bool) {
    if file.reports.is_empty() {
        return;
    }

    let file_name = file.path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for report in &file.reports {
        let (line, column) = line_col(&file.content, report.loc_start);
        let line_info = format!("{}:{}", line, column);
        let severity = severity_label(report.severity, colored_output);

        if colored_output {
            println!(
                "  {} {} {} {}",
                line_info.blue().bold(),
                severity,
                report.message,
                report.rule.to_string().dimmed()
            );
            if let Some(fix) = &report.fix {
                let text = if fix.text.is_empty() { "(remove)" } else { fix.text.as_str() };
                println!("    {} {}", "→".dimmed(), text.green());
            }
        } else {
            println!("  {} {} {} {}", line_info, severity, report.message, report.rule);
            if let Some(fix) = &report.fix {
                let text = if fix.text.is_empty() { "(remove)" } else { fix.text.as_str() };
                println!("    → {}", text);
            }
        }
    }
}

fn print_json_reports(files: &[FileReport]) -> serde_json::Result<()> {
    let issues: Vec<JsonIssue> = files
        .iter()
        .flat_map(|file| {
            file.reports.iter().map(move |report| {
                let (line, column) = line_col(&file.content, report.loc_start);
                let (end_line, end_column) = line_col(&file.content, report.loc_end);
                JsonIssue {
                    file: file.path.display().to_string(),
                    line,
                    column,
                    end_line,
                    end_column,
                    report,
                }
            })
        })
        .collect();

    let output = JsonOutput {
        files_checked: files.len(),
        total_issues: issues.len(),
        issues,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

pub fn print_check_summary(total_issues: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_issues == 0 {
        let ok = "✓ No writing issues found!";
        println!("{}", if colored { ok.green().bold().to_string() } else { ok.to_string() });
        return;
    }

    let (mark, count) = if colored {
        ("✗".red().bold().to_string(), total_issues.to_string().red().bold().to_string())
    } else {
        ("✗".to_string(), total_issues.to_string())
    };
    println!(
        "{} {} {} found in {} {}",
        mark,
        count,
        plural(total_issues, "issue"),
        files.len(),
        plural(files.len(), "file")
    );
}

pub fn print_fix_summary(total_fixed: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_fixed == 0 {
        let ok = "No corrections needed!";
        println!("{}", if colored { ok.green().bold().to_string() } else { ok.to_string() });
        return;
    }

    let (mark, count) = if colored {
        ("✓".green().bold().to_string(), total_fixed.to_string().green().bold().to_string())
    } else {
        ("✓".to_string(), total_fixed.to_string())
    };
    println!(
        "{} {} {} applied to {} {}",
        mark,
        count,
        plural(total_fixed, "correction"),
        files.len(),
        plural(files.len(), "file")
    );
}
