use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

use crate::checker::reconcile::deletion_range;
use crate::parser::HostNode;
use crate::{CheckResult, Issue, IssueType, Severity, SpanKind};

/// Replace `range_start..range_end` of the file with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFix {
    pub range_start: usize,
    pub range_end: usize,
    pub text: String,
}

/// One issue translated into file coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub rule: IssueType,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    pub loc_start: usize,
    pub loc_end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<ReportFix>,
}

fn message_template(issue: &Issue) -> &'static str {
    // A suggestion that is just the replacement text adds nothing.
    let extra_hint = issue.suggestion.is_some() && issue.suggestion != issue.replacement;
    match (issue.kind, extra_hint) {
        (IssueType::Spelling, true) => {
            "You have a misspelled word: {{word}} on {{unit}}. {{suggestion}}"
        }
        (IssueType::Spelling, false) => "You have a misspelled word: {{word}} on {{unit}}.",
        (_, true) => "{{message}} ({{suggestion}})",
        (_, false) => "{{message}}",
    }
}

fn unit_name(kind: SpanKind) -> &'static str {
    match kind {
        SpanKind::Comment => "Comment",
        SpanKind::String => "String",
        SpanKind::Template => "Template",
        SpanKind::Identifier => "Identifier",
    }
}

/// Fill `{{name}}` placeholders from `data`. Unknown names stay as written.
pub fn render_template(template: &str, data: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let name = after[..close].trim();
                match data.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[open..open + 2 + close + 2]),
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// Deletions take the surrounding whitespace with them, the same way the
// corrected text drops it.
fn fix_range(issue: &Issue, unit: &str) -> Range<usize> {
    let in_bounds = issue.start <= issue.end
        && unit.is_char_boundary(issue.start)
        && unit.is_char_boundary(issue.end);
    match issue.replacement.as_deref() {
        Some("") if in_bounds => deletion_range(unit, issue.start, issue.end),
        _ => issue.range(),
    }
}

impl Report {
    /// `offset` is where the checked unit starts in the file.
    pub fn from_issue(issue: &Issue, unit: &str, kind: SpanKind, offset: usize) -> Self {
        let mut data = BTreeMap::new();
        let word = unit.get(issue.range()).unwrap_or_default();
        data.insert("word".to_string(), word.to_string());
        data.insert("unit".to_string(), unit_name(kind).to_string());
        data.insert("message".to_string(), issue.message.clone());
        if let Some(suggestion) = &issue.suggestion {
            data.insert("suggestion".to_string(), suggestion.clone());
        }

        Self {
            rule: issue.kind,
            severity: issue.severity,
            message: render_template(message_template(issue), &data),
            data,
            loc_start: offset + issue.start,
            loc_end: offset + issue.end,
            fix: issue.replacement.as_ref().map(|text| {
                let range = fix_range(issue, unit);
                ReportFix {
                    range_start: offset + range.start,
                    range_end: offset + range.end,
                    text: text.clone(),
                }
            }),
        }
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

/// Reports for every issue of one checked node.
pub fn node_reports(node: &HostNode, result: &CheckResult) -> Vec<Report> {
    result
        .issues
        .iter()
        .map(|issue| Report::from_issue(issue, &node.value, node.kind, node.content_start))
        .collect()
}

/// Apply report fixes to a whole file. Fixes go in from the end of the file
/// backwards; one that overlaps an already applied fix is skipped.
///
/// Returns the new content and the number of fixes applied.
pub fn apply_fixes(content: &str, reports: &[Report]) -> (String, usize) {
    let mut fixes: Vec<&ReportFix> = reports.iter().filter_map(|r| r.fix.as_ref()).collect();
    fixes.sort_by(|a, b| {
        b.range_start
            .cmp(&a.range_start)
            .then(b.range_end.cmp(&a.range_end))
    });

    let mut output = content.to_string();
    let mut floor = content.len();
    let mut applied = 0;

    for fix in fixes {
        if fix.range_start > fix.range_end
            || fix.range_end > floor
            || !output.is_char_boundary(fix.range_start)
            || !output.is_char_boundary(fix.range_end)
        {
            tracing::debug!(
                "Skipping overlapping fix at {}..{}",
                fix.range_start,
                fix.range_end
            );
            continue;
        }
        output.replace_range(fix.range_start..fix.range_end, &fix.text);
        floor = fix.range_start;
        applied += 1;
    }

    (output, applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(kind: IssueType, start: usize, end: usize) -> Issue {
        let message = "Use \"sign in\" instead of \"login\".";
        Issue::new(kind, start, end, Severity::Warning, message)
    }

    #[test]
    fn test_render_template() {
        let mut data = BTreeMap::new();
        data.insert("word".to_string(), "teh".to_string());
        assert_eq!(render_template("Bad {{word}} here", &data), "Bad teh here");
        assert_eq!(render_template("Keep {{other}}", &data), "Keep {{other}}");
        assert_eq!(render_template("Open {{word", &data), "Open {{word");
    }

    #[test]
    fn test_report_shifts_offsets_and_carries_fix() {
        let issue = issue(IssueType::Terminology, 7, 12)
            .with_suggestion("sign in")
            .with_replacement("sign in");
        let report = Report::from_issue(&issue, "Please login now.", SpanKind::Comment, 100);

        assert_eq!((report.loc_start, report.loc_end), (107, 112));
        assert_eq!(
            report.fix,
            Some(ReportFix {
                range_start: 107,
                range_end: 112,
                text: "sign in".to_string(),
            })
        );
        assert_eq!(report.data["word"], "login");
        assert_eq!(report.message, "Use \"sign in\" instead of \"login\".");
    }

    #[test]
    fn test_hint_differs_from_replacement() {
        let message = "Avoid using \"simply\".";
        let issue = Issue::new(IssueType::Prohibited, 0, 6, Severity::Error, message)
            .with_suggestion("Remove or be more specific")
            .with_replacement("");
        let report = Report::from_issue(&issue, "simply", SpanKind::Comment, 0);
        assert_eq!(
            report.message,
            "Avoid using \"simply\". (Remove or be more specific)"
        );
    }

    #[test]
    fn test_spelling_message() {
        let message = "Misspelled word \"Vaule\".";
        let issue = Issue::new(IssueType::Spelling, 0, 5, Severity::Warning, message);
        let report = Report::from_issue(&issue, "Vaule", SpanKind::Identifier, 0);
        assert_eq!(report.message, "You have a misspelled word: Vaule on Identifier.");
        assert!(!report.is_fixable());
    }

    #[test]
    fn test_fix_is_omitted_from_json_when_absent() {
        let issue = issue(IssueType::Readability, 0, 4);
        let report = Report::from_issue(&issue, "Very", SpanKind::String, 0);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("fix").is_none());
        assert_eq!(json["rule"], "readability");
    }

    #[test]
    fn test_apply_fixes_skips_overlaps() {
        let content = "let a = 'Please login now.';";
        let login = Report::from_issue(
            &issue(IssueType::Terminology, 7, 12).with_replacement("sign in"),
            "Please login now.",
            SpanKind::String,
            9,
        );
        let overlapping = Report::from_issue(
            &issue(IssueType::Prohibited, 0, 12).with_replacement(""),
            "Please login now.",
            SpanKind::String,
            9,
        );
        let (fixed, applied) = apply_fixes(content, &[login, overlapping]);
        assert_eq!(applied, 1);
        assert_eq!(fixed, "let a = 'Please sign in now.';");
    }

    #[test]
    fn test_deletion_fix_takes_the_extra_space() {
        let content = "// This is simply great.\n";
        let unit = " This is simply great.";
        let simply = issue(IssueType::WeakWord, 9, 15).with_replacement("");
        let report = Report::from_issue(&simply, unit, SpanKind::Comment, 2);

        assert_eq!((report.loc_start, report.loc_end), (11, 17));
        let fix = report.fix.as_ref().unwrap();
        assert_eq!((fix.range_start, fix.range_end), (11, 18));

        let (fixed, applied) = apply_fixes(content, &[report]);
        assert_eq!(applied, 1);
        assert_eq!(fixed, "// This is great.\n");
    }

    #[test]
    fn test_deletion_fix_before_punctuation() {
        let unit = "It works simply.";
        let simply = issue(IssueType::Prohibited, 9, 15).with_replacement("");
        let report = Report::from_issue(&simply, unit, SpanKind::String, 0);
        let (fixed, _) = apply_fixes(unit, &[report]);
        assert_eq!(fixed, "It works.");
    }
}
