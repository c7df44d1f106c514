//! Table and JSON rendering of scan reports.

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use chainrevoke_core::{Approval, RiskFinding};

use crate::scan::ScanReport;

#[derive(Tabled)]
struct ApprovalRow {
    #[tabled(rename = "Token")]
    symbol: String,
    #[tabled(rename = "Token Address")]
    token: String,
    #[tabled(rename = "Spender")]
    spender: String,
    #[tabled(rename = "TX Hash")]
    tx_hash: String,
}

impl From<&Approval> for ApprovalRow {
    fn from(a: &Approval) -> Self {
        Self {
            symbol: a.symbol.clone(),
            token: a.token.clone(),
            spender: a.spender.clone(),
            tx_hash: a.tx_hash.clone(),
        }
    }
}

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Token")]
    symbol: String,
    #[tabled(rename = "Token Address")]
    token: String,
    #[tabled(rename = "Spender")]
    spender: String,
    #[tabled(rename = "TX Hash")]
    tx_hash: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl From<&RiskFinding> for FindingRow {
    fn from(f: &RiskFinding) -> Self {
        Self {
            symbol: f.approval.symbol.clone(),
            token: f.approval.token.clone(),
            spender: f.approval.spender.clone(),
            tx_hash: f.approval.tx_hash.clone(),
            reason: f.reasons.join("; "),
        }
    }
}

pub fn approvals_table(approvals: &[Approval]) -> String {
    let mut table = Table::new(approvals.iter().map(ApprovalRow::from));
    table.with(Style::ascii());
    table.to_string()
}

pub fn findings_table(findings: &[RiskFinding]) -> String {
    let mut table = Table::new(findings.iter().map(FindingRow::from));
    table.with(Style::ascii());
    table.to_string()
}

/// Human-readable report. An address without approvals gets a single line
/// instead of an empty table.
pub fn render(report: &ScanReport) -> String {
    let mut out = format!(
        "[•] Checked {} token transactions of {} ({})\n",
        report.transactions, report.address, report.source
    );

    if report.is_empty() {
        out.push_str("[✓] No active approvals found.\n");
    } else {
        out.push_str(&format!("[✓] Found {} approvals:\n", report.approvals.len()));
        out.push_str(&approvals_table(&report.approvals));
        out.push('\n');

        if report.risky.is_empty() {
            out.push_str("\n[✓] No risky approvals found.\n");
        } else {
            out.push_str("\n[!] Potentially dangerous approvals:\n");
            out.push_str(&findings_table(&report.risky));
            out.push_str("\n\n⚠️  Consider revoking these approvals via revoke.cash or a similar tool.\n");
            out.push_str("    Risk flags are heuristics; the 0x000 spender check in particular is weak.\n");
        }
    }

    if !report.skipped.is_empty() {
        out.push_str(&format!(
            "\n[?] Skipped {} approve calls with malformed calldata:\n",
            report.skipped.len()
        ));
        for s in &report.skipped {
            out.push_str(&format!("    {}: {}\n", s.tx_hash, s.error));
        }
    }
    out
}

pub fn print(report: &ScanReport) {
    print!("{}", render(report));
}

pub fn print_json(report: &ScanReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
