//! Heuristic risk rules for decoded approvals.
//!
//! A [`RiskClassifier`] holds an ordered set of [`RiskRule`]s; an approval is
//! risky if any rule matches. The default set is:
//!
//! 1. [`UnknownSymbol`]: the explorer had no symbol for the token
//! 2. [`SpenderPrefix`]: the spender starts with `0x000`
//!
//! These are heuristics. Both false positives (legitimate tokens without
//! metadata) and false negatives (malicious spenders with ordinary addresses)
//! are expected. The `0x000` prefix rule in particular is a weak signal.

use crate::types::Approval;
use serde::Serialize;

/// Default spender prefix considered suspicious.
pub const SUSPICIOUS_SPENDER_PREFIX: &str = "0x000";

/// A single, independently testable risk predicate.
pub trait RiskRule: Send + Sync {
    /// Short stable identifier (e.g. `"unknown-symbol"`).
    fn name(&self) -> &'static str;

    /// Human-readable explanation shown next to flagged approvals.
    fn description(&self) -> String;

    fn matches(&self, approval: &Approval) -> bool;
}

// ─── Built-in rules ───────────────────────────────────────────────────────────

/// Flags tokens the explorer returned no symbol for.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownSymbol;

impl RiskRule for UnknownSymbol {
    fn name(&self) -> &'static str {
        "unknown-symbol"
    }

    fn description(&self) -> String {
        "token metadata unavailable".into()
    }

    fn matches(&self, approval: &Approval) -> bool {
        approval.is_unknown_token()
    }
}

/// Flags spenders whose lower-cased address starts with a given prefix.
///
/// The default `0x000` is a weak signal: vanity or low-numbered deployers
/// trip it, and almost every malicious spender does not.
#[derive(Debug, Clone)]
pub struct SpenderPrefix {
    prefix: String,
}

impl SpenderPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().to_lowercase(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for SpenderPrefix {
    fn default() -> Self {
        Self::new(SUSPICIOUS_SPENDER_PREFIX)
    }
}

impl RiskRule for SpenderPrefix {
    fn name(&self) -> &'static str {
        "spender-prefix"
    }

    fn description(&self) -> String {
        format!("spender starts with {}", self.prefix)
    }

    fn matches(&self, approval: &Approval) -> bool {
        approval.spender.to_lowercase().starts_with(&self.prefix)
    }
}

/// Flags `2^256 - 1` allowances. Only fires when the amount was decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlimitedAllowance;

impl RiskRule for UnlimitedAllowance {
    fn name(&self) -> &'static str {
        "unlimited-allowance"
    }

    fn description(&self) -> String {
        "unlimited allowance".into()
    }

    fn matches(&self, approval: &Approval) -> bool {
        approval.is_unlimited()
    }
}

// ─── Classifier ───────────────────────────────────────────────────────────────

/// A risky approval together with the rules it tripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFinding {
    pub approval: Approval,
    /// Names of the matching rules, in rule order.
    pub rules: Vec<&'static str>,
    /// Descriptions of the matching rules, in rule order.
    pub reasons: Vec<String>,
}

/// Ordered set of risk rules.
pub struct RiskClassifier {
    rules: Vec<Box<dyn RiskRule>>,
}

impl RiskClassifier {
    /// A classifier with no rules; flags nothing.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: impl RiskRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn RiskRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn is_risky(&self, approval: &Approval) -> bool {
        self.rules.iter().any(|r| r.matches(approval))
    }

    /// Risky subset of `approvals`, preserving relative order.
    pub fn classify(&self, approvals: &[Approval]) -> Vec<Approval> {
        approvals
            .iter()
            .filter(|a| self.is_risky(a))
            .cloned()
            .collect()
    }

    /// Like [`classify`](Self::classify) but records which rules matched.
    pub fn findings(&self, approvals: &[Approval]) -> Vec<RiskFinding> {
        approvals
            .iter()
            .filter_map(|approval| {
                let matched: Vec<&dyn RiskRule> = self
                    .rules
                    .iter()
                    .map(|r| r.as_ref())
                    .filter(|r| r.matches(approval))
                    .collect();
                if matched.is_empty() {
                    return None;
                }
                Some(RiskFinding {
                    approval: approval.clone(),
                    rules: matched.iter().map(|r| r.name()).collect(),
                    reasons: matched.iter().map(|r| r.description()).collect(),
                })
            })
            .collect()
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::empty()
            .with_rule(UnknownSymbol)
            .with_rule(SpenderPrefix::default())
    }
}

/// Risky subset of `approvals` under the default rule set.
pub fn classify_risk(approvals: &[Approval]) -> Vec<Approval> {
    RiskClassifier::default().classify(approvals)
}
