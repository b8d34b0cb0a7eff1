use std::collections::HashSet;

use super::normalizer::normalize_domain;

/// Directory, social and business-profile hosts that are never a company's own site.
pub const BLOCKED_DOMAINS: &[&str] = &[
    "facebook.com",
    "linkedin.com",
    "yelp.com",
    "bbb.org",
    "mapquest.com",
    "opencorporates.com",
    "dnb.com",
    "bloomberg.com",
    "crunchbase.com",
    "instagram.com",
    "x.com",
    "twitter.com",
    "chamberofcommerce.com",
    "yellowpages.com",
    "angi.com",
    "homeadvisor.com",
    "bizapedia.com",
    "buzzfile.com",
    "allbiz.com",
    "buildzoom.com",
    "thebluebook.com",
    "opengovus.com",
    "opencorpdata.com",
    "govcb.com",
];

const REQUIRED_COLUMNS: [&str; 3] = ["rule_type", "match_value", "enabled"];
const ENABLED_VALUES: [&str; 3] = ["TRUE", "YES", "1"];
const SHORT_PATTERN_LEN: usize = 3;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Blacklist rules must include headers: rule_type, match_value, enabled; found={found:?}")]
    MissingRuleColumns { found: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    ExactDomain,
    DomainContains,
}

impl RuleType {
    fn parse(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "EXACT_DOMAIN" => Some(RuleType::ExactDomain),
            "DOMAIN_CONTAINS" => Some(RuleType::DomainContains),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub rule_type: RuleType,
    pub match_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    Disabled,
    MissingMatchValue,
    UnknownRuleType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardedRule {
    /// 1-based row in the rule table, header included.
    pub row_number: usize,
    pub reason: DiscardReason,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub exact_domains: HashSet<String>,
    pub contains_patterns: Vec<String>,
    pub discarded: Vec<DiscardedRule>,
}

impl RuleSet {
    fn add(&mut self, rule: Rule) {
        match rule.rule_type {
            RuleType::ExactDomain => {
                let domain = match normalize_domain(&rule.match_value) {
                    d if d.is_empty() => rule.match_value,
                    d => d,
                };
                self.exact_domains.insert(domain);
            }
            RuleType::DomainContains => {
                if rule.match_value.len() < SHORT_PATTERN_LEN {
                    log::warn!(
                        "DOMAIN_CONTAINS rule {:?} is very short and will match many domains",
                        rule.match_value
                    );
                }
                self.contains_patterns.push(rule.match_value);
            }
        }
    }
}

struct RuleColumns {
    rule_type: usize,
    match_value: usize,
    enabled: usize,
}

impl RuleColumns {
    fn from_header(header: &[String]) -> Result<Self, ConfigurationError> {
        let header: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let position = |name: &str| header.iter().position(|h| h == name);

        match (
            position(REQUIRED_COLUMNS[0]),
            position(REQUIRED_COLUMNS[1]),
            position(REQUIRED_COLUMNS[2]),
        ) {
            (Some(rule_type), Some(match_value), Some(enabled)) => Ok(RuleColumns {
                rule_type,
                match_value,
                enabled,
            }),
            _ => Err(ConfigurationError::MissingRuleColumns { found: header }),
        }
    }

    fn width(&self) -> usize {
        self.rule_type.max(self.match_value).max(self.enabled) + 1
    }

    fn parse_row(&self, row: &[String]) -> Result<Rule, DiscardReason> {
        let mut row = row.to_vec();
        if row.len() < self.width() {
            row.resize(self.width(), String::new());
        }

        if !ENABLED_VALUES.contains(&row[self.enabled].trim().to_uppercase().as_str()) {
            return Err(DiscardReason::Disabled);
        }

        let match_value = row[self.match_value].trim().to_lowercase();
        if match_value.is_empty() {
            return Err(DiscardReason::MissingMatchValue);
        }

        let token = row[self.rule_type].trim().to_uppercase();
        match RuleType::parse(&token) {
            Some(rule_type) => Ok(Rule {
                rule_type,
                match_value,
            }),
            None => Err(DiscardReason::UnknownRuleType(token)),
        }
    }
}

/// Interprets a rule table (header row followed by data rows).
///
/// Tables with fewer than two rows yield an empty rule set without looking at
/// the header. Rows that are disabled, blank or carry an unknown rule type are
/// kept out of the rule set and reported in [`RuleSet::discarded`].
pub fn load_blacklist_rules(values: &[Vec<String>]) -> Result<RuleSet, ConfigurationError> {
    let mut rules = RuleSet::default();
    if values.len() < 2 {
        return Ok(rules);
    }

    let columns = RuleColumns::from_header(&values[0])?;

    for (i, row) in values.iter().enumerate().skip(1) {
        let row_number = i + 1;
        match columns.parse_row(row) {
            Ok(rule) => rules.add(rule),
            Err(reason) => {
                log::debug!("Skipping blacklist rule row {}: {:?}", row_number, reason);
                rules.discarded.push(DiscardedRule { row_number, reason });
            }
        }
    }

    Ok(rules)
}

fn matches_rules(
    domain: &str,
    exact_domains: &HashSet<String>,
    contains_patterns: &[String],
) -> bool {
    exact_domains.contains(domain)
        || contains_patterns
            .iter()
            .any(|pattern| !pattern.is_empty() && domain.contains(pattern.as_str()))
}

/// Empty domains are always blacklisted.
pub fn is_blacklisted(
    domain: &str,
    exact_domains: &HashSet<String>,
    contains_patterns: &[String],
) -> bool {
    let domain = domain.trim().to_lowercase();
    if domain.is_empty() {
        return true;
    }

    BLOCKED_DOMAINS.contains(&domain.as_str())
        || matches_rules(&domain, exact_domains, contains_patterns)
}

/// Built-in blocked hosts merged with the rules loaded for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklist {
    exact_domains: HashSet<String>,
    contains_patterns: Vec<String>,
}

impl Blacklist {
    pub fn merge(builtin: &[&str], rules: RuleSet) -> Self {
        let mut exact_domains = rules.exact_domains;
        exact_domains.extend(builtin.iter().map(|d| d.to_string()));

        Blacklist {
            exact_domains,
            contains_patterns: rules.contains_patterns,
        }
    }

    pub fn from_rules(rules: RuleSet) -> Self {
        Self::merge(BLOCKED_DOMAINS, rules)
    }

    pub fn exact_domain_count(&self) -> usize {
        self.exact_domains.len()
    }

    pub fn contains_pattern_count(&self) -> usize {
        self.contains_patterns.len()
    }

    pub fn is_blocked(&self, domain: &str) -> bool {
        let domain = domain.trim().to_lowercase();
        domain.is_empty() || matches_rules(&domain, &self.exact_domains, &self.contains_patterns)
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::from_rules(RuleSet::default())
    }
}
