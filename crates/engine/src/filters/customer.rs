//! Customer filter registry and predicate compiler.

use clementine_core::Customer;

use crate::criteria::{Coerced, Criteria, FilterValue};
use crate::plan::{Clause, Plan};

use super::{Bound, TextOp};

/// How a registered key binds to the customer record.
enum Binding {
    /// Plain text field comparison.
    Text {
        field: fn(&Customer) -> &str,
        op: TextOp,
    },
    /// Comparison against the optional phone field. Customers without a
    /// phone never match.
    Phone { op: TextOp },
    /// One-sided bound on `created_at`.
    CreatedAt { bound: Bound },
    /// Two-sided `(min, max)` range on `created_at`.
    CreatedAtRange,
    /// Phone-pattern business rule (OR of sub-clauses).
    PhonePattern,
    /// Email-domain suffix match.
    EmailDomain,
    /// Presence predicate on the phone field.
    HasPhone,
}

fn name(c: &Customer) -> &str {
    &c.name
}

fn email(c: &Customer) -> &str {
    c.email.as_str()
}

/// Enumerated filter registry for customers. Unknown keys are ignored.
const REGISTRY: &[(&str, Binding)] = &[
    ("name", Binding::Text { field: name, op: TextOp::Contains }),
    ("name_exact", Binding::Text { field: name, op: TextOp::Exact }),
    ("name_startswith", Binding::Text { field: name, op: TextOp::Prefix }),
    ("email", Binding::Text { field: email, op: TextOp::Contains }),
    ("phone", Binding::Phone { op: TextOp::Exact }),
    ("phone_icontains", Binding::Phone { op: TextOp::Contains }),
    ("created_at_gte", Binding::CreatedAt { bound: Bound::Gte }),
    ("created_at_lte", Binding::CreatedAt { bound: Bound::Lte }),
    ("created_at_range", Binding::CreatedAtRange),
    ("phone_pattern", Binding::PhonePattern),
    ("email_domain", Binding::EmailDomain),
    ("has_phone", Binding::HasPhone),
];

fn lookup(key: &str) -> Option<&'static Binding> {
    REGISTRY.iter().find(|(k, _)| *k == key).map(|(_, b)| b)
}

/// Compile a criteria map into a customer predicate plan.
pub(crate) fn compile(criteria: &Criteria) -> Plan<'static, Customer> {
    let mut plan = Plan::new();
    for (key, value) in criteria.iter() {
        let Some(binding) = lookup(key) else {
            tracing::debug!(key, "ignoring unrecognized customer filter key");
            continue;
        };
        plan.push(build(binding, value));
    }
    plan
}

fn build(binding: &'static Binding, value: &FilterValue) -> Clause<'static, Customer> {
    match binding {
        Binding::Text { field, op } => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(needle) => {
                let (field, op) = (*field, *op);
                Clause::test(move |c: &Customer| op.matches(field(c), &needle))
            }
        },
        Binding::Phone { op } => match value.coerce_text() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(needle) => {
                let op = *op;
                Clause::test(move |c: &Customer| {
                    c.phone.as_ref().is_some_and(|p| op.matches(p.as_str(), &needle))
                })
            }
        },
        Binding::CreatedAt { bound } => match value.coerce_datetime() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(limit) => {
                let bound = *bound;
                Clause::test(move |c: &Customer| bound.holds(&c.created_at, &limit))
            }
        },
        Binding::CreatedAtRange => match value.coerce_datetime_range() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value((min, max)) => Clause::test(move |c: &Customer| {
                min.is_none_or(|lo| c.created_at >= lo) && max.is_none_or(|hi| c.created_at <= hi)
            }),
        },
        Binding::PhonePattern => phone_pattern(value),
        Binding::EmailDomain => email_domain(value),
        Binding::HasPhone => match value.coerce_boolean() {
            Coerced::Blank => Clause::Pass,
            Coerced::Invalid => Clause::Never,
            Coerced::Value(true) => Clause::test(|c: &Customer| c.phone.is_some()),
            Coerced::Value(false) => Clause::test(|c: &Customer| c.phone.is_none()),
        },
    }
}

/// One alternative of the phone-pattern OR-union.
enum PhoneRule {
    Prefix(String),
    Substring(String),
}

impl PhoneRule {
    fn matches(&self, phone: &str) -> bool {
        match self {
            Self::Prefix(p) => phone.starts_with(p.as_str()),
            Self::Substring(s) => phone.contains(s.as_str()),
        }
    }
}

/// Country codes recognized as literal prefixes: UK, France, Germany,
/// China, India.
const COUNTRY_CODES: &[&str] = &["+44", "+33", "+49", "+86", "+91"];

/// Aliases that resolve to the `+1` prefix.
const US_ALIASES: &[&str] = &["us", "usa", "united states"];

/// Build the OR-union of sub-clauses for a phone pattern.
///
/// Exactly one of the prefix/alias/country-code/substring alternatives
/// applies, and a digits-only pattern additionally contributes the `+N` and
/// bare-`N` prefixes. All applicable alternatives are unioned, never
/// short-circuited.
fn phone_rules(pattern: &str) -> Vec<PhoneRule> {
    let mut rules = Vec::new();

    if pattern.starts_with('+') {
        rules.push(PhoneRule::Prefix(pattern.to_owned()));
    } else if US_ALIASES.contains(&pattern.to_lowercase().as_str()) {
        rules.push(PhoneRule::Prefix("+1".to_owned()));
    } else if COUNTRY_CODES.contains(&pattern) {
        rules.push(PhoneRule::Prefix(pattern.to_owned()));
    } else {
        // Partial number searches, area codes, etc.
        rules.push(PhoneRule::Substring(pattern.to_owned()));
    }

    // A bare digit string also matches at the start of the number, with or
    // without the leading `+` (searching "1" finds US numbers).
    if !pattern.is_empty() && pattern.chars().all(|c| c.is_ascii_digit()) {
        rules.push(PhoneRule::Prefix(format!("+{pattern}")));
        rules.push(PhoneRule::Prefix(pattern.to_owned()));
    }

    rules
}

fn phone_pattern(value: &FilterValue) -> Clause<'static, Customer> {
    match value.coerce_text() {
        Coerced::Blank => Clause::Pass,
        Coerced::Invalid => Clause::Never,
        Coerced::Value(pattern) => {
            let rules = phone_rules(&pattern);
            Clause::test(move |c: &Customer| {
                c.phone
                    .as_ref()
                    .is_some_and(|p| rules.iter().any(|r| r.matches(p.as_str())))
            })
        }
    }
}

fn email_domain(value: &FilterValue) -> Clause<'static, Customer> {
    match value.coerce_text() {
        Coerced::Blank => Clause::Pass,
        Coerced::Invalid => Clause::Never,
        Coerced::Value(raw) => {
            let normalized = raw.trim().to_lowercase();
            let domain = normalized.strip_prefix('@').unwrap_or(&normalized);
            if domain.is_empty() {
                return Clause::Pass;
            }
            let suffix = format!("@{domain}");
            Clause::test(move |c: &Customer| contains_suffix_ci(c.email.as_str(), &suffix))
        }
    }
}

/// Case-insensitive suffix match.
fn contains_suffix_ci(haystack: &str, suffix: &str) -> bool {
    haystack.to_lowercase().ends_with(suffix)
}
