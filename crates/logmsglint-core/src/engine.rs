//! Orchestrates call-site resolution, extraction and rule evaluation.

use tracing::{debug, trace};

use crate::ast::SourceUnit;
use crate::config::Config;
use crate::diagnostic;
use crate::extract::extract_literals;
use crate::resolver::LoggingApiSpec;
use crate::rule::{FragmentPosition, MessageRule, RuleBox};
use crate::type_info::TypeResolver;
use crate::types::{LintResult, Severity, Violation};

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the engine.
    #[must_use]
    pub fn rule<R: MessageRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration used for rule enablement and severities.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the engine. Disabled rules are dropped here, once.
    #[must_use]
    pub fn build(self) -> Engine {
        let config = self.config.unwrap_or_default();
        let rules = self
            .rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_rule_enabled(rule.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .map(|rule| {
                let severity = config
                    .rule_severity(rule.name())
                    .unwrap_or_else(|| rule.default_severity());
                ConfiguredRule { rule, severity }
            })
            .collect();

        Engine {
            api: LoggingApiSpec::builtin(),
            rules,
        }
    }
}

struct ConfiguredRule {
    rule: RuleBox,
    severity: Severity,
}

/// Immutable log message checker.
///
/// Holds the logging API table and the compiled rules. It has no mutable
/// state, so one instance can serve any number of units, also from several
/// threads at once.
pub struct Engine {
    api: LoggingApiSpec,
    rules: Vec<ConfiguredRule>,
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the active rules, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.name()).collect()
    }

    /// Checks one unit and returns its violations in document order.
    #[must_use]
    pub fn check(&self, unit: &SourceUnit, types: &dyn TypeResolver) -> Vec<Violation> {
        let mut violations = Vec::new();

        for call in unit.calls() {
            let Some(argument) = self.api.resolve(call, types) else {
                continue;
            };

            let fragments = extract_literals(argument.expr);
            if fragments.is_empty() {
                trace!(
                    "No literal text in message at {}:{}",
                    unit.path().display(),
                    argument.expr.span.start.line
                );
                continue;
            }

            let rewrite_allowed = diagnostic::rewrite_allowed(argument.expr);

            for (index, text) in fragments.iter().enumerate() {
                let position = FragmentPosition { index };
                for configured in &self.rules {
                    let rule = configured.rule.as_ref();
                    if !rule.applies_to(position) {
                        continue;
                    }
                    if let Some(finding) = rule.check(text, position) {
                        violations.push(diagnostic::build(
                            unit.path(),
                            argument.expr,
                            rule,
                            configured.severity,
                            &finding,
                            rewrite_allowed,
                        ));
                    }
                }
            }
        }

        debug!(
            "Checked {}: {} violation(s)",
            unit.path().display(),
            violations.len()
        );
        violations
    }

    /// Checks several units and collects the result.
    #[must_use]
    pub fn check_all<'a, I, T>(&self, units: I) -> LintResult
    where
        I: IntoIterator<Item = (&'a SourceUnit, &'a T)>,
        T: TypeResolver + 'a,
    {
        let mut result = LintResult::new();
        for (unit, types) in units {
            result.violations.extend(self.check(unit, types));
            result.files_checked += 1;
        }
        result.sort();
        result
    }
}
