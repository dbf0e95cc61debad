//! List rules command implementation.

use logmsglint_rules::RULES;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<20} {:<6} Description", "Code", "Name", "Fix");
    println!("{}", "-".repeat(90));

    for rule in RULES {
        println!(
            "{:<8} {:<20} {:<6} {}",
            rule.code,
            rule.name,
            if rule.fixable { "yes" } else { "-" },
            rule.description
        );
    }

    println!("\nAll rules are enabled by default. Disable one in logmsglint.toml:");
    println!("  [rules.english-only]");
    println!("  enabled = false");

    println!("\nUse --rules to run a subset, e.g.:");
    println!("  logmsglint check --rules lowercase-start,no-sensitive-data");
    println!("  logmsglint check --rules LM001,LM004");
}
