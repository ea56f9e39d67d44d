// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashSet;

use crate::{
    args,
    checker::Checker,
    diagnostic::Severity,
    rules::{empty, header, html, placeholders},
    ts::{catalog::Catalog, unit::Unit},
};

pub type Rule = Box<dyn RuleChecker + Sync>;

#[derive(Default)]
pub struct Rules {
    pub enabled: Vec<Rule>,
}

impl<'a> Default for &'a Rules {
    fn default() -> &'a Rules {
        static RULES: Rules = Rules { enabled: vec![] };
        &RULES
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name(), self.severity())
    }
}

impl Rules {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { enabled: rules }
    }

    /// Names of the enabled rules.
    pub fn names(&self) -> Vec<&'static str> {
        self.enabled.iter().map(|r| r.name()).collect()
    }
}

pub trait RuleChecker {
    fn name(&self) -> &'static str;
    fn is_default(&self) -> bool;
    fn severity(&self) -> Severity;
    fn check_catalog(&self, _checker: &mut Checker, _catalog: &Catalog) {}
    fn check_unit(&self, _checker: &mut Checker, _unit: &Unit) {}
}

pub fn get_all_rules() -> Vec<Rule> {
    vec![
        Box::new(empty::EmptyTranslationRule {}),
        Box::new(header::HeaderMismatchRule {}),
        Box::new(html::HtmlMismatchRule {}),
        Box::new(placeholders::PlaceholderMismatchRule {}),
    ]
}

/// Get unknown rule names from a list of names compared to all available rules.
pub fn get_unknown_rules<'a>(
    names: &'a [&str],
    all_rules_names: &HashSet<&'static str>,
) -> Vec<&'a str> {
    let selected_rules_names = names.iter().copied().collect::<HashSet<_>>();
    let mut unknown_rules_names: HashSet<&str> = selected_rules_names
        .difference(all_rules_names)
        .copied()
        .collect();
    // The special rule "all" is always known, we just ignore it.
    unknown_rules_names.remove(&"all");
    if unknown_rules_names.is_empty() {
        return vec![];
    }
    let mut unknown = unknown_rules_names.iter().copied().collect::<Vec<_>>();
    unknown.sort_unstable();
    unknown
}

/// Get the selected rules from the names to select and to ignore.
///
/// If `select` is provided, only the specified rules are included (the special name
/// "all" selects all rules).
/// If `select` is not provided, all default rules are included.
/// Then, any rules specified in `ignore` are removed from the selection.
pub fn get_selected_rules(
    select: Option<&[String]>,
    ignore: &[String],
) -> Result<Rules, Box<dyn std::error::Error>> {
    let all_rules: Vec<Rule> = get_all_rules();
    let all_rules_names: HashSet<&'static str> = all_rules.iter().map(|r| r.name()).collect();
    let mut selected_rules: Vec<Rule> = Vec::new();

    if let Some(select) = select {
        let names: Vec<&str> = select.iter().map(|s| s.trim()).collect();
        let unknown_rules_names = get_unknown_rules(&names, &all_rules_names);
        if !unknown_rules_names.is_empty() {
            return Err(
                format!("unknown selected rules: {}", unknown_rules_names.join(", ")).into(),
            );
        }
        if names.contains(&"all") {
            selected_rules = all_rules;
        } else {
            for rule in all_rules {
                if names.contains(&rule.name()) {
                    selected_rules.push(rule);
                }
            }
        }
    } else {
        // If no selection was provided, start with all default rules.
        for rule in all_rules {
            if rule.is_default() {
                selected_rules.push(rule);
            }
        }
    }

    // Remove the ignored rules.
    if !ignore.is_empty() {
        let names: Vec<&str> = ignore.iter().map(|s| s.trim()).collect();
        let unknown_rules_names = get_unknown_rules(&names, &all_rules_names);
        if !unknown_rules_names.is_empty() {
            return Err(format!(
                "unknown rules to ignore: {}",
                unknown_rules_names.join(", ")
            )
            .into());
        }
        selected_rules.retain(|rule| !names.contains(&rule.name()));
    }

    Ok(Rules::new(selected_rules))
}

/// Display rules used to check catalogs.
pub fn run_rules(_args: &args::RulesArgs) -> i32 {
    let rules = get_all_rules();
    println!("{} rules:", rules.len());
    for rule in &rules {
        if rule.is_default() {
            println!("  {rule}");
        } else {
            println!("  {rule} (not enabled by default)");
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_default_rules() {
        let rules = get_selected_rules(None, &[]).expect("default rules");
        assert_eq!(
            rules.names(),
            vec![
                "empty-translation",
                "header-mismatch",
                "html-mismatch",
                "placeholder-mismatch"
            ]
        );
    }

    #[test]
    fn test_select_and_ignore() {
        let rules = get_selected_rules(
            Some(&names(&["html-mismatch", " empty-translation "])),
            &names(&["html-mismatch"]),
        )
        .expect("valid rules");
        assert_eq!(rules.names(), vec!["empty-translation"]);
        let rules = get_selected_rules(Some(&names(&["all"])), &names(&["header-mismatch"]))
            .expect("valid rules");
        assert_eq!(rules.enabled.len(), 3);
    }

    #[test]
    fn test_unknown_rules() {
        let err = get_selected_rules(Some(&names(&["foo", "bar", "html-mismatch"])), &[])
            .err()
            .map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("unknown selected rules: bar, foo"));
        let err = get_selected_rules(None, &names(&["baz"]))
            .err()
            .map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("unknown rules to ignore: baz"));
    }

    #[test]
    fn test_run_rules() {
        assert!(get_all_rules().iter().all(|rule| rule.is_default()));
        assert_eq!(run_rules(&args::RulesArgs {}), 0);
    }
}
