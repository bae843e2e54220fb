// Command line composition from rules and profile (no I/O)

use std::ffi::OsString;

use super::parse::{expand_home, parse_launch_option};
use crate::compose::types::{
    ComposeError, Composition, ORIGINAL_OPTIONS_ID, PREFIX_SEPARATOR, ParsedOption,
};
use crate::settings::{LaunchOptionRule, Profile};

type ProgramCheck = Box<dyn Fn(&str) -> bool>;

/// Builds the final command line around a game's base argv.
///
/// Without a home directory `~` is left alone; without a program check every
/// prefix command is assumed to exist.
#[derive(Default)]
pub struct Composer {
    home: Option<String>,
    program_check: Option<ProgramCheck>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Drop prefix groups whose first token fails `check`
    pub fn with_program_check(mut self, check: impl Fn(&str) -> bool + 'static) -> Self {
        self.program_check = Some(Box::new(check));
        self
    }

    pub fn compose(
        &self,
        profile: Option<&Profile>,
        rules: &[LaunchOptionRule],
        base_argv: &[OsString],
    ) -> Composition {
        let mut composition = Composition::default();
        let mut prefixes: Vec<Vec<String>> = Vec::new();
        let mut suffixes: Vec<String> = Vec::new();

        let mut accumulate = |parsed: ParsedOption| {
            composition.env.extend(parsed.env);
            if !parsed.prefix.is_empty() {
                prefixes.push(parsed.prefix);
            }
            suffixes.extend(parsed.suffix);
        };

        // The app's own options always go underneath the rule-driven ones
        let original = profile.map(|p| p.original_launch_options.as_str()).unwrap_or("");
        let mut errors = Vec::new();
        if !original.trim().is_empty() {
            match parse_launch_option(original) {
                Ok(parsed) => accumulate(parsed),
                Err(source) => errors.push(ComposeError::RuleParse {
                    rule_id: ORIGINAL_OPTIONS_ID.to_string(),
                    source,
                }),
            }
        }

        for rule in rules {
            let command = rule.command(rule.is_enabled(profile));
            if command.trim().is_empty() {
                continue;
            }
            match parse_launch_option(command) {
                Ok(parsed) => accumulate(parsed),
                Err(source) => errors.push(ComposeError::RuleParse {
                    rule_id: rule.id.clone(),
                    source,
                }),
            }
        }

        let groups: Vec<Vec<String>> = prefixes
            .into_iter()
            .map(|group| self.expand_group(group))
            .filter(|group| self.program_exists(group))
            .collect();

        let mut argv = Vec::new();
        let last = groups.len().saturating_sub(1);
        for (i, group) in groups.into_iter().enumerate() {
            let ends_with_separator = group.last().is_some_and(|t| t == PREFIX_SEPARATOR);
            argv.extend(group.into_iter().map(OsString::from));
            if i < last && !ends_with_separator {
                argv.push(OsString::from(PREFIX_SEPARATOR));
            }
        }
        argv.extend(base_argv.iter().cloned());
        argv.extend(suffixes.into_iter().map(OsString::from));

        composition.argv = argv;
        composition.rule_errors = errors;
        composition
    }

    fn expand_group(&self, group: Vec<String>) -> Vec<String> {
        match &self.home {
            Some(home) => group.iter().map(|t| expand_home(t, home)).collect(),
            None => group,
        }
    }

    fn program_exists(&self, group: &[String]) -> bool {
        match (&self.program_check, group.first()) {
            (Some(check), Some(program)) => check(program),
            _ => true,
        }
    }
}
