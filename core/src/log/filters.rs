use super::LogError;
use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::BTreeMap, env, str::FromStr};

/// A single `target=level` (or bare `level`) entry of a filter expression
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    pub target: Option<String>,
    pub level: LevelFilter,
}

impl FromStr for FilterSpec {
    type Err = LogError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut parts = spec.split('=').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            // A single argument is either the root level or a target enabled at max level
            (Some(part0), None, None) => match part0.parse() {
                Ok(level) => Ok(Self { target: None, level }),
                Err(_) => Ok(Self { target: Some(part0.to_string()), level: LevelFilter::max() }),
            },
            (Some(part0), Some(""), None) => Ok(Self { target: Some(part0.to_string()), level: LevelFilter::max() }),
            (Some(part0), Some(part1), None) => match part1.parse() {
                Ok(level) => Ok(Self { target: Some(part0.to_string()), level }),
                Err(_) => Err(LogError::InvalidFilter(spec.to_string())),
            },
            _ => Err(LogError::InvalidFilter(spec.to_string())),
        }
    }
}

/// Resolved logger filters: one root level plus per-target overrides
pub struct Filters {
    targets: BTreeMap<String, LevelFilter>,
    root_level: LevelFilter,
}

impl Filters {
    pub fn builder() -> FiltersBuilder {
        FiltersBuilder::default()
    }

    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    pub fn level_of(&self, target: &str) -> Option<LevelFilter> {
        self.targets.get(target).copied()
    }

    /// Per-target loggers; records flow up to the root appenders
    pub(super) fn loggers(&self) -> impl Iterator<Item = Logger> + '_ {
        self.targets.iter().map(|(target, level)| Logger::builder().build(target.clone(), *level))
    }
}

#[derive(Default)]
pub struct FiltersBuilder {
    targets: BTreeMap<String, LevelFilter>,
    root_level: Option<LevelFilter>,
}

impl FiltersBuilder {
    pub fn parse_env(mut self, env: &str) -> Self {
        let expression = env::var(env).unwrap_or_default();
        self.apply(&expression);
        self
    }

    pub fn parse_expression(mut self, expression: &str) -> Self {
        self.apply(expression);
        self
    }

    pub fn root_level(mut self, level: LevelFilter) -> Self {
        self.root_level = Some(level);
        self
    }

    pub fn build(self) -> Filters {
        Filters { targets: self.targets, root_level: self.root_level.unwrap_or(LevelFilter::Error) }
    }

    fn apply(&mut self, expression: &str) {
        for spec in expression.split(',').map(str::trim).filter(|spec| !spec.is_empty()) {
            match spec.parse::<FilterSpec>() {
                Ok(FilterSpec { target: Some(target), level }) => {
                    self.targets.insert(target, level);
                }
                Ok(FilterSpec { target: None, level }) => self.root_level = Some(level),
                Err(err) => eprintln!("Ignoring {}", err),
            }
        }
    }
}
