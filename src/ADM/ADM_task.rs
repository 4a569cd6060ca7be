//! Batches of Lane-Emden problems: built-in examples and TOML task files.
//!
//! A task file looks like
//! ```toml
//! [settings]
//! loglevel = "info"
//! parallel = true
//!
//! [[task]]
//! name = "polytrope n = 5"
//! nonlinearity = "u^5"
//! initial_condition = "1"
//! num_terms = 4
//! # optional, default "u" and "xi"
//! unknown = "u"
//! argument = "xi"
//! ```
use crate::ADM::ADM_errors::{AdmError, AdmResult};
use crate::ADM::ADM_solver::{AdmSolver, NumTerms};
use crate::symbolic::symbolic_engine::Expr;
use itertools::Itertools;
use log::{error, info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};
use toml::{Table, Value};

/// `num_terms` exactly as written by the user, validated only when the solver is built.
#[derive(Clone, Debug, PartialEq)]
pub enum TermsValue {
    Integer(i64),
    Float(f64),
    Other(String),
}

impl From<&Value> for TermsValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Integer(i) => TermsValue::Integer(*i),
            Value::Float(f) => TermsValue::Float(*f),
            other => TermsValue::Other(other.to_string()),
        }
    }
}

impl TryFrom<&TermsValue> for NumTerms {
    type Error = AdmError;

    fn try_from(value: &TermsValue) -> Result<Self, Self::Error> {
        match value {
            TermsValue::Integer(i) => NumTerms::try_from(*i),
            TermsValue::Float(f) => NumTerms::try_from(*f),
            TermsValue::Other(raw) => Err(AdmError::ConfigError(format!(
                "num_terms must be a positive integer, got {}",
                raw
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdmTask {
    pub name: String,
    pub nonlinearity: String,
    pub initial_condition: String,
    pub num_terms: TermsValue,
    pub unknown: String,
    pub argument: String,
}

impl AdmTask {
    pub fn new(name: &str, nonlinearity: &str, initial_condition: &str, num_terms: i64) -> AdmTask {
        AdmTask {
            name: name.to_string(),
            nonlinearity: nonlinearity.to_string(),
            initial_condition: initial_condition.to_string(),
            num_terms: TermsValue::Integer(num_terms),
            unknown: "u".to_string(),
            argument: "xi".to_string(),
        }
    }

    /// The reference problem (u² - C)^1.5 followed by the classical Lane-Emden
    /// nonlinearities.
    pub fn default_tasks() -> Vec<AdmTask> {
        vec![
            AdmTask::new("reference (u^2 - C)^1.5", "(u^2 - C)^1.5", "1", 7),
            AdmTask::new("polytrope n = 0", "u^0", "1", 4),
            AdmTask::new("polytrope n = 1", "u^1", "1", 4),
            AdmTask::new("polytrope n = 5", "u^5", "1", 4),
            AdmTask::new("isothermal sphere", "exp(u)", "0", 4),
            AdmTask::new("sine nonlinearity", "sin(u)", "1", 4),
            AdmTask::new("cosh nonlinearity", "cosh(u)", "0", 4),
        ]
    }

    fn parse_field(&self, field: &str, text: &str) -> AdmResult<Expr> {
        Expr::parse_expression(text).map_err(|err| {
            AdmError::ConfigError(format!("task '{}', field {}: {}", self.name, field, err))
        })
    }

    /// Parses the expressions and validates the configuration.
    pub fn solver(&self) -> AdmResult<AdmSolver> {
        let nonlinearity = self.parse_field("nonlinearity", &self.nonlinearity)?;
        let initial_condition = self.parse_field("initial_condition", &self.initial_condition)?;
        AdmSolver::new(&self.num_terms, nonlinearity, initial_condition)?
            .with_variables(&self.unknown, &self.argument)
    }

    pub fn run(&self) -> TaskOutcome {
        let begin = Instant::now();
        info!("task '{}' started", self.name);
        let result = self.solver().and_then(|mut solver| solver.solve());
        match &result {
            Ok(_) => info!("task '{}' solved", self.name),
            Err(AdmError::ConfigError(msg)) => warn!("task '{}' skipped: {}", self.name, msg),
            Err(err) => error!("task '{}' failed: {}", self.name, err),
        }
        TaskOutcome {
            name: self.name.clone(),
            argument: self.argument.clone(),
            result,
            elapsed_ms: begin.elapsed().as_millis(),
        }
    }
}

/// Result of one task of a batch.
#[derive(Clone, Debug)]
pub struct TaskOutcome {
    pub name: String,
    pub argument: String,
    pub result: AdmResult<(Expr, Vec<Expr>)>,
    pub elapsed_ms: u128,
}

impl TaskOutcome {
    pub fn is_solved(&self) -> bool {
        self.result.is_ok()
    }
}

/// Solves every task on its own; a failing task never stops the others. Outcomes keep
/// the order of `tasks`.
pub fn run_batch(tasks: &[AdmTask], parallel: bool) -> Vec<TaskOutcome> {
    let outcomes: Vec<TaskOutcome> = if parallel {
        tasks.par_iter().map(AdmTask::run).collect()
    } else {
        tasks.iter().map(AdmTask::run).collect()
    };
    let failed = outcomes.iter().filter(|o| !o.is_solved()).map(|o| &o.name).join(", ");
    if failed.is_empty() {
        info!("all {} tasks solved", outcomes.len());
    } else {
        warn!("tasks not solved: {}", failed);
    }
    outcomes
}

/// u_0 + u_1 + ... with a leading minus of a component shown as subtraction
fn render_series(components: &[Expr]) -> String {
    components
        .iter()
        .map(Expr::to_string)
        .enumerate()
        .fold(String::new(), |mut acc, (k, text)| {
            match (k, text.strip_prefix('-')) {
                (0, _) => acc.push_str(&text),
                (_, Some(rest)) => acc.push_str(&format!(" - {}", rest)),
                (_, None) => acc.push_str(&format!(" + {}", text)),
            }
            acc
        })
}

/// Components as a table followed by the approximate solution, or the error.
pub fn render_outcome(outcome: &TaskOutcome) -> String {
    match &outcome.result {
        Ok((_, components)) => {
            let mut builder = Builder::default();
            builder.push_record(["k".to_string(), format!("u_k({})", outcome.argument)]);
            for (k, component) in components.iter().enumerate() {
                builder.push_record([k.to_string(), component.to_string()]);
            }
            let mut table = builder.build();
            table.with(Style::modern_rounded());
            format!(
                "{} ({} ms)\n{}\nu({}) ≈ {}\n",
                outcome.name,
                outcome.elapsed_ms,
                table,
                outcome.argument,
                render_series(components)
            )
        }
        Err(err) => format!("{}: {}\n", outcome.name, err),
    }
}

/// `[settings]` table of a task file.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSettings {
    pub loglevel: String,
    pub parallel: bool,
}

impl Default for TaskSettings {
    fn default() -> Self {
        TaskSettings {
            loglevel: "info".to_string(),
            parallel: false,
        }
    }
}

/// A `[[task]]` entry that could not be turned into a task.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedTask {
    pub name: String,
    pub argument: String,
    pub error: AdmError,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaskFile {
    pub settings: TaskSettings,
    pub tasks: Vec<Result<AdmTask, MalformedTask>>,
}

fn required_str(table: &Table, key: &str) -> Result<String, String> {
    match table.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Integer(i)) => Ok(i.to_string()),
        Some(Value::Float(f)) => Ok(f.to_string()),
        Some(other) => Err(format!("key '{}' must be a string, got {}", key, other)),
        None => Err(format!("missing key '{}'", key)),
    }
}

fn optional_str(table: &Table, key: &str, default: &str) -> Result<String, String> {
    match table.get(key) {
        None => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("key '{}' must be a string, got {}", key, other)),
    }
}

fn task_from_table(index: usize, value: &Value) -> Result<AdmTask, MalformedTask> {
    let fallback_name = format!("task #{}", index + 1);
    let Some(table) = value.as_table() else {
        return Err(MalformedTask {
            name: fallback_name,
            argument: "xi".to_string(),
            error: AdmError::ConfigError("[[task]] entry must be a table".to_string()),
        });
    };
    let name = table
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(fallback_name);
    let argument = table
        .get("argument")
        .and_then(Value::as_str)
        .unwrap_or("xi")
        .to_string();
    let build = || -> Result<AdmTask, String> {
        let num_terms = table
            .get("num_terms")
            .map(TermsValue::from)
            .ok_or_else(|| "missing key 'num_terms'".to_string())?;
        Ok(AdmTask {
            name: name.clone(),
            nonlinearity: required_str(table, "nonlinearity")?,
            initial_condition: required_str(table, "initial_condition")?,
            num_terms,
            unknown: optional_str(table, "unknown", "u")?,
            argument: optional_str(table, "argument", "xi")?,
        })
    };
    build().map_err(|msg| MalformedTask {
        name: name.clone(),
        argument,
        error: AdmError::ConfigError(format!("task '{}': {}", name, msg)),
    })
}

impl TaskFile {
    pub fn from_toml_str(input: &str) -> AdmResult<TaskFile> {
        let document: Table = input
            .parse()
            .map_err(|err| AdmError::ConfigError(format!("invalid task file: {}", err)))?;
        let mut settings = TaskSettings::default();
        if let Some(section) = document.get("settings") {
            let section = section.as_table().ok_or_else(|| {
                AdmError::ConfigError("[settings] must be a table".to_string())
            })?;
            if let Some(level) = section.get("loglevel") {
                settings.loglevel = level
                    .as_str()
                    .ok_or_else(|| AdmError::ConfigError("loglevel must be a string".to_string()))?
                    .to_string();
            }
            if let Some(parallel) = section.get("parallel") {
                settings.parallel = parallel
                    .as_bool()
                    .ok_or_else(|| AdmError::ConfigError("parallel must be a boolean".to_string()))?;
            }
        }
        let entries = match document.get("task") {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries.clone(),
            Some(_) => {
                return Err(AdmError::ConfigError(
                    "tasks must be given as [[task]] tables".to_string(),
                ));
            }
        };
        let tasks = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| task_from_table(i, entry))
            .collect();
        Ok(TaskFile { settings, tasks })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> AdmResult<TaskFile> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| {
            AdmError::ConfigError(format!("cannot read {}: {}", path.display(), err))
        })?;
        info!("task file {} loaded", path.display());
        TaskFile::from_toml_str(&content)
    }

    /// Runs the well-formed tasks with `run_batch` and reports the malformed ones as
    /// configuration errors, all in file order.
    pub fn run(&self) -> Vec<TaskOutcome> {
        let valid: Vec<AdmTask> = self
            .tasks
            .iter()
            .filter_map(|entry| entry.as_ref().ok().cloned())
            .collect();
        let mut solved = run_batch(&valid, self.settings.parallel).into_iter();
        self.tasks
            .iter()
            .filter_map(|entry| match entry {
                Ok(_) => solved.next(),
                Err(malformed) => {
                    warn!("{}", malformed.error);
                    Some(TaskOutcome {
                        name: malformed.name.clone(),
                        argument: malformed.argument.clone(),
                        result: Err(malformed.error.clone()),
                        elapsed_ms: 0,
                    })
                }
            })
            .collect()
    }
}
