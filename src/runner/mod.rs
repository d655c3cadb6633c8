use tracing::{debug, warn};

use crate::actions::{Action, ConfigInterface};

pub mod shell;

/// A runnable-command matcher.
///
/// Runners share the action-plugin contract pattern: optional capabilities
/// default to no-ops, and failure is expressed as absent results. A runner
/// answers two questions about a query term: "can you run exactly this?"
/// (`accepts`) and "what else might the user mean?" (`fill_matches`). It
/// executes a command it previously matched (`exec`). Presentation of the
/// match list is the shell's job.
pub trait Runner: Send {
    fn name(&self) -> &str;

    /// If the runner can run precisely this term, the action to offer as
    /// the default choice.
    fn accepts(&mut self, term: &str) -> Option<Action>;

    /// Execute a matched command. Returns true when the runner handled it.
    fn exec(&mut self, command: &str) -> bool;

    /// Non-exact suggestions for the term, honoring basic paging.
    fn fill_matches(&mut self, _term: &str, _max: usize, _offset: usize) -> Vec<Action> {
        Vec::new()
    }

    /// True when the runner has user-tunable options.
    fn has_options(&self) -> bool {
        false
    }

    /// Configuration surface for those options.
    fn options_interface(&mut self) -> Option<ConfigInterface> {
        None
    }
}

pub type RunnerBox = Box<dyn Runner>;

/// Everything a query produced: the default (exact) match, if any runner
/// claimed one, plus suggestions from every runner. Each action is paired
/// with the name of the runner that produced it so `run` can route back.
#[derive(Debug, Default)]
pub struct QueryMatches {
    pub exact: Option<(String, Action)>,
    pub matches: Vec<(String, Action)>,
}

/// Ordered collection of runners. Registration order matters: the first
/// runner to claim an exact match becomes the default.
pub struct RunnerManager {
    runners: Vec<RunnerBox>,
}

impl RunnerManager {
    pub fn new() -> Self {
        Self {
            runners: Vec::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut manager = Self::new();
        manager.register(Box::new(shell::ShellRunner::new()));
        manager
    }

    pub fn register(&mut self, runner: RunnerBox) {
        debug!("📦 Registering runner: {}", runner.name());
        self.runners.push(runner);
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    pub fn query(&mut self, term: &str, max: usize, offset: usize) -> QueryMatches {
        let mut result = QueryMatches::default();
        if term.trim().is_empty() {
            return result;
        }

        for runner in &mut self.runners {
            if result.exact.is_none() {
                if let Some(action) = runner.accepts(term) {
                    result.exact = Some((runner.name().to_string(), action));
                }
            }
            for action in runner.fill_matches(term, max, offset) {
                result.matches.push((runner.name().to_string(), action));
            }
        }
        result
    }

    /// Route a command to the named runner. False when the runner is
    /// unknown or declined to handle it.
    pub fn run(&mut self, runner_name: &str, command: &str) -> bool {
        let Some(runner) = self
            .runners
            .iter_mut()
            .find(|r| r.name() == runner_name)
        else {
            warn!("⚠️  Unknown runner '{}'", runner_name);
            return false;
        };
        runner.exec(command)
    }
}

impl Default for RunnerManager {
    fn default() -> Self {
        Self::new()
    }
}
