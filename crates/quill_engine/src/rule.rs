//! The rule book: named rules, state changes and queries.
//!
//! Commands are declared by name ([`CommandSpec`]) and resolved here into
//! [`Command`]s holding typed handles. An unknown name, or a rule without an
//! error message, is rejected when the command is declared rather than when a
//! player first types it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use quill_foundation::{EntityId, Error, Result};

use crate::command::{
    Argument, Command, CommandRegistry, CommandSpec, QuerySpec, Report, ResolvedCommand,
};

/// Predicate deciding whether a command may proceed.
pub type Predicate<C> = Arc<dyn Fn(&C, EntityId, &ResolvedCommand) -> bool + Send + Sync>;

/// Effect applied once every rule has passed.
pub type Effect<C> = Arc<dyn Fn(&mut C, EntityId, &[Argument]) -> Result<()> + Send + Sync>;

/// Read-only lookup producing response text.
pub type Lookup<C> = Arc<dyn Fn(&C, EntityId, &[Argument]) -> Result<String> + Send + Sync>;

// =============================================================================
// Handles
// =============================================================================

/// A rule with the message shown when it fails.
pub struct Rule<C> {
    id: String,
    message: String,
    predicate: Predicate<C>,
}

impl<C> Rule<C> {
    /// Rule id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Message shown to the player when the rule fails.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluates the predicate.
    #[must_use]
    pub fn check(&self, castle: &C, actor: EntityId, command: &ResolvedCommand) -> bool {
        (self.predicate)(castle, actor, command)
    }

    /// The failure this rule raises.
    #[must_use]
    pub fn violation(&self) -> Error {
        Error::rule_violation(&self.id, &self.message)
    }
}

impl<C> fmt::Debug for Rule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A named state change.
pub struct StateChange<C> {
    id: String,
    effect: Effect<C>,
}

impl<C> StateChange<C> {
    /// State change id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Applies the change.
    ///
    /// # Errors
    /// Propagates whatever the effect reports.
    pub fn apply(&self, castle: &mut C, actor: EntityId, args: &[Argument]) -> Result<()> {
        (self.effect)(castle, actor, args)
    }
}

impl<C> fmt::Debug for StateChange<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateChange")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// A named query.
pub struct NamedQuery<C> {
    id: String,
    lookup: Lookup<C>,
}

impl<C> NamedQuery<C> {
    /// Query id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Runs the query.
    ///
    /// # Errors
    /// Propagates whatever the lookup reports.
    pub fn run(&self, castle: &C, actor: EntityId, args: &[Argument]) -> Result<String> {
        (self.lookup)(castle, actor, args)
    }
}

impl<C> fmt::Debug for NamedQuery<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedQuery")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Rule Book
// =============================================================================

/// Registry of rule predicates, their error messages, state changes and
/// queries.
pub struct RuleBook<C> {
    predicates: HashMap<String, Predicate<C>>,
    errors: HashMap<String, String>,
    effects: HashMap<String, Arc<StateChange<C>>>,
    queries: HashMap<String, Arc<NamedQuery<C>>>,
}

impl<C> Default for RuleBook<C> {
    fn default() -> Self {
        Self {
            predicates: HashMap::new(),
            errors: HashMap::new(),
            effects: HashMap::new(),
            queries: HashMap::new(),
        }
    }
}

impl<C: 'static> RuleBook<C> {
    /// Creates an empty rule book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule predicate. Its message is set separately with
    /// [`set_error`](Self::set_error).
    pub fn register_rule<F>(&mut self, id: impl Into<String>, predicate: F)
    where
        F: Fn(&C, EntityId, &ResolvedCommand) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(id.into(), Arc::new(predicate));
    }

    /// Sets the message shown when a rule fails.
    pub fn set_error(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(id.into(), message.into());
    }

    /// Registers a rule predicate together with its message.
    pub fn rule<F>(&mut self, id: impl Into<String>, message: impl Into<String>, predicate: F)
    where
        F: Fn(&C, EntityId, &ResolvedCommand) -> bool + Send + Sync + 'static,
    {
        let id = id.into();
        self.set_error(id.clone(), message);
        self.register_rule(id, predicate);
    }

    /// Registers a state change.
    pub fn register_effect<F>(&mut self, id: impl Into<String>, effect: F)
    where
        F: Fn(&mut C, EntityId, &[Argument]) -> Result<()> + Send + Sync + 'static,
    {
        let id = id.into();
        self.effects.insert(
            id.clone(),
            Arc::new(StateChange {
                id,
                effect: Arc::new(effect),
            }),
        );
    }

    /// Registers a query.
    pub fn register_query<F>(&mut self, id: impl Into<String>, lookup: F)
    where
        F: Fn(&C, EntityId, &[Argument]) -> Result<String> + Send + Sync + 'static,
    {
        let id = id.into();
        self.queries.insert(
            id.clone(),
            Arc::new(NamedQuery {
                id,
                lookup: Arc::new(lookup),
            }),
        );
    }

    /// The configured message for a rule.
    #[must_use]
    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    /// Resolves a rule id into a handle.
    ///
    /// # Errors
    /// `UnknownRule` if no predicate is registered, `MissingRuleMessage` if no
    /// error message is configured.
    pub fn resolve_rule(&self, id: &str) -> Result<Arc<Rule<C>>> {
        let predicate = self
            .predicates
            .get(id)
            .ok_or_else(|| Error::unknown_rule(id))?;
        let message = self
            .errors
            .get(id)
            .ok_or_else(|| Error::missing_rule_message(id))?;

        Ok(Arc::new(Rule {
            id: id.to_string(),
            message: message.clone(),
            predicate: Arc::clone(predicate),
        }))
    }

    /// Resolves a state change id into a handle.
    ///
    /// # Errors
    /// `UnknownEffect` if nothing is registered under the id.
    pub fn resolve_effect(&self, id: &str) -> Result<Arc<StateChange<C>>> {
        self.effects
            .get(id)
            .cloned()
            .ok_or_else(|| Error::unknown_effect(id))
    }

    /// Resolves a query id into a handle.
    ///
    /// # Errors
    /// `UnknownQuery` if nothing is registered under the id.
    pub fn resolve_query(&self, id: &str) -> Result<Arc<NamedQuery<C>>> {
        self.queries
            .get(id)
            .cloned()
            .ok_or_else(|| Error::unknown_query(id))
    }

    /// Resolves a declaration into a command.
    ///
    /// # Errors
    /// Fails on the first rule, state change or query id that cannot be
    /// resolved.
    pub fn declare(&self, spec: &CommandSpec) -> Result<Command<C>> {
        let mut command = Command::new(&spec.name);

        for element in &spec.syntax {
            command = command.with_syntax(element.clone());
        }
        for id in &spec.rules {
            command = command.with_rule(self.resolve_rule(id)?);
        }
        if let Some(changes) = &spec.state_changes {
            for id in changes {
                command = command.with_state_change(self.resolve_effect(id)?);
            }
        }
        match &spec.query {
            Some(QuerySpec::Named(id)) => {
                command = command.with_report(Report::Query(self.resolve_query(id)?));
            }
            Some(QuerySpec::RadioSilence) => {
                command = command.with_report(Report::RadioSilence);
            }
            None => {}
        }

        Ok(command)
    }

    /// Declares every spec into a fresh registry.
    ///
    /// # Errors
    /// Fails on the first declaration that does not resolve.
    pub fn declare_all<'a, I>(&self, specs: I) -> Result<CommandRegistry<C>>
    where
        I: IntoIterator<Item = &'a CommandSpec>,
    {
        let mut registry = CommandRegistry::new();
        for spec in specs {
            registry.register(self.declare(spec)?);
        }
        Ok(registry)
    }
}

impl<C> fmt::Debug for RuleBook<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rules: Vec<_> = self.predicates.keys().collect();
        rules.sort();
        let mut effects: Vec<_> = self.effects.keys().collect();
        effects.sort();
        let mut queries: Vec<_> = self.queries.keys().collect();
        queries.sort();

        f.debug_struct("RuleBook")
            .field("rules", &rules)
            .field("errors", &self.errors)
            .field("effects", &effects)
            .field("queries", &queries)
            .finish()
    }
}
