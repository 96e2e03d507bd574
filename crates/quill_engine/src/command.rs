//! Command definitions and the verb registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use quill_foundation::EntityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rule::{NamedQuery, Rule, StateChange};

// =============================================================================
// Resolved Command
// =============================================================================

/// One argument of a resolved command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    /// A world entity, with the name the player used for it.
    Entity {
        /// The entity.
        id: EntityId,
        /// Its name as matched.
        name: String,
    },
    /// A word a command's syntax declared, such as a direction.
    Keyword(String),
}

impl Argument {
    /// The surface word for this argument.
    #[must_use]
    pub fn word(&self) -> &str {
        match self {
            Self::Entity { name, .. } => name,
            Self::Keyword(word) => word,
        }
    }

    /// The entity, if this argument is one.
    #[must_use]
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity { id, .. } => Some(*id),
            Self::Keyword(_) => None,
        }
    }
}

/// The canonical `[verb, ...args]` shape the rule engine consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Canonical command name.
    pub verb: String,
    /// Resolved arguments in input order.
    pub args: Vec<Argument>,
}

impl ResolvedCommand {
    /// Creates a resolved command.
    #[must_use]
    pub fn new(verb: impl Into<String>, args: Vec<Argument>) -> Self {
        Self {
            verb: verb.into(),
            args,
        }
    }

    /// The first argument's word, which is where movement commands keep the
    /// direction.
    #[must_use]
    pub fn object(&self) -> Option<&str> {
        self.args.first().map(Argument::word)
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        for arg in &self.args {
            write!(f, " {}", arg.word())?;
        }
        Ok(())
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// A syntax element: extra words a command brings into the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SyntaxElement {
    /// Another verb word for the same command ("get" for "take").
    Alias(String),
    /// An argument word the command understands ("north" for "go").
    Keyword(String),
}

/// How a command reports, by name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuerySpec {
    /// Run the named query and return its text.
    Named(String),
    /// Produce no text at all.
    RadioSilence,
}

/// A command as declared, with rules, state changes and queries referred to
/// by name. [`RuleBook::declare`](crate::RuleBook::declare) turns it into a
/// [`Command`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommandSpec {
    /// Canonical verb.
    pub name: String,
    /// Aliases and keywords.
    #[cfg_attr(feature = "serde", serde(default))]
    pub syntax: Vec<SyntaxElement>,
    /// Rule ids, checked in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<String>,
    /// State change ids, applied in order. `None` for commands with no side
    /// effect.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state_changes: Option<Vec<String>>,
    /// How to report instead of looking at the room.
    #[cfg_attr(feature = "serde", serde(default))]
    pub query: Option<QuerySpec>,
}

impl CommandSpec {
    /// Starts a declaration for a verb.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a verb alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.syntax.push(SyntaxElement::Alias(alias.into()));
        self
    }

    /// Adds argument keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.syntax
            .extend(keywords.into_iter().map(|k| SyntaxElement::Keyword(k.into())));
        self
    }

    /// Appends a rule id.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Appends a state change id.
    #[must_use]
    pub fn with_state_change(mut self, change: impl Into<String>) -> Self {
        self.state_changes
            .get_or_insert_with(Vec::new)
            .push(change.into());
        self
    }

    /// Reports through a named query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(QuerySpec::Named(query.into()));
        self
    }

    /// Reports nothing.
    #[must_use]
    pub fn radio_silence(mut self) -> Self {
        self.query = Some(QuerySpec::RadioSilence);
        self
    }
}

// =============================================================================
// Command
// =============================================================================

/// Produces a command's response text from the actor and its arguments.
pub type Responder = Arc<dyn Fn(EntityId, &[Argument]) -> String + Send + Sync>;

/// A resolved report.
pub enum Report<C> {
    /// Return the query's text.
    Query(Arc<NamedQuery<C>>),
    /// Return the empty string.
    RadioSilence,
}

impl<C> Clone for Report<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Query(query) => Self::Query(Arc::clone(query)),
            Self::RadioSilence => Self::RadioSilence,
        }
    }
}

impl<C> fmt::Debug for Report<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => f.debug_tuple("Query").field(&query.id()).finish(),
            Self::RadioSilence => f.write_str("RadioSilence"),
        }
    }
}

/// A command with every rule, state change and query already resolved.
///
/// Rules run in the order they were declared and the first one to fail
/// decides the response.
pub struct Command<C> {
    name: String,
    syntax: Vec<SyntaxElement>,
    response: Option<Responder>,
    rules: Vec<Arc<Rule<C>>>,
    state_changes: Option<Vec<Arc<StateChange<C>>>>,
    query: Option<Report<C>>,
}

impl<C> Command<C> {
    /// A command with no rules, no state changes and the default report.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            syntax: Vec::new(),
            response: None,
            rules: Vec::new(),
            state_changes: None,
            query: None,
        }
    }

    /// Adds a syntax element.
    #[must_use]
    pub fn with_syntax(mut self, element: SyntaxElement) -> Self {
        self.syntax.push(element);
        self
    }

    /// Sets a custom response, used when there is no query.
    #[must_use]
    pub fn with_response<F>(mut self, response: F) -> Self
    where
        F: Fn(EntityId, &[Argument]) -> String + Send + Sync + 'static,
    {
        self.response = Some(Arc::new(response));
        self
    }

    /// Appends a resolved rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Arc<Rule<C>>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a resolved state change.
    #[must_use]
    pub fn with_state_change(mut self, change: Arc<StateChange<C>>) -> Self {
        self.state_changes.get_or_insert_with(Vec::new).push(change);
        self
    }

    /// Sets the report.
    #[must_use]
    pub fn with_report(mut self, report: Report<C>) -> Self {
        self.query = Some(report);
        self
    }

    /// Canonical verb.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Syntax elements in declaration order.
    #[must_use]
    pub fn syntax(&self) -> &[SyntaxElement] {
        &self.syntax
    }

    /// Verb aliases from the syntax.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.syntax.iter().filter_map(|element| match element {
            SyntaxElement::Alias(alias) => Some(alias.as_str()),
            SyntaxElement::Keyword(_) => None,
        })
    }

    /// Argument keywords from the syntax.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.syntax.iter().filter_map(|element| match element {
            SyntaxElement::Keyword(keyword) => Some(keyword.as_str()),
            SyntaxElement::Alias(_) => None,
        })
    }

    /// Custom response, if any.
    #[must_use]
    pub fn response(&self) -> Option<&Responder> {
        self.response.as_ref()
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Arc<Rule<C>>] {
        &self.rules
    }

    /// State changes in application order, or `None` if the command has no
    /// side effect.
    #[must_use]
    pub fn state_changes(&self) -> Option<&[Arc<StateChange<C>>]> {
        self.state_changes.as_deref()
    }

    /// Returns true if the command changes the world.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        self.state_changes.is_some()
    }

    /// The report, if the command does not default to a look.
    #[must_use]
    pub fn query(&self) -> Option<&Report<C>> {
        self.query.as_ref()
    }
}

impl<C> fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("syntax", &self.syntax)
            .field("response", &self.response.is_some())
            .field(
                "rules",
                &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>(),
            )
            .field(
                "state_changes",
                &self
                    .state_changes
                    .as_ref()
                    .map(|changes| changes.iter().map(|c| c.id()).collect::<Vec<_>>()),
            )
            .field("query", &self.query)
            .finish()
    }
}

// =============================================================================
// Command Registry
// =============================================================================

/// Verb words to commands.
///
/// Several words may point at one command; the command's own name is always
/// one of them.
pub struct CommandRegistry<C> {
    commands: HashMap<String, Arc<Command<C>>>,
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }
}

impl<C> CommandRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under its name and every alias in its syntax.
    ///
    /// Later registrations replace earlier ones for the same word.
    pub fn register(&mut self, command: Command<C>) -> Arc<Command<C>> {
        let command = Arc::new(command);
        self.insert(command.name().to_string(), Arc::clone(&command));
        let aliases: Vec<String> = command.aliases().map(str::to_string).collect();
        for alias in aliases {
            self.insert(alias, Arc::clone(&command));
        }
        command
    }

    /// Registers a command under an extra verb word.
    pub fn insert(&mut self, verb: impl Into<String>, command: Arc<Command<C>>) {
        self.commands.insert(verb.into().to_lowercase(), command);
    }

    /// Looks up a verb word.
    #[must_use]
    pub fn get(&self, verb: &str) -> Option<&Arc<Command<C>>> {
        self.commands
            .get(verb)
            .or_else(|| self.commands.get(&verb.to_lowercase()))
    }

    /// Returns true if the word is a verb.
    #[must_use]
    pub fn contains(&self, verb: &str) -> bool {
        self.get(verb).is_some()
    }

    /// Iterates over `(verb word, command)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Command<C>>)> {
        self.commands
            .iter()
            .map(|(verb, command)| (verb.as_str(), command))
    }

    /// Number of verb words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no verbs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<C> fmt::Debug for CommandRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.commands.iter()).finish()
    }
}
