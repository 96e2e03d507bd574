//! Rule engine dispatch tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use quill_engine::{Argument, CommandSpec, ResolvedCommand, RuleBook, RuleEngine};
use quill_foundation::{Castle, EntityId, ErrorKind, Room};
use quill_storage::{Attributes, World};

fn setup() -> (World, EntityId, EntityId) {
    let mut world = World::new();
    let hall = world
        .spawn(Attributes::new().with_room(Room::new("The great hall.")))
        .unwrap();
    let you = world
        .spawn(Attributes::named("you").located_in(hall))
        .unwrap();
    (world, hall, you)
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn bare(verb: &str) -> ResolvedCommand {
    ResolvedCommand::new(verb, Vec::new())
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn first_failing_rule_short_circuits() {
    let (mut world, _, you) = setup();
    let calls: Vec<_> = (0..4).map(|_| counter()).collect();
    let mut book = RuleBook::<World>::new();

    let c = Arc::clone(&calls[0]);
    book.rule("first", "First failed.", move |_, _, _| {
        c.fetch_add(1, Ordering::SeqCst);
        true
    });
    let c = Arc::clone(&calls[1]);
    book.rule("second", "Second failed.", move |_, _, _| {
        c.fetch_add(1, Ordering::SeqCst);
        false
    });
    let c = Arc::clone(&calls[2]);
    book.rule("third", "Third failed.", move |_, _, _| {
        c.fetch_add(1, Ordering::SeqCst);
        false
    });
    let c = Arc::clone(&calls[3]);
    book.register_effect("mark", move |_: &mut World, _, _| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let commands = book
        .declare_all(&[CommandSpec::new("poke")
            .with_rule("first")
            .with_rule("second")
            .with_rule("third")
            .with_state_change("mark")])
        .unwrap();
    let before = world.clone();

    let err = RuleEngine::handle_command(&commands, &mut world, you, &bare("poke")).unwrap_err();

    assert_eq!(
        err.kind,
        ErrorKind::RuleViolation {
            rule: "second".into(),
            message: "Second failed.".into(),
        }
    );
    let counts: Vec<_> = calls.iter().map(|c| c.load(Ordering::SeqCst)).collect();
    assert_eq!(counts, vec![1, 1, 0, 0]);
    assert_eq!(world, before);
}

#[test]
fn rules_see_the_resolved_arguments() {
    let (mut world, _, you) = setup();
    let mut book = RuleBook::<World>::new();
    book.rule("only_wands", "That isn't a wand.", |_, _, command| {
        command.object() == Some("wand")
    });
    let commands = book
        .declare_all(&[CommandSpec::new("wave").with_rule("only_wands")])
        .unwrap();

    let wave = |word: &str| ResolvedCommand::new("wave", vec![Argument::Keyword(word.into())]);

    assert!(RuleEngine::handle_command(&commands, &mut world, you, &wave("wand")).is_ok());
    let err = RuleEngine::handle_command(&commands, &mut world, you, &wave("fish")).unwrap_err();
    assert_eq!(err.to_string(), "That isn't a wand.");
}

// =============================================================================
// State Changes and Reports
// =============================================================================

#[test]
fn effects_apply_before_the_report() {
    let (mut world, hall, you) = setup();
    let tower = world
        .spawn(Attributes::new().with_room(Room::new("A drafty tower.")))
        .unwrap();
    let mut book = RuleBook::<World>::new();
    book.register_effect("teleport", move |w: &mut World, actor, _| {
        w.relocate(actor, tower)
    });
    let commands = book
        .declare_all(&[CommandSpec::new("xyzzy").with_state_change("teleport")])
        .unwrap();

    let response =
        RuleEngine::handle_command(&commands, &mut world, you, &bare("xyzzy")).unwrap();

    assert_eq!(response, "A drafty tower.");
    assert_ne!(world.locate(you), Some(hall));
}

#[test]
fn radio_silence_says_nothing() {
    let (mut world, _, you) = setup();
    let commands = RuleBook::<World>::new()
        .declare_all(&[CommandSpec::new("wait").radio_silence()])
        .unwrap();

    let response = RuleEngine::handle_command(&commands, &mut world, you, &bare("wait")).unwrap();

    assert_eq!(response, "");
}

#[test]
fn queries_report_after_effects() {
    let (mut world, _, you) = setup();
    let mut book = RuleBook::<World>::new();
    book.register_effect("rename_self", |w: &mut World, actor, _| {
        w.rename(actor, "hero")
    });
    book.register_query("whoami", |w: &World, actor, _| {
        Ok(w.name(actor).unwrap_or("nobody").to_string())
    });
    let commands = book
        .declare_all(&[CommandSpec::new("become")
            .with_state_change("rename_self")
            .with_query("whoami")])
        .unwrap();

    let response =
        RuleEngine::handle_command(&commands, &mut world, you, &bare("become")).unwrap();

    assert_eq!(response, "hero");
}

#[test]
fn failing_queries_name_the_command() {
    let (mut world, _, you) = setup();
    let mut book = RuleBook::<World>::new();
    book.register_query("broken", |_: &World, actor, _| {
        Err(quill_foundation::Error::unplaced(actor))
    });
    let commands = book
        .declare_all(&[CommandSpec::new("inspect").with_query("broken")])
        .unwrap();

    let err = RuleEngine::handle_command(&commands, &mut world, you, &bare("inspect")).unwrap_err();

    assert!(!err.is_user_facing());
    let ctx = err.context.expect("annotated with the command");
    assert_eq!(ctx.source.as_deref(), Some("inspect"));
    assert_eq!(ctx.stack, vec!["query broken".to_string()]);
}

// =============================================================================
// Declaration
// =============================================================================

#[test]
fn unknown_names_fail_at_declaration() {
    let book = RuleBook::<World>::new();

    let err = book
        .declare(&CommandSpec::new("fly").with_rule("can_fly"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownRule("can_fly".into()));

    let err = book
        .declare(&CommandSpec::new("fly").with_state_change("levitate"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownEffect("levitate".into()));

    let err = book
        .declare(&CommandSpec::new("fly").with_query("altitude"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownQuery("altitude".into()));
}

#[test]
fn rules_need_a_message() {
    let mut book = RuleBook::<World>::new();
    book.register_rule("can_fly", |_, _, _| true);

    let err = book
        .declare(&CommandSpec::new("fly").with_rule("can_fly"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingRuleMessage("can_fly".into()));

    book.set_error("can_fly", "You flap your arms uselessly.");
    assert!(book.declare(&CommandSpec::new("fly").with_rule("can_fly")).is_ok());
    assert_eq!(book.error("can_fly"), Some("You flap your arms uselessly."));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn effects_without_rules_always_apply(times in 1usize..20) {
        let (mut world, _, you) = setup();
        let applied = counter();
        let c = Arc::clone(&applied);
        let mut book = RuleBook::<World>::new();
        book.register_effect("tick", move |_: &mut World, _, _| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let commands = book
            .declare_all(&[CommandSpec::new("tick").with_state_change("tick")])
            .unwrap();

        for _ in 0..times {
            let response =
                RuleEngine::handle_command(&commands, &mut world, you, &bare("tick")).unwrap();
            prop_assert_eq!(response, "The great hall.");
        }
        prop_assert_eq!(applied.load(Ordering::SeqCst), times);
    }
}
