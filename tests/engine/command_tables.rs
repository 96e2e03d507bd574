//! Commands declared in data files.

use quill_engine::{CommandSpec, QuerySpec, ResolvedCommand, RuleEngine, SyntaxElement, stdlib};
use quill_foundation::{Castle, ErrorKind, Room};
use quill_storage::{Attributes, World};

const TABLE: &str = r#"[
    {
        "name": "go",
        "syntax": [{ "alias": "walk" }, { "keyword": "up" }, { "keyword": "down" }],
        "rules": ["path_exists", "actor_can_act"],
        "state_changes": ["move_actor"]
    },
    { "name": "look", "rules": ["can_see"] },
    { "name": "examine", "rules": ["has_object", "can_see"], "query": { "named": "describe" } },
    { "name": "wait", "query": "radio_silence" }
]"#;

fn table() -> Vec<CommandSpec> {
    serde_json::from_str(TABLE).unwrap()
}

#[test]
fn table_parses_into_specs() {
    let specs = table();

    assert_eq!(specs.len(), 4);
    assert_eq!(
        specs[0].syntax,
        vec![
            SyntaxElement::Alias("walk".into()),
            SyntaxElement::Keyword("up".into()),
            SyntaxElement::Keyword("down".into()),
        ]
    );
    assert_eq!(specs[0].state_changes, Some(vec!["move_actor".to_string()]));
    assert_eq!(specs[1].state_changes, None);
    assert_eq!(specs[1].query, None);
    assert_eq!(specs[2].query, Some(QuerySpec::Named("describe".into())));
    assert_eq!(specs[3].query, Some(QuerySpec::RadioSilence));
}

#[test]
fn specs_survive_serialization() {
    let specs = stdlib::commands();
    let json = serde_json::to_string(&specs).unwrap();
    let back: Vec<CommandSpec> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, specs);
}

#[test]
fn table_declares_against_the_standard_rule_book() {
    let commands = stdlib::rule_book::<World>().declare_all(&table()).unwrap();

    let mut world = World::new();
    let hall = world
        .spawn(Attributes::new().with_room(Room::new("The great hall.")))
        .unwrap();
    let tower = world
        .spawn(Attributes::new().with_room(Room::new("A drafty tower.")))
        .unwrap();
    world.add_path(hall, "up", tower).unwrap();
    let you = world
        .spawn(Attributes::named("you").located_in(hall))
        .unwrap();

    let walk_up = ResolvedCommand::new("walk", vec![quill_engine::Argument::Keyword("up".into())]);
    let response = RuleEngine::handle_command(&commands, &mut world, you, &walk_up).unwrap();

    assert_eq!(response, "A drafty tower.");
    assert_eq!(world.locate(you), Some(tower));
}

#[test]
fn tables_naming_unknown_rules_are_rejected() {
    let specs: Vec<CommandSpec> =
        serde_json::from_str(r#"[{ "name": "fly", "rules": ["can_fly"] }]"#).unwrap();

    let err = stdlib::rule_book::<World>()
        .declare_all(&specs)
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::UnknownRule("can_fly".into()));
}
