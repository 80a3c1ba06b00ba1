//! Commands that write the snapshot back: `move`, `view ...`, `property ...`.

use tabula_testing::fixtures::{sample_tasks_database, BOARD_VIEW, STATUS, TABLE_VIEW, TITLE};
use tabula_testing::{assertions, TestWorld};
use tabula_types::{
    CellValue, FilterCondition, ItemId, PropertyId, PropertyType, ViewId, ViewKind,
};

fn sample_world() -> TestWorld {
    TestWorld::new().with_database("tasks.json", &sample_tasks_database())
}

#[test]
fn test_move_uses_first_select_property_by_default() {
    let world = sample_world();

    let result = world
        .run(&["move", "tasks.json", "--item", "task-3", "--to", "Done"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Moved task-3 to Done (status)"));

    let db = world.load_database("tasks.json").unwrap();
    let status = PropertyId::new(STATUS);
    assert_eq!(
        db.item(&ItemId::new("task-3")).unwrap().value(&status),
        Some(&CellValue::text("Done"))
    );
    assert_eq!(
        db.item(&ItemId::new("task-1")).unwrap().value(&status),
        Some(&CellValue::text("Doing"))
    );

    let board = world
        .run(&["show", "tasks.json", "--view", BOARD_VIEW, "--format", "json"])
        .unwrap()
        .json()
        .unwrap();
    assertions::assert_column(&board, "Todo", &[]).unwrap();
    assertions::assert_column(&board, "Done", &["Implementar BD", "Pruebas"]).unwrap();
}

#[test]
fn test_move_to_unknown_label_leaves_file_untouched() {
    let world = sample_world();
    let before = world.load_database("tasks.json").unwrap();

    let result = world
        .run(&["move", "tasks.json", "--item", "task-3", "--to", "Nope"])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Option 'Nope' is not defined on property status"));
    assert_eq!(world.load_database("tasks.json").unwrap(), before);
}

#[test]
fn test_move_along_non_select_property_fails() {
    let world = sample_world();

    let result = world
        .run(&[
            "move", "tasks.json", "--item", "task-1", "--to", "X", "--property", TITLE,
        ])
        .unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("is not a select property"));
}

#[test]
fn test_view_use_switches_active_view() {
    let world = sample_world();

    assert!(world.run(&["view", "use", "tasks.json", BOARD_VIEW]).unwrap().success());
    let db = world.load_database("tasks.json").unwrap();
    assert_eq!(db.active_view().unwrap().id.as_str(), BOARD_VIEW);

    let list = world.run(&["view", "list", "tasks.json"]).unwrap();
    assert!(list.stdout().contains(&format!("* {}", BOARD_VIEW)));
    assert!(list.stdout().contains(&format!("  {}", TABLE_VIEW)));

    let missing = world.run(&["view", "use", "tasks.json", "nope"]).unwrap();
    assert!(!missing.success());
    let db = world.load_database("tasks.json").unwrap();
    assert_eq!(db.active_view().unwrap().id.as_str(), BOARD_VIEW);
}

#[test]
fn test_view_add_cycles_type_after_active() {
    let world = sample_world();

    assert!(world.run(&["view", "add", "tasks.json"]).unwrap().success());
    assert!(world
        .run(&["view", "add", "tasks.json", "--type", "list", "--name", "Lista"])
        .unwrap()
        .success());

    let db = world.load_database("tasks.json").unwrap();
    assert_eq!(db.views.len(), 4);
    assert_eq!(db.views[2].kind, ViewKind::Board);
    assert_eq!(db.views[2].name, "Board");
    assert_eq!(db.views[3].kind, ViewKind::List);
    assert_eq!(db.views[3].name, "Lista");
    // Adding never changes the active view
    assert_eq!(db.active_view().unwrap().id.as_str(), TABLE_VIEW);
}

#[test]
fn test_view_add_without_active_view_starts_after_table() {
    let mut empty = sample_tasks_database();
    empty.views.clear();
    empty.active_view_id = None;
    let mut dangling = sample_tasks_database();
    dangling.active_view_id = Some(ViewId::new("view-deleted"));
    let world = TestWorld::new()
        .with_database("empty.json", &empty)
        .with_database("dangling.json", &dangling);

    for file in ["empty.json", "dangling.json"] {
        let result = world.run(&["view", "add", file]).unwrap();
        assert!(result.success(), "{}: {}", file, result.stderr());

        let db = world.load_database(file).unwrap();
        let added = db.views.last().unwrap();
        assert_eq!(added.kind, ViewKind::Board, "{}", file);
        assert_eq!(added.name, "Board", "{}", file);
    }
}

#[test]
fn test_view_delete_active_falls_back_to_first() {
    let world = sample_world();

    assert!(world.run(&["view", "delete", "tasks.json", TABLE_VIEW]).unwrap().success());

    let db = world.load_database("tasks.json").unwrap();
    assert_eq!(db.views.len(), 1);
    assert_eq!(db.active_view_id.as_ref().unwrap().as_str(), BOARD_VIEW);
}

#[test]
fn test_view_filter_and_sort_commands() {
    let world = sample_world();

    let steps: [&[&str]; 3] = [
        &[
            "view", "filter", "tasks.json", TABLE_VIEW, "--property", "priority", "--condition",
            "is", "--value", "High",
        ],
        &[
            "view", "sort", "tasks.json", TABLE_VIEW, "--property", "status", "--direction", "desc",
        ],
        &[
            "view", "filter", "tasks.json", TABLE_VIEW, "--property", "status", "--condition",
            "matches",
        ],
    ];
    for args in steps {
        let result = world.run(args).unwrap();
        assert!(result.success(), "{:?}: {}", args, result.stderr());
    }

    let db = world.load_database("tasks.json").unwrap();
    let view = &db.views[0];
    assert_eq!(view.filters.len(), 2);
    assert_eq!(view.filters[0].value, Some(CellValue::text("High")));
    assert_eq!(view.filters[1].condition, FilterCondition::Other("matches".to_string()));

    let json = world
        .run(&["show", "tasks.json", "--format", "json"])
        .unwrap()
        .json()
        .unwrap();
    assertions::assert_titles(&json, &["Implementar BD", "Diseño"]).unwrap();

    assert!(world
        .run(&["view", "unfilter", "tasks.json", TABLE_VIEW, "0"])
        .unwrap()
        .success());
    let out_of_range = world
        .run(&["view", "unfilter", "tasks.json", TABLE_VIEW, "5"])
        .unwrap();
    assert!(!out_of_range.success());
    assert_eq!(world.load_database("tasks.json").unwrap().views[0].filters.len(), 1);
}

#[test]
fn test_property_lifecycle() {
    let world = sample_world();

    let added = world
        .run(&[
            "property", "add", "tasks.json", "--name", "Sprint", "--type", "select", "--format",
            "json",
        ])
        .unwrap();
    assert!(added.success(), "stderr: {}", added.stderr());

    let db = world.load_database("tasks.json").unwrap();
    let sprint = db.properties.last().unwrap();
    assert_eq!(sprint.kind, PropertyType::Select);
    assert_eq!(sprint.order, 3);
    let sprint_id = sprint.id.to_string();

    for args in [
        vec!["property", "add-option", "tasks.json", sprint_id.as_str(), "S1", "--color", "blue"],
        vec!["property", "rename", "tasks.json", sprint_id.as_str(), "Iteración"],
        vec!["property", "hide", "tasks.json", sprint_id.as_str()],
        vec!["view", "group", "tasks.json", BOARD_VIEW, "--property", sprint_id.as_str()],
    ] {
        let result = world.run(&args).unwrap();
        assert!(result.success(), "{:?}: {}", args, result.stderr());
    }

    let db = world.load_database("tasks.json").unwrap();
    let sprint = db.property(&PropertyId::new(sprint_id.as_str())).unwrap();
    assert_eq!(sprint.name, "Iteración");
    assert!(!sprint.visible);
    assert_eq!(sprint.option_labels().collect::<Vec<_>>(), vec!["S1"]);

    let deleted = world
        .run(&["property", "delete", "tasks.json", sprint_id.as_str()])
        .unwrap();
    assert!(deleted.success());

    // The board now points at a deleted property and degrades instead of failing
    let board = world
        .run(&["show", "tasks.json", "--view", BOARD_VIEW, "--format", "json"])
        .unwrap();
    assert!(board.success());
    assert_eq!(board.json().unwrap()["projection"]["mode"], "board_unconfigured");
}

#[test]
fn test_title_property_cannot_be_deleted_or_duplicated() {
    let world = sample_world();

    let result = world.run(&["property", "delete", "tasks.json", TITLE]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("cannot be deleted"));

    let result = world
        .run(&["property", "add", "tasks.json", "--name", "Other", "--type", "title"])
        .unwrap();
    assert!(!result.success());
}
