use std::path::PathBuf;

use menusearch_core::*;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn open_session(caps: GroupCaps) -> SearchSession {
    let dir = fixtures_dir();
    let commands = load_catalog(&dir.join("menu.json"), CatalogKind::Commands).unwrap();
    let dialog = load_catalog_or_empty(&dir.join("prefs.toml"), CatalogKind::DialogControls);
    SearchSession::new(commands, dialog, caps)
}

fn type_query(session: &mut SearchSession, recent: &mut RecentlyUsed, text: &str) {
    session.handle(InputEvent::VisibilityChanged(true), recent);
    session.handle(InputEvent::QueryChanged(text.to_string()), recent);
}

fn labels(group: &ResultGroup) -> Vec<&str> {
    group.entries().iter().map(ResultEntry::display).collect()
}

// -------------------------------------------------------------------------
// Search and commit
// -------------------------------------------------------------------------

#[test]
fn save_then_repeat() {
    let mut session = open_session(GroupCaps::default());
    let mut recent = RecentlyUsed::default();
    type_query(&mut session, &mut recent, "save");

    let menu = session.results().group(CatalogKind::Commands).unwrap();
    assert_eq!(labels(menu), vec!["File > Save", "File > Save As...", "File > Save All"]);
    assert_eq!(menu.entries()[0].candidate().unwrap().shortcut.as_deref(), Some("Ctrl+S"));
    assert!(session.results().group(CatalogKind::DialogControls).unwrap().is_empty());

    let out = session.handle(InputEvent::Key(KeyCommand::Commit), &mut recent);
    assert_eq!(out[0], OutputEvent::Activate(ItemIdentity::Command(CommandId(41006))));

    assert_eq!(
        recent.repeat_action(session.commands(), None),
        RepeatAction::Available {
            command: CommandId(41006),
            label: "Repeat \"File > Save\"".to_string(),
        }
    );
}

#[test]
fn tab_to_preferences_and_highlight() {
    let mut session = open_session(GroupCaps::default());
    let mut recent = RecentlyUsed::default();
    type_query(&mut session, &mut recent, "line");

    let results = session.results();
    assert_eq!(results.groups()[0].len(), 2);
    assert_eq!(labels(&results.groups()[1]), vec!["Editing > Show line endings"]);

    session.handle(InputEvent::Key(KeyCommand::NextGroup), &mut recent);
    assert_eq!(session.selection(), Some(Position { group: 1, index: 0 }));

    let out = session.handle(InputEvent::Key(KeyCommand::Commit), &mut recent);
    assert_eq!(out[0], OutputEvent::Activate(ItemIdentity::DialogControl(ControlId(6230))));
    assert!(recent.is_empty());

    // Host navigates to the control, then blinks it
    let mut blink = BlinkSchedule::default();
    let mut inverts = 0;
    while !blink.is_finished() {
        if blink.tick(true).invert {
            inverts += 1;
        }
    }
    assert_eq!(inverts, 8);
}

#[test]
fn multi_word_query_is_order_insensitive() {
    let mut session = open_session(GroupCaps::default());
    let mut recent = RecentlyUsed::default();

    type_query(&mut session, &mut recent, "macro run");
    let a = session.results().clone();
    type_query(&mut session, &mut recent, "run macro");
    let b = session.results().clone();

    let first = |list: &ResultList| list.groups()[0].entries()[0].display().to_string();
    assert_eq!(first(&a), "Macro > Run a Macro Multiple Times...");
    assert_eq!(first(&a), first(&b));
}

// -------------------------------------------------------------------------
// Caps and degradation
// -------------------------------------------------------------------------

#[test]
fn overflow_then_show_more() {
    let mut session = open_session(GroupCaps::new(3, 3));
    let mut recent = RecentlyUsed::default();
    type_query(&mut session, &mut recent, "e");

    let menu = &session.results().groups()[0];
    assert_eq!(menu.len(), 3);
    assert!(menu.is_truncated());
    let total = menu.total_candidates();
    assert!(total > 3);

    session.handle(InputEvent::Key(KeyCommand::ShowMore), &mut recent);
    let menu = &session.results().groups()[0];
    assert_eq!(menu.len(), total);
    assert!(!menu.is_truncated());

    // Reopening restores the defaults
    session.handle(InputEvent::VisibilityChanged(false), &mut recent);
    session.handle(InputEvent::VisibilityChanged(true), &mut recent);
    assert_eq!(session.caps(), GroupCaps::new(3, 3));
}

#[test]
fn missing_dialog_catalog_keeps_menu_working() {
    let dir = fixtures_dir();
    let commands = load_catalog(&dir.join("menu.json"), CatalogKind::Commands).unwrap();
    let dialog = load_catalog_or_empty(&dir.join("no-such-prefs.toml"), CatalogKind::DialogControls);
    assert!(dialog.is_empty());

    let mut session = SearchSession::new(commands, dialog, GroupCaps::default());
    let mut recent = RecentlyUsed::default();
    type_query(&mut session, &mut recent, "find");

    assert_eq!(session.results().groups()[0].len(), 3);
    assert!(session.results().groups()[1].is_empty());
}

#[test]
fn repeat_skips_commands_missing_from_new_catalog() {
    let mut recent = RecentlyUsed::default();
    recent.record(CommandId(42002));
    recent.record(CommandId(50000));

    let commands = load_catalog(&fixtures_dir().join("menu.json"), CatalogKind::Commands).unwrap();
    let node = recent.most_recent_valid(&commands, None).unwrap();
    assert_eq!(commands.label(node), "Edit > Copy");
    assert_eq!(recent.repeat_action(&commands, Some(CommandId(42002))), RepeatAction::Unavailable);
}
