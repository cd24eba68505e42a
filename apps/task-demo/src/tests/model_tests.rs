use super::*;

#[test]
fn add_trims_and_ignores_blank_titles() {
    let mut tasks = TaskList::new();
    assert!(tasks.add("   ").is_none());
    assert!(tasks.add("").is_none());
    let id = tasks.add("  buy milk \n").expect("added");

    assert_eq!(tasks.titles(), vec!["buy milk"]);
    assert_eq!(tasks.get(id).map(|t| t.title.as_str()), Some("buy milk"));
}

#[test]
fn removal_keeps_other_ids_stable() {
    let mut tasks = TaskList::new();
    let a = tasks.add("a").expect("a");
    let b = tasks.add("b").expect("b");
    let c = tasks.add("c").expect("c");

    assert_eq!(tasks.remove(b).map(|t| t.title), Some("b".to_string()));
    assert!(tasks.remove(b).is_none());
    assert_eq!(tasks.get(a).map(|t| t.id), Some(a));
    assert_eq!(tasks.get(c).map(|t| t.id), Some(c));

    let d = tasks.add("d").expect("d");
    assert_ne!(d, b);
}

#[test]
fn remove_at_checks_bounds() {
    let mut tasks = TaskList::new();
    tasks.add("only");
    assert!(tasks.remove_at(3).is_none());
    assert_eq!(tasks.remove_at(0).map(|t| t.title), Some("only".to_string()));
    assert!(tasks.is_empty());
}

#[test]
fn add_task_clears_input_only_on_success() {
    let mut state = AppState::default();
    state.input = "   ".to_string();
    state.apply(&Action::AddTask);
    assert_eq!(state.input, "   ");
    assert!(state.tasks.is_empty());

    state.input = "write docs".to_string();
    state.apply(&Action::AddTask);
    assert!(state.input.is_empty());
    assert_eq!(state.tasks.titles(), vec!["write docs"]);
}

#[test]
fn navigation_reports_screen_changes() {
    let mut state = AppState::default();
    assert!(!state.apply(&Action::Navigate(Screen::Home)));
    assert!(state.apply(&Action::Navigate(Screen::Tasks)));
    assert_eq!(state.screen, Screen::Tasks);

    assert!(!state.apply(&Action::ToggleDarkMode));
    assert!(state.dark_mode);
    state.apply(&Action::Increment);
    state.apply(&Action::Increment);
    assert_eq!(state.counter, 2);
}
