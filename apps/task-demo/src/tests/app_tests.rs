use super::*;

fn app() -> App {
    App::new(App::default_config()).expect("default config is valid")
}

fn tasks_app(titles: &[&str]) -> App {
    let mut app = app();
    app.click("Go to Tasks").expect("home has a tasks button");
    for title in titles {
        app.type_text(title);
        app.click("Add Task").expect("tasks screen has an add button");
    }
    app.wait(FRAME_MILLIS);
    app
}

fn translation_of(app: &App, title: &str) -> f32 {
    let id = app.task_element(title).expect("task is on screen");
    app.scene()
        .node(id)
        .expect("task node is mounted")
        .visual
        .transform
        .translate_x
}

#[test]
fn home_screen_fades_in_on_the_first_frame() {
    let mut app = app();
    assert_eq!(app.state().screen, Screen::Home);
    assert_eq!(app.screen_opacity(), Some(0.0));

    app.wait(FRAME_MILLIS);
    assert_eq!(app.screen_opacity(), Some(1.0));
}

#[test]
fn home_screen_stacks_container_under_its_buttons() {
    let app = app();
    assert_eq!(
        app.scene().labels(),
        vec!["home", "Go to Tasks", "Toggle Dark Mode"]
    );
}

#[test]
fn navigation_remounts_the_screen_and_replays_the_fade() {
    let mut app = app();
    app.wait(FRAME_MILLIS);

    app.click("Go to Tasks").unwrap();
    assert_eq!(app.state().screen, Screen::Tasks);
    assert!(app.scene().find("Go to Tasks").is_none());
    assert!(app.scene().find("Back to Home").is_some());
    assert_eq!(app.screen_opacity(), Some(0.0));

    app.wait(FRAME_MILLIS);
    assert_eq!(app.screen_opacity(), Some(1.0));

    app.click("Back to Home").unwrap();
    assert_eq!(app.state().screen, Screen::Home);
    assert_eq!(app.screen_opacity(), Some(0.0));
}

#[test]
fn button_ripple_is_removed_after_its_lifetime() {
    let mut app = tasks_app(&[]);

    app.click("Increment Counter").unwrap();
    assert_eq!(app.state().counter, 1);
    assert!(app.scene().find("Button clicked 1 times").is_some());
    assert_eq!(app.scene().layer_count(), 1);

    app.wait(app.config().ripple_duration_millis + FRAME_MILLIS);
    assert_eq!(app.scene().layer_count(), 0);
}

#[test]
fn navigation_drops_ripples_of_the_old_screen() {
    let mut app = app();
    app.click("Go to Tasks").unwrap();
    assert_eq!(app.scene().layer_count(), 0);

    app.wait(app.config().ripple_duration_millis + FRAME_MILLIS);
    assert_eq!(app.scene().layer_count(), 0);
}

#[test]
fn add_task_trims_input_and_ignores_blank_titles() {
    let mut app = tasks_app(&["  Write report  "]);
    assert_eq!(app.state().tasks.titles(), vec!["Write report"]);
    assert!(app.state().input.is_empty());
    assert!(app.scene().find("New task: ").is_some());

    app.type_text("   ");
    app.click("Add Task").unwrap();
    assert_eq!(app.state().tasks.len(), 1);
    assert_eq!(app.state().input, "   ");
}

#[test]
fn swipe_past_threshold_deletes_after_the_exit_animation() {
    let mut app = tasks_app(&["Review PR", "Plan sprint"]);

    app.swipe("Review PR", 160.0).unwrap();
    assert_eq!(app.state().tasks.len(), 2);
    assert_eq!(translation_of(&app, "Review PR"), 500.0);

    app.wait(app.config().exit_duration_millis + FRAME_MILLIS);
    assert_eq!(app.state().tasks.titles(), vec!["Plan sprint"]);
    assert!(app.task_element("Review PR").is_none());
    assert!(app.scene().find(&delete_label("Review PR")).is_none());
}

#[test]
fn left_swipe_dismisses_to_the_left() {
    let mut app = tasks_app(&["Review PR"]);

    app.swipe("Review PR", -150.0).unwrap();
    assert_eq!(translation_of(&app, "Review PR"), -500.0);

    app.wait(app.config().exit_duration_millis + FRAME_MILLIS);
    assert!(app.state().tasks.is_empty());
}

#[test]
fn short_swipe_springs_back_and_keeps_the_task() {
    let mut app = tasks_app(&["Write report"]);

    app.swipe("Write report", 60.0).unwrap();
    assert_eq!(translation_of(&app, "Write report"), 0.0);

    app.wait(app.config().cancel_duration_millis + FRAME_MILLIS);
    assert_eq!(app.state().tasks.titles(), vec!["Write report"]);
    let id = app.task_element("Write report").unwrap();
    assert!(app.scene().node(id).unwrap().visual.transition.is_none());
}

#[test]
fn delete_control_removes_only_its_task_and_relayouts() {
    let mut app = tasks_app(&["A", "B", "C"]);
    let (_, b_bounds) = app.scene().find("B").unwrap();

    app.click(&delete_label("B")).unwrap();
    assert_eq!(app.state().tasks.titles(), vec!["A", "C"]);

    let (_, c_bounds) = app.scene().find("C").unwrap();
    assert_eq!(c_bounds, b_bounds);
}

#[test]
fn remaining_items_keep_their_controllers_after_a_delete() {
    let mut app = tasks_app(&["A", "B"]);
    let before = app.task_element("B").unwrap();

    app.click(&delete_label("A")).unwrap();
    assert_eq!(app.task_element("B"), Some(before));

    app.swipe("B", 120.0).unwrap();
    app.wait(app.config().exit_duration_millis + FRAME_MILLIS);
    assert!(app.state().tasks.is_empty());
}

#[test]
fn toggling_dark_mode_restyles_and_relabels() {
    let mut app = app();

    app.click("Toggle Dark Mode").unwrap();
    assert!(app.state().dark_mode);
    assert!(app.scene().find("Toggle Light Mode").is_some());
    let (container, _) = app.scene().find("home").unwrap();
    assert_eq!(app.scene().node(container).unwrap().color, Theme::DARK.container);

    app.click("Go to Tasks").unwrap();
    assert!(app.scene().find("Toggle Light Mode").is_some());
}

#[test]
fn unknown_label_is_an_error() {
    let mut app = app();
    let err = app.click("Add Task").unwrap_err();
    assert!(err.to_string().contains("home screen"));
    assert!(app.swipe("Add Task", 200.0).is_err());
}

#[test]
fn invalid_config_is_rejected() {
    let config = App::default_config().with_swipe_threshold(f32::NAN);
    assert!(App::new(config).is_err());
}
