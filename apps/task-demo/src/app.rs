//! The demo application: two screens built from ripple buttons, a mount
//! fade per screen and one swipe-to-dismiss controller per task.
//!
//! Controller callbacks never touch [`AppState`] directly. They push an
//! [`Action`] onto a shared queue, and the app drains it after every input
//! event and every frame, then brings the scene in line with the new state.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use tactile_animation::FadeTransition;
use tactile_core::{InteractionConfig, Lifecycle, Runtime};
use tactile_foundation::{
    ElementId, ListenerGuard, ListenerScope, PointerDispatcher, PointerEvent, PointerEventKind,
    RippleButton, SwipeToDismiss, RIPPLE_BUTTON_COLOR,
};
use tactile_ui_graphics::{Color, Point, Rect};

use crate::model::{Action, AppState, Screen, TaskId};
use crate::scene::{Scene, SceneSurface};
use crate::theme::Theme;

/// Length of one simulated frame.
pub const FRAME_MILLIS: u64 = 16;

const CONTAINER_X: f32 = 20.0;
const CONTAINER_Y: f32 = 20.0;
const CONTAINER_WIDTH: f32 = 350.0;
const CONTENT_X: f32 = 40.0;
const CONTENT_WIDTH: f32 = 310.0;
const ROW_HEIGHT: f32 = 44.0;
const ITEM_HEIGHT: f32 = 40.0;
const ITEM_SPACING: f32 = 50.0;
const DELETE_SIZE: f32 = 24.0;
const DRAG_STEPS: u32 = 6;

type ActionQueue = Rc<RefCell<Vec<Action>>>;

struct Button {
    element: ElementId,
    controller: RippleButton<SceneSurface>,
}

struct TaskItem {
    task: TaskId,
    element: ElementId,
    swipe: SwipeToDismiss<SceneSurface>,
    delete: ElementId,
    // Held for its drop: releasing it removes the click listener.
    _delete_click: ListenerGuard,
}

struct MountedScreen {
    screen: Screen,
    container: ElementId,
    fade: FadeTransition<SceneSurface>,
    toggle: ElementId,
    buttons: Vec<Button>,
    counter: Option<ElementId>,
    input: Option<ElementId>,
    items: Vec<TaskItem>,
}

impl MountedScreen {
    fn elements(&self) -> Vec<ElementId> {
        let mut elements = vec![self.container];
        elements.extend(self.buttons.iter().map(|button| button.element));
        elements.extend(self.counter);
        elements.extend(self.input);
        for item in &self.items {
            elements.push(item.element);
            elements.push(item.delete);
        }
        elements
    }
}

pub struct App {
    runtime: Runtime,
    dispatcher: PointerDispatcher,
    scene: Scene,
    config: InteractionConfig,
    state: AppState,
    actions: ActionQueue,
    mounted: Option<MountedScreen>,
}

impl App {
    /// Config the demo runs with unless told otherwise: the defaults with
    /// the button ripple tint.
    pub fn default_config() -> InteractionConfig {
        InteractionConfig::default().with_ripple_color(RIPPLE_BUTTON_COLOR)
    }

    pub fn new(config: InteractionConfig) -> Result<Self> {
        config.validate()?;
        let mut app = Self {
            runtime: Runtime::new(),
            dispatcher: PointerDispatcher::new(),
            scene: Scene::new(),
            config,
            state: AppState::default(),
            actions: Rc::new(RefCell::new(Vec::new())),
            mounted: None,
        };
        app.mount_screen();
        Ok(app)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Opacity of the current screen's container.
    pub fn screen_opacity(&self) -> Option<f32> {
        let mounted = self.mounted.as_ref()?;
        self.scene
            .node(mounted.container)
            .map(|node| node.visual.opacity)
    }

    /// Element of the task titled `title`, if it is on screen.
    pub fn task_element(&self, title: &str) -> Option<ElementId> {
        self.scene.find(title).map(|(id, _)| id)
    }

    /// Clicks the center of the node labelled `label`.
    pub fn click(&mut self, label: &str) -> Result<()> {
        let center = self.center_of(label)?;
        log::debug!("click `{label}` at ({:.0}, {:.0})", center.x, center.y);
        self.send(PointerEvent::down(center.x, center.y));
        self.send(PointerEvent::up(center.x, center.y));
        self.process_actions();
        Ok(())
    }

    /// Replaces the contents of the task input.
    pub fn type_text(&mut self, text: &str) {
        self.state.input = text.to_string();
        self.refresh_texts();
    }

    /// Presses the node labelled `label`, drags it `dx` pixels horizontally
    /// over a few frames and releases.
    pub fn swipe(&mut self, label: &str, dx: f32) -> Result<()> {
        if !dx.is_finite() {
            bail!("swipe distance must be finite, got {dx}");
        }
        let start = self.center_of(label)?;
        log::debug!("swipe `{label}` by {dx:.0}");
        self.send(PointerEvent::down(start.x, start.y));
        for step in 1..=DRAG_STEPS {
            let x = start.x + dx * step as f32 / DRAG_STEPS as f32;
            self.send(PointerEvent::moved(x, start.y));
            self.step_frame(FRAME_MILLIS);
        }
        self.send(PointerEvent::up(start.x + dx, start.y));
        self.process_actions();
        Ok(())
    }

    /// Lets `millis` pass in frame-sized steps, running frames and timers.
    pub fn wait(&mut self, millis: u64) {
        let mut remaining = millis;
        while remaining > 0 {
            let step = remaining.min(FRAME_MILLIS);
            self.step_frame(step);
            remaining -= step;
        }
    }

    pub fn describe(&self) -> Vec<String> {
        self.scene.describe()
    }

    fn step_frame(&mut self, millis: u64) {
        self.runtime.advance_by(millis);
        self.runtime.run_frame();
        self.process_actions();
    }

    fn center_of(&self, label: &str) -> Result<Point> {
        let (_, bounds) = self
            .scene
            .find(label)
            .ok_or_else(|| anyhow!("no element labelled `{label}` on the {} screen", self.state.screen))?;
        Ok(bounds.center())
    }

    fn send(&self, event: PointerEvent) -> usize {
        let target = self.scene.hit_test(event.position.x, event.position.y);
        self.dispatcher.dispatch(target, event)
    }

    fn process_actions(&mut self) {
        loop {
            let pending = std::mem::take(&mut *self.actions.borrow_mut());
            if pending.is_empty() {
                return;
            }
            for action in pending {
                self.apply(action);
            }
        }
    }

    fn apply(&mut self, action: Action) {
        log::info!("{action:?}");
        let screen_changed = self.state.apply(&action);
        match action {
            Action::Navigate(_) if screen_changed => {
                self.unmount_screen();
                self.mount_screen();
            }
            Action::Navigate(_) => {}
            Action::ToggleDarkMode => self.restyle(),
            Action::Increment => self.refresh_texts(),
            Action::AddTask | Action::DeleteTask(_) => {
                self.sync_items();
                self.refresh_texts();
            }
        }
    }

    fn theme(&self) -> Theme {
        Theme::for_mode(self.state.dark_mode)
    }

    fn mount_screen(&mut self) {
        let screen = self.state.screen;
        let theme = self.theme();
        let container = self.dispatcher.allocate_element();
        let surface = self.scene.mount(
            container,
            &screen.to_string(),
            Rect::new(CONTAINER_X, CONTAINER_Y, CONTAINER_WIDTH, 0.0),
            theme.container,
        );
        let mut fade = FadeTransition::new(self.runtime.frame_clock(), surface, self.config.fade());
        fade.on_mount();

        let toggle_label = Theme::toggle_label(self.state.dark_mode);
        let mut buttons = Vec::new();
        let mut counter = None;
        let mut input = None;
        let toggle = match screen {
            Screen::Home => {
                buttons.push(self.mount_button("Go to Tasks", 0, Action::Navigate(Screen::Tasks)));
                let toggle = self.mount_button(toggle_label, 1, Action::ToggleDarkMode);
                let element = toggle.element;
                buttons.push(toggle);
                element
            }
            Screen::Tasks => {
                buttons.push(self.mount_button("Back to Home", 0, Action::Navigate(Screen::Home)));
                let toggle = self.mount_button(toggle_label, 1, Action::ToggleDarkMode);
                let element = toggle.element;
                buttons.push(toggle);
                counter = Some(self.mount_text(&self.counter_text(), 2));
                buttons.push(self.mount_button("Increment Counter", 3, Action::Increment));
                input = Some(self.mount_text(&self.input_text(), 4));
                buttons.push(self.mount_button("Add Task", 5, Action::AddTask));
                element
            }
        };

        log::info!("mounted {screen} screen");
        self.mounted = Some(MountedScreen {
            screen,
            container,
            fade,
            toggle,
            buttons,
            counter,
            input,
            items: Vec::new(),
        });
        self.sync_items();
    }

    fn unmount_screen(&mut self) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };
        mounted.fade.on_unmount();
        for button in &mut mounted.buttons {
            button.controller.on_unmount();
        }
        for item in &mut mounted.items {
            item.swipe.on_unmount();
        }
        for element in mounted.elements() {
            self.scene.unmount(element);
        }
        log::info!("unmounted {} screen", mounted.screen);
    }

    fn mount_button(&self, label: &str, row: usize, action: Action) -> Button {
        let element = self.dispatcher.allocate_element();
        let surface = self
            .scene
            .mount(element, label, row_bounds(row), self.theme().button);
        let actions = Rc::clone(&self.actions);
        let mut controller = RippleButton::with_config(
            &self.dispatcher,
            element,
            self.runtime.frame_clock(),
            surface,
            self.config.ripple(),
            move || actions.borrow_mut().push(action.clone()),
        );
        controller.on_mount();
        Button {
            element,
            controller,
        }
    }

    fn mount_text(&self, text: &str, row: usize) -> ElementId {
        let element = self.dispatcher.allocate_element();
        // Text nodes have no controller, so the surface is not needed.
        let _ = self
            .scene
            .mount(element, text, row_bounds(row), Color::TRANSPARENT);
        element
    }

    fn mount_item(&self, task: TaskId, title: &str) -> TaskItem {
        let theme = self.theme();
        let clock = self.runtime.frame_clock();

        let element = self.dispatcher.allocate_element();
        let surface = self
            .scene
            .mount(element, title, Rect::new(0.0, 0.0, 0.0, 0.0), theme.item);
        let actions = Rc::clone(&self.actions);
        let mut swipe = SwipeToDismiss::new(
            &self.dispatcher,
            element,
            clock,
            surface,
            self.config.swipe(),
            move || actions.borrow_mut().push(Action::DeleteTask(task)),
        );

        let delete = self.dispatcher.allocate_element();
        let _ = self.scene.mount(
            delete,
            &delete_label(title),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            theme.delete,
        );
        let actions = Rc::clone(&self.actions);
        let delete_click = self.dispatcher.listen(
            ListenerScope::Element(delete),
            PointerEventKind::Click,
            move |_| actions.borrow_mut().push(Action::DeleteTask(task)),
        );

        swipe.on_mount();
        TaskItem {
            task,
            element,
            swipe,
            delete,
            _delete_click: delete_click,
        }
    }

    /// Mounts items for new tasks, unmounts items whose task is gone and
    /// lays the rest out in list order.
    fn sync_items(&mut self) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };
        if mounted.screen == Screen::Tasks {
            let (kept, removed): (Vec<_>, Vec<_>) = mounted
                .items
                .into_iter()
                .partition(|item| self.state.tasks.get(item.task).is_some());
            for mut item in removed {
                item.swipe.on_unmount();
                self.scene.unmount(item.element);
                self.scene.unmount(item.delete);
                log::debug!("removed item for {}", item.task);
            }
            mounted.items = kept;

            let first_row = mounted.buttons.len() + 2;
            let mut items = Vec::with_capacity(self.state.tasks.len());
            for task in self.state.tasks.iter() {
                let item = match mounted.items.iter().position(|item| item.task == task.id) {
                    Some(index) => mounted.items.swap_remove(index),
                    None => self.mount_item(task.id, &task.title),
                };
                items.push(item);
            }
            for (index, item) in items.iter().enumerate() {
                let bounds = item_bounds(first_row, index);
                self.scene.set_bounds(item.element, bounds);
                self.scene.set_bounds(item.delete, delete_bounds(bounds));
            }
            mounted.items = items;
        }
        self.scene
            .set_bounds(mounted.container, container_bounds(&mounted));
        self.mounted = Some(mounted);
    }

    fn restyle(&mut self) {
        let theme = self.theme();
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        self.scene.set_color(mounted.container, theme.container);
        for button in &mounted.buttons {
            self.scene.set_color(button.element, theme.button);
        }
        for item in &mounted.items {
            self.scene.set_color(item.element, theme.item);
        }
        self.scene
            .set_label(mounted.toggle, Theme::toggle_label(self.state.dark_mode));
    }

    fn refresh_texts(&self) {
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        if let Some(counter) = mounted.counter {
            self.scene.set_label(counter, &self.counter_text());
        }
        if let Some(input) = mounted.input {
            self.scene.set_label(input, &self.input_text());
        }
    }

    fn counter_text(&self) -> String {
        format!("Button clicked {} times", self.state.counter)
    }

    fn input_text(&self) -> String {
        format!("New task: {}", self.state.input)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount_screen();
    }
}

/// Label of the delete control of the task titled `title`.
pub fn delete_label(title: &str) -> String {
    format!("X {title}")
}

fn container_bounds(mounted: &MountedScreen) -> Rect {
    let rows = mounted.buttons.len() + 2 + mounted.items.len();
    Rect::new(
        CONTAINER_X,
        CONTAINER_Y,
        CONTAINER_WIDTH,
        rows as f32 * ITEM_SPACING + ROW_HEIGHT,
    )
}

fn row_bounds(row: usize) -> Rect {
    Rect::new(
        CONTENT_X,
        CONTAINER_Y + ITEM_SPACING + row as f32 * ITEM_SPACING,
        CONTENT_WIDTH,
        ROW_HEIGHT,
    )
}

fn item_bounds(first_row: usize, index: usize) -> Rect {
    let row = row_bounds(first_row + index);
    Rect::new(row.x, row.y, row.width, ITEM_HEIGHT)
}

fn delete_bounds(item: Rect) -> Rect {
    Rect::new(
        item.x + item.width - DELETE_SIZE - 8.0,
        item.y + (item.height - DELETE_SIZE) / 2.0,
        DELETE_SIZE,
        DELETE_SIZE,
    )
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
