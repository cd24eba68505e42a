//! Application state for the demo: navigation, theme flag, counter and the
//! task list. None of it knows about gestures or animation.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Tasks,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home => write!(f, "home"),
            Screen::Tasks => write!(f, "tasks"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
}

/// Ordered task list. Ids are never reused, so a removal cannot shift the
/// identity of the items after it.
#[derive(Clone, Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `title` after trimming. Blank titles are ignored.
    pub fn add(&mut self, title: &str) -> Option<TaskId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Task {
            id,
            title: title.to_string(),
        });
        Some(id)
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Everything a user action can change.
#[derive(Clone, Debug)]
pub struct AppState {
    pub screen: Screen,
    pub dark_mode: bool,
    pub counter: u32,
    pub input: String,
    pub tasks: TaskList,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            dark_mode: false,
            counter: 0,
            input: String::new(),
            tasks: TaskList::new(),
        }
    }
}

/// User intents raised by controllers and applied by the app between input
/// events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Navigate(Screen),
    ToggleDarkMode,
    Increment,
    AddTask,
    DeleteTask(TaskId),
}

impl AppState {
    /// Applies `action`. Returns `true` when the visible screen changed.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::Navigate(screen) => {
                let changed = self.screen != *screen;
                self.screen = *screen;
                changed
            }
            Action::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                false
            }
            Action::Increment => {
                self.counter += 1;
                false
            }
            Action::AddTask => {
                if self.tasks.add(&self.input).is_some() {
                    self.input.clear();
                }
                false
            }
            Action::DeleteTask(id) => {
                self.tasks.remove(*id);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
