//! Scripted user sessions for the headless demo.

use std::fmt;

use anyhow::{Context, Result};

use crate::app::{delete_label, App};

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Click(String),
    Type(String),
    Swipe { label: String, dx: f32 },
    Wait(u64),
}

impl Step {
    pub fn click(label: &str) -> Self {
        Step::Click(label.to_string())
    }

    pub fn type_text(text: &str) -> Self {
        Step::Type(text.to_string())
    }

    pub fn swipe(label: &str, dx: f32) -> Self {
        Step::Swipe {
            label: label.to_string(),
            dx,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Click(label) => write!(f, "click `{label}`"),
            Step::Type(text) => write!(f, "type {text:?}"),
            Step::Swipe { label, dx } => write!(f, "swipe `{label}` by {dx}"),
            Step::Wait(millis) => write!(f, "wait {millis}ms"),
        }
    }
}

/// Visits both screens, adds a few tasks, dismisses one by swiping, lets a
/// short swipe spring back and deletes another with its delete control.
pub fn default_script() -> Vec<Step> {
    vec![
        Step::Wait(500),
        Step::click("Go to Tasks"),
        Step::Wait(500),
        Step::click("Increment Counter"),
        Step::click("Increment Counter"),
        Step::type_text("  Write report "),
        Step::click("Add Task"),
        Step::type_text("   "),
        Step::click("Add Task"),
        Step::type_text("Review PR"),
        Step::click("Add Task"),
        Step::type_text("Plan sprint"),
        Step::click("Add Task"),
        Step::Wait(700),
        Step::swipe("Review PR", 160.0),
        Step::Wait(400),
        Step::swipe("Write report", -60.0),
        Step::Wait(400),
        Step::click(&delete_label("Plan sprint")),
        Step::click("Toggle Dark Mode"),
        Step::Wait(700),
        Step::click("Back to Home"),
        Step::Wait(500),
    ]
}

/// Runs `steps` in order and stops at the first one that fails.
pub fn run(app: &mut App, steps: &[Step]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        log::info!("step {}: {step}", index + 1);
        match step {
            Step::Click(label) => app.click(label),
            Step::Type(text) => {
                app.type_text(text);
                Ok(())
            }
            Step::Swipe { label, dx } => app.swipe(label, *dx),
            Step::Wait(millis) => {
                app.wait(*millis);
                Ok(())
            }
        }
        .with_context(|| format!("step {} ({step}) failed", index + 1))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
