use anyhow::{Context, Result};
use task_demo::{script, App};

/// Overrides the ripple tint, in CSS notation.
const RIPPLE_COLOR_VAR: &str = "TACTILE_RIPPLE_COLOR";

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut config = App::default_config();
    if let Ok(color) = std::env::var(RIPPLE_COLOR_VAR) {
        config = config
            .with_ripple_color_css(&color)
            .with_context(|| format!("invalid {RIPPLE_COLOR_VAR}"))?;
    }

    println!("=== Tactile Task Demo ===");
    let mut app = App::new(config)?;
    script::run(&mut app, &script::default_script())?;

    println!("Final scene after {}ms:", app.runtime().now_millis());
    for line in app.describe() {
        println!("  {line}");
    }
    println!("Tasks: {:?}", app.state().tasks.titles());
    Ok(())
}
