pub mod screen;

pub use screen::{run, run_screen, ResourceKind, ScreenAction, ScreenOutcome};
