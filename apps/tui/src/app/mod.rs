// App module for civic_flow
// Handles application state and business logic

pub mod actions;
pub mod events;
pub mod input;
pub mod state;

pub use actions::AppActions;
pub use events::AppEvent;
pub use input::handle_input;
pub use state::{App, AppScreen, DetailState, ReportStep};
