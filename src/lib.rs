//! PyMath - Python for mathematicians, in the terminal
//!
//! A course browser with a collapsible curriculum sidebar, a markdown lesson
//! pane, and a tutor chat backed by Claude.

pub mod app;
pub mod config;
pub mod curriculum;
pub mod lesson;
pub mod syntax;
pub mod theme;
pub mod tutor;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
