//! UI layer for the desktop client: app shell and colors.

pub mod app;
pub mod theme;

pub use app::FakeFactApp;
