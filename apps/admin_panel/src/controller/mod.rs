//! Controller layer: list state, debounced search, user actions, and command orchestration.

pub mod debounce;
pub mod events;
pub mod orchestration;
pub mod state;
pub mod view;

pub use events::{Notice, NoticeContext, UserAction};
pub use state::{ControllerOptions, StaleLoadPolicy, ViewState};
pub use view::ViewController;
