//! Task list client core: remote store access, local state and view projection.

pub mod controller;
pub mod render;
pub mod state;
pub mod store;
pub mod view;

pub use controller::{Outcome, SkipReason, ViewController};
pub use render::RenderSurface;
pub use state::{Patch, TaskListState};
pub use store::{ConfigError, RestTaskStore, StoreConfig, TaskStore};
pub use view::{compute_view, items_left_label, FooterView, RowView, ViewModel};
