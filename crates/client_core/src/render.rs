//! Output seam between the controller and whatever displays the list.

use crate::view::ViewModel;

/// A surface that can fully replace its displayed rows and footer on each call.
pub trait RenderSurface: Send {
    fn render(&mut self, view: &ViewModel);
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
    fn set_loading(&mut self, loading: bool);
    /// Session-wide notice, e.g. a missing store configuration.
    fn show_notice(&mut self, message: &str);
}
