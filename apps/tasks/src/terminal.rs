//! Plain-text rendering surface.

use std::io::Write;

use client_core::{RenderSurface, ViewModel};
use shared::domain::Filter;
use tracing::warn;

pub struct TerminalSurface<W: Write + Send> {
    out: W,
    notice: Option<String>,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, notice: None }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    pub fn print(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }
}

pub fn format_view(view: &ViewModel, notice: Option<&str>) -> String {
    let mut text = String::new();
    if let Some(notice) = notice {
        text.push_str(&format!("warning: {notice}\n"));
    }

    let tabs: Vec<String> = Filter::ALL
        .iter()
        .map(|filter| {
            if *filter == view.filter {
                format!("[{filter}]")
            } else {
                filter.to_string()
            }
        })
        .collect();
    text.push_str(&format!("tasks  {}\n", tabs.join(" ")));

    if view.rows.is_empty() {
        text.push_str(if view.footer.visible {
            "  (nothing to show)\n"
        } else {
            "  (no tasks yet)\n"
        });
    }
    for (index, row) in view.rows.iter().enumerate() {
        let mark = if row.completed { 'x' } else { ' ' };
        text.push_str(&format!("{:>3}. [{mark}] {}\n", index + 1, row.title));
    }

    if view.footer.visible {
        text.push_str(&format!("  {}", view.footer.summary));
        if view.footer.show_clear_completed {
            text.push_str(&format!(
                "  |  clear completed ({})",
                view.footer.completed_count
            ));
        }
        text.push('\n');
    }
    text
}

impl<W: Write + Send> RenderSurface for TerminalSurface<W> {
    fn render(&mut self, view: &ViewModel) {
        let text = format_view(view, self.notice.as_deref());
        self.print(text.trim_end());
    }

    fn show_error(&mut self, message: &str) {
        self.print(&format!("error: {message}"));
    }

    fn clear_error(&mut self) {}

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.print("loading tasks...");
        }
    }

    fn show_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
        self.print(&format!("warning: {message}"));
    }
}

#[cfg(test)]
mod tests {
    use client_core::compute_view;
    use shared::domain::{Task, TaskId};

    use super::*;

    fn tasks() -> Vec<Task> {
        let created_at = "2024-03-01T09:00:00Z".parse().expect("timestamp");
        vec![
            Task {
                id: TaskId::from(1),
                title: "Buy milk".into(),
                completed: false,
                created_at,
            },
            Task {
                id: TaskId::from(2),
                title: "Walk dog".into(),
                completed: true,
                created_at,
            },
        ]
    }

    #[test]
    fn renders_rows_footer_and_active_tab() {
        let text = format_view(&compute_view(&tasks(), Filter::All), None);
        assert_eq!(
            text,
            "tasks  [all] active completed\n\
             \x20 1. [ ] Buy milk\n\
             \x20 2. [x] Walk dog\n\
             \x20 1 item left  |  clear completed (1)\n"
        );
    }

    #[test]
    fn empty_list_has_no_footer() {
        let text = format_view(&compute_view(&[], Filter::All), None);
        assert_eq!(text, "tasks  [all] active completed\n  (no tasks yet)\n");
        assert!(!text.contains("items left"));
    }

    #[test]
    fn notice_is_repeated_on_every_render() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_notice("store is not configured");
        surface.render(&compute_view(&[], Filter::Active));
        surface.render(&compute_view(&[], Filter::Active));

        let output = String::from_utf8(surface.into_inner()).expect("utf8");
        assert_eq!(output.matches("warning: store is not configured").count(), 3);
    }
}
