//! Terminal output for markdown produced by `roam-core`'s display layer.
//!
//! With color enabled, headings, emphasis and tables go through termimad;
//! otherwise the markdown is printed as-is.

use anyhow::Result;
use roam_core::display::{OperationStatus, StatusKind};
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render a markdown document.
    ///
    /// Tables are laid out by termimad as a whole, so the document is not
    /// split into lines.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            self.skin.print_text(markdown);
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Render a one-line status message, colored by its outcome.
    pub fn render_status(&self, status: &OperationStatus) -> Result<()> {
        if !self.rich_enabled {
            print!("{status}");
            return Ok(());
        }

        let color = match status.kind {
            StatusKind::Success => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Failure => Color::Red,
        };
        let mut skin = self.skin.clone();
        skin.paragraph.set_fg(color);
        skin.print_text(&status.to_string());
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
