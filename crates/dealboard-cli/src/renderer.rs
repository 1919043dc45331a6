//! Terminal rendering of the core's Markdown output
//!
//! Rich output goes through termimad, with board column headers coloured by
//! how the deals in them ended. `--no-color` prints the Markdown as is,
//! which is also what the integration tests read.

use anyhow::Result;
use dealboard_core::models::Stage;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders reports, lists and the board either rich or as plain Markdown
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Cyan);
        // Amounts and deal titles are bold
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Headers keep their hashes so stage columns stand out
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[{}m{line}\x1b[0m", header_ansi(line));
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// ANSI colour of a header line: green for the won column, red for the
/// lost one, cyan otherwise.
fn header_ansi(line: &str) -> &'static str {
    let title = line.trim_start_matches('#').trim_start();
    if title.starts_with(Stage::Won.label()) {
        "32"
    } else if title.starts_with(Stage::Lost.label()) {
        "31"
    } else {
        "36"
    }
}
