use tepang_core::display::widget_view;
use tepang_core::{Config, MusicState, SessionState, ThemeState};

use crate::screen::render_panel;

/// Print the widget as it looks before anything has been pressed.
pub fn run(config: &Config, dark: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let theme = ThemeState::new(dark || config.ui.dark_mode);
    let view = widget_view(&SessionState::default(), &MusicState::default(), &theme);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_panel(&view, true));
    }
    Ok(())
}
