//! Terminal rendering of a [`WidgetView`].
//!
//! Colors come from the view's palette as `crossterm` RGB styles. The
//! `render_*` functions are pure so they can be tested without a terminal.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{
    style, Attribute, Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor, Stylize,
};
use crossterm::terminal::{Clear, ClearType};
use tepang_core::display::WidgetView;
use tepang_core::theme::{hex_to_rgb, Ring, DARK, LIGHT};
use tepang_core::PresentationRoot;

const BAR_WIDTH: usize = 24;
const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

fn rgb(hex: &str) -> Option<Color> {
    hex_to_rgb(hex).map(|(r, g, b)| Color::Rgb { r, g, b })
}

fn lerp_hex(ring: Ring, t: f64) -> String {
    let (Some(a), Some(b)) = (hex_to_rgb(ring.from), hex_to_rgb(ring.to)) else {
        return ring.from.to_string();
    };
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Progress ring flattened into a bar: full at the start of a phase.
pub fn render_bar(view: &WidgetView, color: bool) -> String {
    let filled = (view.progress * BAR_WIDTH as f64).round() as usize;
    let mut out = String::with_capacity(BAR_WIDTH * 20);
    for i in 0..BAR_WIDTH {
        if i >= filled {
            out.push('░');
            continue;
        }
        let t = i as f64 / (BAR_WIDTH - 1) as f64;
        match rgb(&lerp_hex(view.ring, t)).filter(|_| color) {
            Some(c) => out.push_str(&style('█').with(c).to_string()),
            None => out.push('█'),
        }
    }
    out
}

fn render_clock(view: &WidgetView, color: bool) -> String {
    if !color {
        return view.clock.clone();
    }
    let mut clock = style(view.clock.as_str()).attribute(Attribute::Bold);
    if let Some(c) = rgb(view.timer_color) {
        clock = clock.with(c);
    }
    if view.time_low {
        clock = clock.attribute(Attribute::SlowBlink);
    }
    clock.to_string()
}

fn render_music(view: &WidgetView, frame: usize) -> String {
    match (&view.music.readout, view.music.spinning) {
        (Some(readout), true) => format!("{} {readout}", SPINNER[frame % SPINNER.len()]),
        _ => "music off".to_string(),
    }
}

/// One-line status used while the timer runs interactively.
pub fn render_status(view: &WidgetView, frame: usize, color: bool) -> String {
    format!(
        "{:<5}  {}  {}  {}  [{}]  {}",
        view.mode,
        view.session,
        render_bar(view, color),
        render_clock(view, color),
        view.start_label,
        render_music(view, frame),
    )
}

/// Multi-line panel for `tepang view`.
pub fn render_panel(view: &WidgetView, color: bool) -> String {
    let icon = if view.theme_icon == "sun" { "☀" } else { "☾" };
    let play = if view.music.can_play { "[p] play" } else { "(playing)" };
    let stop = if view.music.can_stop { "[x] stop" } else { "(stopped)" };
    [
        format!("{}  {icon}", view.title),
        view.mode.to_string(),
        view.session.clone(),
        render_bar(view, color),
        render_clock(view, color),
        format!("[s] {}   [r] Reset   [t] Theme", view.start_label),
        format!("{play}   {stop}   {}", render_music(view, 0)),
    ]
    .join("\n")
}

/// Interactive terminal output. Acts as the presentation root for themes.
pub struct Screen<W: Write> {
    out: W,
    dark: bool,
    frame: usize,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, dark: bool) -> Self {
        Self { out, dark, frame: 0 }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Redraw the status line in place.
    pub fn draw(&mut self, view: &WidgetView) -> io::Result<()> {
        self.frame = self.frame.wrapping_add(1);
        let palette = if self.dark { &DARK } else { &LIGHT };
        queue!(self.out, MoveToColumn(0))?;
        if let Some(c) = rgb(palette.background) {
            queue!(self.out, SetBackgroundColor(c))?;
        }
        if let Some(c) = rgb(palette.text) {
            queue!(self.out, SetForegroundColor(c))?;
        }
        queue!(
            self.out,
            Clear(ClearType::CurrentLine),
            Print(render_status(view, self.frame, true)),
            ResetColor
        )?;
        self.out.flush()
    }

    pub fn message(&mut self, text: &str) -> io::Result<()> {
        // Raw mode needs the explicit carriage return.
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text),
            Print("\r\n")
        )?;
        self.out.flush()
    }

    pub fn help(&mut self) -> io::Result<()> {
        self.message("keys: s start/pause  r reset  p play music  x stop music  t theme  q quit")
    }

    pub fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Print("\r\n"))?;
        self.out.flush()
    }
}

impl<W: Write> PresentationRoot for Screen<W> {
    fn apply_theme(&mut self, dark: bool) {
        self.dark = dark;
    }
}
