use clap::Args;
use tepang_core::{
    picker_rng, AssetCatalog, AudioBackend, Config, Event, SilentBackend, ThemeState, Widget,
};
use tokio::sync::mpsc;

use crate::input::{Command, Input, Keys};
use crate::screen::Screen;

#[derive(Args)]
pub struct RunArgs {
    /// Start in the dark theme (overrides ui.dark_mode)
    #[arg(long)]
    dark: bool,
    /// Seed for track and sound picks (overrides `seed`)
    #[arg(long)]
    seed: Option<u64>,
    /// Never open an audio device
    #[arg(long)]
    no_audio: bool,
}

pub fn run(config: &Config, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dark = args.dark || config.ui.dark_mode;
    let seed = args.seed.or(config.seed);
    let audio = config.audio.enabled && !args.no_audio;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let outcome = runtime.block_on(async {
        if audio {
            #[cfg(feature = "rodio")]
            match tepang_core::RodioBackend::open(config.audio.gain()) {
                Ok(backend) => return drive(backend, config, dark, seed).await,
                Err(e) => tracing::warn!(error = %e, "audio output unavailable, running silent"),
            }
            #[cfg(not(feature = "rodio"))]
            tracing::info!("built without audio output, running silent");
        }
        drive(SilentBackend::new(), config, dark, seed).await
    });
    // A stdin read parked on a blocking thread never returns on its own.
    runtime.shutdown_background();
    outcome
}

fn log_events(events: Vec<Event>) {
    for event in events {
        tracing::debug!(event = event.kind(), "{}", serde_json::to_string(&event).unwrap_or_default());
    }
}

async fn drive<B: AudioBackend>(
    backend: B,
    config: &Config,
    dark: bool,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut screen = Screen::new(std::io::stdout(), dark);
    let mut widget = Widget::new(
        backend,
        AssetCatalog::from_config(&config.assets),
        Box::new(picker_rng(seed)),
        ThemeState::new(dark),
        tx,
    );
    let mut keys = Keys::open()?;

    screen.help()?;
    screen.draw(&widget.view())?;

    loop {
        tokio::select! {
            Some(message) = rx.recv() => log_events(widget.handle(message)),
            input = keys.next() => {
                // End of input ends the session like `q`.
                let Some(input) = input? else { break };
                let events = match input {
                    Input::Command(Command::ToggleTimer) => widget.toggle_timer(),
                    Input::Command(Command::Reset) => widget.reset(),
                    Input::Command(Command::PlayMusic) => widget.play_music(),
                    Input::Command(Command::StopMusic) => widget.stop_music(),
                    Input::Command(Command::ToggleTheme) => widget.toggle_theme(&mut screen),
                    Input::Command(Command::Help) => {
                        screen.help()?;
                        Vec::new()
                    }
                    Input::Command(Command::Quit) => break,
                    Input::Unknown(text) => {
                        screen.message(&format!("unknown command: {text}"))?;
                        Vec::new()
                    }
                    Input::Blank => Vec::new(),
                };
                log_events(events);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
        screen.draw(&widget.view())?;
    }

    widget.shutdown();
    screen.finish()?;
    Ok(())
}
