use std::io::{self, Stdout};
use std::sync::mpsc;

use anyhow::Context;
use dashboard_core::{update, DashboardState, Msg};
use dashboard_logging::{dash_error, dash_info, dash_warn};

use super::commands::{spawn_command_reader, HELP};
use super::config::DashboardConfig;
use super::effects::EffectRunner;
use super::render::TerminalRenderer;
use crate::cli::RunOptions;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppInput {
    Msg(Msg),
    Quit,
}

pub fn run_app(options: RunOptions) -> anyhow::Result<()> {
    let config = DashboardConfig::load(&options.config_path)?;

    let mut state = DashboardState::new().with_view_mode(options.view_mode);
    match config.read_token() {
        Some(token) => state = state.with_token(token),
        None => dash_warn!(
            "No token in ${}; the dashboard will stay empty",
            config.token_env
        ),
    }

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let effects = EffectRunner::new(config.api_settings(), input_tx.clone())
        .context("starting dashboard engine")?;
    spawn_command_reader(input_tx);
    eprintln!("{HELP}");

    let mut session = Session {
        state,
        effects,
        renderer: TerminalRenderer::new(io::stdout()),
    };
    session.dispatch(Msg::LoadRequested);

    while let Ok(input) = input_rx.recv() {
        match input {
            AppInput::Msg(msg) => session.dispatch(msg),
            AppInput::Quit => break,
        }
    }

    dash_info!("Dashboard closed");
    Ok(())
}

struct Session {
    state: DashboardState,
    effects: EffectRunner,
    renderer: TerminalRenderer<Stdout>,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;

        self.effects.enqueue(effects);
        if let Some(view) = view {
            if let Err(err) = self.renderer.render(&view) {
                dash_error!("Failed to render dashboard: {}", err);
            }
        }
    }
}
