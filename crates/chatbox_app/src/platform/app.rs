use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use chatbox_core::{update, AskOutcome, Effect, Msg, UploadOutcome, WidgetState};
use chatbox_engine::EngineError;
use chatbox_logging::{chatbox_debug, chatbox_info, chatbox_warn};
use thiserror::Error;

use super::config::{self, AppConfig, ConfigError, BACKEND_URL_ENV, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui::gesture::{self, UiEvent};
use super::ui::surface::ConsoleSurface;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("console io: {0}")]
    Io(#[from] io::Error),
}

/// Everything the host loop reacts to, from stdin and from the engine.
#[derive(Debug)]
pub enum HostEvent {
    Ui(UiEvent),
    Widget(Msg),
    InputClosed,
}

pub fn run_app() -> Result<(), AppError> {
    let loaded = config::load(Path::new(CONFIG_FILENAME));
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    logging::initialize(
        config.log_destination,
        &config.log_file,
        logging::level_for(config.verbose),
    );
    match loaded {
        Ok(Some(_)) => chatbox_info!("Loaded {}", CONFIG_FILENAME),
        Ok(None) => chatbox_info!("No {} found, using defaults", CONFIG_FILENAME),
        Err(err) => chatbox_warn!("{}; using defaults", err),
    }

    let config = config.with_base_url_override(std::env::var(BACKEND_URL_ENV).ok());
    let settings = config.backend_settings()?;

    let (host_tx, host_rx) = mpsc::channel::<HostEvent>();
    let runner = EffectRunner::new(settings, host_tx.clone())?;
    spawn_stdin_reader(host_tx);

    let stdout = io::stdout();
    let mut host = Host::new(ConsoleSurface::new(stdout.lock()), runner);
    host.surface.print_help()?;
    host.surface.render(&host.state.view())?;

    while let Ok(event) = host_rx.recv() {
        match event {
            HostEvent::Ui(UiEvent::Quit) | HostEvent::InputClosed => break,
            HostEvent::Ui(UiEvent::Help) => host.surface.print_help()?,
            HostEvent::Ui(UiEvent::DumpMarkup) => {
                let view = host.state.view();
                host.surface.print_markup(&view)?;
            }
            HostEvent::Ui(ui_event) => host.handle_ui_event(&ui_event)?,
            HostEvent::Widget(msg) => host.dispatch_msg(msg)?,
        }
    }

    chatbox_info!("Chatbox host exiting");
    Ok(())
}

fn spawn_stdin_reader(host_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        forward_lines(io::stdin().lock(), &host_tx);
        let _ = host_tx.send(HostEvent::InputClosed);
    });
}

/// Forwards console lines as UI events until input ends or the host is gone.
fn forward_lines<R: BufRead>(reader: R, host_tx: &mpsc::Sender<HostEvent>) {
    for line in reader.split(b'\n') {
        let line = match line {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                chatbox_warn!("stdin read failed: {}", err);
                return;
            }
        };
        for event in gesture::parse_line(&line) {
            if host_tx.send(HostEvent::Ui(event)).is_err() {
                return;
            }
        }
    }
}

struct Host<W: Write> {
    state: WidgetState,
    surface: ConsoleSurface<W>,
    runner: EffectRunner,
}

impl<W: Write> Host<W> {
    fn new(surface: ConsoleSurface<W>, runner: EffectRunner) -> Self {
        Self {
            state: WidgetState::new(),
            surface,
            runner,
        }
    }

    fn handle_ui_event(&mut self, event: &UiEvent) -> io::Result<()> {
        let msgs = gesture::route(event, self.state.panel());
        if msgs.is_empty() {
            chatbox_debug!("Ignored {:?} while {:?}", event, self.state.panel());
            if matches!(event, UiEvent::InputText(_)) {
                self.surface.print_notice("the chat is closed, :open it first")?;
            }
        }
        for msg in msgs {
            self.dispatch_msg(msg)?;
        }
        Ok(())
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        log_completion(&msg);

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = was_dirty.then(|| state.view());
        self.state = state;

        if let Some(view) = view {
            self.surface.render(&view)?;
        }

        let mut backend = Vec::new();
        for effect in effects {
            match effect {
                Effect::Ask { .. } | Effect::Upload { .. } => backend.push(effect),
                surface_effect => self.surface.apply(&surface_effect)?,
            }
        }
        self.runner.enqueue(backend);
        Ok(())
    }
}

fn log_completion(msg: &Msg) {
    let (request_id, failed) = match msg {
        Msg::AskCompleted {
            request_id,
            outcome,
        } => (*request_id, matches!(outcome, AskOutcome::Failed)),
        Msg::UploadCompleted {
            request_id,
            outcome,
        } => (*request_id, matches!(outcome, UploadOutcome::Failed)),
        _ => return,
    };
    if failed {
        chatbox_warn!("request #{} failed, showing fallback notice", request_id);
    } else {
        chatbox_info!("request #{} completed", request_id);
    }
}
