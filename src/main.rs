//! Pokémon finder TUI

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokefinder::action::Action;
use pokefinder::audio::{CryPlayer, DEFAULT_CRY_BASE};
use pokefinder::components::{Component, FinderView, FinderViewProps};
use pokefinder::config::FinderConfig;
use pokefinder::effect::Effect;
use pokefinder::gateway::{CatalogGateway, DEFAULT_API_BASE};
use pokefinder::reducer::reducer;
use pokefinder::sprite;
use pokefinder::state::{AppState, SPINNER_TICK_MS, SPRITE_TOGGLE_INTERVAL_MS};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Look up Pokémon by name or number
#[derive(Parser, Debug)]
#[command(name = "pokefinder")]
#[command(about = "Search PokeAPI, watch the sprite turn around and hear the cry")]
struct Args {
    /// Search to run at startup
    #[arg(long, short)]
    query: Option<String>,

    /// Catalog REST root
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Base URL of the `<id>.mp3` cries
    #[arg(long, default_value = DEFAULT_CRY_BASE)]
    cry_base: String,

    /// Do not play cries
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum FinderComponentId {
    Finder,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum FinderContext {
    Main,
}

impl EventRoutingState<FinderComponentId, FinderContext> for AppState {
    fn focused(&self) -> Option<FinderComponentId> {
        Some(FinderComponentId::Finder)
    }

    fn modal(&self) -> Option<FinderComponentId> {
        None
    }

    fn binding_context(&self, _id: FinderComponentId) -> FinderContext {
        FinderContext::Main
    }

    fn default_context(&self) -> FinderContext {
        FinderContext::Main
    }
}

#[derive(Clone)]
struct RuntimeConfig {
    gateway: Arc<dyn CatalogGateway>,
    finder: FinderConfig,
    cries: CryPlayer,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        query,
        api_base,
        cry_base,
        mute,
        log_file,
        log_level,
        debug: debug_args,
    } = Args::parse();

    init_logging(log_file.as_deref(), &log_level)?;

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let finder = FinderConfig {
        api_base,
        cry_base,
        muted: mute,
    };
    tracing::info!(api_base = %finder.api_base, muted = finder.muted, "starting");
    let config = RuntimeConfig {
        gateway: finder.gateway(),
        finder,
        cries: CryPlayer::new(),
    };

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::new()) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let init_action = query.map(Action::SearchSubmit);
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        replay_actions,
        init_action,
        config,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

/// The terminal belongs to the UI, so logs only go to a file.
fn init_logging(path: Option<&Path>, level: &str) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("pokefinder={level}"))),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

struct FinderUi {
    view: FinderView,
}

impl FinderUi {
    fn new() -> Self {
        Self {
            view: FinderView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<FinderComponentId>,
    ) {
        event_ctx.set_component_area(FinderComponentId::Finder, area);
        let props = FinderViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = FinderViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.view.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    init_action: Option<Action>,
    config: RuntimeConfig,
) -> io::Result<DebugRunOutput<AppState>> {
    let config = Arc::new(config);
    let ui = Rc::new(RefCell::new(FinderUi::new()));
    let mut bus: EventBus<AppState, Action, FinderComponentId, FinderContext> = EventBus::new();
    let keybindings: Keybindings<FinderContext> = Keybindings::new();

    let ui_finder = Rc::clone(&ui);
    bus.register(FinderComponentId::Finder, move |event, state| {
        ui_finder.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, config.clone()),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: Arc<RuntimeConfig>) {
    match effect {
        Effect::LookupEntry { query, generation } => {
            let gateway = Arc::clone(&config.gateway);
            ctx.tasks().spawn(TaskKey::new("lookup"), async move {
                match gateway.fetch_entry(&query).await {
                    Ok(entry) => Action::EntryDidLoad { generation, entry },
                    Err(error) => {
                        tracing::warn!(%query, %error, "lookup failed");
                        Action::EntryDidError {
                            generation,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::ScheduleSpriteTick { generation } => {
            ctx.tasks()
                .spawn(TaskKey::new("sprite_animation"), async move {
                    tokio::time::sleep(Duration::from_millis(SPRITE_TOGGLE_INTERVAL_MS)).await;
                    Action::SpriteAnimationTick { generation }
                });
        }
        Effect::StopSpriteAnimation => {
            ctx.tasks().cancel(&TaskKey::new("sprite_animation"));
        }
        Effect::LoadSprite { url } => {
            let gateway = Arc::clone(&config.gateway);
            let key = format!("sprite_{url}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let result = match gateway.fetch_bytes(&url).await {
                    Ok(bytes) => sprite::decode_sprite(&bytes).map_err(|err| err.to_string()),
                    Err(err) => Err(err.to_string()),
                };
                match result {
                    Ok(sprite) => Action::SpriteDidLoad { url, sprite },
                    Err(error) => {
                        tracing::warn!(%url, %error, "sprite unavailable");
                        Action::SpriteDidError { url, error }
                    }
                }
            });
        }
        Effect::PlayCry { id } => {
            if config.finder.muted {
                return;
            }
            let gateway = Arc::clone(&config.gateway);
            let url = config.finder.cry_url(id);
            // Aborting the task does not reach the blocking thread; the ticket does
            let cries = config.cries.clone();
            let ticket = cries.claim();
            ctx.tasks().spawn(TaskKey::new("cry"), async move {
                let error = match gateway.fetch_bytes(&url).await {
                    Ok(bytes) => {
                        match tokio::task::spawn_blocking(move || cries.play(ticket, bytes)).await {
                            Ok(Ok(())) => return Action::CryDidPlay,
                            Ok(Err(error)) => error.to_string(),
                            Err(error) => error.to_string(),
                        }
                    }
                    Err(error) => error.to_string(),
                };
                tracing::warn!(%url, %error, "cry playback failed");
                Action::CryDidError(error)
            });
        }
    }
}
