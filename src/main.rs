// src/main.rs
use nannou::prelude::*;
use std::time::Instant;

use tilevis::{
    config::Config,
    controllers::{OscController, WorldCommand},
    models::Snapshot,
    render::{NannouSurface, TextureStore, WorldRenderer},
    utilities::init_tracing,
};

struct Model {
    // Core components:
    renderer: WorldRenderer,

    // Comms components:
    osc_controller: OscController,

    // Rendering components:
    draw: nannou::Draw,
    textures: TextureStore,

    // Session clock, ms since start drive all animation
    started: Instant,

    // FPS
    last_update: Instant,
    fps: f32,

    // Message
    debug_flag: bool,
}

fn main() {
    init_tracing();
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // Load config
    let config = Config::load_or_default();

    // Create OSC controller
    let osc_controller = match OscController::new(config.osc.rx_port, config.osc.mtu) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!(port = config.osc.rx_port, error = %e, "failed to bind OSC receiver");
            std::process::exit(1);
        }
    };

    // Create window
    let window = app
        .new_window()
        .title(format!("tilevis {}", env!("CARGO_PKG_VERSION")))
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build();
    if let Err(e) = window {
        tracing::error!(error = ?e, "failed to create window");
        std::process::exit(1);
    }

    let win = app.window_rect();
    let renderer = WorldRenderer::from_config(&config, win.w(), win.h());
    let textures = TextureStore::new(config.resolve_avatar_dir(), config.resolve_background_dir());

    tracing::info!(
        port = config.osc.rx_port,
        time_per_move = config.fallback_time_per_move(),
        "waiting for snapshots"
    );

    Model {
        renderer,
        osc_controller,
        draw: nannou::Draw::new(),
        textures,
        started: Instant::now(),
        last_update: Instant::now(),
        fps: 0.0,
        debug_flag: false,
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::P => model.debug_flag = !model.debug_flag,
        Key::R => {
            tracing::info!("resetting renderer");
            model.renderer.reset();
        }
        Key::Q => app.quit(),
        _ => (),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    let duration = now - model.last_update;
    model.last_update = now;
    if model.debug_flag {
        model.fps = 1.0 / duration.as_secs_f32().max(f32::EPSILON);
    }

    let now_ms = model.started.elapsed().as_secs_f64() * 1000.0;

    // Process OSC messages
    model.osc_controller.process_messages();
    launch_commands(model, now_ms);

    // Keep the tile size fitted to the window
    let win = app.window_rect();
    model.renderer.resize_canvas(win.w(), win.h());

    /*********************  Main render pass **********************/
    model.draw.reset();
    {
        let mut surface = NannouSurface::new(app, &model.draw, win, &mut model.textures);
        model.renderer.render(&mut surface, now_ms);
    }
    /**************************************************************/

    if model.debug_flag {
        draw_debug_overlay(model, win);
    }
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    if let Err(e) = model.draw.to_frame(app, &frame) {
        tracing::warn!(error = ?e, "failed to submit frame");
    }
}

fn draw_debug_overlay(model: &Model, win: Rect) {
    let clock = model.renderer.clock();
    let text = format!(
        "FPS: {:.1}\ntick: {}\nticks/s: {}\nms/move: {:.0}\nobjects: {}\ntextures: {}",
        model.fps,
        clock
            .highest_tick()
            .map_or_else(|| "-".to_string(), |t| t.to_string()),
        clock
            .ticks_per_second()
            .map_or_else(|| "-".to_string(), |t| t.to_string()),
        clock.time_per_move(),
        model.renderer.animations().len(),
        model.textures.len(),
    );
    model
        .draw
        .text(&text)
        .left_justify()
        .align_text_top()
        .w_h(200.0, 120.0)
        .x_y(win.right() - 110.0, win.top() - 70.0)
        .color(RED);
}

// ******************************* OSC Launcher *******************************

fn launch_commands(model: &mut Model, now_ms: f64) {
    for command in model.osc_controller.take_commands() {
        match command {
            WorldCommand::State { json } => match Snapshot::parse(&json) {
                Ok(snapshot) => {
                    model.renderer.receive_snapshot(snapshot, now_ms);
                }
                Err(e) => tracing::warn!(error = %e, "rejected snapshot"),
            },
            WorldCommand::Background { colour, image } => {
                let background = model.renderer.background_mut();
                background.set_colour(&colour);
                background.set_image(image.as_deref());
            }
            WorldCommand::Reset => {
                tracing::info!("simulation reset");
                model.renderer.reset();
            }
        }
    }
}
