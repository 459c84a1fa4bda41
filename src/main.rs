use anyhow::Result;
use log::{debug, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputManager;
use game::{scene, GameConfig, World};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = GameConfig::default();
    info!("Starting {}...", config.title);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let (width, height) = config.window_size;
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(width, height))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut game_loop = GameLoop::with_timestep(config.fixed_timestep);
    let mut world = World::new(config);
    let demo = scene::spawn_demo(&mut world)?;
    debug!("Demo scene: {:?}", demo);

    let size = window.inner_size();
    world.camera_mut().resize(size.width as f32, size.height as f32);
    let mut input = InputManager::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    debug!("Window resized to {:?}", physical_size);
                    world
                        .camera_mut()
                        .resize(physical_size.width as f32, physical_size.height as f32);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.process_cursor_moved(position.x, position.y);
                }
                WindowEvent::Focused(false) => {
                    input.reset();
                }
                WindowEvent::RedrawRequested => {
                    if input.take_pause_request() {
                        game_loop.toggle_pause();
                    }

                    let updates = game_loop.begin_frame();
                    let step = game_loop.fixed_timestep();
                    for _ in 0..updates {
                        let aim = input
                            .player()
                            .cursor()
                            .map(|cursor| world.camera().screen_to_world(cursor));
                        world.update(step, input.player(), aim);
                        input.update();
                    }
                    if game_loop.is_paused() {
                        // Presses made while paused are not replayed on resume
                        input.update();
                    }

                    if game_loop.frame_count() % 600 == 0 {
                        debug!("FPS: {:.1}", game_loop.fps());
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
