//! # SMUDGE Headless Demo
//!
//! Runs a small scene against an in-memory framebuffer with scripted input:
//! a title, a sprite sliding on every tick, a drawn cursor and a Quit button
//! that gets clicked.
//!
//! ```bash
//! RUST_LOG=smudge=debug cargo run --bin smudge_headless -- [config.toml]
//! ```

use smudge::core::{Color, Drawable, Image, PixelSurface, Rect};
use smudge::events::{Event, EventKind, EventListener, MouseButton};
use smudge::{Button, Cursor, Engine, EngineConfig, Group, Label, ScriptedSource, Stage, Subscription};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("smudge=info".parse()?),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig {
            window: smudge::WindowConfig {
                target_fps: 0,
                ..smudge::WindowConfig::default()
            },
            ..EngineConfig::default()
        },
    };
    let (width, height) = config.resolution();
    let background = config.redraw.background;
    let mut engine = Engine::new(config)?;
    let scheme = *engine.scheme();

    let mut title = Label::new(Image::solid(240, 48, scheme.text), (width / 2, 40));
    engine.spawn_widget(&mut title);

    // Two-part sprite moved as one.
    let mut sprite = Group::new()
        .with_child(solid(Rect::new(20, 200, 40, 40), Color::ROSE))
        .with_child(solid(Rect::new(30, 240, 20, 10), Color::WHITE));
    let sprite_id = engine.spawn_widget(&mut sprite).drawable;
    let slide = EventListener::new().with_handler(EventKind::Tick, move |_, stage: &mut Stage| {
        let window_width = stage.window_size().0;
        let sprite = stage.require_mut(sprite_id)?;
        if sprite.rect().x > window_width {
            sprite.move_to(-sprite.rect().width, sprite.rect().y);
        } else {
            sprite.move_by(6, 0);
        }
        Ok(())
    });
    engine.subscribe(Subscription::new(slide, [EventKind::Tick]));

    let mut quit = Button::new(Image::solid(80, 24, scheme.text), (width - 120, height - 60), &scheme);
    quit.on_click(|_, stage| {
        tracing::info!("quit clicked");
        stage.request_quit();
        Ok(())
    });
    engine.spawn_widget(&mut quit);

    let mut cursor = Cursor::with_image(&Image::solid(8, 8, Color::WHITE));
    engine.spawn_widget(&mut cursor);

    let target = quit.rect().center();
    let mut source = ScriptedSource::default()
        .then(vec![Event::mouse_motion(10, 10)])
        .idle(30)
        .then(vec![Event::window_leave()])
        .idle(5)
        .then(vec![Event::window_enter(), Event::mouse_motion(target.0, target.1)])
        .idle(5)
        .then(vec![Event::mouse_down(MouseButton::Left, target.0, target.1)])
        .then(vec![Event::mouse_up(MouseButton::Left, target.0, target.1)])
        .idle(10);

    let mut surface = PixelSurface::new(width, height, background);
    let summary = engine.run(&mut source, &mut surface);

    println!("stopped: {:?}", summary.reason);
    println!("frames:  {}", summary.stats.frames);
    println!("events:  {}", summary.stats.events);
    println!("erased:  {}", summary.stats.erased);
    println!("drawn:   {}", summary.stats.rendered);
    println!("failed:  {}", summary.stats.failures());
    println!("bytes:   {}", surface.as_bytes().len());
    Ok(())
}

fn solid(rect: Rect, color: Color) -> Drawable {
    Drawable::with_render(rect, move |surface, rect| {
        surface.fill_rect(rect, color);
        Ok(())
    })
}
