mod assets;
mod host;
mod settings;

use anyhow::Result;
use embedded_graphics::geometry::{Dimensions, Size};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::DrawTarget;
use embedded_graphics_simulator::sdl2::{Keycode, MouseButton};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorEvent, Window};
use face_ui::config::FACE_SIZE;
use face_ui::placeholder::PlaceholderAssets;
use face_ui::{draw_fatal_screen, AssetSource, FaceHost, FaceProperties, TapKind, WatchFace};
use log::{error, info};

use crate::assets::DirAssets;
use crate::host::{SimCanvas, SimHost};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = settings::load_config()?;
    let assets: Box<dyn AssetSource> = match settings::assets_dir() {
        Some(dir) => Box::new(DirAssets::load(&dir)?),
        None => {
            info!("{} unset, using placeholder art", settings::ASSETS_VAR);
            Box::new(PlaceholderAssets::generate()?)
        }
    };

    let mut canvas = SimCanvas::new(Size::new(FACE_SIZE, FACE_SIZE));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Zodiac Light", &output_settings);

    let mut face = match WatchFace::new(config, assets.as_ref()) {
        Ok(face) => face,
        Err(e) => {
            error!("{}", e);
            draw_fatal_screen(&mut canvas, &e);
            window.show_static(canvas.display());
            return Err(e.into());
        }
    };

    let bounds = canvas.bounding_box();
    let mut host = SimHost::new();
    let mut properties = FaceProperties::default();

    face.on_properties_changed(properties);
    face.on_visibility_changed(true, &mut host);
    window.update(canvas.display());

    'running: loop {
        if host.take_offset_report() {
            face.on_time_zone_changed(host.offset(), &mut host);
        }
        if host.minute_rolled_over() {
            face.on_time_tick(&mut host);
        }
        if host.tick_due() {
            face.on_tick(&mut host);
        }

        if host.take_redraw() && face.is_visible() {
            let now = host.now_millis();
            face.on_draw(&mut canvas, bounds, now)
                .unwrap_or_else(|e| match e {});
        }
        if canvas.take_frame() {
            window.update(canvas.display());
        }

        let events: Vec<_> = window.events().collect();
        for event in events {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyUp { keycode, .. } => match keycode {
                    Keycode::A => {
                        let ambient = !face.is_ambient();
                        info!("ambient {}", ambient);
                        face.on_ambient_mode_changed(ambient, &mut host);
                    }
                    Keycode::V => {
                        let visible = !face.is_visible();
                        info!("visible {}", visible);
                        face.on_visibility_changed(visible, &mut host);
                        if !visible {
                            canvas.clear(Rgb565::BLACK).unwrap_or_else(|e| match e {});
                            window.update(canvas.display());
                        } else {
                            host.invalidate();
                        }
                    }
                    Keycode::L => {
                        properties.low_bit_ambient = !properties.low_bit_ambient;
                        info!("low-bit ambient {}", properties.low_bit_ambient);
                        face.on_properties_changed(properties);
                        host.invalidate();
                    }
                    Keycode::Z => {
                        host.shift_offset(1);
                        info!("utc offset {}", host.offset());
                    }
                    Keycode::Escape | Keycode::Q => break 'running,
                    _ => {}
                },
                SimulatorEvent::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    point,
                } => face.on_tap(TapKind::Touch, point.x, point.y, &mut host),
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    point,
                } => face.on_tap(TapKind::Tap, point.x, point.y, &mut host),
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    face.on_tap(TapKind::TouchCancel, point.x, point.y, &mut host)
                }
                _ => {}
            }
        }

        tokio::time::sleep(host.idle_time()).await;
    }

    face.on_destroy(&mut host);
    info!("bye");
    Ok(())
}
