use std::path::PathBuf;

use anyhow::Result;
use retrotoy_common::app::App;
use retrotoy_common::key::Key;

use crate::sketch::{Mode, Sketch};
use crate::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, SCREEN_SCALE};

/// Frontend-facing application wrapper around the sketch machine.
///
/// Holds the pieces the core deliberately does not: the speed setting, which
/// direction keys are currently held, and where exports go. Held keys resolve
/// into one `apply_move` per frame, so a held arrow draws a continuous line
/// like steadily turning one of the toy's knobs.
pub struct EtchApp {
    sketch: Sketch,
    speed: u32,
    save_path: PathBuf,
    held_left: bool,
    held_right: bool,
    held_up: bool,
    held_down: bool,
    should_exit: bool,
}

impl EtchApp {
    pub fn new(width: usize, height: usize, save_path: PathBuf) -> Result<EtchApp> {
        Ok(EtchApp {
            sketch: Sketch::new(width, height)?,
            speed: DEFAULT_SPEED,
            save_path,
            held_left: false,
            held_right: false,
            held_up: false,
            held_down: false,
            should_exit: false,
        })
    }

    fn save_drawing(&self) {
        match self
            .sketch
            .export_png()
            .and_then(|bytes| std::fs::write(&self.save_path, bytes).map_err(Into::into))
        {
            Ok(()) => log::info!("saved drawing to {}", self.save_path.display()),
            Err(err) => log::error!("failed to save drawing: {err:#}"),
        }
    }
}

impl App for EtchApp {
    fn init(&mut self) {
        log::info!(
            "Etch sketch init: {}x{} canvas, speed {}",
            self.sketch.canvas().width(),
            self.sketch.canvas().height(),
            self.speed
        );
    }

    fn update(&mut self, screen: &mut [u8]) {
        let direction_x = self.held_right as i32 - self.held_left as i32;
        let direction_y = self.held_down as i32 - self.held_up as i32;
        if direction_x != 0 || direction_y != 0 {
            self.sketch.apply_move(direction_x, direction_y, self.speed);
        }
        self.sketch.render_frame().blit(screen);
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        log::debug!("key event: {:?} down={}", key, is_down);
        match key {
            Key::Left => self.held_left = is_down,
            Key::Right => self.held_right = is_down,
            Key::Up => self.held_up = is_down,
            Key::Down => self.held_down = is_down,
            _ if !is_down => {}
            Key::Space => self.sketch.center_or_stop(),
            Key::Num1 => self.sketch.set_mode(Mode::Drawing),
            Key::Num2 => self.sketch.set_mode(Mode::Erasing),
            Key::Num3 => self.sketch.set_mode(Mode::Repositioning),
            Key::Minus => self.speed = self.speed.saturating_sub(1).max(MIN_SPEED),
            Key::Equals => self.speed = (self.speed + 1).min(MAX_SPEED),
            Key::R => {
                self.sketch.reset();
                log::info!("canvas shaken clean");
            }
            Key::S => self.save_drawing(),
            Key::Escape => self.should_exit = true,
            Key::None => {}
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Etch sketch exit");
    }

    fn width(&self) -> u32 {
        self.sketch.canvas().width() as u32
    }

    fn height(&self) -> u32 {
        self.sketch.canvas().height() as u32
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "RetroToy Etch Sketch".to_string()
    }
}
