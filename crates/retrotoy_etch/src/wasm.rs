use crate::sketch::{Mode, Sketch};
use crate::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, KeyboardEvent};

#[wasm_bindgen]
pub struct EtchWasm {
    sketch: Sketch,
    speed: u32,
    ctx: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl EtchWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<EtchWasm, JsValue> {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document.get_element_by_id("canvas").unwrap();
        let canvas: HtmlCanvasElement = canvas
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ())
            .unwrap();

        let ctx = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into::<CanvasRenderingContext2d>()
            .unwrap();
        let sketch = Sketch::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(EtchWasm {
            sketch,
            speed: DEFAULT_SPEED,
            ctx,
        })
    }

    #[wasm_bindgen]
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    #[wasm_bindgen]
    pub fn set_mode(&mut self, mode: &str) {
        match mode {
            "erase" => self.sketch.set_mode(Mode::Erasing),
            "move" => self.sketch.set_mode(Mode::Repositioning),
            _ => self.sketch.set_mode(Mode::Drawing),
        }
    }

    #[wasm_bindgen]
    pub fn center(&mut self) {
        self.sketch.center_or_stop();
    }

    #[wasm_bindgen]
    pub fn shake(&mut self) {
        self.sketch.reset();
    }

    /// Apply an arrow key press; returns true when the frame needs repainting.
    #[wasm_bindgen]
    pub fn handle_key(&mut self, evt: KeyboardEvent) -> bool {
        match key2direction(&evt.key()) {
            Some((dx, dy)) => self.sketch.apply_move(dx, dy, self.speed),
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn draw_screen(&self) -> Result<(), JsValue> {
        let frame = self.sketch.render_frame();
        let mut rgba = Vec::with_capacity(frame.width() * frame.height() * 4);
        for pixel in frame.data().chunks_exact(3) {
            rgba.extend_from_slice(pixel);
            rgba.push(0xFF);
        }
        let image_data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&rgba),
            frame.width() as u32,
            frame.height() as u32,
        )?;
        self.ctx.put_image_data(&image_data, 0.0, 0.0)
    }

    /// PNG bytes of the drawing, for a download link.
    #[wasm_bindgen]
    pub fn export_png(&self) -> Result<Uint8Array, JsValue> {
        let bytes = self
            .sketch
            .export_png()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Uint8Array::from(bytes.as_slice()))
    }
}

fn key2direction(key: &str) -> Option<(i32, i32)> {
    match key {
        "ArrowLeft" => Some((-1, 0)),
        "ArrowRight" => Some((1, 0)),
        "ArrowUp" => Some((0, -1)),
        "ArrowDown" => Some((0, 1)),
        _ => None,
    }
}
