use anyhow::Result;
use retrotoy_common::color::Color;

use crate::canvas::Canvas;

/// Ink color of the pen.
pub const INK: Color = Color::BLACK;
/// Stroke width of the pen, in pixels.
pub const PEN_WIDTH: u32 = 2;
/// Stroke width of the eraser. Wider than the pen so erasing a line does not
/// require retracing it pixel-exactly.
pub const ERASER_WIDTH: u32 = 6;

/// Crosshair shown in repositioning mode.
const CURSOR_COLOR: Color = Color::RED;
const CURSOR_HALF_SIZE: i32 = 5;
const CURSOR_WIDTH: u32 = 2;

/// What cursor movement does to the canvas.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Mode {
    /// Movement leaves an ink trace.
    #[default]
    Drawing,
    /// Movement paints over the trace in the background color.
    Erasing,
    /// Movement only relocates the cursor; a crosshair marks it on screen.
    Repositioning,
}

/// The sketching machine: a canvas, a cursor, and the current pen mode.
///
/// All mutation goes through the operations below, one command at a time;
/// frontends only read frames out via `render_frame`. The cursor is clamped
/// to the canvas at every step, so strokes can never leave the raster.
pub struct Sketch {
    canvas: Canvas,
    cursor_x: i32,
    cursor_y: i32,
    mode: Mode,
    is_drawing: bool,
}

impl Sketch {
    /// Create a blank sketch with the cursor at the canvas center.
    pub fn new(width: usize, height: usize) -> Result<Sketch> {
        let canvas = Canvas::new(width, height, Color::SCREEN_GRAY)?;
        Ok(Sketch {
            cursor_x: (width / 2) as i32,
            cursor_y: (height / 2) as i32,
            canvas,
            mode: Mode::default(),
            is_drawing: false,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Whether the most recent movement left a trace.
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Move the cursor one step of `speed` pixels along the given directions.
    ///
    /// Directions are -1, 0, or 1 per axis. The candidate position is clamped
    /// to the canvas before any stroke decision. A move that clamps back to
    /// the current position is a complete no-op and returns `false`; otherwise
    /// the canvas is stroked according to the current mode, the new position
    /// commits, and `true` asks the caller to re-render.
    pub fn apply_move(&mut self, direction_x: i32, direction_y: i32, speed: u32) -> bool {
        debug_assert!((-1..=1).contains(&direction_x) && (-1..=1).contains(&direction_y));
        debug_assert!(speed > 0);

        let speed = speed as i32;
        let new_x = (self.cursor_x + direction_x * speed).clamp(0, self.canvas.width() as i32 - 1);
        let new_y = (self.cursor_y + direction_y * speed).clamp(0, self.canvas.height() as i32 - 1);
        if new_x == self.cursor_x && new_y == self.cursor_y {
            return false;
        }

        let from = (self.cursor_x, self.cursor_y);
        let to = (new_x, new_y);
        match self.mode {
            Mode::Drawing => {
                self.canvas.stroke(from, to, INK, PEN_WIDTH);
                self.is_drawing = true;
            }
            Mode::Erasing => {
                let background = self.canvas.background();
                self.canvas.stroke(from, to, background, ERASER_WIDTH);
                self.is_drawing = true;
            }
            Mode::Repositioning => self.is_drawing = false,
        }
        self.cursor_x = new_x;
        self.cursor_y = new_y;
        true
    }

    /// Lift the pen without moving, like pressing the toy's center knob.
    pub fn center_or_stop(&mut self) {
        self.is_drawing = false;
    }

    /// Shake the toy: wipe the canvas and recenter the cursor.
    pub fn reset(&mut self) {
        self.canvas.clear();
        self.cursor_x = self.canvas.width() as i32 / 2;
        self.cursor_y = self.canvas.height() as i32 / 2;
        self.is_drawing = false;
    }

    /// Produce the frame to display.
    ///
    /// In repositioning mode the frame carries a crosshair at the cursor; the
    /// overlay lives only in the returned copy, never in the drawing itself.
    pub fn render_frame(&self) -> Canvas {
        let mut frame = self.canvas.clone();
        if self.mode == Mode::Repositioning {
            let (x, y) = (self.cursor_x, self.cursor_y);
            frame.stroke(
                (x - CURSOR_HALF_SIZE, y),
                (x + CURSOR_HALF_SIZE, y),
                CURSOR_COLOR,
                CURSOR_WIDTH,
            );
            frame.stroke(
                (x, y - CURSOR_HALF_SIZE),
                (x, y + CURSOR_HALF_SIZE),
                CURSOR_COLOR,
                CURSOR_WIDTH,
            );
        }
        frame
    }

    /// PNG bytes of the drawing, without any cursor overlay.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        self.canvas.encode_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sketch() -> Sketch {
        Sketch::new(600, 400).unwrap()
    }

    #[test]
    fn cursor_starts_at_center() {
        let sketch = sketch();
        assert_eq!(sketch.cursor(), (300, 200));
        assert_eq!(sketch.mode(), Mode::Drawing);
        assert!(!sketch.is_drawing());
    }

    #[test]
    fn zero_sized_sketch_is_rejected() {
        assert!(Sketch::new(0, 400).is_err());
        assert!(Sketch::new(600, 0).is_err());
    }

    #[test]
    fn drawing_move_strokes_ink() {
        let mut sketch = sketch();
        assert!(sketch.apply_move(1, 0, 3));
        assert_eq!(sketch.cursor(), (303, 200));
        assert!(sketch.is_drawing());
        // the trace runs from the old to the new position, two pixels wide
        assert_eq!(sketch.canvas().pixel(300, 200), INK);
        assert_eq!(sketch.canvas().pixel(303, 200), INK);
        assert_eq!(sketch.canvas().pixel(301, 199), INK);
        assert_eq!(sketch.canvas().pixel(301, 196), Color::SCREEN_GRAY);
    }

    #[test]
    fn zero_displacement_is_a_no_op() {
        let mut sketch = sketch();
        let before = sketch.canvas().data().to_vec();
        assert!(!sketch.apply_move(0, 0, 5));
        assert_eq!(sketch.cursor(), (300, 200));
        assert_eq!(sketch.canvas().data(), before.as_slice());
        assert!(!sketch.is_drawing());
    }

    #[test]
    fn cursor_never_leaves_the_canvas() {
        let mut sketch = sketch();
        for _ in 0..200 {
            sketch.apply_move(1, 1, 10);
            let (x, y) = sketch.cursor();
            assert!((0..600).contains(&x));
            assert!((0..400).contains(&y));
        }
        assert_eq!(sketch.cursor(), (599, 399));
    }

    #[test]
    fn clamped_move_at_the_edge_is_a_no_op() {
        let mut sketch = sketch();
        // run into the right edge: the last step clamps 600 down to 599
        for _ in 0..30 {
            assert!(sketch.apply_move(1, 0, 10));
        }
        assert_eq!(sketch.cursor(), (599, 200));

        let before = sketch.canvas().data().to_vec();
        assert!(!sketch.apply_move(1, 0, 10));
        assert!(!sketch.apply_move(1, 0, 5));
        assert_eq!(sketch.cursor(), (599, 200));
        assert_eq!(sketch.canvas().data(), before.as_slice());
    }

    #[test]
    fn erasing_paints_background_over_ink() {
        let mut sketch = sketch();
        sketch.apply_move(1, 0, 9);
        assert_eq!(sketch.canvas().pixel(305, 200), INK);

        sketch.set_mode(Mode::Erasing);
        assert!(sketch.apply_move(-1, 0, 9));
        assert!(sketch.is_drawing());
        assert_eq!(sketch.canvas().pixel(305, 200), Color::SCREEN_GRAY);
        assert_eq!(sketch.canvas().pixel(305, 199), Color::SCREEN_GRAY);
    }

    #[test]
    fn repositioning_never_touches_the_drawing() {
        let mut sketch = sketch();
        sketch.apply_move(1, 0, 5);
        sketch.set_mode(Mode::Repositioning);
        let before = sketch.canvas().data().to_vec();

        assert!(sketch.apply_move(0, 1, 7));
        assert!(sketch.apply_move(-1, -1, 4));
        assert!(!sketch.is_drawing());
        assert_eq!(sketch.canvas().data(), before.as_slice());
    }

    #[test]
    fn repositioning_frame_shows_a_crosshair() {
        let mut sketch = sketch();
        sketch.set_mode(Mode::Repositioning);
        sketch.apply_move(1, 1, 10);
        let (x, y) = sketch.cursor();
        assert_eq!((x, y), (310, 210));

        let frame = sketch.render_frame();
        assert_eq!(frame.pixel(310, 210), Color::RED);
        assert_eq!(frame.pixel(315, 210), Color::RED);
        assert_eq!(frame.pixel(310, 205), Color::RED);
        // the overlay exists only in the frame
        assert_eq!(sketch.canvas().pixel(310, 210), Color::SCREEN_GRAY);
    }

    #[test]
    fn frame_differs_from_drawing_only_near_the_cursor() {
        let mut sketch = sketch();
        sketch.apply_move(1, 0, 5);
        sketch.set_mode(Mode::Repositioning);
        sketch.apply_move(0, 1, 8);
        let (cx, cy) = sketch.cursor();

        let frame = sketch.render_frame();
        for y in 0..sketch.canvas().height() {
            for x in 0..sketch.canvas().width() {
                if frame.pixel(x, y) != sketch.canvas().pixel(x, y) {
                    assert!((x as i32 - cx).abs() <= CURSOR_HALF_SIZE + 1);
                    assert!((y as i32 - cy).abs() <= CURSOR_HALF_SIZE + 1);
                }
            }
        }
    }

    #[test]
    fn drawing_frame_carries_no_overlay() {
        let mut sketch = sketch();
        sketch.apply_move(-1, 0, 4);
        let frame = sketch.render_frame();
        assert_eq!(frame.data(), sketch.canvas().data());
    }

    #[test]
    fn center_or_stop_lifts_the_pen_in_place() {
        let mut sketch = sketch();
        sketch.apply_move(0, 1, 2);
        assert!(sketch.is_drawing());
        sketch.center_or_stop();
        assert!(!sketch.is_drawing());
        assert_eq!(sketch.cursor(), (300, 202));
    }

    #[test]
    fn shake_resets_to_a_blank_canvas() {
        let mut sketch = sketch();
        sketch.apply_move(1, 1, 10);
        sketch.apply_move(-1, 0, 4);
        assert!(sketch.is_drawing());

        sketch.reset();
        assert_eq!(sketch.cursor(), (300, 200));
        assert!(!sketch.is_drawing());
        let blank = Sketch::new(600, 400).unwrap();
        assert_eq!(sketch.canvas().data(), blank.canvas().data());
    }

    #[test]
    fn exported_png_round_trips_and_has_no_overlay() {
        let mut sketch = sketch();
        sketch.apply_move(1, 0, 7);
        sketch.set_mode(Mode::Repositioning);

        let bytes = sketch.export_png().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.as_raw().as_slice(), sketch.canvas().data());
    }
}
