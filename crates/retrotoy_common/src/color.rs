/// An RGB color with 8 bits per channel.
///
/// The toy renders into plain RGB24 buffers, so no alpha channel is carried.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    /// Background of a fresh sketch canvas, the light gray of the toy's screen.
    pub const SCREEN_GRAY: Color = Color::new(230, 230, 230);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    #[inline]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}
