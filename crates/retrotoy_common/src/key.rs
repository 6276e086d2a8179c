/// Logical key set shared between frontends and the sketch app.
///
/// Frontends translate their native keycodes into this enum so the app layer
/// never depends on a windowing library. Keys with no mapping arrive as
/// `Key::None` and are ignored.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Num1,
    Num2,
    Num3,
    Minus,
    Equals,
    R,
    S,
    Escape,
    None,
}
