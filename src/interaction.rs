//! Hit-testing and pointer interaction.
//!
//! [`InteractionController`] owns mouse, wheel and touch input and turns them
//! into camera moves plus at most one [`Outcome::Activate`] per physical
//! gesture. Mouse activation is a primary press/release without drag, touch
//! activation is a short, still tap; there is no separate `click` path, so a
//! tap can never activate twice.

use crate::camera::Camera;
use crate::layout::{Point, WordSlot};
use crate::ratings::Rating;

/// Max travel (px) for a press to still count as a tap/click.
pub const TAP_SLOP_PX: f64 = 10.0;
/// Max touch duration (ms) for a tap.
pub const TAP_MAX_MS: f64 = 300.0;
/// Zoom factor per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Topmost slot whose last drawn box contains screen point `(sx, sy)`.
/// Later slots are drawn on top, so the scan runs back to front.
pub fn hit_test(camera: &Camera, slots: &[WordSlot], sx: f64, sy: f64) -> Option<usize> {
    let p = camera.screen_to_world(sx, sy);
    slots
        .iter()
        .enumerate()
        .rev()
        .find(|(_, s)| s.last_drawn.is_some_and(|b| b.contains(p.x, p.y)))
        .map(|(i, _)| i)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other,
}

impl MouseButton {
    /// From `MouseEvent.button`.
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => MouseButton::Primary,
            1 => MouseButton::Middle,
            2 => MouseButton::Secondary,
            _ => MouseButton::Other,
        }
    }

    fn pans(self) -> bool {
        matches!(self, MouseButton::Middle | MouseButton::Secondary)
    }
}

/// Screen-space input. Touch events carry the touches still on the surface
/// after the event and a timestamp in ms.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    MouseDown { x: f64, y: f64, button: MouseButton },
    MouseMove { x: f64, y: f64 },
    MouseUp { x: f64, y: f64, button: MouseButton },
    MouseLeave,
    Wheel { x: f64, y: f64, delta_y: f64 },
    TouchStart { touches: Vec<Point>, t: f64 },
    TouchMove { touches: Vec<Point>, t: f64 },
    TouchEnd { touches: Vec<Point>, t: f64 },
    /// The platform aborted the touch sequence.
    TouchCancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    None,
    /// Open the rating prompt for this slot.
    Activate(usize),
    /// Pointer is (or is not) over a word.
    Hover(bool),
    CameraMoved,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Gesture {
    Idle,
    MousePress { start: Point, moved: bool },
    MousePan { last: Point },
    TouchPending { start: Point, last: Point, t0: f64 },
    TouchPan { last: Point },
    Pinch { centroid: Point, distance: f64 },
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    gesture: Gesture,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

fn centroid(a: Point, b: Point) -> Point {
    Point {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    fn touching(&self) -> bool {
        matches!(
            self.gesture,
            Gesture::TouchPending { .. } | Gesture::TouchPan { .. } | Gesture::Pinch { .. }
        )
    }

    pub fn handle(&mut self, event: InputEvent, camera: &mut Camera, slots: &[WordSlot]) -> Outcome {
        match event {
            // Horizontal scrolls carry no vertical delta.
            InputEvent::Wheel { delta_y, .. } if delta_y == 0.0 || delta_y.is_nan() => {
                Outcome::None
            }
            InputEvent::Wheel { x, y, delta_y } => {
                let factor = if delta_y < 0.0 {
                    WHEEL_ZOOM_STEP
                } else {
                    1.0 / WHEEL_ZOOM_STEP
                };
                camera.zoom_at(x, y, factor);
                Outcome::CameraMoved
            }
            InputEvent::TouchStart { touches, t } => self.touch_start(&touches, t),
            InputEvent::TouchMove { touches, .. } => self.touch_move(&touches, camera),
            InputEvent::TouchEnd { touches, t } => self.touch_end(&touches, t, camera, slots),
            InputEvent::TouchCancel => {
                self.gesture = Gesture::Idle;
                Outcome::None
            }
            // Mouse input is ignored mid-touch.
            _ if self.touching() => Outcome::None,
            InputEvent::MouseDown { x, y, button } => {
                let at = Point { x, y };
                self.gesture = if button.pans() {
                    Gesture::MousePan { last: at }
                } else if button == MouseButton::Primary {
                    Gesture::MousePress {
                        start: at,
                        moved: false,
                    }
                } else {
                    Gesture::Idle
                };
                Outcome::None
            }
            InputEvent::MouseMove { x, y } => {
                let at = Point { x, y };
                match &mut self.gesture {
                    Gesture::MousePan { last } => {
                        camera.pan(at.x - last.x, at.y - last.y);
                        *last = at;
                        Outcome::CameraMoved
                    }
                    Gesture::MousePress { start, moved } => {
                        if distance(*start, at) > TAP_SLOP_PX {
                            *moved = true;
                        }
                        Outcome::None
                    }
                    _ => Outcome::Hover(hit_test(camera, slots, x, y).is_some()),
                }
            }
            InputEvent::MouseUp { x, y, button } => {
                let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
                match gesture {
                    Gesture::MousePress { start, moved }
                        if button == MouseButton::Primary
                            && !moved
                            && distance(start, Point { x, y }) <= TAP_SLOP_PX =>
                    {
                        hit_test(camera, slots, x, y).map_or(Outcome::None, Outcome::Activate)
                    }
                    _ => Outcome::None,
                }
            }
            InputEvent::MouseLeave => {
                self.gesture = Gesture::Idle;
                Outcome::Hover(false)
            }
        }
    }

    /// Resume from whatever fingers remain; a tap can't start here.
    fn seed_touches(&mut self, touches: &[Point]) {
        self.gesture = match touches {
            [] => Gesture::Idle,
            [only] => Gesture::TouchPan { last: *only },
            [a, b, ..] => Gesture::Pinch {
                centroid: centroid(*a, *b),
                distance: distance(*a, *b),
            },
        };
    }

    fn touch_start(&mut self, touches: &[Point], t: f64) -> Outcome {
        match touches {
            [only] if !self.touching() => {
                self.gesture = Gesture::TouchPending {
                    start: *only,
                    last: *only,
                    t0: t,
                };
            }
            _ => self.seed_touches(touches),
        }
        Outcome::None
    }

    fn touch_move(&mut self, touches: &[Point], camera: &mut Camera) -> Outcome {
        match (touches, &mut self.gesture) {
            ([p], Gesture::TouchPending { start, last, .. }) => {
                if distance(*start, *p) > TAP_SLOP_PX {
                    camera.pan(p.x - last.x, p.y - last.y);
                    self.gesture = Gesture::TouchPan { last: *p };
                    Outcome::CameraMoved
                } else {
                    *last = *p;
                    Outcome::None
                }
            }
            ([p], Gesture::TouchPan { last }) => {
                camera.pan(p.x - last.x, p.y - last.y);
                *last = *p;
                Outcome::CameraMoved
            }
            ([a, b, ..], Gesture::Pinch { centroid: c, distance: d }) => {
                let nc = centroid(*a, *b);
                let nd = distance(*a, *b);
                camera.pan(nc.x - c.x, nc.y - c.y);
                if *d > 0.0 && nd > 0.0 {
                    camera.zoom_at(nc.x, nc.y, nd / *d);
                }
                *c = nc;
                *d = nd;
                Outcome::CameraMoved
            }
            // Finger count changed without a start/end we saw.
            _ => {
                self.seed_touches(touches);
                Outcome::None
            }
        }
    }

    fn touch_end(
        &mut self,
        touches: &[Point],
        t: f64,
        camera: &mut Camera,
        slots: &[WordSlot],
    ) -> Outcome {
        let gesture = self.gesture;
        match (touches, gesture) {
            ([], Gesture::TouchPending { start, last, t0 }) => {
                self.gesture = Gesture::Idle;
                if t - t0 <= TAP_MAX_MS && distance(start, last) <= TAP_SLOP_PX {
                    hit_test(camera, slots, start.x, start.y).map_or(Outcome::None, Outcome::Activate)
                } else {
                    Outcome::None
                }
            }
            ([], _) => {
                self.gesture = Gesture::Idle;
                Outcome::None
            }
            ([only], _) => {
                // Lifting one finger of a pinch continues as a pan.
                self.gesture = Gesture::TouchPan { last: *only };
                Outcome::None
            }
            _ => {
                self.seed_touches(touches);
                Outcome::None
            }
        }
    }
}

/// Fixed-language prompt shown for `word`.
pub fn prompt_text(word: &str) -> String {
    format!("Theo bạn, từ \"{word}\" phù hợp với bạn tới mức nào?")
}

/// Rating prompt state. Selection is local until confirmed.
#[derive(Clone, Debug, Default)]
pub struct RatingPrompt {
    word: Option<String>,
    selected: Option<Rating>,
}

impl RatingPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for `word`, preselecting `default` if given.
    pub fn open(&mut self, word: &str, default: Option<Rating>) {
        self.word = Some(word.to_owned());
        self.selected = default;
    }

    pub fn is_open(&self) -> bool {
        self.word.is_some()
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    pub fn message(&self) -> Option<String> {
        self.word.as_deref().map(prompt_text)
    }

    pub fn select(&mut self, rating: Rating) {
        if self.is_open() {
            self.selected = Some(rating);
        }
    }

    pub fn selected(&self) -> Option<Rating> {
        self.selected
    }

    /// Commit the selection and close. With nothing selected the prompt stays
    /// open and `None` is returned.
    pub fn confirm(&mut self) -> Option<(String, Rating)> {
        let rating = self.selected?;
        let word = self.word.take()?;
        self.selected = None;
        Some((word, rating))
    }

    /// Close, handing back the word whose rating should be removed.
    pub fn clear(&mut self) -> Option<String> {
        self.selected = None;
        self.word.take()
    }

    pub fn cancel(&mut self) {
        self.word = None;
        self.selected = None;
    }
}
