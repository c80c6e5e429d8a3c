//! Scrolling train model
//!
//! The train is a one-time leading end-cap followed by an infinitely
//! repeating pattern of cars separated by fixed gaps. The same span
//! enumeration feeds both the under-foot surface query and the render pass;
//! keeping them on one code path is what guarantees the player never falls
//! through a car that is drawn, or stands on a gap that isn't.

use crate::consts::*;

use super::state::WorldLayout;

/// Which piece of the train a span belongs to (render picks the sprite)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// The mirrored end-cap at the head of the train, shown once
    LeadCar,
    /// A repeating center car
    Car,
}

/// A solid horizontal span of roof, in screen coordinates
#[derive(Debug, Clone, Copy)]
pub struct Span {
    pub start: f32,
    pub width: f32,
    pub kind: SpanKind,
}

impl Span {
    pub fn end(&self) -> f32 {
        self.start + self.width
    }

    /// Inclusive on both edges, matching the surface query
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x <= self.end()
    }
}

/// Horizontally scrolling train strip
#[derive(Debug, Clone)]
pub struct Track {
    /// Screen x of the train head; decreases while running
    pub scroll_x: f32,
    /// One-way flag: cleared once the end-cap is fully off-screen
    pub show_lead_car: bool,
    screen_w: f32,
    car_w: f32,
    end_w: f32,
}

impl Track {
    pub fn new(layout: &WorldLayout) -> Self {
        Self {
            scroll_x: 0.0,
            show_lead_car: true,
            screen_w: layout.screen_w,
            car_w: layout.car_w,
            end_w: layout.end_w,
        }
    }

    /// Horizontal distance after which the car pattern exactly recurs
    pub fn repeat_width(&self) -> f32 {
        CARS_PER_UNIT as f32 * (self.car_w + CAR_GAP)
    }

    /// Advance the scroll by one frame and retire the end-cap once it has
    /// moved fully past the left edge (never re-shown).
    pub fn advance(&mut self) {
        self.scroll_x -= SCROLL_SPEED;
        if self.show_lead_car && self.scroll_x + self.end_w < -self.end_w {
            self.show_lead_car = false;
        }
    }

    /// Enumerate every solid span currently intersecting the screen.
    ///
    /// The repeating pattern's start is normalized into (-repeat_width, 0]
    /// so the enumeration is O(screen width) no matter how far the train
    /// has scrolled.
    pub fn spans(&self) -> Vec<Span> {
        let mut spans = Vec::new();

        if self.show_lead_car {
            spans.push(Span {
                start: self.scroll_x,
                width: self.end_w,
                kind: SpanKind::LeadCar,
            });
        }

        let repeat = self.repeat_width();
        let mut start_x = self.scroll_x + self.end_w + CAR_GAP;
        // While the end-cap is on screen the first car sits right behind
        // it; afterwards the pattern start is folded into (-repeat, 0]
        if !self.show_lead_car {
            while start_x > 0.0 {
                start_x -= repeat;
            }
            while start_x <= -repeat {
                start_x += repeat;
            }
        }

        let mut x = start_x;
        while x < self.screen_w {
            for _ in 0..CARS_PER_UNIT {
                spans.push(Span {
                    start: x,
                    width: self.car_w,
                    kind: SpanKind::Car,
                });
                x += self.car_w + CAR_GAP;
            }
        }

        spans
    }

    /// Is there solid roof directly under horizontal coordinate `x`?
    pub fn is_solid_at(&self, x: f32) -> bool {
        self.spans().iter().any(|s| s.contains(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track::new(&WorldLayout::default())
    }

    #[test]
    fn test_lead_car_solid_at_start() {
        let t = track();
        // scroll_x == 0: the end-cap covers [0, end_w]
        assert!(t.is_solid_at(0.0));
        assert!(t.is_solid_at(100.0));
    }

    #[test]
    fn test_gap_after_lead_car_is_not_solid() {
        let t = track();
        let layout = WorldLayout::default();
        // Just past the end-cap lies the first inter-car gap
        let gap_mid = layout.end_w + CAR_GAP / 2.0;
        assert!(!t.is_solid_at(gap_mid));
        // And the first car right after it is solid
        assert!(t.is_solid_at(layout.end_w + CAR_GAP + 1.0));
    }

    #[test]
    fn test_span_edges_are_inclusive() {
        let t = track();
        let layout = WorldLayout::default();
        let first_car_start = layout.end_w + CAR_GAP;
        assert!(t.is_solid_at(first_car_start));
        assert!(t.is_solid_at(first_car_start + layout.car_w));
        assert!(!t.is_solid_at(first_car_start + layout.car_w + 0.5));
    }

    #[test]
    fn test_lead_car_hides_once_fully_off_screen() {
        let mut t = track();
        let frames_needed = (2.0 * WorldLayout::default().end_w / SCROLL_SPEED) as u32 + 2;
        for _ in 0..frames_needed {
            t.advance();
        }
        assert!(!t.show_lead_car);
        // One-way: never re-set even if scroll kept going
        for _ in 0..100 {
            t.advance();
        }
        assert!(!t.show_lead_car);
        assert!(t.spans().iter().all(|s| s.kind == SpanKind::Car));
    }

    #[test]
    fn test_spans_cover_full_screen_width() {
        let mut t = track();
        for _ in 0..5000 {
            t.advance();
        }
        let spans = t.spans();
        assert!(!spans.is_empty());
        // First span must begin at or left of the screen edge, last must
        // reach past it
        assert!(spans.iter().map(|s| s.start).fold(f32::MAX, f32::min) <= 0.0);
        assert!(
            spans.iter().map(|s| s.end()).fold(f32::MIN, f32::max)
                >= WorldLayout::default().screen_w
        );
    }

    #[test]
    fn test_surface_is_periodic_in_scroll() {
        // Once the lead car is gone, shifting the scroll by one repeat
        // width leaves the surface query unchanged at every x.
        let mut a = track();
        a.show_lead_car = false;
        a.scroll_x = -1234.0;

        let mut b = a.clone();
        b.scroll_x -= a.repeat_width();

        for xi in 0..1024 {
            let x = xi as f32;
            assert_eq!(a.is_solid_at(x), b.is_solid_at(x), "diverged at x={x}");
        }
    }

    #[test]
    fn test_periodicity_in_frames() {
        // repeat_width / SCROLL_SPEED is not a whole frame count here, so
        // advance repeat_width frames: that scrolls SCROLL_SPEED complete
        // repeats and must land on an identical surface.
        let mut t = track();
        t.show_lead_car = false;
        t.scroll_x = -500.0;

        let before: Vec<bool> = (0..1024).map(|x| t.is_solid_at(x as f32)).collect();
        let frames = t.repeat_width() as u32;
        for _ in 0..frames {
            t.advance();
        }
        assert_eq!(
            t.scroll_x,
            -500.0 - SCROLL_SPEED * t.repeat_width(),
            "scroll shift must be a whole number of repeats"
        );
        let after: Vec<bool> = (0..1024).map(|x| t.is_solid_at(x as f32)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_deep_scroll_stays_cheap() {
        // Normalization keeps the enumeration bounded after long runs
        let mut t = track();
        t.show_lead_car = false;
        t.scroll_x = -1.0e7;
        let spans = t.spans();
        assert!(spans.len() < 64, "span list blew up: {}", spans.len());
    }
}
