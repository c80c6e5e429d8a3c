//! Sprite sheets and frame metrics
//!
//! [`SpriteMetrics`] is the platform-free part: per-frame source dimensions
//! the render pass needs to slice animation strips. On the web host it is
//! derived from loaded image sizes; tests use the defaults, which mirror the
//! shipped art.

use crate::consts::*;

/// Cat sprite draw scale relative to its source frame
const CAT_SCALE: f32 = 2.0;

/// Per-sheet source dimensions, in image pixels
#[derive(Debug, Clone)]
pub struct SpriteMetrics {
    pub background_w: f32,
    pub background_h: f32,
    /// One frame of the cat strips (idle and run share frame size)
    pub cat_frame_w: f32,
    pub cat_frame_h: f32,
    pub pigeon_frame_w: f32,
    pub pigeon_frame_h: f32,
    pub eagle_frame_w: f32,
    pub eagle_frame_h: f32,
    pub train_car_w: f32,
    pub train_car_h: f32,
    pub train_end_w: f32,
    pub train_end_h: f32,
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self {
            background_w: 1920.0,
            background_h: 1080.0,
            cat_frame_w: 32.0,
            cat_frame_h: 32.0,
            pigeon_frame_w: 32.0,
            pigeon_frame_h: 32.0,
            eagle_frame_w: EAGLE_SPRITE_SIZE,
            eagle_frame_h: EAGLE_SPRITE_SIZE,
            train_car_w: 200.0,
            train_car_h: 160.0,
            train_end_w: 130.0,
            train_end_h: 160.0,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AssetStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use web_sys::HtmlImageElement;

    use super::{CAT_SCALE, SpriteMetrics};
    use crate::consts::*;
    use crate::render::SheetId;
    use crate::sim::WorldLayout;

    /// All sprite sheets the game draws from, loaded once at startup
    pub struct AssetStore {
        background: HtmlImageElement,
        train_car: HtmlImageElement,
        train_end: HtmlImageElement,
        cat_idle: HtmlImageElement,
        cat_run: HtmlImageElement,
        pigeon: HtmlImageElement,
        eagle: HtmlImageElement,
    }

    fn load_image(path: &str) -> Result<HtmlImageElement, JsValue> {
        let img = HtmlImageElement::new()?;
        img.set_src(path);
        Ok(img)
    }

    impl AssetStore {
        /// Kick off loading of every sheet; completion is polled with
        /// [`AssetStore::all_ready`].
        pub fn load() -> Result<Self, JsValue> {
            Ok(Self {
                background: load_image("assets/background.png")?,
                train_car: load_image("assets/train_car.png")?,
                train_end: load_image("assets/train_end.png")?,
                cat_idle: load_image("assets/cat_idle.png")?,
                cat_run: load_image("assets/cat_run.png")?,
                pigeon: load_image("assets/pigeon.png")?,
                eagle: load_image("assets/eagle.png")?,
            })
        }

        fn ready(img: &HtmlImageElement) -> bool {
            img.complete() && img.natural_width() > 0
        }

        /// True once every image has decoded dimensions
        pub fn all_ready(&self) -> bool {
            [
                &self.background,
                &self.train_car,
                &self.train_end,
                &self.cat_idle,
                &self.cat_run,
                &self.pigeon,
                &self.eagle,
            ]
            .iter()
            .all(|img| Self::ready(img))
        }

        pub fn image(&self, sheet: SheetId) -> &HtmlImageElement {
            match sheet {
                SheetId::Background => &self.background,
                SheetId::TrainCar => &self.train_car,
                SheetId::TrainEnd => &self.train_end,
                SheetId::CatIdle => &self.cat_idle,
                SheetId::CatRun => &self.cat_run,
                SheetId::Pigeon => &self.pigeon,
                SheetId::Eagle => &self.eagle,
            }
        }

        /// Derive frame metrics from the decoded image sizes. Animation
        /// strips are horizontal, so frame width is image width divided by
        /// the frame count.
        pub fn metrics(&self) -> SpriteMetrics {
            SpriteMetrics {
                background_w: self.background.natural_width() as f32,
                background_h: self.background.natural_height() as f32,
                cat_frame_w: self.cat_idle.natural_width() as f32 / CAT_IDLE_FRAMES as f32,
                cat_frame_h: self.cat_idle.natural_height() as f32,
                pigeon_frame_w: self.pigeon.natural_width() as f32 / PIGEON_FRAMES as f32,
                pigeon_frame_h: self.pigeon.natural_height() as f32,
                eagle_frame_w: self.eagle.natural_width() as f32 / EAGLE_FRAMES as f32,
                eagle_frame_h: self.eagle.natural_height() as f32,
                train_car_w: self.train_car.natural_width() as f32,
                train_car_h: self.train_car.natural_height() as f32,
                train_end_w: self.train_end.natural_width() as f32,
                train_end_h: self.train_end.natural_height() as f32,
            }
        }

        /// World geometry implied by the canvas size and the train art
        pub fn layout(&self, screen_w: f32, screen_h: f32) -> WorldLayout {
            let m = self.metrics();
            WorldLayout {
                screen_w,
                screen_h,
                train_y: screen_h - m.train_car_h,
                car_w: m.train_car_w,
                car_h: m.train_car_h,
                end_w: m.train_end_w,
                end_h: m.train_end_h,
                cat_w: m.cat_frame_w * CAT_SCALE,
                cat_h: m.cat_frame_h * CAT_SCALE,
            }
        }
    }
}
