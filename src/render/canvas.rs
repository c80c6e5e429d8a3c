//! Canvas 2D command executor (web only)

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::assets::AssetStore;

use super::frame::DrawCmd;

const SKY_COLOR: &str = "#87ceeb";

/// Replays draw command lists onto a 2D context.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    pub fn render(&self, cmds: &[DrawCmd], assets: &AssetStore) -> Result<(), JsValue> {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear => {
                    self.ctx.set_global_alpha(1.0);
                    self.ctx.set_fill_style_str(SKY_COLOR);
                    self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
                }
                DrawCmd::Sprite {
                    sheet,
                    src: (sx, sy, sw, sh),
                    dst: (dx, dy, dw, dh),
                    flip_x,
                    alpha,
                } => {
                    let img = assets.image(*sheet);
                    self.ctx.set_global_alpha(*alpha as f64);
                    if *flip_x {
                        self.ctx.save();
                        // Mirror around the destination rect's own center
                        self.ctx.translate((dx + dw) as f64, *dy as f64)?;
                        self.ctx.scale(-1.0, 1.0)?;
                        self.ctx
                            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                                img, *sx as f64, *sy as f64, *sw as f64, *sh as f64, 0.0, 0.0,
                                *dw as f64, *dh as f64,
                            )?;
                        self.ctx.restore();
                    } else {
                        self.ctx
                            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                                img, *sx as f64, *sy as f64, *sw as f64, *sh as f64, *dx as f64,
                                *dy as f64, *dw as f64, *dh as f64,
                            )?;
                    }
                }
                DrawCmd::Overlay { alpha } => {
                    self.ctx.set_global_alpha(*alpha as f64);
                    self.ctx.set_fill_style_str("#000000");
                    self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
                }
                DrawCmd::Text {
                    text,
                    x,
                    y,
                    size,
                    alpha,
                } => {
                    self.ctx.set_global_alpha(*alpha as f64);
                    self.ctx.set_font(&format!("bold {size}px sans-serif"));
                    self.ctx.set_text_align("center");
                    self.ctx.set_line_width(4.0);
                    self.ctx.set_stroke_style_str("#000000");
                    self.ctx.set_fill_style_str("#ffffff");
                    self.ctx.stroke_text(text, *x as f64, *y as f64)?;
                    self.ctx.fill_text(text, *x as f64, *y as f64)?;
                }
            }
        }
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }
}
