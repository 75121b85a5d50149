//! A software raster target: an RGBA pixel buffer with a fixed-width glyph layer.
//!
//! Text is not rasterized into pixels. Each glyph covers a
//! [`GLYPH_WIDTH`] x [`GLYPH_HEIGHT`] block of pixels and is kept in its own
//! layer, which the host draws on top of the pixels when presenting.

/// Width of one glyph of the built-in font, in pixels
pub const GLYPH_WIDTH: u32 = 1;
/// Height of one glyph of the built-in font, in pixels
pub const GLYPH_HEIGHT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GRAY: Rgba = Rgba::rgb(128, 128, 128);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with its alpha scaled by `amount` (0.0 - 1.0)
    #[inline]
    pub fn fade(self, amount: f32) -> Self {
        let a = (self.a as f32 * amount.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Composites `self` over `dst` (straight alpha)
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            255 => return self,
            0 => return dst,
            _ => {}
        }
        let sa = self.a as u32;
        let da = dst.a as u32 * (255 - sa) / 255;
        let out_a = sa + da;
        if out_a == 0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / out_a) as u8;
        Rgba {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a: out_a as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgba,
}

/// A pixel buffer that the renderer draws into and the host presents
///
/// Also used as a texture: [`Surface::upload`] replaces its pixels from raw
/// RGBA bytes and [`Surface::draw_scaled`] blits it onto another surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    glyphs: Vec<Option<Glyph>>,
}

impl Surface {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
            glyphs: vec![None; Self::glyph_cells(width, height)],
        }
    }

    fn glyph_cells(width: u32, height: u32) -> usize {
        (width.div_ceil(GLYPH_WIDTH) * height.div_ceil(GLYPH_HEIGHT)) as usize
    }
    #[inline]
    fn glyph_columns(&self) -> u32 {
        self.width.div_ceil(GLYPH_WIDTH)
    }
    #[inline]
    fn glyph_rows(&self) -> u32 {
        self.height.div_ceil(GLYPH_HEIGHT)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    /// The glyph covering glyph cell `(column, row)`, if any
    #[inline]
    pub fn glyph(&self, column: u32, row: u32) -> Option<Glyph> {
        if column >= self.glyph_columns() || row >= self.glyph_rows() {
            return None;
        }
        self.glyphs[(row * self.glyph_columns() + column) as usize]
    }

    /// Fills every pixel with `color` and drops all text
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
        self.glyphs.fill(None);
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    /// Blends `color` over the pixel at `(x, y)`; off-surface pixels are clipped
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Draws a line from `(x0, y0)` to `(x1, y1)` inclusive
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        // Bresenham, all octants
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Blends a solid rectangle; text fully under it is covered
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        let (w, h) = (w as i32, h as i32);
        for py in y..y + h {
            for px in x..x + w {
                self.blend_pixel(px, py, color);
            }
        }
        if color.a == 0 {
            return;
        }

        let (gw, gh) = (GLYPH_WIDTH as i32, GLYPH_HEIGHT as i32);
        let first_col = (x.max(0) + gw - 1) / gw;
        let first_row = (y.max(0) + gh - 1) / gh;
        let end_col = ((x + w).max(0) / gw).min(self.glyph_columns() as i32);
        let end_row = ((y + h).max(0) / gh).min(self.glyph_rows() as i32);
        let columns = self.glyph_columns() as i32;
        for row in first_row..end_row {
            for col in first_col..end_col {
                self.glyphs[(row * columns + col) as usize] = None;
            }
        }
    }

    /// Outlines a rectangle with a border `thickness` pixels wide, drawn inward
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, thickness: u32, color: Rgba) {
        let t = thickness.min(w / 2 + w % 2).min(h / 2 + h % 2);
        if t == 0 {
            return;
        }
        let (wi, hi, ti) = (w as i32, h as i32, t as i32);
        // top and bottom span the full width, sides fill the gap between them
        self.fill_pixels(x, y, wi, ti, color);
        self.fill_pixels(x, y + hi - ti, wi, ti, color);
        self.fill_pixels(x, y + ti, ti, hi - 2 * ti, color);
        self.fill_pixels(x + wi - ti, y + ti, ti, hi - 2 * ti, color);
    }

    fn fill_pixels(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        for py in y..y + h {
            for px in x..x + w {
                self.blend_pixel(px, py, color);
            }
        }
    }

    /// Height of a line of text
    #[inline]
    pub fn font_height(&self) -> u32 {
        GLYPH_HEIGHT
    }

    /// Size of a single line of text in pixels
    #[inline]
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        (text.chars().count() as u32 * GLYPH_WIDTH, GLYPH_HEIGHT)
    }

    /// Draws a single line of text with its top left corner at `(x, y)`
    ///
    /// Positions snap down to the glyph grid; characters past the edge are clipped.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgba) {
        if y < 0 {
            return;
        }
        let row = y as u32 / GLYPH_HEIGHT;
        if row >= self.glyph_rows() {
            return;
        }
        let columns = self.glyph_columns();
        let first = x.div_euclid(GLYPH_WIDTH as i32);
        for (i, ch) in text.chars().enumerate() {
            let col = first + i as i32;
            if col < 0 {
                continue;
            }
            if col as u32 >= columns {
                break;
            }
            self.glyphs[(row * columns + col as u32) as usize] = Some(Glyph { ch, color });
        }
    }

    /// Replaces every pixel from a tightly packed RGBA byte buffer
    pub fn upload(&mut self, texels: &[u8]) {
        debug_assert_eq!(
            texels.len(),
            self.pixels.len() * 4,
            "texel buffer does not match a {}x{} surface",
            self.width,
            self.height
        );
        for (pixel, texel) in self.pixels.iter_mut().zip(texels.chunks_exact(4)) {
            *pixel = Rgba::rgba(texel[0], texel[1], texel[2], texel[3]);
        }
    }

    /// Blends this surface onto `dst` at the origin, every pixel scaled up by `scale`
    pub fn draw_scaled(&self, dst: &mut Surface, scale: u32) {
        let scale = scale.max(1);
        let width = (self.width * scale).min(dst.width);
        let height = (self.height * scale).min(dst.height);
        for y in 0..height {
            let src_row = (y / scale * self.width) as usize;
            for x in 0..width {
                let color = self.pixels[src_row + (x / scale) as usize];
                dst.blend_pixel(x as i32, y as i32, color);
            }
        }
    }

    /// Blends this surface onto `dst` at the origin, pixel for pixel
    #[inline]
    pub fn composite(&self, dst: &mut Surface) {
        self.draw_scaled(dst, 1);
    }
}
