use crate::{
    board::{Board, Cell},
    canvas::{Rgba, Surface},
    error::{Error, Result},
    game::Game,
    input::MouseState,
};

pub const EMPTY_COLOR: Rgba = Rgba::rgb(8, 8, 8);
pub const ALIVE_COLOR: Rgba = Rgba::WHITE;
pub const DEAD_COLOR: Rgba = Rgba::rgb(76, 76, 76);
pub const TEXT_COLOR: Rgba = Rgba::WHITE;
pub const PANEL_MARGIN: u32 = 2;
pub const PANEL_BORDER: u32 = 1;

fn grid_color() -> Rgba {
    Rgba::BLUE.fade(0.5)
}
fn panel_color() -> Rgba {
    Rgba::GRAY.fade(0.7)
}

#[inline]
pub fn cell_color(cell: Cell) -> Rgba {
    match cell {
        Cell::Empty => EMPTY_COLOR,
        Cell::Alive => ALIVE_COLOR,
        Cell::Dead => DEAD_COLOR,
    }
}

/// Draws the board, the grid overlay and the info panels onto the screen
///
/// Cells are rasterized as one texel each into a cell-sized texture, which
/// is then scaled up by the cell size.
pub struct Renderer {
    cell_size: u32,
    texels: Vec<u8>,
    texture: Surface,
    grid: Option<Surface>,
}

impl Renderer {
    pub fn new(board: &Board, cell_size: u32) -> Self {
        let (w, h) = (board.width() as u32, board.height() as u32);
        Self {
            cell_size: cell_size.max(1),
            texels: vec![255; (w * h * 4) as usize],
            texture: Surface::new(w, h, EMPTY_COLOR),
            grid: None,
        }
    }

    /// Writes one texel per cell into the texel buffer
    ///
    /// A byte that is not a known cell state is painted and repaired as
    /// Empty, and rasterizing stops with [`Error::InvalidCell`].
    pub fn rasterize(&mut self, board: &mut Board) -> Result<()> {
        let width = board.width();
        for y in 0..board.height() {
            for x in 0..width {
                let offset = (y * width + x) * 4;
                let raw = board.raw(x, y);
                let color = match Cell::from_raw(raw) {
                    Some(cell) => cell_color(cell),
                    None => {
                        self.put_texel(offset, EMPTY_COLOR);
                        board.set(x, y, Cell::Empty);
                        return Err(Error::InvalidCell { x, y, raw });
                    }
                };
                self.put_texel(offset, color);
            }
        }
        Ok(())
    }

    #[inline]
    fn put_texel(&mut self, offset: usize, color: Rgba) {
        self.texels[offset..offset + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Runs the render phase of one frame
    pub fn draw(&mut self, game: &mut Game, screen: &mut Surface, mouse: &MouseState) -> Result<()> {
        screen.clear(EMPTY_COLOR);

        self.rasterize(game.board_mut())?;
        self.texture.upload(&self.texels);
        self.texture.draw_scaled(screen, self.cell_size);

        if game.params().show_grid {
            let (width, height, cell_size) = (screen.width(), screen.height(), self.cell_size);
            // screen size is fixed, so the overlay is built once and kept
            let grid = self
                .grid
                .get_or_insert_with(|| grid_overlay(width, height, cell_size));
            grid.composite(screen);
        }

        let params = game.params();
        let info = format!(
            "Living cells: {}\nRunning: {}\n# steps: {}",
            game.board().count_alive(),
            params.running,
            params.steps
        );
        draw_info_block(screen, 0, 0, &info, PANEL_MARGIN);

        if mouse.middle {
            let pos = game.cell_at_pixel(mouse.x, mouse.y);
            let neighbors = game
                .live_neighbors_at(pos)
                .map_or_else(|| "n/a".to_owned(), |n| n.to_string());
            let hover = format!("Cell: ({},{})\nLiving neighbors: {}", pos.x, pos.y, neighbors);
            draw_info_block(screen, mouse.x, mouse.y, &hover, PANEL_MARGIN);
        }
        Ok(())
    }

    #[inline]
    pub fn has_grid_overlay(&self) -> bool {
        self.grid.is_some()
    }
}

/// Builds a transparent surface with a line along every cell boundary
pub fn grid_overlay(width: u32, height: u32, cell_size: u32) -> Surface {
    let mut grid = Surface::new(width, height, Rgba::TRANSPARENT);
    let color = grid_color();
    let (w, h) = (width as i32, height as i32);
    for y in (0..height).step_by(cell_size.max(1) as usize) {
        grid.draw_line(0, y as i32, w - 1, y as i32, color);
    }
    for x in (0..width).step_by(cell_size.max(1) as usize) {
        // skip rows already covered by a horizontal line
        for y in 0..h {
            if y as u32 % cell_size.max(1) != 0 {
                grid.blend_pixel(x as i32, y, color);
            }
        }
    }
    grid
}

/// Draws multi-line `text` on a bordered box sized to fit it plus `margin`
pub fn draw_info_block(screen: &mut Surface, x: i32, y: i32, text: &str, margin: u32) {
    let line_height = screen.font_height();
    let (mut text_width, mut text_height) = (0, 0);
    for line in text.lines() {
        text_width = text_width.max(screen.text_size(line).0);
        text_height += line_height;
    }

    let (box_w, box_h) = (text_width + margin * 2, text_height + margin * 2);
    screen.fill_rect(x, y, box_w, box_h, panel_color());
    screen.draw_rect(x, y, box_w, box_h, PANEL_BORDER, Rgba::BLACK);

    let mut line_y = y + margin as i32;
    for line in text.lines() {
        screen.draw_text(x + margin as i32, line_y, line, TEXT_COLOR);
        line_y += line_height as i32;
    }
}
