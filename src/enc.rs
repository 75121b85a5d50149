use crate::{
    board::Board,
    error::{Error, Result},
    pos::Pos2,
};
use regex::Regex;
use std::sync::OnceLock;

/// A set of alive cells with the size of their bounding box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub name: Option<String>,
    pub width: i32,
    pub height: i32,
    /// Alive cells relative to the top left of the pattern, row-major
    pub alive: Vec<Pos2>,
}
impl Pattern {
    /// The origin that centers this pattern on `board`
    pub fn centered_on(&self, board: &Board) -> Pos2 {
        Pos2::new(
            (board.width() as i32 - self.width) / 2,
            (board.height() as i32 - self.height) / 2,
        )
    }
}

pub trait PatternCodec {
    fn encode(&self, board: &Board) -> String;
    fn decode(&self, value: &str) -> Result<Pattern>;
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i32, c: char) {
        let append = match run {
            0 => String::new(),
            1 => c.to_string(),
            n => format!("{}{}", n, c),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    fn end(mut self) -> String {
        self.sequence.push('!');
        self.sequence
    }
}

/// The Run Length Encoded (`.rle`) pattern format
///
/// `b` is a dead cell, `o` an alive one, `$` ends a row and `!` ends the
/// pattern; each may be preceded by a repeat count. Dead cells on the board
/// are written as `b`.
pub struct RunLengthEncoded {
    name: Option<String>,
    header: bool,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    fn header_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"^\s*x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)").expect("valid header regex")
        })
    }
    fn token_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"(\d*)([bo$!])").expect("valid token regex"))
    }

    fn encode_header(&self, width: i32, height: i32) -> String {
        let mut header = String::new();
        if !self.header {
            return header;
        }
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {}\n", name));
        }
        header.push_str(&format!("x = {}, y = {}, rule = B3/S23\n", width, height));
        header
    }

    fn encode_cells(&self, alive_cells: &[Pos2], tl: Pos2) -> String {
        let mut last = tl - Pos2 { x: 1, y: 0 };
        let mut alive_run = 0;
        let mut seq = RunEncoder::new(70);
        for &pos in alive_cells {
            // if we're one ahead of the last, then only increment the run
            if last.y == pos.y && (last.x + 1) == pos.x {
                alive_run += 1;
                last = pos;
                continue;
            }

            let lines_run = pos.y - last.y;
            let dead_run = match lines_run {
                0 => pos.x - last.x - 1,
                _ => pos.x - tl.x,
            };
            // NOTE: order matters!
            seq.push_run(alive_run, 'o');
            seq.push_run(lines_run, '$');
            seq.push_run(dead_run, 'b');

            alive_run = 1;
            last = pos;
        }

        seq.push_run(alive_run, 'o');
        seq.end()
    }
}
impl Default for RunLengthEncoded {
    fn default() -> Self {
        Self {
            name: None,
            header: true,
        }
    }
}

impl PatternCodec for RunLengthEncoded {
    fn encode(&self, board: &Board) -> String {
        let alive: Vec<Pos2> = board.alive_positions().collect();
        debug_assert!(
            alive.windows(2).all(|w| w[0] < w[1]),
            "alive cells are not row-major"
        );

        let tl = Pos2 {
            x: alive.iter().map(|p| p.x).min().unwrap_or_default(),
            // row-major, so the first cell has the lowest y-value
            y: alive.first().map(|p| p.y).unwrap_or_default(),
        };
        let br = Pos2 {
            x: alive.iter().map(|p| p.x).max().map_or(tl.x, |x| x + 1),
            y: alive.last().map_or(tl.y, |p| p.y + 1),
        };
        let size = br - tl;
        format!(
            "{}{}\n",
            self.encode_header(size.x, size.y),
            self.encode_cells(&alive, tl)
        )
    }

    fn decode(&self, value: &str) -> Result<Pattern> {
        let mut pattern = Pattern::default();
        let mut cursor = Pos2::zero();
        let mut saw_header = false;

        'lines_loop: for line in value.lines() {
            if let Some(name) = line.strip_prefix("#N") {
                pattern.name = Some(name.trim().to_owned());
                continue;
            }
            if line.starts_with('#') {
                continue;
            }
            if !saw_header {
                if let Some(caps) = Self::header_re().captures(line) {
                    saw_header = true;
                    pattern.width = advance(0, parse_run(&caps[1])?)?;
                    pattern.height = advance(0, parse_run(&caps[2])?)?;
                    continue;
                }
            }

            for (_, [run_str, state]) in Self::token_re().captures_iter(line).map(|c| c.extract()) {
                let run = match run_str {
                    "" => 1,
                    digits => parse_run(digits)?,
                };
                match state {
                    "!" => break 'lines_loop,
                    "o" => {
                        advance(cursor.y, 1)?;
                        let end = advance(cursor.x, run)?;
                        pattern.alive.extend((cursor.x..end).map(|x| Pos2::new(x, cursor.y)));
                        cursor.x = end;
                    }
                    "b" => cursor.x = advance(cursor.x, run)?,
                    "$" => {
                        cursor.x = 0;
                        cursor.y = advance(cursor.y, run)?;
                    }
                    _ => unreachable!("token regex only matches b, o, $ and !"),
                }
            }
        }

        // trust the header when present, but never let it hide cells
        let extent = pattern.alive.iter().fold(Pos2::zero(), |acc, p| Pos2 {
            x: acc.x.max(p.x + 1),
            y: acc.y.max(p.y + 1),
        });
        pattern.width = pattern.width.max(extent.x);
        pattern.height = pattern.height.max(extent.y);
        Ok(pattern)
    }
}

/// Largest width or height a decoded pattern may span
pub const MAX_PATTERN_EXTENT: i32 = 1 << 16;

/// Moves `pos` forward by `run`, staying inside [`MAX_PATTERN_EXTENT`]
fn advance(pos: i32, run: i32) -> Result<i32> {
    pos.checked_add(run)
        .filter(|&end| end <= MAX_PATTERN_EXTENT)
        .ok_or_else(|| {
            Error::Pattern(format!(
                "run of {run} from {pos} exceeds {MAX_PATTERN_EXTENT} cells"
            ))
        })
}

fn parse_run(digits: &str) -> Result<i32> {
    digits
        .parse::<i32>()
        .map_err(|err| Error::Pattern(format!("bad count {digits:?}: {err}")))
}
