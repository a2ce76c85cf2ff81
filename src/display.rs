use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

/// Display is what the interpreter draws on. It should abstract the
/// implementation details, so a variety of kinds of screen would work.
///
/// Pixels are 0 or 1; the interpreter does the XOR itself.
pub trait Display {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn pixel(&self, x: usize, y: usize) -> u8;
    fn set_pixel(&mut self, x: usize, y: usize, value: u8);

    fn clear(&mut self);

    /// push the current frame to wherever it's shown
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// one byte per pixel, row-major
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.pixels[y * self.width + x] = value & 1;
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.width - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.height - 1) as f64, 0.0]
    }

    /// canvas coordinates of every pixel matching `value`; y grows downwards
    /// on the chip-8 but upwards on the canvas
    fn points_with_value(&self, value: u8) -> impl Iterator<Item = (f64, f64)> + '_ {
        let w = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(move |(_, px)| **px == value)
            .map(move |(i, _)| ((i % w) as f64, -1.0 * (i / w) as f64))
    }
}

/// monochrome display in a terminal, rendered using TUI and Crossterm
pub struct TermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    frame: FrameBuffer,
}

impl TermDisplay {
    pub fn new(width: usize, height: usize) -> io::Result<TermDisplay> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(TermDisplay {
            terminal,
            frame: FrameBuffer::new(width, height),
        })
    }
}

impl Display for TermDisplay {
    fn width(&self) -> usize {
        self.frame.width
    }

    fn height(&self) -> usize {
        self.frame.height
    }

    fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame.get(x, y)
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        self.frame.set(x, y, value)
    }

    fn clear(&mut self) {
        self.frame.clear()
    }

    fn present(&mut self) -> io::Result<()> {
        let frame = &self.frame;
        // for now this assumes a 1:1 ratio between terminal cells, chip8
        // pixels and the internal TUI canvas
        self.terminal.draw(|f| {
            let size = Rect::new(0, 0, 2 + frame.width as u16, 2 + frame.height as u16);
            let off: Vec<(f64, f64)> = frame.points_with_value(0).collect();
            let on: Vec<(f64, f64)> = frame.points_with_value(1).collect();

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(frame.x_bounds())
                .y_bounds(frame.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &off,
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &on,
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }
}

/// keeps pixels in memory and shows them nowhere; useful for testing and for
/// running ROMs without a terminal
pub struct HeadlessDisplay {
    frame: FrameBuffer,
    presented: usize,
}

impl HeadlessDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        HeadlessDisplay {
            frame: FrameBuffer::new(width, height),
            presented: 0,
        }
    }

    /// how many frames have been presented
    pub fn frames_presented(&self) -> usize {
        self.presented
    }

    /// number of lit pixels
    pub fn lit(&self) -> usize {
        self.frame.pixels.iter().filter(|px| **px == 1).count()
    }
}

impl Display for HeadlessDisplay {
    fn width(&self) -> usize {
        self.frame.width
    }

    fn height(&self) -> usize {
        self.frame.height
    }

    fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame.get(x, y)
    }

    fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        self.frame.set(x, y, value)
    }

    fn clear(&mut self) {
        self.frame.clear()
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}
