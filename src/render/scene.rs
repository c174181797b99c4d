//! Backend-neutral draw list for one frame.
//!
//! A [`Scene`] describes the frame in surface pixels, `block_size` pixels per
//! grid cell, the way a canvas would be painted: background first, then food,
//! then the snake. [`Scene::rasterize`] folds it back onto a grid of cells for
//! backends that draw whole cells, such as a terminal.

use ratatui::style::Color;

use crate::game::{GameState, Position};

pub const BACKGROUND_COLOR: Color = Color::Black;
pub const FOOD_COLOR: Color = Color::Red;
pub const SNAKE_COLOR: Color = Color::Green;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Oval,
}

/// One filled shape, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: Color,
}

/// A rasterised grid cell: its fill colour plus an optional round marker on top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub fill: Color,
    pub marker: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub block_size: u32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn from_state(state: &GameState, block_size: u32) -> Self {
        let width = state.grid_width as u32 * block_size;
        let height = state.grid_height as u32 * block_size;

        let mut commands = Vec::with_capacity(state.snake.len() + 2);
        commands.push(DrawCommand {
            shape: Shape::Rect,
            x: 0,
            y: 0,
            width,
            height,
            color: BACKGROUND_COLOR,
        });
        commands.push(cell_command(Shape::Oval, state.food, block_size, FOOD_COLOR));
        commands.extend(
            state
                .snake
                .cells()
                .map(|&pos| cell_command(Shape::Rect, pos, block_size, SNAKE_COLOR)),
        );

        Self {
            width,
            height,
            block_size,
            commands,
        }
    }

    /// Paint the commands in order onto a row-major grid of cells.
    ///
    /// A command covers every cell its pixel rectangle touches. Rects replace
    /// the cell, ovals only add a marker.
    pub fn rasterize(&self) -> Vec<Vec<CellPaint>> {
        let columns = (self.width / self.block_size) as usize;
        let rows = (self.height / self.block_size) as usize;
        let blank = CellPaint {
            fill: BACKGROUND_COLOR,
            marker: None,
        };
        let mut cells = vec![vec![blank; columns]; rows];

        for command in &self.commands {
            let x0 = (command.x / self.block_size) as usize;
            let y0 = (command.y / self.block_size) as usize;
            let x1 = ((command.x + command.width).div_ceil(self.block_size) as usize).min(columns);
            let y1 = ((command.y + command.height).div_ceil(self.block_size) as usize).min(rows);

            for row in cells.iter_mut().take(y1).skip(y0) {
                for cell in row.iter_mut().take(x1).skip(x0) {
                    match command.shape {
                        Shape::Rect => {
                            *cell = CellPaint {
                                fill: command.color,
                                marker: None,
                            }
                        }
                        Shape::Oval => cell.marker = Some(command.color),
                    }
                }
            }
        }

        cells
    }
}

fn cell_command(shape: Shape, pos: Position, block_size: u32, color: Color) -> DrawCommand {
    DrawCommand {
        shape,
        x: pos.x as u32 * block_size,
        y: pos.y as u32 * block_size,
        width: block_size,
        height: block_size,
        color,
    }
}
