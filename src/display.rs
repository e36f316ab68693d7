use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connectn_ai::{Board, Counter, Position};

/// Draws the board at the cursor with coloured counters, column numbers above
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    let (width, height) = (board.width(), board.height());

    let cols: String = (1..=width).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..height {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for y in 0..height {
        for x in 0..width {
            let (pos_x, pos_y) = cell_position((origin_x, origin_y), x, y).ok_or_else(|| {
                anyhow!("a {}x{} board doesn't fit in the terminal", width, height)
            })?;

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(
                            match board.counter_at(Position::new(x as i32, y as i32)) {
                                Some(Counter::O) => Color::Red,
                                Some(Counter::X) => Color::Yellow,
                                None => Color::DarkBlue,
                            },
                        ),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x.saturating_add(width as u16), origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}

// the bottom row sits on the origin row
fn cell_position((origin_x, origin_y): (u16, u16), x: usize, y: usize) -> Option<(u16, u16)> {
    Some((
        origin_x.checked_add(x as u16)?,
        origin_y.checked_sub(y as u16)?,
    ))
}

/// The colour name shown for a counter
pub fn colour_name(counter: Counter) -> &'static str {
    match counter {
        Counter::O => "Red",
        Counter::X => "Yellow",
    }
}

#[cfg(test)]
mod test {
    use super::cell_position;

    #[test]
    fn cells_above_the_terminal_are_rejected() {
        assert_eq!(cell_position((0, 10), 2, 0), Some((2, 10)));
        assert_eq!(cell_position((0, 10), 2, 10), Some((2, 0)));
        assert_eq!(cell_position((0, 10), 2, 11), None);
        assert_eq!(cell_position((u16::MAX, 10), 1, 0), None);
    }
}
