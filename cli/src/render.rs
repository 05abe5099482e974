use ca1d_lib::{radix::digit_char, Grid, State};
use crossterm::{
    queue,
    style::{Color, PrintStyledContent, Stylize},
};
use std::io::{Result, Write};

/// The shade of gray of a state: `0` is white and `states - 1` is black.
fn shade(state: State, states: State) -> Color {
    let max = states.saturating_sub(1).max(1) as u32;
    let level = (255 - state.min(max as State) as u32 * 255 / max) as u8;
    Color::Rgb {
        r: level,
        g: level,
        b: level,
    }
}

/// Print the label, then the grid, one row per line and one character per
/// cell.
///
/// With `color`, every cell is a block colored by [`shade`]. Otherwise state
/// `0` is printed as `.`, other states as digits, and cells that are not a
/// base-36 digit as `?`.
pub fn render<W: Write>(
    out: &mut W,
    grid: &Grid,
    states: State,
    label: &str,
    color: bool,
) -> Result<()> {
    writeln!(out, "{}", label)?;

    for row in grid.rows() {
        for &cell in row {
            if color {
                queue!(out, PrintStyledContent('█'.with(shade(cell, states))))?;
            } else if cell == 0 {
                write!(out, ".")?;
            } else {
                write!(out, "{}", digit_char(cell).unwrap_or('?'))?;
            }
        }
        writeln!(out)?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca1d_lib::{evolve, init_simple, Rule};

    #[test]
    fn test_shade() {
        assert_eq!(
            shade(0, 2),
            Color::Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert_eq!(shade(1, 2), Color::Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(
            shade(1, 3),
            Color::Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
    }

    #[test]
    fn test_render_plain() {
        let grid = evolve(&init_simple(5, 1), 3, &Rule::Nks(30), 1).unwrap();
        let mut out = Vec::new();
        render(&mut out, &grid, 2, "W30", false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "W30\n..1..\n.111.\n11..1\n"
        );
    }

    #[test]
    fn test_render_digits() {
        let grid = evolve(&[0, 11, 35], 1, &Rule::Nks(0), 1).unwrap();
        let mut out = Vec::new();
        render(&mut out, &grid, 36, "digits", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "digits\n.BZ\n");
    }

    #[test]
    fn test_render_out_of_range() {
        let rule = Rule::function(|_, index| if index == 1 { 40 } else { 0 });
        let grid = evolve(&[0, 0, 0], 2, &rule, 1).unwrap();

        let mut out = Vec::new();
        render(&mut out, &grid, 2, "wild", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "wild\n...\n.?.\n");

        let mut out = Vec::new();
        assert!(render(&mut out, &grid, 2, "wild", true).is_ok());
    }
}
