//! ANSI escape sequences for cursor movement, erasing and text styling.
//!
//! The builders return the sequence as a `String`; [`emit`] writes one to a
//! terminal and flushes so the effect is immediate.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::{UtilError, UtilResult};

/// Control Sequence Introducer.
pub const ESC: &str = "\x1b[";
/// Operating System Command prefix.
pub const OSC: &str = "\x1b]";
/// Bell, terminates OSC sequences.
pub const BEL: &str = "\x07";
/// Parameter separator.
pub const SEP: &str = ";";

/// Move the cursor to the first column.
pub const CURSOR_LEFT: &str = "\x1b[G";
/// Save the cursor position.
pub const CURSOR_SAVE_POSITION: &str = "\x1b[s";
/// Restore the saved cursor position.
pub const CURSOR_RESTORE_POSITION: &str = "\x1b[u";
/// Request a cursor position report.
pub const CURSOR_GET_POSITION: &str = "\x1b[6n";
/// Move to the start of the next line.
pub const CURSOR_NEXT_LINE: &str = "\x1b[E";
/// Move to the start of the previous line.
pub const CURSOR_PREV_LINE: &str = "\x1b[F";
/// Hide the cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";
/// Show the cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Erase from the cursor to the end of the line.
pub const ERASE_END_LINE: &str = "\x1b[K";
/// Erase from the start of the line to the cursor.
pub const ERASE_START_LINE: &str = "\x1b[1K";
/// Erase the whole line.
pub const ERASE_LINE: &str = "\x1b[2K";
/// Erase from the cursor to the end of the screen.
pub const ERASE_DOWN: &str = "\x1b[J";
/// Erase from the start of the screen to the cursor.
pub const ERASE_UP: &str = "\x1b[1J";
/// Erase the whole screen.
pub const ERASE_SCREEN: &str = "\x1b[2J";
/// Scroll the page up one line.
pub const SCROLL_UP: &str = "\x1b[S";
/// Scroll the page down one line.
pub const SCROLL_DOWN: &str = "\x1b[T";

/// Screen region erased by [`clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearArea {
    /// From the cursor to the end of the screen.
    #[default]
    ToEnd = 0,
    /// From the cursor to the start of the screen.
    ToStart = 1,
    /// The entire screen.
    All = 2,
}

/// Erases part of the screen.
pub fn clear(area: ClearArea) -> String {
    format!("{ESC}{}J", area as u8)
}

/// Erases from the cursor to the end of the line.
pub fn clear_line() -> String {
    format!("{ESC}K")
}

/// Moves the cursor up `n` lines.
pub fn move_up(n: u16) -> String {
    format!("{ESC}{n}A")
}

/// Moves the cursor down `n` lines.
pub fn move_down(n: u16) -> String {
    format!("{ESC}{n}B")
}

/// Moves the cursor right `n` columns.
pub fn move_forward(n: u16) -> String {
    format!("{ESC}{n}C")
}

/// Moves the cursor left `n` columns.
pub fn move_backward(n: u16) -> String {
    format!("{ESC}{n}D")
}

/// Saves the cursor position.
///
/// Newlines printed at the bottom of the terminal scroll the page, and the
/// saved position does not follow the scroll.
pub fn save_position() -> String {
    CURSOR_SAVE_POSITION.to_string()
}

/// Restores the position stored by [`save_position`].
pub fn restore_position() -> String {
    CURSOR_RESTORE_POSITION.to_string()
}

/// Text attributes set with [`style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Bold or increased intensity.
    Bold = 1,
    /// Faint.
    Dim = 2,
    /// Italic.
    Italic = 3,
    /// Underline.
    Underline = 4,
    /// Swap foreground and background colours.
    Invert = 7,
    /// Concealed text.
    Hidden = 8,
}

/// Applies a text attribute.
pub fn style(style: Style) -> String {
    format!("{ESC}{}m", style as u8)
}

/// Resets all attributes and colours.
pub fn reset() -> String {
    format!("{ESC}0m")
}

/// The eight basic terminal colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    /// Black.
    Black = 0,
    /// Red.
    Red = 1,
    /// Green.
    Green = 2,
    /// Yellow.
    Yellow = 3,
    /// Blue.
    Blue = 4,
    /// Magenta.
    Magenta = 5,
    /// Cyan.
    Cyan = 6,
    /// White.
    White = 7,
}

impl Colour {
    const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Colour from an SGR foreground (30-37) or background (40-47) code.
    pub fn from_code(code: u8) -> UtilResult<Self> {
        match code {
            30..=37 => Ok(Self::ALL[usize::from(code - 30)]),
            40..=47 => Ok(Self::ALL[usize::from(code - 40)]),
            _ => Err(UtilError::UnknownColour(code.to_string())),
        }
    }

    /// Offset added to the foreground or background base code.
    pub fn offset(self) -> u8 {
        self as u8
    }
}

impl FromStr for Colour {
    type Err = UtilError;

    /// Accepts full names, one-letter aliases (`"bl"` for black) and SGR
    /// codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colour = match s {
            "bl" | "black" => Self::Black,
            "r" | "red" => Self::Red,
            "g" | "green" => Self::Green,
            "y" | "yellow" => Self::Yellow,
            "b" | "blue" => Self::Blue,
            "m" | "magenta" => Self::Magenta,
            "c" | "cyan" => Self::Cyan,
            "w" | "white" => Self::White,
            other => {
                return other
                    .parse::<u8>()
                    .map_err(|_| UtilError::UnknownColour(other.to_string()))
                    .and_then(Self::from_code)
            }
        };
        Ok(colour)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        };
        f.write_str(name)
    }
}

/// Sets the foreground colour.
pub fn set_text_colour(colour: Colour) -> String {
    format!("{ESC}{}m", 30 + colour.offset())
}

/// Sets the background colour.
pub fn set_background_colour(colour: Colour) -> String {
    format!("{ESC}{}m", 40 + colour.offset())
}

/// Writes a sequence and flushes.
pub fn emit<W: Write>(out: &mut W, sequence: &str) -> UtilResult<()> {
    out.write_all(sequence.as_bytes())?;
    out.flush()?;
    Ok(())
}
