//! Cell: The atomic unit of terminal display.
//!
//! A cell holds one glyph plus its visual style: an optional foreground and
//! background [`Color`] and a set of [`CellAttrs`] style bits. `None` for a
//! color means "the terminal's default".
//!
//! Glyphs are stored inline as UTF-8 (a single Unicode scalar always fits in
//! 4 bytes), so cells are plain `Copy` values that can travel inside patches
//! without referencing their source buffer.
//!
//! A glyph with display width 2 (CJK, most emoji) occupies two columns: the
//! cell at `x` carries the glyph, and the cell at `x + 1` is a *wide join*
//! placeholder with an empty glyph and the same style. Placeholders are never
//! serialized or cursor-addressed.

use bitflags::bitflags;

/// True-color RGB representation.
///
/// Uses 3 bytes for 24-bit color depth.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse a `#rrggbb` hex string.
    ///
    /// Returns `None` for anything that is not exactly `#` plus six hex
    /// digits.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Self::from_u32(value))
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    /// Convert from a 24-bit hex color (e.g., 0xFF5500)
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

/// The fixed 16-color terminal palette: 8 base colors plus 8 bright variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    /// Black (SGR 30/40)
    Black,
    /// Red (SGR 31/41)
    Red,
    /// Green (SGR 32/42)
    Green,
    /// Yellow (SGR 33/43)
    Yellow,
    /// Blue (SGR 34/44)
    Blue,
    /// Magenta (SGR 35/45)
    Magenta,
    /// Cyan (SGR 36/46)
    Cyan,
    /// White (SGR 37/47)
    White,
    /// Bright black / gray (SGR 90/100)
    BrightBlack,
    /// Bright red (SGR 91/101)
    BrightRed,
    /// Bright green (SGR 92/102)
    BrightGreen,
    /// Bright yellow (SGR 93/103)
    BrightYellow,
    /// Bright blue (SGR 94/104)
    BrightBlue,
    /// Bright magenta (SGR 95/105)
    BrightMagenta,
    /// Bright cyan (SGR 96/106)
    BrightCyan,
    /// Bright white (SGR 97/107)
    BrightWhite,
}

impl NamedColor {
    /// Index into the 16-color table (0-7 base, 8-15 bright).
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::BrightBlack => 8,
            Self::BrightRed => 9,
            Self::BrightGreen => 10,
            Self::BrightYellow => 11,
            Self::BrightBlue => 12,
            Self::BrightMagenta => 13,
            Self::BrightCyan => 14,
            Self::BrightWhite => 15,
        }
    }

    /// Look up a color by its lowercase name (e.g., `"red"`, `"brightred"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            "brightblack" | "gray" | "grey" => Self::BrightBlack,
            "brightred" => Self::BrightRed,
            "brightgreen" => Self::BrightGreen,
            "brightyellow" => Self::BrightYellow,
            "brightblue" => Self::BrightBlue,
            "brightmagenta" => Self::BrightMagenta,
            "brightcyan" => Self::BrightCyan,
            "brightwhite" => Self::BrightWhite,
            _ => return None,
        })
    }
}

/// A terminal color, matched exhaustively everywhere it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the fixed 16 palette colors.
    Named(NamedColor),
    /// 24-bit true color.
    Rgb(Rgb),
    /// ANSI-256 palette index.
    Indexed(u8),
}

impl Color {
    /// Parse a color from a `#rrggbb` hex string or a palette name.
    pub fn parse(s: &str) -> Option<Self> {
        if s.starts_with('#') {
            return Rgb::from_hex(s).map(Self::Rgb);
        }
        NamedColor::from_name(s).map(Self::Named)
    }
}

impl From<NamedColor> for Color {
    #[inline]
    fn from(named: NamedColor) -> Self {
        Self::Named(named)
    }
}

impl From<Rgb> for Color {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

bitflags! {
    /// Text style attributes.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use termgrid::CellAttrs;
    /// let style = CellAttrs::BOLD | CellAttrs::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellAttrs: u8 {
        /// Bold text (SGR 1)
        const BOLD = 0b0000_0001;
        /// Dim/faint text (SGR 2)
        const DIM = 0b0000_0010;
        /// Italic text (SGR 3)
        const ITALIC = 0b0000_0100;
        /// Underlined text (SGR 4)
        const UNDERLINE = 0b0000_1000;
        /// Blinking text (SGR 5)
        const BLINK = 0b0001_0000;
        /// Inverted colors, fg/bg swapped (SGR 7)
        const INVERSE = 0b0010_0000;
        /// Hidden/invisible text (SGR 8)
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text (SGR 9)
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for CellAttrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single terminal cell.
///
/// Each cell contains a glyph (stored inline as UTF-8), optional foreground
/// and background colors, and style attributes. Cells are `Copy`, so diffing
/// can clone them into patches freely.
#[derive(Clone, Copy)]
pub struct Cell {
    /// Inline glyph storage (UTF-8 bytes).
    glyph: [u8; 4],
    /// Byte length of the glyph (0 for a wide-join placeholder).
    glyph_len: u8,
    /// Display width of the glyph (0=placeholder, 1=normal, 2=wide).
    display_width: u8,
    /// This cell is the second column of a wide glyph.
    wide_join: bool,
    /// Foreground color; `None` is the terminal default.
    fg: Option<Color>,
    /// Background color; `None` is the terminal default.
    bg: Option<Color>,
    /// Style attributes (bold, italic, etc.).
    attrs: CellAttrs,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space glyph with default colors).
    pub const EMPTY: Self = Self {
        glyph: [b' ', 0, 0, 0],
        glyph_len: 1,
        display_width: 1,
        wide_join: false,
        fg: None,
        bg: None,
        attrs: CellAttrs::empty(),
    };

    /// Create a new cell from any character.
    ///
    /// The display width is computed from the character (2 for CJK and most
    /// emoji, 0 for combining marks).
    #[inline]
    #[allow(clippy::missing_panics_doc)]
    pub fn new(c: char) -> Self {
        let mut glyph = [0u8; 4];
        let s = c.encode_utf8(&mut glyph);
        let len = u8::try_from(s.len()).unwrap();
        let width = unicode_width::UnicodeWidthChar::width(c)
            .and_then(|w| u8::try_from(w).ok())
            .unwrap_or(0);

        Self {
            glyph,
            glyph_len: len,
            display_width: width,
            wide_join: false,
            fg: None,
            bg: None,
            attrs: CellAttrs::empty(),
        }
    }

    /// Create the placeholder cell occupying the second column of a wide
    /// glyph.
    ///
    /// The placeholder has an empty glyph, zero display width, and carries
    /// the style of the glyph cell so fills and inverse-video render
    /// uniformly across both columns.
    #[inline]
    pub const fn wide_join(fg: Option<Color>, bg: Option<Color>, attrs: CellAttrs) -> Self {
        Self {
            glyph: [0, 0, 0, 0],
            glyph_len: 0,
            display_width: 0,
            wide_join: true,
            fg,
            bg,
            attrs,
        }
    }

    /// Get the glyph as a string slice (empty for a wide-join placeholder).
    #[inline]
    pub fn glyph(&self) -> &str {
        // Only valid UTF-8 is ever stored in the glyph bytes.
        std::str::from_utf8(&self.glyph[..self.glyph_len as usize]).unwrap_or("")
    }

    /// Check if this is a wide-glyph placeholder.
    #[inline]
    pub const fn is_wide_join(&self) -> bool {
        self.wide_join
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Option<Color> {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Option<Color> {
        self.bg
    }

    /// Get the style attributes.
    #[inline]
    pub const fn attrs(&self) -> CellAttrs {
        self.attrs
    }

    /// Set the foreground color.
    #[inline]
    pub fn set_fg(&mut self, fg: Option<Color>) -> &mut Self {
        self.fg = fg;
        self
    }

    /// Set the background color.
    #[inline]
    pub fn set_bg(&mut self, bg: Option<Color>) -> &mut Self {
        self.bg = bg;
        self
    }

    /// Set the style attributes.
    #[inline]
    pub fn set_attrs(&mut self, attrs: CellAttrs) -> &mut Self {
        self.attrs = attrs;
        self
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Set the style attributes (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Reset the cell to empty (space with default colors).
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Check if the cell's style matches another cell's style exactly.
    #[inline]
    pub fn style_eq(&self, other: &Self) -> bool {
        self.fg == other.fg && self.bg == other.bg && self.attrs == other.attrs
    }
}

impl PartialEq for Cell {
    /// Optimized equality check.
    ///
    /// We compare in order of most likely difference:
    /// 1. Glyph bytes (most frequently changing)
    /// 2. Colors (next most common)
    /// 3. Attributes and the wide-join marker (rarely differ)
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.glyph == other.glyph
            && self.glyph_len == other.glyph_len
            && self.fg == other.fg
            && self.bg == other.bg
            && self.attrs == other.attrs
            && self.wide_join == other.wide_join
            && self.display_width == other.display_width
    }
}

impl Eq for Cell {}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("glyph", &self.glyph())
            .field("width", &self.display_width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("attrs", &self.attrs)
            .field("wide_join", &self.wide_join)
            .finish()
    }
}
