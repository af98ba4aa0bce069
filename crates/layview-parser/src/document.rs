//! The layout file structure.
//!
//! ```text
//! <font_count>
//! <font_index> <font_path>      × font_count
//! <layout_count>
//!   <width> <height>
//!   <action_count>
//!     <command>                 × action_count
//!   ... repeated per layout
//! ```
//!
//! The file is parsed in two steps. [`parse_header`] reads the font
//! declarations; [`parse_layouts`] reads everything after them. Renderers
//! that interleave parsing with drawing use a [`LayoutReader`] instead, so
//! errors surface in file order.

use log::{debug, trace};

use layview_core::geometry::{MAX_CANVAS_PIXELS, Size};

use crate::{
    command::Command,
    error::{Diagnostic, ErrorCode, ParseError},
    lines::{SourceLines, count_line, parse_float, parse_int, tokens},
    span::{Span, Spanned},
};

/// A font declaration from the header.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDecl {
    index: i64,
    path: String,
    span: Span,
}

impl FontDecl {
    /// Returns the declared font index.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Returns the font path exactly as written.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the span of the declaration line.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// The parsed header of a layout file.
#[derive(Debug, Clone)]
pub struct Header {
    fonts: Vec<FontDecl>,
    content_line: usize,
    warnings: Vec<Diagnostic>,
}

impl Header {
    /// Returns the font declarations in file order.
    pub fn fonts(&self) -> &[FontDecl] {
        &self.fonts
    }

    /// Returns the index of the first content line (the layout count).
    pub fn content_line(&self) -> usize {
        self.content_line
    }

    /// Returns non-fatal diagnostics, such as repeated font indices.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// One layout: a canvas size and the commands drawn onto it.
#[derive(Debug, Clone)]
pub struct Layout {
    size: Spanned<Size>,
    commands: Vec<Spanned<Command>>,
}

impl Layout {
    /// Returns the declared size in points, with the span of its line.
    pub fn size(&self) -> Spanned<Size> {
        self.size
    }

    /// Returns the commands in file order.
    pub fn commands(&self) -> &[Spanned<Command>] {
        &self.commands
    }
}

/// Parses the font count line and the font declarations.
///
/// # Errors
///
/// Returns a [`ParseError`] if the font count is not a non-negative integer,
/// if fewer declarations follow than announced, or if a declaration lacks an
/// integer index or a path.
///
/// # Example
///
/// ```
/// # use layview_parser::parse_header;
/// let header = parse_header("1\n0 serif.ttf\n0\n").unwrap();
/// assert_eq!(header.fonts()[0].path(), "serif.ttf");
/// assert_eq!(header.content_line(), 2);
/// ```
pub fn parse_header(source: &str) -> Result<Header, ParseError> {
    let mut lines = SourceLines::new(source);
    let count = count_line(lines.next_line("font count")?, "font count")?;
    debug!(font_count = *count; "Parsing font declarations");

    let mut fonts: Vec<FontDecl> = Vec::with_capacity((*count).min(lines.remaining()));
    let mut warnings = Vec::new();

    for _ in 0..*count {
        let line = lines.next_line("a font declaration `<index> <path>`")?;
        let decl = font_decl(line)?;

        if let Some(previous) = fonts.iter().rev().find(|f| f.index == decl.index) {
            warnings.push(
                Diagnostic::warning(format!("font {} is declared more than once", decl.index))
                    .with_label(decl.span, "this declaration is used")
                    .with_secondary_label(previous.span, "earlier declaration ignored"),
            );
        }
        fonts.push(decl);
    }

    Ok(Header {
        fonts,
        content_line: lines.position(),
        warnings,
    })
}

/// Parses the layouts following the header.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed counts or sizes, missing lines,
/// and invalid command lines.
pub fn parse_layouts(source: &str, header: &Header) -> Result<Vec<Layout>, ParseError> {
    let mut reader = LayoutReader::new(source, header)?;

    let mut layouts = Vec::new();
    while let Some(size) = reader.next_layout()? {
        let mut commands = Vec::new();
        while let Some(command) = reader.next_command()? {
            commands.push(command);
        }
        layouts.push(Layout { size, commands });
    }

    Ok(layouts)
}

/// Pull parser over the layouts following the header.
///
/// Lines are read only as they are asked for: [`Self::next_layout`] reads a
/// layout's size and action count, [`Self::next_command`] reads one command
/// of the current layout. A malformed line is therefore reported only once
/// everything before it has been consumed.
///
/// # Example
///
/// ```
/// # use layview_parser::{LayoutReader, parse_header};
/// let source = "0\n1\n10 10\n2\nm 1 1\nb 0 0 5 5\n";
/// let header = parse_header(source).unwrap();
/// let mut reader = LayoutReader::new(source, &header).unwrap();
///
/// let size = reader.next_layout().unwrap().unwrap();
/// assert_eq!(size.width(), 10.0);
/// assert_eq!(reader.pending_commands(), 2);
///
/// while let Some(command) = reader.next_command().unwrap() {
///     println!("{}", *command);
/// }
/// assert!(reader.next_layout().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct LayoutReader<'src> {
    lines: SourceLines<'src>,
    layout_count: usize,
    layouts_started: usize,
    actions: Option<Spanned<usize>>,
    actions_read: usize,
}

impl<'src> LayoutReader<'src> {
    /// Reads the layout count following `header`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the layout count line is missing or is not
    /// a non-negative integer.
    pub fn new(source: &'src str, header: &Header) -> Result<Self, ParseError> {
        let mut lines = SourceLines::new(source);
        lines.seek(header.content_line());

        let layout_count = count_line(lines.next_line("layout count")?, "layout count")?;
        debug!(layout_count = *layout_count; "Parsing layouts");

        Ok(Self {
            lines,
            layout_count: *layout_count,
            layouts_started: 0,
            actions: None,
            actions_read: 0,
        })
    }

    /// Returns the number of layouts the file declares.
    pub fn layout_count(&self) -> usize {
        self.layout_count
    }

    /// Returns how many commands of the current layout are still unread.
    pub fn pending_commands(&self) -> usize {
        self.actions
            .map_or(0, |actions| *actions - self.actions_read)
    }

    /// Starts the next layout, returning its size.
    ///
    /// Commands of the current layout that were not read yet are parsed and
    /// discarded first. Returns `Ok(None)` once every declared layout has been
    /// started.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for a skipped invalid command, a malformed
    /// size or action count, or missing lines.
    pub fn next_layout(&mut self) -> Result<Option<Spanned<Size>>, ParseError> {
        while self.next_command()?.is_some() {}

        if self.layouts_started == self.layout_count {
            if self.lines.remaining() > 0 {
                debug!(lines = self.lines.remaining(); "Ignoring lines after the last layout");
            }
            return Ok(None);
        }

        let size = layout_size(self.lines.next_line("a layout size `<width> <height>`")?)?;
        let actions = count_line(self.lines.next_line("an action count")?, "action count")?;
        trace!(layout = self.layouts_started, actions = *actions; "Parsed layout header");

        self.layouts_started += 1;
        self.actions = Some(actions);
        self.actions_read = 0;
        Ok(Some(size))
    }

    /// Reads the next command of the current layout.
    ///
    /// Returns `Ok(None)` when the current layout has no commands left, or
    /// before the first call to [`Self::next_layout`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the command line is missing or invalid.
    pub fn next_command(&mut self) -> Result<Option<Spanned<Command>>, ParseError> {
        let Some(actions) = self.actions else {
            return Ok(None);
        };
        if self.actions_read == *actions {
            self.actions = None;
            return Ok(None);
        }

        let expected = format!("{} more action line(s)", *actions - self.actions_read);
        let line = self.lines.next_line(&expected).map_err(|diag| {
            diag.with_secondary_label(
                actions.span(),
                format!("layout declares {} actions", *actions),
            )
        })?;
        let command = Command::parse(&line, line.span())?;
        trace!(command:% = command; "Parsed command");

        self.actions_read += 1;
        Ok(Some(Spanned::new(command, line.span())))
    }
}

/// A fully parsed layout file.
#[derive(Debug, Clone)]
pub struct Document {
    header: Header,
    layouts: Vec<Layout>,
}

impl Document {
    /// Returns the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the layouts in file order.
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }
}

/// Parses a complete layout file.
///
/// # Errors
///
/// See [`parse_header`] and [`parse_layouts`].
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let header = parse_header(source)?;
    let layouts = parse_layouts(source, &header)?;
    Ok(Document { header, layouts })
}

fn font_decl(line: Spanned<&str>) -> Result<FontDecl, Diagnostic> {
    let Some((index, path)) = line.split_once(' ') else {
        return Err(Diagnostic::error("font declaration is missing a path")
            .with_code(ErrorCode::E103)
            .with_label(line.span(), "expected `<index> <path>`"));
    };

    let index_span = line.span().sub(0..index.len());
    let index = parse_int(index.trim()).ok_or_else(|| {
        Diagnostic::error(format!("invalid font index `{index}`"))
            .with_code(ErrorCode::E100)
            .with_label(index_span, "expected an integer")
    })?;

    Ok(FontDecl {
        index,
        path: path.to_string(),
        span: line.span(),
    })
}

fn layout_size(line: Spanned<&str>) -> Result<Spanned<Size>, Diagnostic> {
    let fields = tokens(&line);
    let [(width_range, width), (height_range, height)] = fields.as_slice() else {
        return Err(Diagnostic::error(format!(
            "expected a layout size, found {} field(s)",
            fields.len()
        ))
        .with_code(ErrorCode::E103)
        .with_label(line.span(), "expected `<width> <height>`"));
    };

    let number = |token: &str, range: &std::ops::Range<usize>| {
        parse_float(token).ok_or_else(|| {
            Diagnostic::error(format!("invalid number `{token}`"))
                .with_code(ErrorCode::E102)
                .with_label(line.span().sub(range.clone()), "expected a finite number")
        })
    };
    let size = Size::new(number(*width, width_range)?, number(*height, height_range)?);

    if size.to_pixels().is_none() {
        return Err(Diagnostic::error("layout size is negative")
            .with_code(ErrorCode::E104)
            .with_label(line.span(), "width and height must not be negative"));
    }
    if size.to_pixels().is_some_and(|pixels| pixels.area() > MAX_CANVAS_PIXELS) {
        return Err(Diagnostic::error("layout size is too large")
            .with_code(ErrorCode::E105)
            .with_label(line.span(), "canvas would exceed the pixel limit")
            .with_help(format!("a canvas holds at most {MAX_CANVAS_PIXELS} pixels")));
    }

    Ok(Spanned::new(size, line.span()))
}
