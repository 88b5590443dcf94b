//! Reader and writer for legacy KiCad (`EESchema-LIBRARY`) component
//! libraries.
//!
//! ```no_run
//! let mut lib = kicad_symlib::load_library("device.lib")?;
//! for component in lib.components() {
//!     println!("{} ({} pins)", component.name(), component.pins().len());
//! }
//! kicad_symlib::save_library("copy.lib", &mut lib)?;
//! # Ok::<(), kicad_symlib::LibraryError>(())
//! ```

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

mod decode;
mod encode;
mod error;
pub mod format;
mod parse;
pub mod reader;

pub use decode::{decode_library, parse_component, parse_pin};
pub use encode::{encode_library, write_component, write_pin};
pub use error::LibraryError;
pub use format::WriteOptions;

/// A collection of component definitions read from or written to one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    name: String,
    components: Vec<Component>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base name of the file this library was last loaded from or saved to
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// First component with the given name or alias
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.name == name || c.aliases.iter().any(|a| a == name))
    }

    pub fn clear(&mut self) {
        self.components.clear();
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Integer position in drawing units
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// The unset rectangle of a component without a body outline
    pub const INVALID: Rect = Rect {
        left: 0,
        top: 0,
        right: -1,
        bottom: -1,
    };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Swaps edges so that `left <= right` and `top <= bottom`
    pub fn normalized(self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A reusable symbol definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    prefix: String,
    show_pad_name: bool,
    show_pin_name: bool,
    rect: Rect,
    footprints: Vec<String>,
    aliases: Vec<String>,
    pins: Vec<Pin>,
}

impl Default for Component {
    fn default() -> Self {
        Self {
            name: String::new(),
            prefix: String::new(),
            show_pad_name: true,
            show_pin_name: true,
            rect: Rect::INVALID,
            footprints: vec![],
            aliases: vec![],
            pins: vec![],
        }
    }
}

impl Component {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Reference designator prefix, e.g. `U` or `R`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn show_pad_name(&self) -> bool {
        self.show_pad_name
    }

    pub fn set_show_pad_name(&mut self, show: bool) {
        self.show_pad_name = show;
    }

    pub fn show_pin_name(&self) -> bool {
        self.show_pin_name
    }

    pub fn set_show_pin_name(&mut self, show: bool) {
        self.show_pin_name = show;
    }

    /// Body outline, [`Rect::INVALID`] when the component has none
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect.normalized();
    }

    pub fn footprints(&self) -> &[String] {
        &self.footprints
    }

    pub fn add_footprint(&mut self, footprint: impl Into<String>) {
        self.footprints.push(footprint.into());
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.push(alias.into());
    }

    pub fn add_aliases<I, S>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn add_pin(&mut self, pin: Pin) {
        self.pins.push(pin);
    }
}

/// Pin orientation, from the pin's anchor towards the body
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Left,
    Right,
}

/// Electrical role of a pin
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElectricalType {
    Input,
    Output,
    Bidirectional,
    TriState,
    Passive,
    #[default]
    Unspecified,
    PowerIn,
    PowerOut,
    OpenCollector,
    OpenEmitter,
    NotConnected,
}

/// Graphical shape drawn at a pin
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinShape {
    #[default]
    Line,
    Inverted,
    Clock,
    InvertedClock,
    InputLow,
    ClockLow,
    OutputLow,
    FallingEdgeClock,
    NonLogic,
}

/// Visual modifier of a pin. The default is a visible plain line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinType {
    pub invisible: bool,
    pub shape: PinShape,
}

impl PinType {
    pub const NORMAL: PinType = PinType {
        invisible: false,
        shape: PinShape::Line,
    };

    pub fn new(shape: PinShape) -> Self {
        Self {
            invisible: false,
            shape,
        }
    }

    pub fn hidden(shape: PinShape) -> Self {
        Self {
            invisible: true,
            shape,
        }
    }

    pub fn is_normal(&self) -> bool {
        *self == Self::NORMAL
    }
}

/// An electrical connection point of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    name: String,
    pad_name: String,
    pos: Point,
    length: i32,
    direction: Direction,
    name_text_size: i32,
    pad_text_size: i32,
    layer: i32,
    electrical_type: ElectricalType,
    pin_type: PinType,
}

impl Default for Pin {
    fn default() -> Self {
        Self {
            name: String::new(),
            pad_name: String::new(),
            pos: Point::default(),
            length: 0,
            direction: Direction::default(),
            name_text_size: format::PIN_TEXT_SIZE,
            pad_text_size: format::PIN_TEXT_SIZE,
            layer: 0,
            electrical_type: ElectricalType::default(),
            pin_type: PinType::default(),
        }
    }
}

impl Pin {
    pub fn new(name: impl Into<String>, pad_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pad_name: pad_name.into(),
            ..Self::default()
        }
    }

    pub fn with_pos(mut self, x: i32, y: i32) -> Self {
        self.pos = Point::new(x, y);
        self
    }

    pub fn with_length(mut self, length: i32) -> Self {
        self.length = length.max(0);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_electrical_type(mut self, electrical_type: ElectricalType) -> Self {
        self.electrical_type = electrical_type;
        self
    }

    pub fn with_pin_type(mut self, pin_type: PinType) -> Self {
        self.pin_type = pin_type;
        self
    }

    /// Pin name, empty when the pin is unnamed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pad (pin number) label
    pub fn pad_name(&self) -> &str {
        &self.pad_name
    }

    /// Anchor position, y pointing down
    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn name_text_size(&self) -> i32 {
        self.name_text_size
    }

    pub fn pad_text_size(&self) -> i32 {
        self.pad_text_size
    }

    /// Unit the pin belongs to, 0 for all units
    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn electrical_type(&self) -> ElectricalType {
        self.electrical_type
    }

    pub fn pin_type(&self) -> PinType {
        self.pin_type
    }
}

/// Library name for a file: its file name up to the first `.`
fn base_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    file_name.split('.').next().unwrap_or_default().to_owned()
}

/// Loads the library stored at `path`.
pub fn load_library(path: impl AsRef<Path>) -> Result<Library, LibraryError> {
    let mut lib = Library::new();
    load_library_into(path, &mut lib)?;
    Ok(lib)
}

/// Replaces the contents of `lib` with the library stored at `path`.
///
/// `lib` is untouched if the file cannot be opened.
pub fn load_library_into(path: impl AsRef<Path>, lib: &mut Library) -> Result<(), LibraryError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| LibraryError::Open {
        path: path.to_owned(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(LibraryError::Read)?;
    // legacy libraries may carry Latin-1 text
    let input = String::from_utf8_lossy(&bytes);

    decode_library(&input, lib);
    lib.set_name(base_name(path));
    log::debug!("loaded {} components from {}", lib.len(), path.display());
    Ok(())
}

/// Writes `lib` to `path` and renames it after the file.
pub fn save_library(path: impl AsRef<Path>, lib: &mut Library) -> Result<(), LibraryError> {
    save_library_with(path, lib, &WriteOptions::default())
}

pub fn save_library_with(
    path: impl AsRef<Path>,
    lib: &mut Library,
    options: &WriteOptions,
) -> Result<(), LibraryError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| LibraryError::Open {
        path: path.to_owned(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    encode_library(lib, &mut out, options).map_err(LibraryError::Write)?;
    out.flush().map_err(LibraryError::Write)?;

    lib.set_name(base_name(path));
    log::debug!("saved {} components to {}", lib.len(), path.display());
    Ok(())
}
