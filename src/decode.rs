use crate::{
    format::{flip_y, NO_NAME, PIN_TEXT_SIZE},
    reader::Reader,
    Component, Direction, ElectricalType, Library, Pin, Point, Rect,
};

/// Where the parser is inside a component record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before `DEF`
    Header,
    /// After `DEF`, outside `DRAW`..`ENDDRAW`
    Fields,
    /// Inside `$FPLIST`..`$ENDFPLIST`
    Footprints,
    /// Inside `DRAW`..`ENDDRAW`
    Drawing,
    /// `ENDDEF` reached
    Done,
}

/// Replaces the contents of `lib` with the components decoded from `input`.
///
/// The first line is the format banner and is skipped. Lines that do not
/// start a component are discarded.
pub fn decode_library(input: &str, lib: &mut Library) {
    let mut reader = Reader::new(input);
    reader.read_line();
    lib.clear();

    while !reader.at_end() {
        match parse_component(&mut reader) {
            Some(component) => lib.add_component(component),
            None => {
                let line = reader.read_line();
                if !line.trim().is_empty() {
                    log::warn!("skipping line outside of a component: {line:?}");
                }
            }
        }
    }
}

/// Parses one component, from its `DEF` record up to and including `ENDDEF`.
///
/// Returns `None` if no `DEF` record was found. The rest of the current line
/// is then left to the caller. A component cut short by the end of the input
/// is returned as parsed so far.
pub fn parse_component(reader: &mut Reader) -> Option<Component> {
    let mut component = Component::default();
    let mut section = Section::Header;
    // section to return to after `$ENDFPLIST`
    let mut outer = Section::Header;

    while section != Section::Done {
        if section == Section::Footprints {
            match reader.read_token() {
                Some("$ENDFPLIST") => section = outer,
                Some(footprint) => component.add_footprint(footprint),
                None => {
                    section = outer;
                    break;
                }
            }
            continue;
        }

        let Some(start) = reader.read_token() else {
            break;
        };
        section = match start {
            s if s.starts_with('#') => {
                reader.read_line();
                section
            }
            "DEF" => {
                if parse_def(reader.read_line(), &mut component) {
                    Section::Fields
                } else {
                    log::warn!("DEF record without name or prefix");
                    section
                }
            }
            s if s.starts_with('F') => {
                reader.read_line();
                section
            }
            "$FPLIST" => {
                outer = section;
                Section::Footprints
            }
            s if s.starts_with("DRAW") => {
                reader.read_line();
                Section::Drawing
            }
            s if s.starts_with("ALIAS") => {
                component.add_aliases(reader.read_line().split_whitespace());
                section
            }
            s if s.starts_with("ENDDRAW") => {
                reader.read_line();
                Section::Fields
            }
            s if s.starts_with("ENDDEF") => {
                if section == Section::Header {
                    return None;
                }
                reader.read_line();
                Section::Done
            }
            s if section == Section::Drawing && s.starts_with('X') => {
                let line = reader.read_line();
                match parse_pin(&mut Reader::new(line)) {
                    Some(pin) => component.add_pin(pin),
                    None => log::warn!("skipping malformed pin in {}: X{line}", component.name()),
                }
                section
            }
            s if section == Section::Drawing && s.starts_with('S') => {
                let line = reader.read_line();
                match parse_rect(&mut Reader::new(line)) {
                    Some(rect) => component.set_rect(rect),
                    None => log::warn!("skipping malformed rectangle in {}: S{line}", component.name()),
                }
                section
            }
            s => {
                let rest = reader.read_line();
                log::trace!("skipping record {s}{rest}");
                section
            }
        };
    }

    if section == Section::Header {
        return None;
    }
    if section != Section::Done {
        log::warn!("component {} truncated by end of input", component.name());
    }
    log::debug!(
        "parsed component {} with {} pins",
        component.name(),
        component.pins().len()
    );
    Some(component)
}

/// Reads the fields of a `DEF` record following the keyword.
fn parse_def(line: &str, component: &mut Component) -> bool {
    let mut fields = line.split_whitespace();
    let (Some(name), Some(prefix)) = (fields.next(), fields.next()) else {
        return false;
    };
    component.set_name(name);
    component.set_prefix(prefix);

    // pin number and pin name text offsets
    let mut fields = fields.skip(2);
    component.set_show_pad_name(fields.next() == Some("Y"));
    component.set_show_pin_name(fields.next() == Some("Y"));
    true
}

/// Reads the four corners of an `S` record, converting them to model space.
fn parse_rect(reader: &mut Reader) -> Option<Rect> {
    let x0 = reader.read_int()?;
    let y0 = reader.read_int()?;
    let x1 = reader.read_int()?;
    let y1 = reader.read_int()?;
    Some(Rect::new(x0, flip_y(y0), x1, flip_y(y1)).normalized())
}

/// Parses the fields of an `X` record following the keyword:
///
/// `name pad x y length direction name_size pad_size layer _ electrical [pin_type]`
///
/// Returns `None` if any field up to `layer` is missing or malformed.
pub fn parse_pin(reader: &mut Reader) -> Option<Pin> {
    let name = match reader.read_token()? {
        NO_NAME => "",
        name => name,
    };
    let pad_name = reader.read_token()?;
    let x = reader.read_int()?;
    let y = reader.read_int()?;
    let length = reader.read_int()?.max(0);

    reader.skip_whitespace();
    let direction = reader.read_char().map(Direction::from).unwrap_or_default();

    // name and pad text sizes are always written as PIN_TEXT_SIZE
    reader.read_token();
    reader.read_token();

    let layer = reader.read_int()?;
    if !reader.is_ok() {
        return None;
    }

    reader.read_token();
    reader.skip_whitespace();
    let electrical_type = reader
        .read_char()
        .map(ElectricalType::from)
        .unwrap_or_default();
    let pin_type = reader.read_line().parse().unwrap_or_default();

    Some(Pin {
        name: name.to_owned(),
        pad_name: pad_name.to_owned(),
        pos: Point::new(x, flip_y(y)),
        length,
        direction,
        name_text_size: PIN_TEXT_SIZE,
        pad_text_size: PIN_TEXT_SIZE,
        layer,
        electrical_type,
        pin_type,
    })
}
