use std::io::{self, Write};

use crate::{
    format::{
        flip_y, WriteOptions, BANNER, ENCODING_LINE, FIELD_OFFSET, FOOTER, NO_NAME,
        PIN_NAME_OFFSET, PIN_TEXT_SIZE, RECT_STYLE, TEXT_SIZE,
    },
    Component, Library, Pin,
};

/// Writes `lib` in `EESchema-LIBRARY` format.
pub fn encode_library<W: Write>(
    lib: &Library,
    out: &mut W,
    options: &WriteOptions,
) -> io::Result<()> {
    writeln!(out, "{BANNER}{}", options.banner_date())?;
    writeln!(out, "{ENCODING_LINE}")?;
    writeln!(out, "#created with {}", options.generator)?;
    writeln!(out, "#{}", options.project_url)?;

    for component in lib.components() {
        write_component(component, out)?;
        writeln!(out)?;
    }

    write!(out, "{FOOTER}")
}

fn flag(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

/// Writes one component record, from its comment header to `ENDDEF`.
///
/// The field records are generated from the name, prefix and outline.
pub fn write_component<W: Write>(component: &Component, out: &mut W) -> io::Result<()> {
    let name = component.name();
    let prefix = component.prefix();
    let rect = component.rect();

    writeln!(out, "#\n# {name}\n#")?;
    writeln!(
        out,
        "DEF {name} {prefix} 0 {PIN_NAME_OFFSET} {} {} 1 F N",
        flag(component.show_pad_name()),
        flag(component.show_pin_name())
    )?;

    writeln!(
        out,
        "F0 \"{prefix}\" {} {} {TEXT_SIZE} H V C CNN",
        rect.right.wrapping_sub(FIELD_OFFSET),
        flip_y(rect.bottom).wrapping_sub(FIELD_OFFSET)
    )?;
    writeln!(out, "F1 \"{name}\" 0 0 {TEXT_SIZE} H V C CNN")?;
    writeln!(out, "F2 \"{NO_NAME}\" 0 0 {TEXT_SIZE} H I C CNN")?;
    writeln!(out, "F3 \"{NO_NAME}\" 0 0 {TEXT_SIZE} H I C CNN")?;

    if !component.footprints().is_empty() {
        writeln!(out, "$FPLIST")?;
        for footprint in component.footprints() {
            writeln!(out, " {footprint}")?;
        }
        writeln!(out, "$ENDFPLIST")?;
    }

    if !component.aliases().is_empty() {
        writeln!(out, "ALIAS {}", component.aliases().join(" "))?;
    }

    writeln!(out, "DRAW")?;
    for pin in component.pins() {
        write_pin(pin, out)?;
        writeln!(out)?;
    }
    if rect.is_valid() {
        writeln!(
            out,
            "S {} {} {} {} {RECT_STYLE}",
            rect.left,
            flip_y(rect.top),
            rect.right,
            flip_y(rect.bottom)
        )?;
    }
    writeln!(out, "ENDDRAW")?;
    writeln!(out, "ENDDEF")
}

/// Writes one `X` record without its line terminator.
pub fn write_pin<W: Write>(pin: &Pin, out: &mut W) -> io::Result<()> {
    let name = match pin.name() {
        "" => NO_NAME,
        name => name,
    };
    let pos = pin.pos();
    write!(
        out,
        "X {name} {} {} {} {} {} {PIN_TEXT_SIZE} {PIN_TEXT_SIZE} {} 1 {}",
        pin.pad_name(),
        pos.x,
        flip_y(pos.y),
        pin.length(),
        pin.direction(),
        pin.layer(),
        pin.electrical_type()
    )?;
    if !pin.pin_type().is_normal() {
        write!(out, " {}", pin.pin_type())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decode_library, Direction, ElectricalType, PinShape, PinType, Point, Rect,
    };
    use chrono::NaiveDate;
    use rstest::rstest;

    fn options() -> WriteOptions {
        WriteOptions {
            timestamp: NaiveDate::from_ymd_opt(2018, 12, 31)
                .and_then(|d| d.and_hms_opt(23, 59, 1)),
            ..WriteOptions::default()
        }
    }

    fn encode(lib: &Library) -> String {
        let mut out = Vec::new();
        encode_library(lib, &mut out, &options()).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn pin_line(pin: &Pin) -> String {
        let mut out = Vec::new();
        write_pin(pin, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Library {
        let mut c = Component::new("74HC00", "U");
        c.set_show_pin_name(false);
        c.add_footprint("SOIC*");
        c.add_footprint("DIP*");
        c.add_aliases(["74LS00", "74HCT00"]);
        c.add_pin(
            Pin::new("", "1")
                .with_pos(-300, 100)
                .with_length(100)
                .with_direction(Direction::Right)
                .with_layer(1)
                .with_electrical_type(ElectricalType::Input),
        );
        c.add_pin(
            Pin::new("Y", "3")
                .with_pos(300, 0)
                .with_length(100)
                .with_direction(Direction::Left)
                .with_layer(1)
                .with_electrical_type(ElectricalType::Output)
                .with_pin_type(PinType::new(PinShape::Inverted)),
        );
        c.add_pin(
            Pin::new("VCC", "14")
                .with_pos(0, -300)
                .with_length(150)
                .with_direction(Direction::Down)
                .with_electrical_type(ElectricalType::PowerIn)
                .with_pin_type(PinType::hidden(PinShape::Line)),
        );
        c.set_rect(Rect::new(200, 150, -200, -150));

        let mut lib = Library::new();
        lib.add_component(c);
        lib.add_component(Component::new("TP", "TP"));
        lib
    }

    #[test]
    fn empty_library_is_header_and_footer() {
        let text = encode(&Library::new());
        assert_eq!(
            text,
            concat!(
                "EESchema-LIBRARY Version 2.3  Date: 31/12/2018 23:59:01\n",
                "#encoding utf-8\n",
                "#created with uConfig by Sebastien CAUX (sebcaux)\n",
                "#https://github.com/Robotips/uConfig\n",
                "#\n",
                "#End Library",
            )
        );

        let mut lib = Library::new();
        lib.add_component(Component::new("STALE", "S"));
        decode_library(&text, &mut lib);
        assert!(lib.is_empty());
    }

    #[test]
    fn writes_component_record() {
        let mut out = Vec::new();
        write_component(&sample().components()[0], &mut out).unwrap();
        let expected = concat!(
            "#\n",
            "# 74HC00\n",
            "#\n",
            "DEF 74HC00 U 0 40 Y N 1 F N\n",
            "F0 \"U\" 150 -200 50 H V C CNN\n",
            "F1 \"74HC00\" 0 0 50 H V C CNN\n",
            "F2 \"~\" 0 0 50 H I C CNN\n",
            "F3 \"~\" 0 0 50 H I C CNN\n",
            "$FPLIST\n",
            " SOIC*\n",
            " DIP*\n",
            "$ENDFPLIST\n",
            "ALIAS 74LS00 74HCT00\n",
            "DRAW\n",
            "X ~ 1 -300 -100 100 R 50 50 1 1 I\n",
            "X Y 3 300 0 100 L 50 50 1 1 O I\n",
            "X VCC 14 0 300 150 D 50 50 0 1 W N\n",
            "S -200 150 200 -150 0 1 10 f\n",
            "ENDDRAW\n",
            "ENDDEF\n",
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn component_without_outline_has_no_rect_record() {
        let mut out = Vec::new();
        write_component(&Component::new("TP", "TP"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.lines().any(|l| l.starts_with("S ")));
        assert!(!text.contains("$FPLIST"));
        assert!(!text.contains("ALIAS"));
        assert!(text.contains("F0 \"TP\" -51 -49 50 H V C CNN\n"));
    }

    #[rstest]
    #[case(PinType::NORMAL, "X A 1 0 0 100 L 50 50 0 1 U")]
    #[case(PinType::new(PinShape::Clock), "X A 1 0 0 100 L 50 50 0 1 U C")]
    #[case(PinType::hidden(PinShape::NonLogic), "X A 1 0 0 100 L 50 50 0 1 U NX")]
    fn pin_type_word_only_when_not_normal(#[case] pin_type: PinType, #[case] expected: &str) {
        let pin = Pin::new("A", "1").with_length(100).with_pin_type(pin_type);
        assert_eq!(pin_line(&pin), expected);
    }

    #[test]
    fn components_are_separated_by_blank_lines() {
        let text = encode(&sample());
        assert_eq!(text.matches("ENDDEF\n\n").count(), 2);
        assert!(text.ends_with("ENDDEF\n\n#\n#End Library"));
    }

    #[test]
    fn round_trip_preserves_components() {
        let lib = sample();
        let mut decoded = Library::new();
        decode_library(&encode(&lib), &mut decoded);
        assert_eq!(decoded, lib);
    }

    #[rstest]
    #[case(Point::new(0, 0))]
    #[case(Point::new(-150, 275))]
    #[case(Point::new(400, -1000))]
    fn pin_position_survives_round_trip(#[case] pos: Point) {
        let mut c = Component::new("P", "P");
        c.add_pin(Pin::new("A", "1").with_pos(pos.x, pos.y).with_length(50));
        let mut lib = Library::new();
        lib.add_component(c);

        let text = encode(&lib);
        assert!(text.contains(&format!("X A 1 {} {} 50", pos.x, -pos.y)));

        let mut decoded = Library::new();
        decode_library(&text, &mut decoded);
        assert_eq!(decoded.components()[0].pins()[0].pos(), pos);
    }

    #[test]
    fn custom_attribution() {
        let options = WriteOptions {
            generator: "symgen 1.0".to_owned(),
            project_url: "https://example.org/symgen".to_owned(),
            ..options()
        };
        let mut out = Vec::new();
        encode_library(&Library::new(), &mut out, &options).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[2], "#created with symgen 1.0");
        assert_eq!(lines[3], "#https://example.org/symgen");
    }
}
