use std::{fmt::Display, str::FromStr};

use crate::{Direction, ElectricalType, PinShape, PinType};

impl From<char> for Direction {
    /// Unknown characters fall back to [`Direction::Left`].
    fn from(value: char) -> Self {
        match value {
            'U' => Self::Up,
            'D' => Self::Down,
            'R' => Self::Right,
            _ => Self::Left,
        }
    }
}

impl Direction {
    pub fn as_char(&self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }
}

impl From<char> for ElectricalType {
    /// Unknown characters fall back to [`ElectricalType::Unspecified`].
    fn from(value: char) -> Self {
        match value {
            'I' => Self::Input,
            'O' => Self::Output,
            'B' => Self::Bidirectional,
            'T' => Self::TriState,
            'P' => Self::Passive,
            'W' => Self::PowerIn,
            'w' => Self::PowerOut,
            'C' => Self::OpenCollector,
            'E' => Self::OpenEmitter,
            'N' => Self::NotConnected,
            _ => Self::Unspecified,
        }
    }
}

impl ElectricalType {
    pub fn as_char(&self) -> char {
        match self {
            Self::Input => 'I',
            Self::Output => 'O',
            Self::Bidirectional => 'B',
            Self::TriState => 'T',
            Self::Passive => 'P',
            Self::Unspecified => 'U',
            Self::PowerIn => 'W',
            Self::PowerOut => 'w',
            Self::OpenCollector => 'C',
            Self::OpenEmitter => 'E',
            Self::NotConnected => 'N',
        }
    }
}

impl PinShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "",
            Self::Inverted => "I",
            Self::Clock => "C",
            Self::InvertedClock => "CI",
            Self::InputLow => "L",
            Self::ClockLow => "CL",
            Self::OutputLow => "V",
            Self::FallingEdgeClock => "F",
            Self::NonLogic => "X",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "" => Some(Self::Line),
            "I" => Some(Self::Inverted),
            "C" => Some(Self::Clock),
            "CI" => Some(Self::InvertedClock),
            "L" => Some(Self::InputLow),
            "CL" => Some(Self::ClockLow),
            "V" => Some(Self::OutputLow),
            "F" => Some(Self::FallingEdgeClock),
            "X" => Some(Self::NonLogic),
            _ => None,
        }
    }
}

impl FromStr for PinType {
    type Err = std::convert::Infallible;

    /// Decodes a trailing pin-type word. An `N` prefix marks the pin
    /// invisible. Unknown words decode as a normal pin.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Some(shape) = PinShape::from_code(value) {
            return Ok(PinType::new(shape));
        }
        if let Some(shape) = value.strip_prefix('N').and_then(PinShape::from_code) {
            return Ok(PinType::hidden(shape));
        }
        log::debug!("unknown pin type {value:?}, using normal");
        Ok(PinType::NORMAL)
    }
}

impl Display for PinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.invisible {
            write!(f, "N")?;
        }
        write!(f, "{}", self.shape.as_str())
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Display for ElectricalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
