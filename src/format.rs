//! Wire-format constants of the `EESchema-LIBRARY` 2.3 text format.

use chrono::NaiveDateTime;

/// First line of a library file, followed by the save date.
pub const BANNER: &str = "EESchema-LIBRARY Version 2.3  Date: ";
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
pub const ENCODING_LINE: &str = "#encoding utf-8";
pub const DEFAULT_GENERATOR: &str = "uConfig by Sebastien CAUX (sebcaux)";
pub const DEFAULT_PROJECT_URL: &str = "https://github.com/Robotips/uConfig";
pub const FOOTER: &str = "#\n#End Library";

/// Placeholder written for an empty pin name or field text.
pub const NO_NAME: &str = "~";

/// Text size of the synthetic F0..F3 fields.
pub const TEXT_SIZE: i32 = 50;
/// Pin name and pad name text size.
pub const PIN_TEXT_SIZE: i32 = 50;
/// Distance of the reference field from the body's lower-right corner.
pub const FIELD_OFFSET: i32 = 50;
/// Pin name offset written in the `DEF` record.
pub const PIN_NAME_OFFSET: i32 = 40;
/// Pen width and fill of the body outline (`S` record tail).
pub const RECT_STYLE: &str = "0 1 10 f";

/// Converts a vertical coordinate between the wire (y up) and the model
/// (y down). The conversion is its own inverse.
pub fn flip_y(y: i32) -> i32 {
    y.wrapping_neg()
}

/// Options for writing a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Attribution written after `#created with `
    pub generator: String,
    pub project_url: String,
    /// Banner date, the current local time when unset
    pub timestamp: Option<NaiveDateTime>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_owned(),
            project_url: DEFAULT_PROJECT_URL.to_owned(),
            timestamp: None,
        }
    }
}

impl WriteOptions {
    pub(crate) fn banner_date(&self) -> String {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        timestamp.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(200)]
    #[case(-350)]
    fn flip_y_is_an_involution(#[case] y: i32) {
        assert_eq!(flip_y(flip_y(y)), y);
        assert_eq!(flip_y(y), -y);
    }

    #[test]
    fn banner_date_uses_day_first_format() {
        let options = WriteOptions {
            timestamp: NaiveDate::from_ymd_opt(2018, 1, 9).and_then(|d| d.and_hms_opt(8, 5, 3)),
            ..WriteOptions::default()
        };
        assert_eq!(options.banner_date(), "09/01/2018 08:05:03");
    }

    #[test]
    fn banner_date_defaults_to_now() {
        let date = WriteOptions::default().banner_date();
        assert!(NaiveDateTime::parse_from_str(&date, DATE_FORMAT).is_ok());
    }
}
