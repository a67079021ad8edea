use crate::error::Error;
use kernel::{GeoPoint, RawHeading, UnavailableReason};
use orchestrator::HeadingEvent;

/// Parse one line of heading input. Blank lines and `#` comments yield `None`.
pub fn parse_heading_line(line: &str) -> Result<Option<HeadingEvent>, Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let invalid = || Error::HeadingInput(line.to_owned());
    let mut words = line.split_whitespace();
    let keyword = words.next().ok_or_else(invalid)?;
    let mut number = || -> Result<f64, Error> {
        words
            .next()
            .and_then(|word| word.parse().ok())
            .ok_or_else(invalid)
    };

    let event = match keyword {
        "compass" => HeadingEvent::Sample(RawHeading::Compass(Some(number()?))),
        "alpha" => HeadingEvent::Sample(RawHeading::Alpha(Some(number()?))),
        "denied" => HeadingEvent::Unavailable(UnavailableReason::PermissionDenied),
        "unsupported" => HeadingEvent::Unavailable(UnavailableReason::Unsupported),
        "at" => {
            let latitude = number()?;
            let longitude = number()?;
            let origin = GeoPoint::new(latitude, longitude).map_err(|_| invalid())?;
            HeadingEvent::Relocate(origin)
        }
        _ => return Err(invalid()),
    };
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_samples() {
        assert_eq!(
            parse_heading_line("compass 95.5").unwrap(),
            Some(HeadingEvent::Sample(RawHeading::Compass(Some(95.5))))
        );
        assert_eq!(
            parse_heading_line("  alpha 120 ").unwrap(),
            Some(HeadingEvent::Sample(RawHeading::Alpha(Some(120.0))))
        );
        assert_eq!(
            parse_heading_line("denied").unwrap(),
            Some(HeadingEvent::Unavailable(UnavailableReason::PermissionDenied))
        );
        assert_eq!(
            parse_heading_line("at 21.4225 39.8262").unwrap(),
            Some(HeadingEvent::Relocate(kernel::KAABA))
        );
    }

    #[test]
    fn skips_blank_and_comments() {
        assert_eq!(parse_heading_line("").unwrap(), None);
        assert_eq!(parse_heading_line("# calibrating").unwrap(), None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_heading_line("compass").is_err());
        assert!(parse_heading_line("compass north").is_err());
        assert!(parse_heading_line("spin 10").is_err());
        assert!(parse_heading_line("at 95 0").is_err());
    }
}
