use crate::types::{InvalidVin, Vin};

/// Maps OCR glyphs that are visually confusable with VIN characters onto the
/// character a VIN actually allows. VINs never contain I, O or Q, so those
/// reads are always misrecognized digits. Context-free scan-and-replace;
/// output length equals input length.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'I' | 'i' => '1',
            'o' | 'O' => '0',
            'Q' => '9',
            's' | 'S' => '5',
            c => c,
        })
        .collect()
}

/// Corrects a frame's recognized text and picks out a VIN: first the trimmed
/// text as a whole, then its whitespace-separated tokens, since OCR emits
/// the entire frame as one blob with the VIN buried among other labels. At
/// most one VIN is taken per frame. When nothing qualifies, the error
/// describes why the frame text itself is not a VIN.
pub fn extract_vin(raw: &str) -> Result<Vin, InvalidVin> {
    let corrected = normalize(raw);
    match Vin::parse(corrected.trim()) {
        Ok(vin) => Ok(vin),
        Err(e) => corrected
            .split_whitespace()
            .find_map(|token| Vin::parse(token).ok())
            .ok_or(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_confusable_glyphs() {
        assert_eq!(normalize("1HGCM82633A1O4352"), "1HGCM82633A104352");
        assert_eq!(normalize("IioOQsS"), "1100955");
    }

    #[test]
    fn passes_other_characters_through() {
        assert_eq!(normalize("WDB 123\nx-7!"), "WDB 123\nx-7!");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn preserves_length() {
        for s in ["", "1HGCM82633A1O4352", "some\nmulti line\ttext!", "QQQ"] {
            assert_eq!(normalize(s).chars().count(), s.chars().count());
        }
    }

    #[test]
    fn output_contains_no_trigger_characters() {
        let noisy = "IiOoQsS mixed WITH Ordinary noiSe";
        let corrected = normalize(noisy);
        assert!(!corrected.contains(['I', 'i', 'o', 'O', 'Q', 's', 'S']));
    }

    #[test]
    fn idempotent() {
        for s in ["1HGCM82633A1O4352", "IioOQsS", "plain text"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn extracts_exact_frame_text() {
        let vin = extract_vin("1HGCM82633A1O4352").unwrap();
        assert_eq!(vin.as_str(), "1HGCM82633A104352");
    }

    #[test]
    fn extracts_vin_from_noisy_frame_text() {
        let raw = "VEHICLE 1D\nVIN: 1HGCM82633A1O4352\nMADE IN JAPAN";
        let vin = extract_vin(raw).unwrap();
        assert_eq!(vin.as_str(), "1HGCM82633A104352");
    }

    #[test]
    fn takes_at_most_one_vin_per_frame() {
        let raw = "1HGCM82633A104352 5YJ5A1E26HF000337";
        assert_eq!(extract_vin(raw).unwrap().as_str(), "1HGCM82633A104352");
    }

    #[test]
    fn frame_without_a_vin_is_rejected() {
        assert_eq!(extract_vin(""), Err(InvalidVin::Length(0)));
        assert!(extract_vin("OPEN 24 HOURS").is_err());
        assert_eq!(extract_vin("1HGCM"), Err(InvalidVin::Length(5)));
    }
}
