use cinescope::actions::ActionPayload;

#[cfg(test)]
mod tests {
    use super::*;

    fn all_payloads() -> Vec<ActionPayload> {
        vec![
            ActionPayload::CinemaFilms {
                cinema_uuid: "c0f63a12".to_string(),
            },
            ActionPayload::FilmCinemas {
                film_uuid: "f56a2f18".to_string(),
            },
            ActionPayload::CinemaLocation {
                lat: 55.747586,
                lon: 37.575216,
            },
            ActionPayload::FilmToggleFav {
                film_uuid: "f56a2f18".to_string(),
                is_fav: true,
            },
            ActionPayload::FilmToggleFav {
                film_uuid: "f56a2f18".to_string(),
                is_fav: false,
            },
        ]
    }

    /// Every constructible payload round-trips through encode/decode
    #[test]
    fn test_payload_round_trip() {
        for payload in all_payloads() {
            let encoded = payload.encode().unwrap();
            let decoded = ActionPayload::decode(&encoded).unwrap();
            assert_eq!(decoded, payload, "round trip failed for {}", encoded);
        }
    }

    /// Encoding is deterministic
    #[test]
    fn test_encoding_is_deterministic() {
        for payload in all_payloads() {
            assert_eq!(payload.encode().unwrap(), payload.encode().unwrap());
        }
    }

    /// Non-JSON input reports a decode error instead of panicking
    #[test]
    fn test_decode_rejects_non_json() {
        assert!(ActionPayload::decode("not json at all").is_err());
        assert!(ActionPayload::decode("").is_err());
    }

    /// Valid JSON with an unknown tag or missing fields is rejected
    #[test]
    fn test_decode_rejects_schema_mismatch() {
        assert!(ActionPayload::decode(r#"{"type":"xyz"}"#).is_err());
        assert!(ActionPayload::decode(r#"{"type":"ftf"}"#).is_err());
        assert!(ActionPayload::decode(r#"{"film_uuid":"f1"}"#).is_err());
        assert!(ActionPayload::decode(r#"{"type":"cl","lat":"north"}"#).is_err());
    }

    /// Decode errors carry a human-readable reason
    #[test]
    fn test_decode_error_display() {
        let err = ActionPayload::decode("{{{").unwrap_err();
        assert!(err.to_string().starts_with("invalid action payload:"));
    }

    /// Every payload stays inside Telegram's 64-byte callback-data limit
    #[test]
    fn test_encoded_size_within_transport_limit() {
        for payload in all_payloads() {
            let encoded = payload.encode().unwrap();
            assert!(
                encoded.len() <= 64,
                "payload too large for callback data: {} ({} bytes)",
                encoded,
                encoded.len()
            );
        }
    }
}
