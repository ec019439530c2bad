//! Sample encoding
//!
//! CSV text (one sample per line) for file payloads; packed little-endian
//! f64 bytes for inline blobs. Decoders return a reason string that callers
//! map onto `PayloadUnavailable`.

use std::fmt::Write as _;

/// Encode samples as CSV text, one sample per line
pub fn encode_csv(samples: &[f64]) -> String {
    let mut out = String::with_capacity(samples.len() * 8);
    for sample in samples {
        // f64 Display is the shortest round-trippable representation
        let _ = writeln!(out, "{}", sample);
    }
    out
}

/// Decode CSV text back into samples
pub fn decode_csv(text: &str) -> std::result::Result<Vec<f64>, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<f64>()
                .map_err(|err| format!("bad sample '{}': {}", line, err))
        })
        .collect()
}

/// Encode samples as packed little-endian f64 bytes
pub fn encode_le(samples: &[f64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 8);
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}

/// Decode packed little-endian f64 bytes back into samples
pub fn decode_le(bytes: &[u8]) -> std::result::Result<Vec<f64>, String> {
    if bytes.len() % 8 != 0 {
        return Err(format!(
            "blob length {} is not a multiple of 8",
            bytes.len()
        ));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_round_trip() {
        let samples = [0.0, -1.5, 3.25, 1e-9, 12345.6789];
        let decoded = decode_csv(&encode_csv(&samples)).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_csv_rejects_garbage() {
        assert!(decode_csv("1.0\nnot-a-number\n").is_err());
    }

    #[test]
    fn test_csv_empty_payload() {
        assert_eq!(decode_csv("").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_le_round_trip() {
        let samples = [f64::MIN, -0.0, 0.5, f64::MAX];
        let decoded = decode_le(&encode_le(&samples)).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_le_rejects_truncated_blob() {
        let mut bytes = encode_le(&[1.0, 2.0]);
        bytes.pop();
        assert!(decode_le(&bytes).is_err());
    }
}
