use std::fmt;

/// H.264 NAL unit categories the bytestream backend dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NalKind {
    NonIdrSlice,
    IdrSlice,
    Sei,
    Sps,
    Pps,
    AccessUnitDelimiter,
    Other(u8),
}

impl NalKind {
    pub fn from_header_byte(byte: u8) -> Self {
        match byte & 0x1f {
            1 => NalKind::NonIdrSlice,
            5 => NalKind::IdrSlice,
            6 => NalKind::Sei,
            7 => NalKind::Sps,
            8 => NalKind::Pps,
            9 => NalKind::AccessUnitDelimiter,
            value => NalKind::Other(value),
        }
    }

    /// True for coded picture slices.
    pub fn is_slice(&self) -> bool {
        matches!(self, NalKind::NonIdrSlice | NalKind::IdrSlice)
    }
}

impl fmt::Display for NalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NalKind::NonIdrSlice => "NonIDR_1",
            NalKind::IdrSlice => "IDR_5",
            NalKind::Sei => "SEI_6",
            NalKind::Sps => "SPS_7",
            NalKind::Pps => "PPS_8",
            NalKind::AccessUnitDelimiter => "AUD_9",
            NalKind::Other(value) => return write!(f, "Other_{value}"),
        };
        f.write_str(s)
    }
}

/// A NAL unit with its kind and payload, start code stripped.
#[derive(Debug, Clone)]
pub struct NalUnit {
    pub kind: NalKind,
    pub data: Vec<u8>,
}

impl NalUnit {
    fn new(data: Vec<u8>) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let kind = NalKind::from_header_byte(data[0]);
        Some(NalUnit { kind, data })
    }
}

/// Split an Annex B bytestream on its start codes.
///
/// Both 4-byte (`00 00 00 01`) and 3-byte (`00 00 01`) start codes are
/// recognized; zero bytes trailing a unit (the prefix of the next start
/// code) are trimmed from its payload. Bytes before the first start code
/// are ignored.
pub fn scan_bytestream(stream: &[u8]) -> Vec<NalUnit> {
    let mut units = Vec::new();
    let mut pos = 0usize;
    let mut current_start: Option<usize> = None;

    while pos + 3 <= stream.len() {
        let code_len = if pos + 4 <= stream.len() && stream[pos..pos + 4] == [0, 0, 0, 1] {
            4
        } else if stream[pos..pos + 3] == [0, 0, 1] {
            3
        } else {
            pos += 1;
            continue;
        };

        if let Some(start) = current_start {
            push_unit(stream, start, pos, &mut units);
        }
        current_start = Some(pos + code_len);
        pos += code_len;
    }

    if let Some(start) = current_start {
        push_unit(stream, start, stream.len(), &mut units);
    }

    units
}

fn push_unit(stream: &[u8], start: usize, mut end: usize, units: &mut Vec<NalUnit>) {
    while end > start && stream[end - 1] == 0 {
        end -= 1;
    }
    if let Some(unit) = NalUnit::new(stream[start..end].to_vec()) {
        units.push(unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn test_scan_mixed_start_codes() {
        let data = stream(&[
            &[0, 0, 0, 1],
            &[0x67, 0xaa],
            &[0, 0, 1],
            &[0x68, 0xbb],
            &[0, 0, 0, 1],
            &[0x65, 0x11, 0x22],
        ]);

        let units = scan_bytestream(&data);
        let kinds: Vec<NalKind> = units.iter().map(|u| u.kind).collect();
        assert_eq!(kinds, vec![NalKind::Sps, NalKind::Pps, NalKind::IdrSlice]);
        assert_eq!(units[2].data, vec![0x65, 0x11, 0x22]);
    }

    #[test]
    fn test_trailing_zeros_trimmed_before_next_start_code() {
        // The zero padding ahead of the 3-byte start code must not leak
        // into the SPS payload.
        let data = stream(&[&[0, 0, 0, 1], &[0x67, 0xaa, 0x00], &[0, 0, 1], &[0x41, 0x01]]);

        let units = scan_bytestream(&data);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].data, vec![0x67, 0xaa]);
        assert_eq!(units[1].kind, NalKind::NonIdrSlice);
    }

    #[test]
    fn test_no_start_codes_yields_nothing() {
        assert!(scan_bytestream(&[]).is_empty());
        assert!(scan_bytestream(&[0x65, 0x11, 0x22, 0x33]).is_empty());
    }

    #[test]
    fn test_leading_garbage_ignored() {
        let data = stream(&[&[0xde, 0xad], &[0, 0, 0, 1], &[0x09, 0xf0]]);
        let units = scan_bytestream(&data);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].kind, NalKind::AccessUnitDelimiter);
    }
}
