use bytes::{Buf, BufMut, Bytes};
use prost::{
    DecodeError, Message,
    encoding::{self, DecodeContext, WireType},
};

/// Fields read from the wire whose tags the schema does not know.
///
/// They are kept in the order they were read and written back after the
/// known fields, so a message relayed through an older reader loses nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnknownFields {
    fields: Vec<UnknownField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField {
    pub tag: u32,
    pub value: UnknownValue,
}

/// Raw payload of an unknown field, by wire type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownValue {
    Varint(u64),
    Fixed64(u64),
    LengthDelimited(Bytes),
    /// Fields between a start-group key and its matching end-group key.
    Group(UnknownFields),
    Fixed32(u32),
}

impl UnknownValue {
    pub const fn wire_type(&self) -> WireType {
        match self {
            Self::Varint(_) => WireType::Varint,
            Self::Fixed64(_) => WireType::SixtyFourBit,
            Self::LengthDelimited(_) => WireType::LengthDelimited,
            Self::Group(_) => WireType::StartGroup,
            Self::Fixed32(_) => WireType::ThirtyTwoBit,
        }
    }
}

impl UnknownFields {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnknownField> {
        self.fields.iter()
    }

    pub fn push(&mut self, tag: u32, value: UnknownValue) {
        self.fields.push(UnknownField { tag, value });
    }
}

/// The bag is itself a message of unknown fields, which is also how the
/// body of a group is read and written.
impl Message for UnknownFields {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        for field in &self.fields {
            match &field.value {
                UnknownValue::Varint(value) => encoding::uint64::encode(field.tag, value, buf),
                UnknownValue::Fixed64(value) => encoding::fixed64::encode(field.tag, value, buf),
                UnknownValue::LengthDelimited(value) => {
                    encoding::bytes::encode(field.tag, value, buf);
                }
                UnknownValue::Group(value) => encoding::group::encode(field.tag, value, buf),
                UnknownValue::Fixed32(value) => encoding::fixed32::encode(field.tag, value, buf),
            }
        }
    }

    /// Reads the value of an unrecognized field.
    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> Result<(), DecodeError> {
        let value = match wire_type {
            WireType::Varint => {
                let mut value = 0u64;
                encoding::uint64::merge(wire_type, &mut value, buf, ctx)?;
                UnknownValue::Varint(value)
            }
            WireType::SixtyFourBit => {
                let mut value = 0u64;
                encoding::fixed64::merge(wire_type, &mut value, buf, ctx)?;
                UnknownValue::Fixed64(value)
            }
            WireType::LengthDelimited => {
                let mut value = Bytes::new();
                encoding::bytes::merge(wire_type, &mut value, buf, ctx)?;
                UnknownValue::LengthDelimited(value)
            }
            WireType::StartGroup => {
                let mut value = Self::default();
                encoding::group::merge(tag, wire_type, &mut value, buf, ctx)?;
                UnknownValue::Group(value)
            }
            WireType::ThirtyTwoBit => {
                let mut value = 0u32;
                encoding::fixed32::merge(wire_type, &mut value, buf, ctx)?;
                UnknownValue::Fixed32(value)
            }
            // An end-group key with no open group.
            WireType::EndGroup => return encoding::skip_field(wire_type, tag, buf, ctx),
        };
        self.push(tag, value);
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        self.fields
            .iter()
            .map(|field| match &field.value {
                UnknownValue::Varint(value) => encoding::uint64::encoded_len(field.tag, value),
                UnknownValue::Fixed64(value) => encoding::fixed64::encoded_len(field.tag, value),
                UnknownValue::LengthDelimited(value) => {
                    encoding::bytes::encoded_len(field.tag, value)
                }
                UnknownValue::Group(value) => encoding::group::encoded_len(field.tag, value),
                UnknownValue::Fixed32(value) => encoding::fixed32::encoded_len(field.tag, value),
            })
            .sum()
    }

    fn clear(&mut self) {
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(mut buf: &[u8]) -> Result<UnknownFields, DecodeError> {
        let mut fields = UnknownFields::default();
        while buf.has_remaining() {
            let (tag, wire_type) = encoding::decode_key(&mut buf)?;
            fields.merge_field(tag, wire_type, &mut buf, DecodeContext::default())?;
        }
        Ok(fields)
    }

    #[test]
    fn keeps_every_wire_type() {
        let mut fields = UnknownFields::default();
        fields.push(10, UnknownValue::Varint(300));
        fields.push(11, UnknownValue::Fixed64(u64::MAX));
        fields.push(12, UnknownValue::LengthDelimited(Bytes::from_static(b"abc")));
        fields.push(13, UnknownValue::Fixed32(7));
        fields.push(10, UnknownValue::Varint(1));

        let mut buf = Vec::new();
        fields.encode_raw(&mut buf);
        assert_eq!(buf.len(), fields.encoded_len());

        let decoded = read_all(&buf).unwrap();
        assert_eq!(decoded, fields);
        assert_eq!(
            decoded.iter().map(|f| f.value.wire_type()).collect::<Vec<_>>(),
            vec![
                WireType::Varint,
                WireType::SixtyFourBit,
                WireType::LengthDelimited,
                WireType::ThirtyTwoBit,
                WireType::Varint,
            ]
        );
    }

    #[test]
    fn keeps_groups() {
        // Group 20 holding tag 1 varint 5 and a nested group 21 holding tag 2 "x".
        let buf = [
            0xa3, 0x01, 0x08, 0x05, 0xab, 0x01, 0x12, 0x01, b'x', 0xac, 0x01, 0xa4, 0x01,
        ];
        let fields = read_all(&buf).unwrap();
        assert_eq!(fields.len(), 1);

        let mut nested = UnknownFields::default();
        nested.push(2, UnknownValue::LengthDelimited(Bytes::from_static(b"x")));
        let mut group = UnknownFields::default();
        group.push(1, UnknownValue::Varint(5));
        group.push(21, UnknownValue::Group(nested));
        let mut expected = UnknownFields::default();
        expected.push(20, UnknownValue::Group(group));
        assert_eq!(fields, expected);

        let mut encoded = Vec::new();
        fields.encode_raw(&mut encoded);
        assert_eq!(encoded, buf);
        assert_eq!(fields.encoded_len(), buf.len());
    }

    #[test]
    fn rejects_unbalanced_groups() {
        // Group 20 closed by an end-group key for tag 21.
        assert!(read_all(&[0xa3, 0x01, 0xac, 0x01]).is_err());
        // Group 20 never closed.
        assert!(read_all(&[0xa3, 0x01, 0x08, 0x05]).is_err());
        // End-group key with no open group.
        assert!(read_all(&[0xa4, 0x01]).is_err());
    }

    #[test]
    fn rejects_truncated_payload() {
        // Tag 12, length-delimited, claims 5 bytes but carries 2.
        let buf = [0x62, 0x05, b'a', b'b'];
        assert!(read_all(&buf).is_err());
        // Tag 13, fixed32 with a single byte.
        let buf = [0x6d, 0x01];
        assert!(read_all(&buf).is_err());
    }
}
