//! Type formatting for traces and error messages.

use crate::{Idx, Pool, Tag};

impl Pool {
    /// Format a type as a human-readable string.
    pub fn format_type(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, idx: Idx, buf: &mut String) {
        if idx.is_none() {
            buf.push_str("<none>");
            return;
        }
        let tag = self.tag(idx);
        match tag {
            Tag::Bool
            | Tag::Int
            | Tag::Int8
            | Tag::Int16
            | Tag::Int32
            | Tag::Int64
            | Tag::Uint
            | Tag::Uint8
            | Tag::Uint16
            | Tag::Uint32
            | Tag::Uint64
            | Tag::Float32
            | Tag::Float64
            | Tag::Str
            | Tag::Bytes
            | Tag::Dyn => buf.push_str(tag.name()),

            Tag::Indirect => {
                buf.push('*');
                self.format_type_into(Idx::from_raw(self.data(idx)), buf);
            }
            Tag::Sequence => {
                buf.push_str("[]");
                self.format_type_into(Idx::from_raw(self.data(idx)), buf);
            }
            Tag::Mapping => {
                let (key, value) = self.mapping_parts(idx);
                buf.push_str("map[");
                self.format_type_into(key, buf);
                buf.push(']');
                self.format_type_into(value, buf);
            }

            Tag::Record => {
                let slot = self.data(idx) as usize;
                buf.push_str(&self.records[slot].name);
            }
            Tag::Named => {
                let slot = self.data(idx) as usize;
                buf.push_str(&self.named[slot].name);
            }
            Tag::Opaque => {
                let slot = self.data(idx) as usize;
                buf.push_str(&self.opaques[slot].name);
            }
        }
    }
}
