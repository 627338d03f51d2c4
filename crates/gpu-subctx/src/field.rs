//! Bitfield descriptors for hardware words.
//!
//! A register word is described as a list of [`FieldSpec`]s, each pairing a [`Field`] (name, shift,
//! width) with the source of its value: either a constant or a function of some input. [`pack`]
//! folds the list into the final word. Keeping the layout as data lets the encodings be tested
//! without any device I/O.

/// Position of a bitfield in a 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub shift: u32,
    pub width: u32,
}

impl Field {
    pub const fn new(name: &'static str, shift: u32, width: u32) -> Self {
        assert!(width > 0 && shift + width <= 32, "field does not fit in a u32");
        Self { name, shift, width }
    }

    /// Mask of the field's value before shifting.
    pub const fn value_mask(&self) -> u32 {
        if self.width == 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Mask of the field's bits within the word.
    pub const fn mask(&self) -> u32 {
        self.value_mask() << self.shift
    }

    /// Place `value` in the field. Bits above the field width are discarded.
    pub const fn encode(&self, value: u32) -> u32 {
        (value & self.value_mask()) << self.shift
    }

    pub const fn decode(&self, word: u32) -> u32 {
        (word >> self.shift) & self.value_mask()
    }
}

/// Where a field's value comes from.
pub enum Source<I> {
    Fixed(u32),
    Computed(fn(&I) -> u32),
}

pub struct FieldSpec<I> {
    pub field: Field,
    pub source: Source<I>,
}

impl<I> FieldSpec<I> {
    pub const fn fixed(field: Field, value: u32) -> Self {
        Self {
            field,
            source: Source::Fixed(value),
        }
    }

    pub const fn computed(field: Field, f: fn(&I) -> u32) -> Self {
        Self {
            field,
            source: Source::Computed(f),
        }
    }

    pub fn value(&self, input: &I) -> u32 {
        match self.source {
            Source::Fixed(v) => v,
            Source::Computed(f) => f(input),
        }
    }
}

/// Combine `specs` into a single word for `input`.
pub fn pack<I>(specs: &[FieldSpec<I>], input: &I) -> u32 {
    specs
        .iter()
        .fold(0, |word, spec| word | spec.field.encode(spec.value(input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW: Field = Field::new("low", 0, 4);
    const FLAG: Field = Field::new("flag", 7, 1);
    const HIGH: Field = Field::new("high", 12, 20);

    fn high_from_input(v: &u32) -> u32 {
        *v
    }

    const SPECS: [FieldSpec<u32>; 3] = [
        FieldSpec::fixed(LOW, 0x5),
        FieldSpec::fixed(FLAG, 1),
        FieldSpec::computed(HIGH, high_from_input),
    ];

    #[test]
    fn masks() {
        assert_eq!(LOW.mask(), 0x0000_000F);
        assert_eq!(FLAG.mask(), 0x0000_0080);
        assert_eq!(HIGH.mask(), 0xFFFF_F000);
        assert_eq!(Field::new("all", 0, 32).mask(), u32::MAX);
    }

    #[test]
    fn encode_truncates_to_width() {
        assert_eq!(LOW.encode(0x1F), 0xF);
        assert_eq!(FLAG.encode(3), 0x80);
        assert_eq!(HIGH.encode(0x123456), 0x2345_6000);
    }

    #[test]
    fn pack_combines_fixed_and_dynamic_fields() {
        let word = pack(&SPECS, &0xABCDE);
        assert_eq!(word, 0xABCD_E085);
        assert_eq!(LOW.decode(word), 0x5);
        assert_eq!(FLAG.decode(word), 1);
        assert_eq!(HIGH.decode(word), 0xABCDE);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fields_round_trip_independently(input in any::<u32>()) {
                let word = pack(&SPECS, &input);
                prop_assert_eq!(HIGH.decode(word), input & HIGH.value_mask());
                prop_assert_eq!(word & !(LOW.mask() | FLAG.mask() | HIGH.mask()), 0);
            }
        }
    }
}
