use bitflags::bitflags;

bitflags! {
    /// Qualifiers attached to a type through a Qualifier wrapper.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Qualifiers: u32 {
        /// Storage and mutability is constant.
        const CONST = 0x1;
    }
}

impl Qualifiers {
    pub fn is_const(self) -> bool {
        self.contains(Qualifiers::CONST)
    }
}
