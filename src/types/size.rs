use crate::{
    error::{Message, ReportingContext},
    types::{ArrayLength, TypeContext, TypeId},
};

impl TypeContext {
    /// Compute the element count of an array rank. `ty` must be an array
    /// with at least `level + 1` ranks, and the rank at `level` must have a
    /// fixed length.
    ///
    /// On failure an error is reported to `cc` and 0 is returned.
    pub fn compute_size_of_type(
        &self,
        cc: &mut dyn ReportingContext,
        ty: TypeId,
        level: usize,
    ) -> u32 {
        let Some(mut array) = self.as_array(ty) else {
            cc.report(self, Message::SizeofNeedsArray { ty });
            return 0;
        };

        for _ in 0..level {
            match self.as_array(array.contained()) {
                Some(inner) => array = inner,
                None => {
                    cc.report(self, Message::SizeofInvalidRank { ty, level });
                    return 0;
                }
            }
        }

        match array.length() {
            ArrayLength::Fixed(n) => n,
            ArrayLength::Unsized | ArrayLength::Indeterminate => {
                cc.report(self, Message::SizeofIndeterminate { ty, level });
                0
            }
        }
    }
}
