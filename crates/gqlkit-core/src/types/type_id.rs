/// Index of a compiled type within its [`TypeGraph`](crate::types::TypeGraph).
///
/// Every distinct declared type compiles to exactly one [`TypeId`], so two
/// references to the same type compare equal by id.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    pub fn index(&self) -> usize {
        self.0
    }
}
