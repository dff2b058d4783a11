use crate::descriptors::FieldDef;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectKind {
    /// A concrete type; runtime values carry its name.
    Object,

    /// An open type other object types implement.
    Interface,
}

/// An object or interface type.
///
/// An object implementing an interface inherits every interface field it
/// does not declare itself.
#[derive(Clone, Debug)]
pub struct ObjectTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub kind: ObjectKind,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDef>,
}

impl ObjectTypeDef {
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Object)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Interface)
    }

    fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            interfaces: vec![],
            fields: vec![],
        }
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
