use crate::descriptors::Resolver;
use crate::descriptors::TypeAnnotation;

/// Where a field's value comes from.
#[derive(Clone, Debug)]
pub enum FieldSource {
    /// The parent object's entry with the same name as the field.
    Property(TypeAnnotation),

    /// A resolver invoked with the parent object.
    Resolver(Resolver),
}

#[derive(Clone, Debug)]
pub struct FieldDef {
    pub name: String,
    pub description: Option<String>,
    pub source: FieldSource,
}

impl FieldDef {
    pub fn property(name: impl Into<String>, type_annotation: TypeAnnotation) -> Self {
        Self {
            name: name.into(),
            description: None,
            source: FieldSource::Property(type_annotation),
        }
    }

    pub fn resolver(name: impl Into<String>, resolver: Resolver) -> Self {
        Self {
            name: name.into(),
            description: None,
            source: FieldSource::Resolver(resolver),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn return_type(&self) -> &TypeAnnotation {
        match &self.source {
            FieldSource::Property(annot) => annot,
            FieldSource::Resolver(resolver) => resolver.return_type(),
        }
    }
}
