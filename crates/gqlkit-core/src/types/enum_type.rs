#[derive(Debug)]
pub struct EnumType {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) values: Vec<String>,
}

impl EnumType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn has_value(&self, name: &str) -> bool {
        self.values.iter().any(|value| value == name)
    }
}
