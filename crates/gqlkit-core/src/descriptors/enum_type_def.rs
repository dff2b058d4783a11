#[derive(Clone, Debug, Default)]
pub struct EnumTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<String>,
}

impl EnumTypeDef {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
