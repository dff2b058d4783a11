#[derive(Clone, Debug, Default)]
pub struct UnionTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
}

impl UnionTypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn member(mut self, type_name: impl Into<String>) -> Self {
        self.members.push(type_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
