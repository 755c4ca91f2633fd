#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Project {
    pub key: String,
    pub name: String,
}

impl Project {
    pub fn new(key: impl ToString, name: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
        }
    }
}
