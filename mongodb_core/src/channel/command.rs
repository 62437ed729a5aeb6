use crate::document::Document;

/// A command document addressed to one database.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub database: String,
    pub body: Document,
}

impl Command {
    pub fn new(database: impl Into<String>, body: Document) -> Self {
        Self {
            database: database.into(),
            body,
        }
    }

    /// The command's name, which is the first key of its body.
    pub fn name(&self) -> Option<&str> {
        self.body.keys().next().map(String::as_str)
    }
}
