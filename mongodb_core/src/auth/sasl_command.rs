use serde_json::Value;

use crate::{
    channel::Command,
    document::{Binary, Document},
};

/// The two commands of a SASL conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum SaslCommand {
    Start {
        mechanism: String,
        payload: Vec<u8>,
    },
    Continue {
        conversation_id: i32,
        payload: Vec<u8>,
    },
}

impl SaslCommand {
    /// The command body. The command name must stay the first key.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        match self {
            SaslCommand::Start { mechanism, payload } => {
                doc.insert("saslStart".to_string(), Value::from(1));
                doc.insert("mechanism".to_string(), Value::from(mechanism.as_str()));
                doc.insert("payload".to_string(), Binary::from(payload.as_slice()).to_value());
            }
            SaslCommand::Continue {
                conversation_id,
                payload,
            } => {
                doc.insert("saslContinue".to_string(), Value::from(1));
                doc.insert("conversationId".to_string(), Value::from(*conversation_id));
                doc.insert("payload".to_string(), Binary::from(payload.as_slice()).to_value());
            }
        }
        doc
    }

    pub fn to_command(&self, database: &str) -> Command {
        Command::new(database, self.to_document())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use serde_json::json;

    use super::SaslCommand;

    #[test]
    fn start_command_has_expected_shape() {
        // Arrange
        let command = SaslCommand::Start {
            mechanism: "SCRAM-SHA-1".to_string(),
            payload: vec![1, 2, 3],
        };

        // Act
        let command = command.to_command("admin");

        // Assert
        assert_eq!(command.database, "admin");
        assert_eq!(command.name(), Some("saslStart"));
        let keys = command.body.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["saslStart", "mechanism", "payload"]);
        assert_eq!(command.body["saslStart"], json!(1));
        assert_eq!(command.body["mechanism"], json!("SCRAM-SHA-1"));
        assert_eq!(
            command.body["payload"],
            json!({ "$binary": { "base64": "AQID", "subType": "00" } })
        );
    }

    #[test]
    fn continue_command_has_expected_shape() {
        let command = SaslCommand::Continue {
            conversation_id: 42,
            payload: Vec::new(),
        }
        .to_command("test");

        let keys = command.body.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["saslContinue", "conversationId", "payload"]);
        assert_eq!(command.body["conversationId"], json!(42));
        assert_eq!(command.database, "test");
    }
}
