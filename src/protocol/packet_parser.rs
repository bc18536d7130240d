use crate::error::{AppError, Result};
use crate::protocol::message_types::WireMessage;

pub struct PacketParser;

impl PacketParser {
    pub fn parse_message(data: &[u8]) -> Result<WireMessage> {
        let message: WireMessage = serde_json::from_slice(data)?;
        Ok(message)
    }

    pub fn serialize_message(message: &WireMessage) -> Result<Vec<u8>> {
        serde_json::to_vec(message).map_err(AppError::from)
    }

    pub fn validate_message(message: &WireMessage) -> bool {
        match message {
            WireMessage::Advertisement { destination, .. } => !destination.as_str().is_empty(),
            WireMessage::Data(packet) => !packet.destination.as_str().is_empty(),
            WireMessage::Control { command } => !command.trim().is_empty(),
            WireMessage::ControlResponse { .. } => true,
        }
    }
}
