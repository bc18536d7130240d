// Messages échangés sur le réseau par le démon

pub mod message_types;
pub mod packet_parser;

pub use message_types::WireMessage;
pub use packet_parser::PacketParser;
