use std::env;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use dv_router::protocol::{PacketParser, WireMessage};

fn help(program: &str) {
    eprintln!("Usage: {} <ip:port> <command>", program);
    eprintln!("Commandes disponibles:");
    eprintln!("  routing-table  - Affiche la table de routage");
    eprintln!("  links          - Affiche l'état des liens");
    eprintln!("  config         - Affiche la politique de routage");
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        help(&args[0]);
        std::process::exit(1);
    }
    let addr: SocketAddr = match args[1].parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Adresse invalide {}: {}", args[1], e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(addr, &args[2]) {
        eprintln!("Erreur: {}", e);
        std::process::exit(1);
    }
}

fn run(addr: SocketAddr, command: &str) -> Result<(), Box<dyn std::error::Error>> {
    let message = WireMessage::Control {
        command: command.to_string(),
    };
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_read_timeout(Some(Duration::from_secs(3)))?;
    socket.send_to(&PacketParser::serialize_message(&message)?, addr)?;

    let mut buffer = [0; 65_535];
    let (size, _) = socket.recv_from(&mut buffer)?;
    match PacketParser::parse_message(&buffer[..size])? {
        WireMessage::ControlResponse { body } => println!("{}", body),
        other => eprintln!("Réponse inattendue: {:?}", other),
    }
    Ok(())
}
