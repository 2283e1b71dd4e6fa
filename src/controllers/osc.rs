// src/controllers/osc.rs
// OSC Controller: snapshot ingress for the viewer and the matching sender

use nannou_osc as osc;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum WorldCommand {
    /// A full world snapshot as JSON, validated by the receiver of the command
    State { json: String },
    Background {
        colour: String,
        image: Option<String>,
    },
    /// The simulation restarted, forget tick history
    Reset,
}

pub struct OscController {
    command_queue: Vec<WorldCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16, mtu: usize) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::Receiver::bind_with_mtu(port, mtu)?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    /// Drains everything received since the last call without blocking.
    pub fn process_messages(&mut self) {
        for (packet, addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message) {
                    Some(command) => self.command_queue.push(command),
                    None => tracing::warn!(
                        from = %addr,
                        addr = %message.addr,
                        args = message.args.len(),
                        "ignoring unrecognised OSC message"
                    ),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<WorldCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub fn parse_message(message: &osc::Message) -> Option<WorldCommand> {
    match message.addr.as_str() {
        "/world/state" => {
            if let [osc::Type::String(json)] = &message.args[..] {
                return Some(WorldCommand::State { json: json.clone() });
            }
        }
        "/world/background" => match &message.args[..] {
            [osc::Type::String(colour)] => {
                return Some(WorldCommand::Background {
                    colour: colour.clone(),
                    image: None,
                });
            }
            [osc::Type::String(colour), osc::Type::String(image)] => {
                return Some(WorldCommand::Background {
                    colour: colour.clone(),
                    image: Some(image.clone()),
                });
            }
            _ => (),
        },
        "/world/reset" => {
            if message.args.is_empty() {
                return Some(WorldCommand::Reset);
            }
        }
        _ => (),
    }
    None
}

pub struct OscSender {
    sender: osc::Sender,
    target_addr: String,
    target_port: u16,
}

impl OscSender {
    pub fn new(target_addr: &str, target_port: u16) -> Result<Self, Box<dyn Error>> {
        let sender = osc::sender()?;

        Ok(Self {
            sender,
            target_addr: target_addr.to_string(),
            target_port,
        })
    }

    pub fn send_state(&self, json: &str) {
        self.send("/world/state", vec![osc::Type::String(json.to_string())]);
    }

    pub fn send_background(&self, colour: &str, image: Option<&str>) {
        let mut args = vec![osc::Type::String(colour.to_string())];
        if let Some(image) = image {
            args.push(osc::Type::String(image.to_string()));
        }
        self.send("/world/background", args);
    }

    pub fn send_reset(&self) {
        self.send("/world/reset", Vec::new());
    }

    fn send(&self, addr: &str, args: Vec<osc::Type>) {
        let target = (self.target_addr.as_str(), self.target_port);
        if let Err(e) = self.sender.send((addr.to_string(), args), target) {
            tracing::warn!(addr, error = %e, "failed to send OSC message");
        }
    }
}
