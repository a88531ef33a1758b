//! Line-oriented console frontend.
//!
//! Reads commands from standard input, forwards them to the backend over the
//! bridge and prints whatever the backend pushes back.

use anyhow::anyhow;
use luxe_bridge::{MessageFromBackend, MessageToBackend};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::console::{Console, Outcome};

pub mod command;
pub mod console;
pub mod formatting;
pub mod render;

#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    pub async fn send(&self, message: MessageToBackend) -> anyhow::Result<()> {
        self.to_backend
            .send(message)
            .await
            .map_err(|_| anyhow!("the backend has stopped"))
    }

    pub async fn request_config(&self) -> anyhow::Result<()> {
        self.send(MessageToBackend::ConfigurationRequest).await
    }
}

async fn console_loop(
    mut rx: mpsc::Receiver<MessageFromBackend>,
    bridge: BackendBridge,
) -> anyhow::Result<()> {
    let mut console = Console::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    bridge.request_config().await?;
    println!("{}", render::HELP);

    loop {
        tokio::select! {
            message = rx.recv() => {
                let Some(message) = message else {
                    log::warn!("Backend closed the bridge");
                    break;
                };
                println!("{}", console.receive(message));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                match console.apply(command) {
                    Outcome::Send(messages) => {
                        for message in messages {
                            bridge.send(message).await?;
                        }
                    }
                    Outcome::Print(text) => println!("{text}"),
                    Outcome::Quit => break,
                }
            }
        }
    }

    Ok(())
}

pub fn run(
    rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let bridge = BackendBridge { to_backend: tx };
    let result = runtime.block_on(console_loop(rx, bridge));
    // a pending stdin read would otherwise hold up shutdown
    runtime.shutdown_background();
    result
}
