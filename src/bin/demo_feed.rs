// src/bin/demo_feed.rs
//
// Feeds the viewer with snapshots of a small random-walk world over OSC

use std::thread;
use std::time::Duration;

use tilevis::{
    config::Config, controllers::OscSender, services::DemoWorld, utilities::init_tracing,
    views::DEFAULT_BACKGROUND,
};

fn main() {
    init_tracing();

    let config = Config::load_or_default();
    let sender = match OscSender::new(&config.osc.target_host, config.osc.rx_port) {
        Ok(sender) => sender,
        Err(e) => {
            tracing::error!(error = %e, "failed to create OSC sender");
            std::process::exit(1);
        }
    };

    tracing::info!(
        target = %config.osc.target_host,
        port = config.osc.rx_port,
        tick_ms = config.demo.tick_ms,
        "starting demo feed"
    );

    let mut world = DemoWorld::new(config.demo.seed);
    sender.send_reset();
    sender.send_background(DEFAULT_BACKGROUND, None);

    let tick = Duration::from_millis(config.demo.tick_ms);
    loop {
        sender.send_state(&world.snapshot_json());
        tracing::debug!(tick = world.tick, "sent snapshot");
        thread::sleep(tick);
        world.step();
    }
}
