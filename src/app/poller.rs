// Copyright 2024-2025 rotary-panel contributors
// This file is part of rotary-panel.
// rotary-panel is licensed under the AGPL-3.0 license (see LICENSE file for details).

//! Background status polling

use std::time::Duration;

use itertools::Itertools;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::api::{DeviceApi, DeviceStatus, RequestFailed};
use crate::app::structs::{Indicator, PanelLayout};

pub type PollOutcome = Result<DeviceStatus, RequestFailed>;

/// Poll `GET /api/status` every `period`, starting immediately, and forward every outcome to `sender`.
///
/// Failed polls are forwarded like any other outcome and polling carries on. The task only
/// ends once the receiving side of `sender` is gone. Must be called from within a tokio runtime.
pub fn start(api: DeviceApi, period: Duration, sender: UnboundedSender<PollOutcome>) -> JoinHandle<()> {
    info!("polling {} every {}ms", api.base_url(), period.as_millis());
    tokio::spawn(poll_forever(api, period, sender))
}

async fn poll_forever(api: DeviceApi, period: Duration, sender: UnboundedSender<PollOutcome>) {
    let mut ticker = time::interval(period);
    // a slow controller shouldn't get a burst of catch-up polls
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let outcome = api.status().await;

        match &outcome {
            Ok(status) => trace!("status: {status}, sensors: [{}]", active_sensors(status)),
            Err(e) => debug!("status poll failed: {e}"),
        }

        if sender.send(outcome).is_err() {
            info!("status receiver closed; stopping poller");
            break;
        }
    }
}

fn active_sensors(status: &DeviceStatus) -> String {
    Indicator::for_layout(PanelLayout::RotarySlider)
        .iter()
        .filter(|indicator| indicator.read(status))
        .map(|indicator| indicator.label())
        .join(", ")
}
