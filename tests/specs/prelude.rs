// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for the behavioral specs

pub use rc_adapters::{FakeGatewayAdapter, GatewayCall};
pub use rc_core::{Command, FakeClock, Holder, Reply, ResourceCode};
pub use rc_engine::{RecoveryReport, Runtime, RuntimeConfig, RuntimeError};
pub use rc_storage::SnapshotStore;

use std::time::Duration;
use tempfile::TempDir;

pub fn alice() -> Holder {
    Holder::new("u1", "Alice")
}

pub fn bob() -> Holder {
    Holder::new("u2", "Bob")
}

pub fn carol() -> Holder {
    Holder::new("u3", "Carol")
}

pub fn code(s: &str) -> ResourceCode {
    ResourceCode::new(s)
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        reconnect_delay: Duration::from_millis(1),
        ..RuntimeConfig::default()
    }
}

/// One running engine with fake time, a fake gateway, and a real snapshot dir
pub struct World {
    pub runtime: Runtime<FakeGatewayAdapter, FakeClock>,
    pub gateway: FakeGatewayAdapter,
    pub clock: FakeClock,
    pub dir: TempDir,
}

impl World {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let clock = FakeClock::new();
        let gateway = FakeGatewayAdapter::new();
        let store = SnapshotStore::open(dir.path()).unwrap();
        Self {
            runtime: Runtime::new(gateway.clone(), store, clock.clone(), config()),
            gateway,
            clock,
            dir,
        }
    }

    pub async fn run(&self, holder: &Holder, command: Command) -> Result<Reply, RuntimeError> {
        self.runtime.handle(holder, command).await
    }

    pub async fn claim(
        &self,
        holder: &Holder,
        resource: &str,
        duration: Option<&str>,
    ) -> Result<Reply, RuntimeError> {
        self.run(
            holder,
            Command::Claim {
                resource: code(resource),
                duration: duration.map(str::to_string),
            },
        )
        .await
    }

    pub async fn enqueue(
        &self,
        holder: &Holder,
        resource: &str,
        duration: Option<&str>,
    ) -> Result<Reply, RuntimeError> {
        self.run(
            holder,
            Command::Enqueue {
                resource: code(resource),
                duration: duration.map(str::to_string),
            },
        )
        .await
    }

    pub async fn release(&self, holder: &Holder, resource: &str) -> Result<Reply, RuntimeError> {
        self.run(
            holder,
            Command::Release {
                resource: code(resource),
            },
        )
        .await
    }

    pub async fn accept(&self, holder: &Holder) -> Result<Reply, RuntimeError> {
        self.run(holder, Command::AcceptOffer).await
    }

    /// Let `minutes` countdown minutes pass, firing timers after each
    pub async fn pass_minutes(&self, minutes: u64) {
        for _ in 0..minutes {
            self.clock.advance_minutes(1);
            self.runtime.tick().await;
        }
    }

    pub fn board(&self) -> String {
        self.runtime.board()
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::open(self.dir.path()).unwrap()
    }

    /// Drop the runtime without a shutdown, stay down for `minutes`, and
    /// start a fresh runtime on the same snapshot directory
    pub async fn crash_and_restart(self, minutes: u64) -> (World, RecoveryReport) {
        let World {
            runtime,
            gateway,
            clock,
            dir,
        } = self;
        drop(runtime);
        Self::boot(gateway, clock, dir, minutes).await
    }

    /// Like `crash_and_restart`, but with an orderly shutdown first
    pub async fn shutdown_and_restart(self, minutes: u64) -> (World, RecoveryReport) {
        self.runtime.shutdown().await;
        let World {
            gateway,
            clock,
            dir,
            ..
        } = self;
        Self::boot(gateway, clock, dir, minutes).await
    }

    async fn boot(
        gateway: FakeGatewayAdapter,
        clock: FakeClock,
        dir: TempDir,
        downtime_minutes: u64,
    ) -> (World, RecoveryReport) {
        clock.advance_minutes(downtime_minutes);
        gateway.clear_calls();
        let store = SnapshotStore::open(dir.path()).unwrap();
        let runtime = Runtime::new(gateway.clone(), store, clock.clone(), config());
        let report = runtime.recover().await;
        (
            World {
                runtime,
                gateway,
                clock,
                dir,
            },
            report,
        )
    }
}

/// Extract the remaining minutes from a `Claimed` reply
pub fn claimed_minutes(reply: &Reply) -> u32 {
    match reply {
        Reply::Claimed { claim, .. } => claim.remaining_minutes,
        other => panic!("expected Claimed, got {:?}", other),
    }
}

pub fn rejection_kind(result: Result<Reply, RuntimeError>) -> &'static str {
    match result {
        Ok(reply) => panic!("expected rejection, got {:?}", reply),
        Err(e) => e.kind(),
    }
}
