// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local gateway: the board goes to a file, messages go to the log

use super::{GatewayAdapter, GatewayError};
use async_trait::async_trait;
use rc_core::HolderId;
use std::path::{Path, PathBuf};

/// Gateway that renders the board into a file on disk.
///
/// Private messages and pokes are written as log lines.
#[derive(Clone, Debug)]
pub struct LogGateway {
    board_path: PathBuf,
}

impl LogGateway {
    pub fn new(board_path: impl Into<PathBuf>) -> Self {
        Self {
            board_path: board_path.into(),
        }
    }

    pub fn board_path(&self) -> &Path {
        &self.board_path
    }
}

#[async_trait]
impl GatewayAdapter for LogGateway {
    async fn connect(&self) -> Result<(), GatewayError> {
        if let Some(parent) = self.board_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn publish_board(&self, text: &str) -> Result<(), GatewayError> {
        let tmp = self.board_path.with_extension("tmp");
        tokio::fs::write(&tmp, format!("{}\n", text)).await?;
        tokio::fs::rename(&tmp, &self.board_path).await?;
        Ok(())
    }

    async fn send_message(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError> {
        tracing::info!(%holder, text, "private message");
        Ok(())
    }

    async fn poke(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError> {
        tracing::info!(%holder, text, "poke");
        Ok(())
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
