// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use clap::Parser;

use crate::{error::Result, presence::Header};

use super::Context;

/// Forget the stored session.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let mut header = Header::new(
            Arc::clone(&ctx.store),
            Arc::clone(&ctx.backend),
            Arc::clone(&ctx.shell),
        );
        header.logout().await;
        println!("Signed out");
        Ok(())
    }
}
