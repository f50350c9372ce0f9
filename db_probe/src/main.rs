/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use futures::FutureExt;
use log::info;
use env_config_parse::{load_env_file, ProcessEnv};
use rdb::{ConnectionSpec, DbContext, DbError};
use sea_orm::{ConnectionTrait, Statement};

const PROBE_SQL: &str = "SELECT 1";

#[derive(Parser, Debug)]
#[clap(author, version, about = "Resolve and check the employees database connection", long_about = None)]
struct Cli {
    /// Dotenv file to load instead of the default .env lookup
    #[clap(long)]
    env_file: Option<PathBuf>,

    /// log4rs YAML logging configuration
    #[clap(long)]
    log_config: Option<PathBuf>,

    /// Create the engine and run a probe statement in a scoped session
    #[clap(long)]
    connect: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.log_config {
        Some(path) => common_log::init_with_yaml(path),
        None => common_log::init(),
    }
    .context("logging setup failed")?;

    let spec = match &cli.env_file {
        Some(path) => {
            load_env_file(path).map_err(anyhow::Error::msg)?;
            rdb::resolve(&ProcessEnv)?
        }
        None => ConnectionSpec::from_env()?,
    };
    println!("{}", spec.redacted());
    if !cli.connect {
        return Ok(());
    }

    let sessions = rdb::connect(&spec).await?;
    let context = DbContext::new(spec, sessions);
    let checked = probe(&context).await;
    context.shutdown().await?;
    checked?;
    println!("ok");
    Ok(())
}

async fn probe(context: &DbContext) -> Result<(), DbError> {
    context
        .with_session(|session| {
            async move {
                let txn = session.transaction()?;
                let backend = txn.get_database_backend();
                txn.execute(Statement::from_string(backend, PROBE_SQL)).await?;
                info!("probe statement succeeded");
                Ok::<(), DbError>(())
            }
            .boxed()
        })
        .await
}
