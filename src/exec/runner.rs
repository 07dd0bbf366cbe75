// src/exec/runner.rs

//! Runs one build invocation to completion.

use std::process::{Output, Stdio};

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::engine::{BuildRequest, Trigger};
use crate::exec::args::substitute_args;
use crate::exec::report::{announce_line, format_build_error, Console, SUCCESS_LINE};

/// Status reported when the build command could not be started at all.
pub const SPAWN_FAILURE_STATUS: i32 = -1;

/// Everything observed about a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    pub trigger: Trigger,
    pub command: String,
    pub args: Vec<String>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: i32,
}

impl BuildInvocation {
    pub fn succeeded(&self) -> bool {
        self.status == 0
    }
}

/// Run the profile's build command for `request.trigger`.
///
/// - Announces the build on the console before spawning.
/// - Child stdin is closed; stdout and stderr are captured in full.
/// - Nothing from the child is printed until it exits; then either the
///   success line or a complete error block is written.
/// - A spawn failure is reported like a failed build with status `-1`
///   and the error text in place of stderr.
pub async fn run_build(request: &BuildRequest, console: &Console) -> BuildInvocation {
    let profile = &request.profile;
    let args = substitute_args(&profile.build_args, &request.trigger.label());

    console.line(&announce_line(&request.trigger, &profile.build_command));

    let mut invocation = BuildInvocation {
        trigger: request.trigger.clone(),
        command: profile.build_command.clone(),
        args,
        stdout: Vec::new(),
        stderr: Vec::new(),
        status: SPAWN_FAILURE_STATUS,
    };

    match capture_output(&invocation.command, &invocation.args).await {
        Ok(output) => {
            invocation.status = output.status.code().unwrap_or(SPAWN_FAILURE_STATUS);
            invocation.stdout = output.stdout;
            invocation.stderr = output.stderr;
        }
        Err(err) => {
            error!(
                profile = profile.index,
                trigger = %request.trigger,
                command = %invocation.command,
                error = %err,
                "build command could not be run"
            );
            invocation.stderr = format!("{err:#}\n").into_bytes();
        }
    }

    info!(
        profile = profile.index,
        trigger = %invocation.trigger,
        exit_code = invocation.status,
        success = invocation.succeeded(),
        "build finished"
    );

    report(&invocation, console);
    invocation
}

async fn capture_output(command: &str, args: &[String]) -> Result<Output> {
    debug!(command, ?args, "spawning build process");

    let child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning build command '{command}'"))?;

    child
        .wait_with_output()
        .await
        .with_context(|| format!("waiting for build command '{command}'"))
}

fn report(invocation: &BuildInvocation, console: &Console) {
    if invocation.succeeded() {
        console.line(SUCCESS_LINE);
    } else {
        console.block(&format_build_error(
            invocation.status,
            &invocation.stdout,
            &invocation.stderr,
        ));
    }
}
