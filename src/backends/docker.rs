use anyhow::{anyhow, Context, Result};
use log::debug;
use std::{path::PathBuf, process::Command};

use crate::{
    models::{ContainerId, ContainerSpec, ImageBuildSpec},
    services::ContainerBackend,
};

/// Drives the runtime through its command-line interface. Build and start
/// run with inherited standard streams so the operator sees the build log
/// and gets an attached terminal; create and rm run captured.
pub struct DockerBackend {
    program: PathBuf,
}

impl DockerBackend {
    pub fn new() -> DockerBackend {
        DockerBackend::with_program("docker")
    }

    /// Points the backend at another runtime binary, e.g. a podman drop-in
    /// or a recording stand-in under test.
    pub fn with_program<P: Into<PathBuf>>(program: P) -> DockerBackend {
        DockerBackend {
            program: program.into(),
        }
    }

    fn command(&self, args: &[String]) -> Command {
        debug!("{} {}", self.program.display(), args.join(" "));

        let mut command = Command::new(&self.program);
        command.args(args);
        command
    }

    fn spawn_failure(&self) -> String {
        format!(
            "failed to invoke {}, is it installed and on PATH?",
            self.program.display()
        )
    }
}

fn build_args(spec: &ImageBuildSpec) -> Vec<String> {
    let mut args = vec!["build".to_string()];

    if spec.pull {
        args.push("--pull".into());
    }

    for (key, value) in spec.build_args.iter() {
        args.push("--build-arg".into());
        args.push(format!("{}={}", key, value));
    }

    args.push("--tag".into());
    args.push(spec.name.0.clone());
    args.push(spec.context.display().to_string());

    args
}

fn create_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec!["create".to_string()];

    if spec.interactive {
        args.push("--interactive".into());
    }
    if spec.tty {
        args.push("--tty".into());
    }
    if spec.privileged {
        args.push("--privileged".into());
    }
    for mount in spec.mounts.iter() {
        args.push("--volume".into());
        args.push(format!(
            "{}:{}",
            mount.host_path.display(),
            mount.container_path.display()
        ));
    }

    args.push("--name".into());
    args.push(spec.name.0.clone());
    args.push(spec.image_name.0.clone());

    args
}

fn start_args(name: &str) -> Vec<String> {
    vec![
        "start".to_string(),
        "--attach".into(),
        "--interactive".into(),
        name.into(),
    ]
}

fn remove_args(name: &str) -> Vec<String> {
    vec!["rm".to_string(), name.into()]
}

impl ContainerBackend for DockerBackend {
    fn build_image(&mut self, image_spec: ImageBuildSpec) -> Result<()> {
        let status = self
            .command(&build_args(&image_spec))
            .status()
            .with_context(|| self.spawn_failure())?;

        if !status.success() {
            return Err(anyhow!("docker build exited with {}", status));
        }

        Ok(())
    }

    fn create_container(&mut self, container_spec: ContainerSpec) -> Result<ContainerId> {
        let output = self
            .command(&create_args(&container_spec))
            .output()
            .with_context(|| self.spawn_failure())?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "docker create exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(anyhow!("docker create did not report a container id"));
        }

        Ok(ContainerId(id))
    }

    fn start_container(&mut self, name: &str) -> Result<i32> {
        let status = self
            .command(&start_args(name))
            .status()
            .with_context(|| self.spawn_failure())?;

        // A signal-killed child carries no exit code; map it to -1
        // (process exit status 255) so the failure stays visible.
        Ok(status.code().unwrap_or(-1))
    }

    fn remove_container(&mut self, name: &str) -> Result<()> {
        let output = self
            .command(&remove_args(name))
            .output()
            .with_context(|| self.spawn_failure())?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "docker rm exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        Ok(())
    }
}
