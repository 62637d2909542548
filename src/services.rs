use anyhow::Result;

use crate::models::{ContainerId, ContainerSpec, ImageBuildSpec};

pub trait ContainerBackend {
    fn build_image(&mut self, image_spec: ImageBuildSpec) -> Result<()>;

    fn create_container(&mut self, container_spec: ContainerSpec) -> Result<ContainerId>;

    /// Starts the named container attached to the invoking terminal and
    /// blocks until it exits. Returns the container's exit code.
    fn start_container(&mut self, name: &str) -> Result<i32>;

    fn remove_container(&mut self, name: &str) -> Result<()>;
}
